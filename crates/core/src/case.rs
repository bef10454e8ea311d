//! Identifier case conversion.

/// Converts `CamelCase` or `mixedCase` to `snake_case`.
///
/// An underscore goes before an uppercase letter that follows a lowercase
/// letter or digit, and before the last capital of an acronym run followed by
/// a lowercase letter (`HTTPServer` becomes `http_server`).
pub fn to_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// Converts `snake_case` to `CamelCase` (or `camelCase` when
/// `uppercase_first_letter` is false).
///
/// The first character and every character after a single `_` are
/// uppercased and the `_` dropped. A `__` pair is kept as is, a trailing `_`
/// is kept, and a leading lone `_` is dropped.
pub fn to_camel(s: &str, uppercase_first_letter: bool) -> String {
    let chars: Vec<char> = s.chars().collect();
    let Some(&first) = chars.first() else {
        return String::new();
    };

    if !uppercase_first_letter {
        let mut out: String = first.to_lowercase().collect();
        out.extend(to_camel(s, true).chars().skip(1));
        return out;
    }

    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    if first != '\n' {
        if first != '_' {
            out.extend(first.to_uppercase());
        }
        i = 1;
    }

    while i < chars.len() {
        let c = chars[i];
        match chars.get(i + 1) {
            Some(&next) if c == '_' && next != '\n' => {
                if next == '_' {
                    out.push_str("__");
                } else {
                    out.extend(next.to_uppercase());
                }
                i += 2;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake() {
        assert_eq!(to_snake("HTTPServerError"), "http_server_error");
        assert_eq!(to_snake("userID"), "user_id");
        assert_eq!(to_snake("LastLogin"), "last_login");
        assert_eq!(to_snake("version2Beta"), "version2_beta");
        assert_eq!(to_snake("already_snake"), "already_snake");
        assert_eq!(to_snake(""), "");
    }

    #[test]
    fn test_to_snake_lowercases_unicode() {
        assert_eq!(to_snake("ÄrgerLog"), "ärger_log");
        assert_eq!(to_snake("ÉTAT"), "état");
    }

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("user_id", true), "UserId");
        assert_eq!(to_camel("user_id", false), "userId");
        assert_eq!(to_camel("pre_last_login", false), "preLastLogin");
        assert_eq!(to_camel("Account", false), "account");
        assert_eq!(to_camel("", true), "");
        assert_eq!(to_camel("", false), "");
    }

    #[test]
    fn test_to_camel_underscore_runs() {
        assert_eq!(to_camel("a__b", true), "A__b");
        assert_eq!(to_camel("a___b", true), "A__B");
        assert_eq!(to_camel("trailing_", true), "Trailing_");
        assert_eq!(to_camel("_leading", true), "leading");
        assert_eq!(to_camel("__private", true), "Private");
        assert_eq!(to_camel("a__b", false), "a__b");
    }

    #[test]
    fn test_to_camel_unicode() {
        assert_eq!(to_camel("état_civil", true), "ÉtatCivil");
        assert_eq!(to_camel("Élan_vital", false), "élanVital");
    }
}
