pub use anstream::println as aprintln;

use dialoguer::Confirm;

use crate::error::{Result, XtaskError};

/// Tokyo Night color palette
pub mod colors {
    pub const RESET: &str = "\x1b[0m";

    pub const TKN_RED: &str = "\x1b[38;2;247;118;142m"; // #f7768e
    pub const TKN_GREEN: &str = "\x1b[38;2;158;206;106m"; // #9ece6a
    pub const TKN_YELLOW: &str = "\x1b[38;2;224;175;104m"; // #e0af68
    pub const TKN_BLUE: &str = "\x1b[38;2;122;162;247m"; // #7aa2f7
    pub const TKN_CYAN: &str = "\x1b[38;2;125;207;255m"; // #7dcfff
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

pub fn p_g(text: &str) -> String {
    paint(colors::TKN_GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(colors::TKN_RED, text)
}

pub fn p_y(text: &str) -> String {
    paint(colors::TKN_YELLOW, text)
}

pub fn p_b(text: &str) -> String {
    paint(colors::TKN_BLUE, text)
}

pub fn p_c(text: &str) -> String {
    paint(colors::TKN_CYAN, text)
}

/// Asks for confirmation unless `force` is set. A "no" cancels the command.
pub fn confirm(prompt: &str, default: bool, force: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| XtaskError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(XtaskError::UserCancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_wraps_with_reset() {
        assert_eq!(p_g("ok"), "\x1b[38;2;158;206;106mok\x1b[0m");
        assert!(p_r("no").ends_with(colors::RESET));
    }

    #[test]
    fn test_confirm_forced() {
        assert!(confirm("Apply?", false, true).is_ok());
    }
}
