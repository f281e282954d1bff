/// Exit codes for mdabbr
///
/// These exit codes allow scripts and CI jobs to tell a clean run from one
/// that found abbreviations or failed.
/// Success - The run completed (abbreviations may have been found)
pub const SUCCESS: i32 = 0;

/// Abbreviations found - Only returned with `--fail-on-match`
pub const MATCHES_FOUND: i32 = 1;

/// Tool error - Configuration error, file access error, or internal error
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{MATCHES_FOUND, SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with abbreviations found code (1)
    pub fn matches_found() -> ! {
        std::process::exit(MATCHES_FOUND);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }

    /// Exit with one of the codes above
    pub fn with_code(code: i32) -> ! {
        match code {
            SUCCESS => success(),
            MATCHES_FOUND => matches_found(),
            _ => tool_error(),
        }
    }
}
