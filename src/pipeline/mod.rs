//! Pipeline orchestration for CLI commands.
//!
//! Shared load → process → write logic, reducing duplication across the
//! `edit` and `merge` command handlers.

mod output;
mod parse;

pub use output::{serialize_document, write_document, OutputTarget};
pub use parse::{load_inputs, parse_document_with_context};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// An error occurred
    pub const ERROR: i32 = 1;
    /// The configuration failed validation
    pub const INVALID_CONFIG: i32 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::ERROR, 1);
        assert_eq!(exit_codes::INVALID_CONFIG, 2);
    }
}
