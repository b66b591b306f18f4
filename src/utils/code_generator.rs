//! Short code generation and validation utilities.
//!
//! Code generation is a pluggable strategy so that tests can inject
//! deterministic sequences and exercise collision-retry behavior.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use serde_json::json;

/// Default length of generated short codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Reserved codes that cannot be used as short links.
///
/// These codes are reserved for system endpoints to prevent routing conflicts.
const RESERVED_CODES: &[&str] = &["api", "health", "stats"];

/// Strategy for producing candidate short codes.
///
/// A single `generate` call makes no uniqueness promise; the registry
/// retries against its current contents until the candidate is unique.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generates random alphanumeric short codes of a fixed length.
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: letters, digits, hyphens, underscores
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved system code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any validation rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < 4 || code.len() > 32 {
        return Err(AppError::bad_request(
            "Custom code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, hyphens, and underscores",
            json!({ "code": code }),
        ));
    }

    if code.starts_with('-') || code.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom code cannot start or end with a hyphen",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_configured_length() {
        let generator = RandomCodeGenerator::default();
        assert_eq!(generator.generate().len(), DEFAULT_CODE_LENGTH);

        let generator = RandomCodeGenerator::new(10);
        assert_eq!(generator.generate().len(), 10);
    }

    #[test]
    fn test_generate_code_alphanumeric() {
        let generator = RandomCodeGenerator::default();
        let code = generator.generate();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = RandomCodeGenerator::new(12);
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generator.generate());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_minimum_length() {
        assert!(validate_custom_code("ab12").is_ok());
    }

    #[test]
    fn test_validate_six_char_alphanumeric() {
        assert!(validate_custom_code("abc123").is_ok());
    }

    #[test]
    fn test_validate_with_hyphens_and_underscores() {
        assert!(validate_custom_code("my-cool_link").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let result = validate_custom_code("abc");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("4-32 characters"));
    }

    #[test]
    fn test_validate_too_long() {
        let code = "a".repeat(33);
        assert!(validate_custom_code(&code).is_err());
    }

    #[test]
    fn test_validate_uppercase_allowed() {
        // Codes are case-sensitive at resolution time.
        assert!(validate_custom_code("MyCode123").is_ok());
    }

    #[test]
    fn test_validate_special_characters() {
        assert!(validate_custom_code("my code").is_err());
        assert!(validate_custom_code("my@code").is_err());
        assert!(validate_custom_code("my/code").is_err());
    }

    #[test]
    fn test_validate_starts_or_ends_with_hyphen() {
        assert!(validate_custom_code("-mycode").is_err());
        assert!(validate_custom_code("mycode-").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(
                validate_custom_code(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_custom_code("").is_err());
    }
}
