//! Common utility functions used across the library

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref INVALID_CHARS: Regex = Regex::new(r"[^a-z0-9_\-]").unwrap();
}

/// Sanitize a word into an identity key safe for use as a filename.
///
/// Lowercases the input, collapses runs of whitespace into a single
/// underscore and deletes every remaining character outside `[a-z0-9_-]`.
///
/// # Arguments
/// * `input` - The text to sanitize
///
/// # Returns
/// * The identity key, or `"untitled"` if nothing survives sanitization
pub fn sanitize_filename(input: &str) -> String {
    let lowered = input.trim().to_lowercase(); // Преобразуем в нижний регистр
    let underscored = WHITESPACE_RUN.replace_all(&lowered, "_");
    let cleaned = INVALID_CHARS.replace_all(&underscored, "");
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Hello World"), "hello_world");
        assert_eq!(sanitize_filename("  Cat  "), "cat");
        assert_eq!(sanitize_filename("don't"), "dont");
        assert_eq!(sanitize_filename("twenty-one"), "twenty-one");
        assert_eq!(sanitize_filename("a\tb\nc"), "a_b_c");
        assert_eq!(sanitize_filename("многоточие"), "untitled");
        assert_eq!(sanitize_filename("!!!"), "untitled");
        assert_eq!(sanitize_filename(""), "untitled");
    }

    #[test]
    fn test_sanitize_collapses_whitespace_runs() {
        // Несколько пробелов подряд дают один символ подчеркивания
        assert_eq!(sanitize_filename("ice   cream"), "ice_cream");
    }
}
