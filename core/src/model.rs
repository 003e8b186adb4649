// Bookshelf
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic types and validation helpers shared by all models.

/// Model errors.  These are raised when a value does not satisfy the constraints of its type.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Validates that the text `s` describing a `what` has between `min` and `max` characters and
/// that all of them are ASCII.
///
/// If `printable` is true, control characters are rejected too.
pub fn validate_ascii_text(
    what: &str,
    s: &str,
    min: usize,
    max: usize,
    printable: bool,
) -> ModelResult<()> {
    // Counting bytes is fine here because the length check only matters once we know the text
    // is pure ASCII.
    for ch in s.chars() {
        let valid = if printable { ch == ' ' || ch.is_ascii_graphic() } else { ch.is_ascii() };
        if !valid {
            return Err(ModelError(format!("Unsupported character {:?} in {}", ch, what)));
        }
    }

    if s.len() < min || s.len() > max {
        return Err(ModelError(format!(
            "{} must have between {} and {} characters",
            capitalize(what),
            min,
            max
        )));
    }

    Ok(())
}

/// Returns `s` with its first character in uppercase.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ascii_text_ok() {
        validate_ascii_text("name", "abc", 3, 5, true).unwrap();
        validate_ascii_text("name", "a b c", 3, 5, true).unwrap();
        validate_ascii_text("name", "~!@#$", 3, 5, true).unwrap();
        validate_ascii_text("name", "a\tb", 3, 5, false).unwrap();
    }

    #[test]
    fn test_validate_ascii_text_length() {
        assert_eq!(
            ModelError("Name must have between 3 and 5 characters".to_owned()),
            validate_ascii_text("name", "ab", 3, 5, true).unwrap_err()
        );
        assert_eq!(
            ModelError("Book name must have between 3 and 5 characters".to_owned()),
            validate_ascii_text("book name", "abcdef", 3, 5, true).unwrap_err()
        );
        assert!(validate_ascii_text("name", "", 3, 5, false).is_err());
    }

    #[test]
    fn test_validate_ascii_text_characters() {
        assert_eq!(
            ModelError("Unsupported character '\\t' in name".to_owned()),
            validate_ascii_text("name", "a\tb", 3, 5, true).unwrap_err()
        );
        assert_eq!(
            ModelError("Unsupported character 'é' in name".to_owned()),
            validate_ascii_text("name", "caf\u{00e9}", 3, 5, false).unwrap_err()
        );
    }
}
