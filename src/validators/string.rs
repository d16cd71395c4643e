use regex_lite::Regex;

use crate::error::{Error, Result};

fn matches(operation: &'static str, pattern: &str, value: &str) -> Result<bool> {
    let re = Regex::new(pattern)
        .map_err(|e| Error::validation(operation, value, format!("invalid pattern {}: {}", pattern, e)))?;
    Ok(re.is_match(value))
}

/// Check a value contains no whitespace at all
pub fn is_string_no_spaces(value: &str) -> Result<&str> {
    if !matches("is_string_no_spaces", r"^\S+$", value)? {
        return Err(Error::validation(
            "is_string_no_spaces",
            value,
            "is not a string with no spaces",
        ));
    }
    Ok(value)
}

/// Check a value has no whitespace at the beginning or end.
/// Interior whitespace is allowed; at least two characters are required.
pub fn is_string_no_spaces_begin_end(value: &str) -> Result<&str> {
    if !matches("is_string_no_spaces_begin_end", r"^\S.*\S$", value)? {
        return Err(Error::validation(
            "is_string_no_spaces_begin_end",
            value,
            "is not a string with no spaces at the beginning or ending",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_string_no_spaces() {
        for good in ["a-b-c", "this-is-good", "this_is_fine_also", "x"] {
            assert_eq!(is_string_no_spaces(good).unwrap(), good);
        }
        for bad in ["this is bad", " this_is_also_bad", "and_this_is_also_bad ", "", "tab\there", "nl\n"] {
            assert!(is_string_no_spaces(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_is_string_no_spaces_begin_end() {
        for good in ["this is good", "this_is_good", "a  b"] {
            assert_eq!(is_string_no_spaces_begin_end(good).unwrap(), good);
        }
        for bad in [" this is bad ", "this is bad also ", " ", "", "a", "line\nbreak"] {
            assert!(is_string_no_spaces_begin_end(bad).is_err(), "{:?} should be rejected", bad);
        }
    }
}
