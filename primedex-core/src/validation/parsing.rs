//! Parsing utilities for console query input

use crate::PrimedexError;

/// Literal that ends every interactive sub-loop
pub const SENTINEL: &str = "-1";

/// Whether a raw input line is the sentinel
///
/// Surrounding whitespace (including the trailing newline) is ignored.
pub fn is_sentinel(line: &str) -> bool {
    line.trim() == SENTINEL
}

/// Parse a query line into a signed integer
///
/// Accepts an optional leading sign and ignores surrounding whitespace.
pub fn parse_query(line: &str) -> Result<i64, PrimedexError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(PrimedexError::InvalidNumber);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| PrimedexError::InvalidNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sentinel() {
        assert!(is_sentinel("-1"));
        assert!(is_sentinel("  -1\n"));
        assert!(is_sentinel("-1\r\n"));
        assert!(!is_sentinel("-10"));
        assert!(!is_sentinel("1"));
        assert!(!is_sentinel(""));
    }

    #[test]
    fn test_parse_query() {
        assert_eq!(parse_query("0"), Ok(0));
        assert_eq!(parse_query(" 42\n"), Ok(42));
        assert_eq!(parse_query("+7"), Ok(7));
        assert_eq!(parse_query("-5"), Ok(-5));

        assert_eq!(parse_query(""), Err(PrimedexError::InvalidNumber));
        assert_eq!(parse_query("   "), Err(PrimedexError::InvalidNumber));
        assert_eq!(parse_query("abc"), Err(PrimedexError::InvalidNumber));
        assert_eq!(parse_query("12a"), Err(PrimedexError::InvalidNumber));
        assert_eq!(parse_query("1.5"), Err(PrimedexError::InvalidNumber));
        assert_eq!(
            parse_query("99999999999999999999"),
            Err(PrimedexError::InvalidNumber)
        );
    }
}
