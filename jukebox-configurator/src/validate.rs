//! Checks for the free-text numeric fields.

/// Message shown when a numeric field does not parse.
pub const NOT_A_NUMBER: &str = "must be a number";

/// Accept text that parses as a base-10 integer.
pub fn is_int(text: &str) -> Result<(), String> {
    text.parse::<i64>()
        .map(|_| ())
        .map_err(|_| NOT_A_NUMBER.to_string())
}

/// Parse an integer, treating anything unparsable as 0.
pub fn parse_or_zero(text: &str) -> i64 {
    text.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_integers() {
        for text in ["0", "45", "-3", "+7"] {
            assert!(is_int(text).is_ok(), "{text} should be accepted");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for text in ["abc", "", "12.5", " 1", "1e3"] {
            assert_eq!(is_int(text), Err("must be a number".to_string()), "{text}");
        }
    }

    #[test]
    fn unparsable_text_is_zero() {
        assert_eq!(parse_or_zero("30"), 30);
        assert_eq!(parse_or_zero("-1"), -1);
        assert_eq!(parse_or_zero(""), 0);
        assert_eq!(parse_or_zero("soon"), 0);
    }
}
