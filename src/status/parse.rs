//! Status-name parsing.
//!
//! Effect names typed by users may carry a numeric suffix that only makes
//! sense for leveled statuses such as exhaustion:
//!
//! ```text
//! name   := base ws* suffix?
//! base   := any text not ending in the suffix, non-empty after trimming
//! suffix := sign? digit+
//! sign   := '+' | '-'
//! ```
//!
//! A signed suffix is a delta from the current level, an unsigned one an
//! absolute level.
//!
//! ```
//! use convenient_effects::status::{parse_status_name, StatusSuffix};
//!
//! let parsed = parse_status_name("Exhaustion +2").unwrap();
//! assert_eq!(parsed.base, "Exhaustion");
//! assert_eq!(parsed.suffix, Some(StatusSuffix::Delta(2)));
//! ```

/// Numeric suffix of a status name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusSuffix {
    /// `+N` or `-N`.
    Delta(i32),
    /// Bare `N`.
    Level(u32),
}

/// A status name split into base and suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedStatusName<'a> {
    pub base: &'a str,
    pub suffix: Option<StatusSuffix>,
}

/// Split `name` into its base and optional numeric suffix.
///
/// Returns `None` when nothing remains for the base (empty input, a bare
/// number) or the suffix does not fit in 32 bits.
pub fn parse_status_name(name: &str) -> Option<ParsedStatusName<'_>> {
    let trimmed = name.trim();
    let digits_start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    let Some(digits_start) = digits_start else {
        return non_empty(trimmed, None);
    };

    let digits = &trimmed[digits_start..];
    let before = &trimmed[..digits_start];

    let (sign, head) = match before.chars().last() {
        Some(c @ ('+' | '-')) => (Some(c), &before[..before.len() - 1]),
        _ => (None, before),
    };

    let suffix = match sign {
        Some(sign) => {
            let magnitude: i32 = digits.parse().ok()?;
            StatusSuffix::Delta(if sign == '-' { -magnitude } else { magnitude })
        }
        None => StatusSuffix::Level(digits.parse().ok()?),
    };

    non_empty(head.trim_end(), Some(suffix))
}

fn non_empty(base: &str, suffix: Option<StatusSuffix>) -> Option<ParsedStatusName<'_>> {
    if base.is_empty() {
        None
    } else {
        Some(ParsedStatusName { base, suffix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> (&str, Option<StatusSuffix>) {
        let parsed = parse_status_name(name).unwrap();
        (parsed.base, parsed.suffix)
    }

    #[test]
    fn test_no_suffix() {
        assert_eq!(parse("Exhaustion"), ("Exhaustion", None));
        assert_eq!(parse("  Prone  "), ("Prone", None));
    }

    #[test]
    fn test_positive_delta() {
        assert_eq!(parse("Exhaustion +2"), ("Exhaustion", Some(StatusSuffix::Delta(2))));
        assert_eq!(parse("Exhaustion+1"), ("Exhaustion", Some(StatusSuffix::Delta(1))));
    }

    #[test]
    fn test_negative_delta() {
        assert_eq!(parse("Exhaustion -5"), ("Exhaustion", Some(StatusSuffix::Delta(-5))));
        assert_eq!(parse("Exhaustion-1"), ("Exhaustion", Some(StatusSuffix::Delta(-1))));
    }

    #[test]
    fn test_absolute_level() {
        assert_eq!(parse("Exhaustion 3"), ("Exhaustion", Some(StatusSuffix::Level(3))));
        assert_eq!(parse("Exhaustion3"), ("Exhaustion", Some(StatusSuffix::Level(3))));
        assert_eq!(parse("Exhaustion 0"), ("Exhaustion", Some(StatusSuffix::Level(0))));
    }

    #[test]
    fn test_non_numeric_trailing_token() {
        assert_eq!(parse("Exhaustion abc"), ("Exhaustion abc", None));
        assert_eq!(parse("Exhaustion +"), ("Exhaustion +", None));
    }

    #[test]
    fn test_multi_word_base() {
        assert_eq!(parse("Bleeding Out 2"), ("Bleeding Out", Some(StatusSuffix::Level(2))));
    }

    #[test]
    fn test_rejects_empty_base() {
        assert!(parse_status_name("").is_none());
        assert!(parse_status_name("   ").is_none());
        assert!(parse_status_name("42").is_none());
        assert!(parse_status_name("+3").is_none());
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(parse_status_name("Exhaustion 99999999999").is_none());
        assert!(parse_status_name("Exhaustion +99999999999").is_none());
    }
}
