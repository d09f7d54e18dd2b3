//! Pairs adjacent matches into ranges ("$10 - $20", "5 to 8 EUR").

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::scan::RawMatch;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeUnit<T> {
    pub first: T,
    pub second: T,
    /// Source text between the two ends, untrimmed.
    pub separator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unit<T> {
    Single(T),
    Range(RangeUnit<T>),
}

impl<T> Unit<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Unit<U> {
        match self {
            Unit::Single(t) => Unit::Single(f(t)),
            Unit::Range(r) => Unit::Range(RangeUnit {
                first: f(r.first),
                second: f(r.second),
                separator: r.separator,
            }),
        }
    }

    pub fn try_map<U, E, F: FnMut(T) -> Result<U, E>>(self, mut f: F) -> Result<Unit<U>, E> {
        Ok(match self {
            Unit::Single(t) => Unit::Single(f(t)?),
            Unit::Range(r) => Unit::Range(RangeUnit {
                first: f(r.first)?,
                second: f(r.second)?,
                separator: r.separator,
            }),
        })
    }
}

/// True when `between` (the text separating two matches) reads as a range
/// separator: `-` or `to`, ignoring surrounding whitespace.
pub fn is_range_separator(between: &str) -> bool {
    let t = between.trim();
    t == "-" || t.eq_ignore_ascii_case("to")
}

/// Walk matches left to right, merging a pair into a range when the text
/// between them is a range separator and both resolve to the same code.
/// A merged pair is consumed whole; the walk resumes after its second end.
pub fn detect_ranges(matches: Vec<RawMatch>, text: &str) -> Vec<Unit<RawMatch>> {
    let _span = debug_span!("detect_ranges", matches = matches.len()).entered();
    let mut units = Vec::with_capacity(matches.len());
    let mut iter = matches.into_iter().peekable();
    while let Some(first) = iter.next() {
        let joined = iter.peek().and_then(|second| {
            let between = text.get(first.end..second.start)?;
            let same_code = first.currency_code.is_some()
                && first.currency_code == second.currency_code;
            (same_code && is_range_separator(between)).then(|| between.to_string())
        });
        match joined {
            Some(separator) => {
                if let Some(second) = iter.next() {
                    units.push(Unit::Range(RangeUnit {
                        first,
                        second,
                        separator,
                    }));
                }
            }
            None => units.push(Unit::Single(first)),
        }
    }
    debug!(
        units = units.len(),
        ranges = units.iter().filter(|u| matches!(u, Unit::Range(_))).count()
    );
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::tokenize;

    fn detect(text: &str) -> Vec<Unit<RawMatch>> {
        detect_ranges(tokenize(text), text)
    }

    fn shape(units: &[Unit<RawMatch>]) -> Vec<String> {
        units
            .iter()
            .map(|u| match u {
                Unit::Single(m) => m.text.clone(),
                Unit::Range(r) => format!("{}|{}", r.first.text, r.second.text),
            })
            .collect()
    }

    #[test]
    fn test_hyphen_range() {
        let units = detect("$10 - $20");
        assert_eq!(shape(&units), vec!["$10|$20"]);
        if let Unit::Range(r) = &units[0] {
            assert_eq!(r.separator, " - ");
        }
    }

    #[test]
    fn test_tight_hyphen_and_to() {
        assert_eq!(shape(&detect("$10-$20")), vec!["$10|$20"]);
        assert_eq!(shape(&detect("€5 TO €8")), vec!["€5|€8"]);
        assert_eq!(shape(&detect("5 EUR to 8 EUR")), vec!["5 EUR|8 EUR"]);
    }

    #[test]
    fn test_other_text_is_not_a_range() {
        assert_eq!(shape(&detect("$10 apples $20")), vec!["$10", "$20"]);
        assert_eq!(shape(&detect("$10 -- $20")), vec!["$10", "$20"]);
        assert_eq!(shape(&detect("$10, $20")), vec!["$10", "$20"]);
    }

    #[test]
    fn test_mixed_codes_stay_single() {
        assert_eq!(shape(&detect("$10 - €20")), vec!["$10", "€20"]);
    }

    #[test]
    fn test_symbol_and_code_same_currency() {
        assert_eq!(shape(&detect("$10 to 20 USD")), vec!["$10|20 USD"]);
    }

    #[test]
    fn test_pair_is_consumed() {
        // the second range starts after the first pair, not at "$20"
        assert_eq!(
            shape(&detect("$10 - $20 - $30 - $40")),
            vec!["$10|$20", "$30|$40"]
        );
        assert_eq!(shape(&detect("$10 - $20 - $30")), vec!["$10|$20", "$30"]);
    }

    #[test]
    fn test_map_preserves_shape() {
        let units = detect("$1 - $2 and $3");
        let lens: Vec<Unit<usize>> = units.into_iter().map(|u| u.map(|m| m.text.len())).collect();
        assert_eq!(
            lens,
            vec![
                Unit::Range(RangeUnit {
                    first: 2,
                    second: 2,
                    separator: " - ".to_string()
                }),
                Unit::Single(2),
            ]
        );
    }
}
