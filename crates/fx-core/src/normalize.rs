//! Numeric literal → exact decimal value.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::scan::RawMatch;
use crate::settings::settings;
use crate::unicode::magnitude_exponent;

/// A normalized amount, or the precision-guard sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Amount {
    Value(Decimal),
    /// More digits than the precision threshold; never converted.
    TooLarge,
}

impl Amount {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Amount::Value(v) => Some(*v),
            Amount::TooLarge => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountUnit {
    pub value: Amount,
    pub currency_code: String,
    pub original: RawMatch,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("malformed numeric literal: {0:?}")]
    Malformed(String),
    #[error("match {0:?} has no resolved currency")]
    Unresolved(String),
}

impl AmountUnit {
    pub fn from_match(m: RawMatch) -> Result<Self, NormalizeError> {
        let Some(code) = m.currency_code.clone() else {
            return Err(NormalizeError::Unresolved(m.text));
        };
        Ok(Self {
            value: normalize(&m.numeric_literal)?,
            currency_code: code,
            original: m,
        })
    }
}

/// Normalize with the configured digit threshold.
pub fn normalize(literal: &str) -> Result<Amount, NormalizeError> {
    normalize_with_limit(literal, settings().precision.max_safe_digits)
}

/// Strip separators, parse, then apply the magnitude suffix.
///
/// The digit count is taken from the literal as written, so `"1.5k"` counts
/// two digits even though it expands to four.
pub fn normalize_with_limit(literal: &str, max_digits: usize) -> Result<Amount, NormalizeError> {
    let malformed = || NormalizeError::Malformed(literal.to_string());

    let digits = literal.chars().filter(char::is_ascii_digit).count();
    if digits == 0 {
        return Err(malformed());
    }
    if digits > max_digits {
        return Ok(Amount::TooLarge);
    }

    let stripped: String = literal.chars().filter(|&c| c != ',').collect();
    let (base, exponent) = match stripped.chars().last().and_then(magnitude_exponent) {
        Some(exp) => (&stripped[..stripped.len() - 1], exp),
        None => (stripped.as_str(), 0),
    };
    if !base.chars().all(|c| c.is_ascii_digit() || c == '.') || base.starts_with('.') {
        return Err(malformed());
    }

    let value = Decimal::from_str(base).map_err(|_| malformed())?;
    let scale = Decimal::from(10u64.pow(exponent));
    match value.checked_mul(scale) {
        Some(v) => Ok(Amount::Value(v.normalize())),
        None => Ok(Amount::TooLarge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_and_grouped() {
        assert_eq!(normalize("42").unwrap(), Amount::Value(dec!(42)));
        assert_eq!(normalize("1,000.50").unwrap(), Amount::Value(dec!(1000.5)));
        assert_eq!(normalize("1,234,567").unwrap(), Amount::Value(dec!(1234567)));
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(normalize("2.5k").unwrap(), Amount::Value(dec!(2500)));
        assert_eq!(normalize("1.5M").unwrap(), Amount::Value(dec!(1500000)));
        assert_eq!(normalize("3b").unwrap(), Amount::Value(dec!(3000000000)));
        assert_eq!(normalize("1T").unwrap(), Amount::Value(dec!(1000000000000)));
    }

    #[test]
    fn test_precision_guard() {
        assert_eq!(normalize("1234567890123456").unwrap(), Amount::TooLarge);
        assert_eq!(
            normalize("123,456,789,012,345").unwrap(),
            Amount::Value(dec!(123456789012345))
        );
        // suffix expansion does not count toward the digit limit
        assert_eq!(
            normalize("999,999,999,999,999t").unwrap(),
            Amount::Value(dec!(999999999999999000000000000))
        );
        assert_eq!(normalize_with_limit("12.34", 3).unwrap(), Amount::TooLarge);
    }

    #[test]
    fn test_malformed() {
        assert!(normalize("").is_err());
        assert!(normalize("k").is_err());
        assert!(normalize("1.2.3").is_err());
        assert!(normalize("-5").is_err());
        assert!(normalize(".5").is_err());
    }

    #[test]
    fn test_from_match_requires_code() {
        let m = RawMatch {
            text: "kr 5".to_string(),
            start: 0,
            end: 4,
            numeric_literal: "5".to_string(),
            tag: crate::scan::CurrencyTag::Symbol("kr".to_string()),
            currency_code: None,
        };
        assert!(matches!(
            AmountUnit::from_match(m.clone()),
            Err(NormalizeError::Unresolved(_))
        ));
        let unit = AmountUnit::from_match(RawMatch {
            currency_code: Some("SEK".to_string()),
            ..m
        })
        .unwrap();
        assert_eq!(unit.value, Amount::Value(dec!(5)));
        assert_eq!(unit.currency_code, "SEK");
    }

    proptest! {
        #[test]
        fn suffix_scales_exactly(
            int in 0u64..1_000_000_000,
            frac in proptest::option::of(0u32..100),
            suffix in proptest::sample::select(vec!["", "k", "m", "b", "t", "K", "M", "B", "T"]),
        ) {
            let base = match frac {
                Some(f) => format!("{int}.{f:02}"),
                None => int.to_string(),
            };
            let expected = Decimal::from_str(&base).unwrap()
                * Decimal::from(10u64.pow(suffix.chars().next().and_then(magnitude_exponent).unwrap_or(0)));
            let got = normalize(&format!("{base}{suffix}")).unwrap();
            prop_assert_eq!(got, Amount::Value(expected.normalize()));
        }
    }
}
