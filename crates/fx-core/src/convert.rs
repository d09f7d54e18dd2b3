//! Pivot-based currency conversion on exact decimals.
//!
//! A rate table maps each code to the number of its units bought by one unit
//! of the pivot currency (`USD: 1.0, EUR: 0.9` for a USD-pivot table), so
//! `value / rate[from] * rate[to]` converts between any two listed codes.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fractional digits kept in converted values.
pub const RESULT_SCALE: u32 = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct RateTable {
    rates: BTreeMap<String, Decimal>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from published floating-point rates. Non-finite, non-positive
    /// or unrepresentable entries are skipped.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (code, rate) in pairs {
            let code = code.as_ref();
            match decimal_from_f64(rate) {
                Some(d) if d > Decimal::ZERO => table.insert(code, d),
                _ => warn!(code, rate, "skipping unusable rate"),
            }
        }
        table
    }

    pub fn insert(&mut self, code: &str, rate: Decimal) {
        self.rates.insert(code.to_ascii_uppercase(), rate);
    }

    pub fn get(&self, code: &str) -> Option<Decimal> {
        self.rates.get(&code.to_ascii_uppercase()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<BTreeMap<String, f64>> for RateTable {
    fn from(map: BTreeMap<String, f64>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<RateTable> for BTreeMap<String, f64> {
    fn from(table: RateTable) -> Self {
        table
            .rates
            .into_iter()
            .filter_map(|(k, v)| v.to_f64().map(|f| (k, f)))
            .collect()
    }
}

/// Shortest round-trip text of the float, parsed exactly (`0.9` stays 0.9).
fn decimal_from_f64(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    Decimal::from_str(&f.to_string()).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("no exchange rates available")]
    EmptyTable,
    #[error("no exchange rate for {0}")]
    RateUnavailable(String),
    #[error("converted value out of range")]
    Overflow,
}

/// Convert `value` from one code to another, rounded half-up to 2 places.
pub fn convert(
    value: Decimal,
    from: &str,
    to: &str,
    rates: &RateTable,
) -> Result<Decimal, ConvertError> {
    if rates.is_empty() {
        return Err(ConvertError::EmptyTable);
    }
    let from_rate = rates
        .get(from)
        .ok_or_else(|| ConvertError::RateUnavailable(from.to_ascii_uppercase()))?;
    let to_rate = rates
        .get(to)
        .ok_or_else(|| ConvertError::RateUnavailable(to.to_ascii_uppercase()))?;

    let converted = if from.eq_ignore_ascii_case(to) {
        value
    } else {
        value
            .checked_div(from_rate)
            .and_then(|pivot| pivot.checked_mul(to_rate))
            .ok_or(ConvertError::Overflow)?
    };
    Ok(round_money(converted))
}

pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RESULT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
