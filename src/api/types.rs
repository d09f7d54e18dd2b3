use fx_core::process::{Conversion, ConversionResult, Outcome};
use fx_core::registry::CurrencyDefinition;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FxError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

// ---------------------------------------------------------------------------
// Records (value types, copied across FFI boundary)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct FxCurrency {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

impl From<&CurrencyDefinition> for FxCurrency {
    fn from(def: &CurrencyDefinition) -> Self {
        Self {
            code: def.code.clone(),
            name: def.name.clone(),
            symbol: def.symbol.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct FxConversion {
    pub status: FxConversionStatus,
    /// Exact two-place decimal as text; `None` unless converted.
    pub value: Option<String>,
    pub display: Option<String>,
    pub words: Option<String>,
}

impl From<&Conversion> for FxConversion {
    fn from(c: &Conversion) -> Self {
        match c {
            Conversion::Converted {
                value,
                display,
                words,
            } => Self {
                status: FxConversionStatus::Converted,
                value: Some(value.to_string()),
                display: Some(display.clone()),
                words: Some(words.clone()),
            },
            Conversion::TooLarge => Self {
                status: FxConversionStatus::TooLarge,
                value: None,
                display: None,
                words: None,
            },
            Conversion::Failed { .. } => Self {
                status: FxConversionStatus::Failed,
                value: None,
                display: None,
                words: None,
            },
        }
    }
}

/// One single amount or merged range. Byte offsets index the UTF-8 text.
#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct FxConversionResult {
    pub original: String,
    pub start: u32,
    pub end: u32,
    pub source_currency: String,
    pub first: FxConversion,
    /// Upper end of a range; `None` for a single amount.
    pub second: Option<FxConversion>,
    pub display: String,
}

impl From<&ConversionResult> for FxConversionResult {
    fn from(r: &ConversionResult) -> Self {
        let (source_currency, first, second): (String, FxConversion, Option<FxConversion>) =
            match &r.outcome {
                Outcome::Single { source, conversion } => {
                    (source.clone(), conversion.into(), None)
                }
                Outcome::Range {
                    source,
                    first,
                    second,
                } => (source.clone(), first.into(), Some(second.into())),
            };
        Self {
            original: r.original.clone(),
            start: offset(r.start),
            end: offset(r.end),
            source_currency,
            first,
            second,
            display: r.display.clone(),
        }
    }
}

fn offset(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct FxConversionReport {
    pub results: Vec<FxConversionResult>,
    /// Displays joined with `display.result_separator`; empty when nothing
    /// matched.
    pub summary: String,
}

#[derive(Clone, Debug, PartialEq, uniffi::Record)]
pub struct FxRateSnapshot {
    pub rates: std::collections::HashMap<String, f64>,
    pub last_updated_ms: u64,
    pub stale: bool,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, uniffi::Enum)]
pub enum FxConversionStatus {
    Converted,
    TooLarge,
    Failed,
}
