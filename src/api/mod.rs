//! UniFFI export layer: type-safe bindings for the currency engine.
//!
//! Each public type here maps to a generated host class, record, or enum.

mod resources;
mod types;

pub use resources::FxStore;
pub use types::{
    FxConversion, FxConversionReport, FxConversionResult, FxConversionStatus, FxCurrency,
    FxError, FxRateSnapshot,
};

use std::collections::HashMap;
use std::path::Path;

use fx_core::process::{process, summarize, ConversionContext};
use fx_core::registry::{self, Registry};
use fx_core::settings::settings;
use fx_core::words::to_words;
use fx_core::RateTable;

fn report(text: &str, ctx: &ConversionContext) -> FxConversionReport {
    let results = process(text, ctx);
    FxConversionReport {
        summary: summarize(&results, &settings().display.result_separator),
        results: results.iter().map(FxConversionResult::from).collect(),
    }
}

fn read_config(path: &str) -> Result<String, FxError> {
    std::fs::read_to_string(path).map_err(|e| FxError::Io {
        msg: format!("{path}: {e}"),
    })
}

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

#[uniffi::export]
fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Find every amount in `text` and convert it to `target` using `rates`
/// (units of each currency per pivot unit).
#[uniffi::export]
fn convert_text(text: String, target: String, rates: HashMap<String, f64>) -> FxConversionReport {
    let ctx = ConversionContext::new(target, RateTable::from_pairs(rates));
    report(&text, &ctx)
}

#[uniffi::export]
fn number_to_words(value: f64, target: String) -> String {
    to_words(value, &target)
}

#[uniffi::export]
fn list_currencies() -> Vec<FxCurrency> {
    Registry::global()
        .currencies()
        .iter()
        .map(FxCurrency::from)
        .collect()
}

#[uniffi::export]
fn registry_load_config(path: String) -> Result<(), FxError> {
    let content = read_config(&path)?;
    Registry::init_custom(content).map_err(|e| FxError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn settings_load_config(path: String) -> Result<(), FxError> {
    let content = read_config(&path)?;
    fx_core::settings::init_custom(content)
        .map_err(|e| FxError::InvalidData { msg: e.to_string() })?;
    Ok(())
}

#[uniffi::export]
fn registry_default_config() -> String {
    registry::default_toml().to_string()
}

#[uniffi::export]
fn settings_default_config() -> String {
    fx_core::settings::default_toml().to_string()
}

/// Start writing engine traces under `log_dir`; `false` when tracing is
/// compiled out or could not be set up.
#[uniffi::export]
fn trace_init(log_dir: String) -> bool {
    crate::trace_init::init_tracing(Path::new(&log_dir))
}
