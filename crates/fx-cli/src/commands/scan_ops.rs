use std::fs;
use std::path::Path;

use fx_core::process::{process, summarize, ConversionContext};
use fx_core::settings::settings;
use fx_core::store::{cached_rates, SettingsStore};
use fx_core::RateTable;

use super::open_store;

/// Read a rate file: either a bare `{"CODE": rate}` object or a saved
/// rate-source response with a `rates` member.
fn load_rate_file(file: &str) -> RateTable {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let value: serde_json::Value = die!(serde_json::from_str(&content), "Error parsing {file}: {}");
    let rates = value.get("rates").cloned().unwrap_or(value);
    die!(
        serde_json::from_value::<RateTable>(rates),
        "Error: {file} is not a rate table: {}"
    )
}

/// Build the context from flags, falling back to the store for whatever
/// is not given.
pub fn resolve_context(
    target: Option<&str>,
    rates_file: Option<&str>,
    store: &dyn SettingsStore,
) -> Option<ConversionContext> {
    let stored = ConversionContext::from_store(store);
    let target = match target {
        Some(t) => t.to_string(),
        None => stored.as_ref()?.target.clone(),
    };
    let rates = match rates_file {
        Some(file) => load_rate_file(file),
        None => match stored {
            Some(ctx) => ctx.rates,
            None => cached_rates(store).unwrap_or_default(),
        },
    };
    Some(ConversionContext::new(target, rates))
}

pub fn scan(
    text: &str,
    target: Option<&str>,
    rates_file: Option<&str>,
    store_path: &Path,
    json: bool,
) {
    let store = open_store(store_path);
    let Some(ctx) = resolve_context(target, rates_file, &store) else {
        eprintln!("No target currency: pass --target or run `fxtool target set <CODE>`");
        std::process::exit(1);
    };
    if ctx.rates.is_empty() {
        eprintln!("Warning: no exchange rates loaded; run `fxtool rates update` or pass --rates");
    }

    let results = process(text, &ctx);
    if json {
        let out = die!(serde_json::to_string_pretty(&results), "Error: {}");
        println!("{out}");
        return;
    }
    if results.is_empty() {
        println!("No amounts found");
        return;
    }
    for r in &results {
        println!("{}", r.display);
    }
    if results.len() > 1 {
        println!();
        println!(
            "{}",
            summarize(&results, &settings().display.result_separator)
        );
    }
}
