use std::fs;

use unicode_width::UnicodeWidthStr;

use fx_core::registry::{self, Registry};
use fx_core::scan::SymbolTable;

/// Pad `s` with spaces to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

pub fn currencies_list() {
    let reg = Registry::global();
    let table = SymbolTable::build(reg);
    let sym_width = reg
        .currencies()
        .iter()
        .map(|c| UnicodeWidthStr::width(c.symbol.as_str()))
        .max()
        .unwrap_or(0);
    for def in reg.currencies() {
        let canonical = table.resolve_symbol(&def.symbol);
        let note = match canonical {
            Some(code) if code == def.code => "",
            Some(_) => "  (symbol resolves elsewhere)",
            None => "  (symbol unresolved)",
        };
        println!(
            "{}  {}  {}{note}",
            def.code,
            pad(&def.symbol, sym_width),
            def.name
        );
    }
    println!("{} currencies", reg.currencies().len());
}

pub fn currencies_export() {
    print!("{}", registry::default_toml());
}

pub fn currencies_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let tables = die!(registry::parse_registry_toml(&content), "Error: {}");
    println!(
        "OK: {} currencies, {} symbol priorities",
        tables.currencies.len(),
        tables.symbol_priority.len()
    );
}

pub fn settings_export() {
    print!("{}", fx_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        fx_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: precision.max_safe_digits={}, rates.max_age_hours={}, rates.source_url={}",
        s.precision.max_safe_digits, s.rates.max_age_hours, s.rates.source_url
    );
}
