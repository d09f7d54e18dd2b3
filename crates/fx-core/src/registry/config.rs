use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use super::CurrencyDefinition;

#[derive(Deserialize)]
struct RegistryConfig {
    #[serde(default)]
    symbols: BTreeMap<String, String>,
    currency: Vec<CurrencyDefinition>,
}

/// Parsed registry contents: definitions in file order plus the
/// symbol → canonical code priority table.
#[derive(Debug, Clone)]
pub struct RegistryTables {
    pub currencies: Vec<CurrencyDefinition>,
    pub symbol_priority: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[[currency]] list is empty")]
    Empty,
    #[error("invalid currency code: {0:?} (expected 3 ASCII letters)")]
    InvalidCode(String),
    #[error("duplicate currency code: {0}")]
    DuplicateCode(String),
    #[error("empty symbol for currency {0}")]
    EmptySymbol(String),
    #[error("symbol {symbol:?} points at unknown currency {code}")]
    UnknownPriorityCode { symbol: String, code: String },
    #[error("currency registry already initialized")]
    AlreadyInitialized,
}

/// Parse registry TOML, validating codes, symbols and the priority table.
pub fn parse_registry_toml(toml_str: &str) -> Result<RegistryTables, RegistryError> {
    let config: RegistryConfig =
        toml::from_str(toml_str).map_err(|e| RegistryError::Parse(e.to_string()))?;

    if config.currency.is_empty() {
        return Err(RegistryError::Empty);
    }

    let mut seen = HashSet::new();
    let mut currencies = Vec::with_capacity(config.currency.len());
    for mut def in config.currency {
        if def.code.len() != 3 || !def.code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RegistryError::InvalidCode(def.code));
        }
        def.code = def.code.to_ascii_uppercase();
        if !seen.insert(def.code.clone()) {
            return Err(RegistryError::DuplicateCode(def.code));
        }
        if def.symbol.trim().is_empty() {
            return Err(RegistryError::EmptySymbol(def.code));
        }
        currencies.push(def);
    }

    let mut symbol_priority = BTreeMap::new();
    for (symbol, code) in config.symbols {
        let code = code.to_ascii_uppercase();
        if symbol.trim().is_empty() {
            return Err(RegistryError::EmptySymbol(code));
        }
        if !seen.contains(&code) {
            return Err(RegistryError::UnknownPriorityCode { symbol, code });
        }
        symbol_priority.insert(symbol, code);
    }

    Ok(RegistryTables {
        currencies,
        symbol_priority,
    })
}
