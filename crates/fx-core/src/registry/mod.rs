//! Static currency registry: code → {name, symbol}.
//!
//! Loaded once from TOML (embedded default or a custom file installed with
//! [`Registry::init_custom`] before first use) and read-only afterwards.
//! Symbols are not unique; the `[symbols]` priority table names the code an
//! ambiguous symbol stands for (see [`crate::scan::SymbolTable`]).

mod config;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub use config::{parse_registry_toml, RegistryError, RegistryTables};

pub const DEFAULT_REGISTRY_TOML: &str = include_str!("default_currencies.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDefinition {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

pub struct Registry {
    currencies: Vec<CurrencyDefinition>,
    by_code: HashMap<String, usize>,
    symbol_priority: BTreeMap<String, String>,
}

impl Registry {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RegistryError> {
        parse_registry_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RegistryError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static Registry {
        static INSTANCE: OnceLock<Registry> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_REGISTRY_TOML);
            Registry::from_toml(toml_str).expect("currency registry TOML must be valid")
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, RegistryError> {
        Ok(Self::from_tables(parse_registry_toml(toml_str)?))
    }

    pub fn from_tables(tables: RegistryTables) -> Self {
        let by_code = tables
            .currencies
            .iter()
            .enumerate()
            .map(|(i, def)| (def.code.clone(), i))
            .collect();
        Self {
            currencies: tables.currencies,
            by_code,
            symbol_priority: tables.symbol_priority,
        }
    }

    /// Look up a definition by code (case-insensitive).
    pub fn get(&self, code: &str) -> Option<&CurrencyDefinition> {
        let idx = self.by_code.get(&code.to_ascii_uppercase())?;
        self.currencies.get(*idx)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// All definitions, in registry order.
    pub fn currencies(&self) -> &[CurrencyDefinition] {
        &self.currencies
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.currencies.iter().map(|c| c.code.as_str())
    }

    pub fn symbol_priority(&self) -> &BTreeMap<String, String> {
        &self.symbol_priority
    }

    /// Symbol used when printing amounts in `code`; the raw code when the
    /// registry has no entry for it.
    pub fn display_symbol<'a>(&'a self, code: &'a str) -> &'a str {
        self.get(code).map(|c| c.symbol.as_str()).unwrap_or(code)
    }
}

/// Returns the embedded default registry TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_REGISTRY_TOML
}
