use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::debug;

use crate::registry::Registry;

/// Symbol and code resolution policy.
///
/// Explicit codes resolve to themselves. A symbol resolves through the
/// registry's `[symbols]` priority table first, then to the single currency
/// carrying it. A symbol shared by several currencies with no priority entry
/// stays unresolved; matches tagged with it are dropped by the tokenizer.
/// This is a fixed one-to-one policy, not contextual disambiguation: `"$"`
/// always means the priority table's dollar, whatever the page is about.
pub struct SymbolTable {
    /// Every recognised symbol, longest first.
    symbols: Vec<String>,
    resolved: HashMap<String, String>,
    codes: HashSet<String>,
}

impl SymbolTable {
    pub fn build(registry: &Registry) -> Self {
        let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
        for def in registry.currencies() {
            owners
                .entry(def.symbol.as_str())
                .or_default()
                .push(def.code.as_str());
        }

        let mut all: BTreeSet<&str> = owners.keys().copied().collect();
        all.extend(registry.symbol_priority().keys().map(String::as_str));

        let mut resolved = HashMap::new();
        for &symbol in &all {
            let code = match registry.symbol_priority().get(symbol) {
                Some(code) => Some(code.as_str()),
                None => match owners.get(symbol).map(Vec::as_slice) {
                    Some([only]) => Some(*only),
                    _ => None,
                },
            };
            match code {
                Some(code) => {
                    resolved.insert(symbol.to_string(), code.to_string());
                }
                None => debug!(symbol, "ambiguous symbol has no canonical code"),
            }
        }

        let mut symbols: Vec<String> = all.into_iter().map(str::to_string).collect();
        symbols.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let codes = registry.codes().map(str::to_string).collect();

        Self {
            symbols,
            resolved,
            codes,
        }
    }

    /// Canonical code for a matched symbol, or `None` when the policy has none.
    pub fn resolve_symbol(&self, symbol: &str) -> Option<&str> {
        self.resolved.get(symbol).map(String::as_str)
    }

    /// Explicit 3-letter code text → its uppercase form, if it is a
    /// registry code.
    pub fn resolve_code(&self, text: &str) -> Option<String> {
        if text.len() != 3 || !text.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        let upper = text.to_ascii_uppercase();
        self.codes.contains(&upper).then_some(upper)
    }

    /// Symbols that prefix `s`, longest first.
    pub fn symbols_at<'a>(&'a self, s: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.symbols
            .iter()
            .map(String::as_str)
            .filter(move |sym| s.starts_with(sym))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}
