//! Amount tokenizer: locates currency-tagged numbers in free text.
//!
//! Two forms are recognised, `<symbol><space?><number>` and
//! `<number><space?><CODE>`. Scanning is leftmost-first; at each position
//! symbols are tried longest first and the number grammar backtracks the
//! way a regex over the same grammar would (see [`number`]).

mod disambiguate;
mod number;

#[cfg(test)]
mod tests;

use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::registry::Registry;
use crate::unicode::{is_word_char, whitespace_run, word_ends_at, word_starts_at};

pub use disambiguate::SymbolTable;
use number::number_candidates;

/// What tagged the number: a symbol as written, or an explicit code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum CurrencyTag {
    Symbol(String),
    Code(String),
}

/// One located amount. Offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawMatch {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Number as written, separators and suffix intact.
    pub numeric_literal: String,
    pub tag: CurrencyTag,
    /// Canonical code; `None` when the symbol has no resolution.
    pub currency_code: Option<String>,
}

pub struct Tokenizer {
    table: SymbolTable,
}

impl Tokenizer {
    pub fn new(registry: &Registry) -> Self {
        Self {
            table: SymbolTable::build(registry),
        }
    }

    /// Tokenizer over the global registry.
    pub fn global() -> &'static Tokenizer {
        static INSTANCE: OnceLock<Tokenizer> = OnceLock::new();
        INSTANCE.get_or_init(|| Tokenizer::new(Registry::global()))
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Every candidate, resolved or not, in text order.
    pub fn scan_candidates(&self, text: &str) -> Vec<RawMatch> {
        let mut out = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            if let Some(m) = self
                .symbol_first(text, pos)
                .or_else(|| self.number_first(text, pos))
            {
                pos = m.end;
                out.push(m);
                continue;
            }
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
        out
    }

    /// Resolved matches only; candidates whose symbol has no canonical
    /// code are dropped.
    pub fn tokenize(&self, text: &str) -> Vec<RawMatch> {
        let _span = debug_span!("tokenize", len = text.len()).entered();
        let candidates = self.scan_candidates(text);
        let total = candidates.len();
        let matches: Vec<RawMatch> = candidates
            .into_iter()
            .filter(|m| m.currency_code.is_some())
            .collect();
        debug!(matches = matches.len(), dropped = total - matches.len());
        matches
    }

    fn symbol_first(&self, text: &str, pos: usize) -> Option<RawMatch> {
        let rest = &text[pos..];
        for symbol in self.table.symbols_at(rest) {
            let letter_initial = symbol.chars().next().is_some_and(is_word_char);
            if letter_initial && !word_starts_at(text, pos) {
                continue;
            }
            let after_symbol = pos + symbol.len();
            let num_start = after_symbol + whitespace_run(&text[after_symbol..]);
            let found = number_candidates(&text[num_start..])
                .into_iter()
                .map(|len| num_start + len)
                .find(|&end| word_ends_at(text, end));
            if let Some(end) = found {
                return Some(RawMatch {
                    text: text[pos..end].to_string(),
                    start: pos,
                    end,
                    numeric_literal: text[num_start..end].to_string(),
                    tag: CurrencyTag::Symbol(symbol.to_string()),
                    currency_code: self.table.resolve_symbol(symbol).map(str::to_string),
                });
            }
        }
        None
    }

    fn number_first(&self, text: &str, pos: usize) -> Option<RawMatch> {
        if !text[pos..].starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        if text[..pos].ends_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        for len in number_candidates(&text[pos..]) {
            let num_end = pos + len;
            let code_start = num_end + whitespace_run(&text[num_end..]);
            let Some(code_text) = text[code_start..].get(..3) else {
                continue;
            };
            let Some(code) = self.table.resolve_code(code_text) else {
                continue;
            };
            let end = code_start + 3;
            if !word_ends_at(text, end) {
                continue;
            }
            return Some(RawMatch {
                text: text[pos..end].to_string(),
                start: pos,
                end,
                numeric_literal: text[pos..num_end].to_string(),
                tag: CurrencyTag::Code(code_text.to_string()),
                currency_code: Some(code),
            });
        }
        None
    }
}

/// Tokenize with the global registry.
pub fn tokenize(text: &str) -> Vec<RawMatch> {
    Tokenizer::global().tokenize(text)
}
