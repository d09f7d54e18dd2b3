//! Conversion orchestrator: text → matches → ranges → amounts → converted
//! values → words → display strings.
//!
//! Every call is a pure function of the text and a [`ConversionContext`];
//! failures stay local to the unit they occur in and end up as display text.

mod display;


use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::convert::{convert, RateTable};
use crate::normalize::{Amount, AmountUnit};
use crate::range::{detect_ranges, Unit};
use crate::registry::Registry;
use crate::scan::{RawMatch, Tokenizer};
use crate::words::to_words_decimal;

/// Immutable per-call inputs: target code and the rate snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionContext {
    pub target: String,
    pub rates: RateTable,
}

impl ConversionContext {
    pub fn new(target: impl Into<String>, rates: RateTable) -> Self {
        Self {
            target: target.into().trim().to_ascii_uppercase(),
            rates,
        }
    }
}

/// Outcome for one amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Conversion {
    Converted {
        value: Decimal,
        /// Target symbol followed by the value with two decimals.
        display: String,
        words: String,
    },
    TooLarge,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Single {
        source: String,
        conversion: Conversion,
    },
    Range {
        source: String,
        first: Conversion,
        second: Conversion,
    },
}

/// One result per single amount or merged range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    /// Matched source text; for a range, everything from the first end to
    /// the second.
    pub original: String,
    pub start: usize,
    pub end: usize,
    pub outcome: Outcome,
    pub display: String,
}

impl ConversionResult {
    /// Converted value of a single amount.
    pub fn converted_value(&self) -> Option<Decimal> {
        match &self.outcome {
            Outcome::Single {
                conversion: Conversion::Converted { value, .. },
                ..
            } => Some(*value),
            _ => None,
        }
    }

    /// `"<symbol><value>"` for a converted single amount.
    pub fn converted_display(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Single {
                conversion: Conversion::Converted { display, .. },
                ..
            } => Some(display),
            _ => None,
        }
    }

    pub fn words(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Single {
                conversion: Conversion::Converted { words, .. },
                ..
            } => Some(words),
            _ => None,
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self.outcome, Outcome::Range { .. })
    }

    /// True when any end failed to convert (too-large ends excluded).
    pub fn has_failure(&self) -> bool {
        let failed = |c: &Conversion| matches!(c, Conversion::Failed { .. });
        match &self.outcome {
            Outcome::Single { conversion, .. } => failed(conversion),
            Outcome::Range { first, second, .. } => failed(first) || failed(second),
        }
    }
}

/// Results attached to a caller-supplied anchor, ready to show.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<A> {
    pub anchor: A,
    pub results: Vec<ConversionResult>,
    pub summary: String,
}

/// Registry and tokenizer a processing run reads from.
#[derive(Clone, Copy)]
pub struct Processor<'a> {
    registry: &'a Registry,
    tokenizer: &'a Tokenizer,
}

impl<'a> Processor<'a> {
    pub fn new(registry: &'a Registry, tokenizer: &'a Tokenizer) -> Self {
        Self {
            registry,
            tokenizer,
        }
    }

    pub fn global() -> Processor<'static> {
        Processor::new(Registry::global(), Tokenizer::global())
    }

    pub fn process(&self, text: &str, ctx: &ConversionContext) -> Vec<ConversionResult> {
        let _span = debug_span!("process", len = text.len(), currency = %ctx.target).entered();
        if ctx.target.trim().is_empty() {
            debug!("no target currency, skipping");
            return Vec::new();
        }

        let matches = self.tokenizer.tokenize(text);
        let results: Vec<ConversionResult> = detect_ranges(matches, text)
            .into_iter()
            .map(|unit| self.process_unit(unit, text, ctx))
            .collect();

        let failed = results.iter().filter(|r| r.has_failure()).count();
        debug!(results = results.len(), failed);
        results
    }

    fn process_unit(
        &self,
        unit: Unit<RawMatch>,
        text: &str,
        ctx: &ConversionContext,
    ) -> ConversionResult {
        match unit {
            Unit::Single(m) => {
                let (source, conversion) = self.convert_match(m.clone(), ctx);
                ConversionResult {
                    display: display::single(&m.text, &conversion),
                    original: m.text,
                    start: m.start,
                    end: m.end,
                    outcome: Outcome::Single { source, conversion },
                }
            }
            Unit::Range(r) => {
                let (start, end) = (r.first.start, r.second.end);
                let original = text.get(start..end).unwrap_or_default().to_string();
                let (source, first) = self.convert_match(r.first, ctx);
                let (_, second) = self.convert_match(r.second, ctx);
                ConversionResult {
                    display: display::range(&original, &first, &second),
                    original,
                    start,
                    end,
                    outcome: Outcome::Range {
                        source,
                        first,
                        second,
                    },
                }
            }
        }
    }

    /// Normalize and convert one match; returns its source code alongside.
    fn convert_match(&self, m: RawMatch, ctx: &ConversionContext) -> (String, Conversion) {
        let source = m.currency_code.clone().unwrap_or_default();
        let unit = match AmountUnit::from_match(m) {
            Ok(unit) => unit,
            Err(e) => {
                debug!("normalize failed: {e}");
                return (
                    source,
                    Conversion::Failed {
                        reason: e.to_string(),
                    },
                );
            }
        };
        let conversion = match unit.value {
            Amount::TooLarge => Conversion::TooLarge,
            Amount::Value(v) => match convert(v, &unit.currency_code, &ctx.target, &ctx.rates) {
                Ok(value) => Conversion::Converted {
                    value,
                    display: format!("{}{:.2}", self.registry.display_symbol(&ctx.target), value),
                    words: to_words_decimal(value, &ctx.target),
                },
                Err(e) => {
                    debug!(text = %unit.original.text, "conversion failed: {e}");
                    Conversion::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        };
        (source, conversion)
    }

    pub fn annotate<A>(
        &self,
        anchor: A,
        text: &str,
        ctx: &ConversionContext,
    ) -> Option<Annotation<A>> {
        let results = self.process(text, ctx);
        if results.is_empty() {
            return None;
        }
        let summary = summarize(
            &results,
            &crate::settings::settings().display.result_separator,
        );
        Some(Annotation {
            anchor,
            results,
            summary,
        })
    }
}

/// Process `text` with the global registry.
pub fn process(text: &str, ctx: &ConversionContext) -> Vec<ConversionResult> {
    Processor::global().process(text, ctx)
}

/// Process `text` and attach the results to `anchor`; `None` when nothing
/// matched so the caller can skip rendering.
pub fn annotate<A>(anchor: A, text: &str, ctx: &ConversionContext) -> Option<Annotation<A>> {
    Processor::global().annotate(anchor, text, ctx)
}

/// Join per-unit displays into one line.
pub fn summarize(results: &[ConversionResult], separator: &str) -> String {
    results
        .iter()
        .map(|r| r.display.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
