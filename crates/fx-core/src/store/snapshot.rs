use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, warn};

use super::{
    SettingsStore, StoreError, KEY_DEFAULT_CURRENCY, KEY_EXCHANGE_RATES, KEY_LAST_UPDATED,
};
use crate::convert::RateTable;
use crate::process::ConversionContext;

/// Current wall-clock time in Unix milliseconds.
pub fn now_ms() -> u64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    u64::try_from(nanos / 1_000_000).unwrap_or(0)
}

/// Cached rates together with their fetch time.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub rates: RateTable,
    pub last_updated_ms: u64,
}

impl RateSnapshot {
    /// Cached snapshot, or `None` unless both the rates and their
    /// timestamp are present and readable.
    pub fn load(store: &dyn SettingsStore) -> Option<Self> {
        let last_updated_ms = store.get(KEY_LAST_UPDATED)?.as_u64()?;
        let rates = cached_rates(store)?;
        Some(Self {
            rates,
            last_updated_ms,
        })
    }

    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), StoreError> {
        store.set(KEY_EXCHANGE_RATES, serde_json::to_value(&self.rates)?)?;
        store.set(KEY_LAST_UPDATED, Value::from(self.last_updated_ms))
    }

    /// Older than `max_age_ms` at `now_ms`.
    pub fn is_stale(&self, now_ms: u64, max_age_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_updated_ms) > max_age_ms
    }
}

/// Stored rate table, timestamp or not; `None` when absent or unreadable.
pub fn cached_rates(store: &dyn SettingsStore) -> Option<RateTable> {
    let rates = store.get(KEY_EXCHANGE_RATES)?;
    serde_json::from_value::<RateTable>(rates)
        .map_err(|e| warn!("cached rates unreadable: {e}"))
        .ok()
}

/// Stored target code, uppercased; `None` when absent or blank.
pub fn target_currency(store: &dyn SettingsStore) -> Option<String> {
    let value = store.get(KEY_DEFAULT_CURRENCY)?;
    let code = value.as_str()?.trim();
    (!code.is_empty()).then(|| code.to_ascii_uppercase())
}

pub fn set_target_currency(store: &dyn SettingsStore, code: &str) -> Result<(), StoreError> {
    store.set(
        KEY_DEFAULT_CURRENCY,
        Value::from(code.trim().to_ascii_uppercase()),
    )
}

impl ConversionContext {
    /// Context from stored settings; `None` when no target currency is set.
    /// Missing or unreadable rates give an empty table.
    pub fn from_store(store: &dyn SettingsStore) -> Option<Self> {
        let Some(target) = target_currency(store) else {
            debug!("no target currency stored");
            return None;
        };
        let rates = cached_rates(store).unwrap_or_default();
        Some(Self::new(target, rates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;
    use serde_json::json;

    const DAY_MS: u64 = 24 * 60 * 60 * 1000;

    #[test]
    fn snapshot_roundtrip() {
        let store = MemoryStore::new();
        let snap = RateSnapshot {
            rates: RateTable::from_pairs([("USD", 1.0), ("EUR", 0.9)]),
            last_updated_ms: 1_700_000_000_000,
        };
        snap.save(&store).unwrap();
        assert_eq!(store.get(KEY_LAST_UPDATED), Some(json!(1_700_000_000_000u64)));
        assert_eq!(RateSnapshot::load(&store), Some(snap));
    }

    #[test]
    fn snapshot_requires_timestamp() {
        let store = MemoryStore::new();
        store.set(KEY_EXCHANGE_RATES, json!({"USD": 1.0})).unwrap();
        assert_eq!(RateSnapshot::load(&store), None);
    }

    #[test]
    fn context_uses_rates_without_timestamp() {
        let store = MemoryStore::new();
        set_target_currency(&store, "EUR").unwrap();
        store
            .set(KEY_EXCHANGE_RATES, json!({"USD": 1, "EUR": 0.9}))
            .unwrap();

        assert_eq!(RateSnapshot::load(&store), None);
        let ctx = ConversionContext::from_store(&store).unwrap();
        assert_eq!(ctx.rates.len(), 2);
        let displays: Vec<String> = crate::process::process("$10", &ctx)
            .into_iter()
            .map(|r| r.display)
            .collect();
        assert_eq!(displays, vec!["$10 → €9.00 (Nine)"]);
    }

    #[test]
    fn unreadable_rates_give_empty_context_table() {
        let store = MemoryStore::new();
        set_target_currency(&store, "EUR").unwrap();
        store.set(KEY_EXCHANGE_RATES, json!("garbage")).unwrap();
        assert!(cached_rates(&store).is_none());
        assert!(ConversionContext::from_store(&store).unwrap().rates.is_empty());
    }

    #[test]
    fn snapshot_rejects_bad_rates() {
        let store = MemoryStore::new();
        store.set(KEY_EXCHANGE_RATES, json!(["USD"])).unwrap();
        store.set(KEY_LAST_UPDATED, json!(5)).unwrap();
        assert_eq!(RateSnapshot::load(&store), None);
    }

    #[test]
    fn staleness() {
        let snap = RateSnapshot {
            rates: RateTable::new(),
            last_updated_ms: 1_000,
        };
        assert!(!snap.is_stale(1_000 + DAY_MS, DAY_MS));
        assert!(snap.is_stale(1_001 + DAY_MS, DAY_MS));
        // clock behind the stored time
        assert!(!snap.is_stale(0, DAY_MS));
    }

    #[test]
    fn target_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(target_currency(&store), None);
        set_target_currency(&store, " eur ").unwrap();
        assert_eq!(target_currency(&store).as_deref(), Some("EUR"));
        store.set(KEY_DEFAULT_CURRENCY, json!("")).unwrap();
        assert_eq!(target_currency(&store), None);
        store.set(KEY_DEFAULT_CURRENCY, json!(42)).unwrap();
        assert_eq!(target_currency(&store), None);
    }

    #[test]
    fn context_from_store() {
        let store = MemoryStore::new();
        assert!(ConversionContext::from_store(&store).is_none());

        set_target_currency(&store, "INR").unwrap();
        let ctx = ConversionContext::from_store(&store).unwrap();
        assert_eq!(ctx.target, "INR");
        assert!(ctx.rates.is_empty());

        store
            .set(KEY_EXCHANGE_RATES, json!({"USD": 1, "INR": 83.5}))
            .unwrap();
        store.set(KEY_LAST_UPDATED, json!(1)).unwrap();
        let ctx = ConversionContext::from_store(&store).unwrap();
        assert_eq!(ctx.rates.get("INR"), Some(dec!(83.5)));
    }

    #[test]
    fn now_is_after_2020() {
        assert!(now_ms() > 1_577_836_800_000);
    }
}
