use std::path::Path;

use fx_core::settings::settings;
use fx_core::store::{now_ms, RateSnapshot};
use fx_core::RateTable;

use super::open_store;
use crate::rate_source::{refresh_if_stale, OpenErApiSource, RateSource, Refresh};

fn source(url: Option<&str>) -> OpenErApiSource {
    match url {
        Some(u) => OpenErApiSource::new(u),
        None => OpenErApiSource::from_settings(),
    }
}

fn print_rates(rates: &RateTable) {
    for (code, rate) in rates.iter() {
        println!("{code}\t{rate}");
    }
}

fn describe_age(age_ms: u64) -> String {
    let minutes = age_ms / 60_000;
    match minutes {
        0 => "just now".to_string(),
        m if m < 60 => format!("{m} min ago"),
        m => format!("{}h {}min ago", m / 60, m % 60),
    }
}

/// Fetch and print without touching the store.
pub fn fetch(url: Option<&str>) {
    let src = source(url);
    eprintln!("Fetching {}...", src.url());
    let rates = die!(src.fetch(), "Error: {}");
    print_rates(&rates);
    eprintln!("{} rates", rates.len());
}

pub fn update(store_path: &Path, url: Option<&str>, force: bool) {
    let store = open_store(store_path);
    let src = source(url);
    // a zero max age treats any cached snapshot as stale
    let max_age = if force {
        0
    } else {
        settings().rates.max_age_ms()
    };
    let outcome = die!(
        refresh_if_stale(&store, &src, now_ms(), max_age),
        "Error updating {}: {}",
        store_path.display()
    );
    match outcome {
        Refresh::Fresh => println!("Cached rates are fresh; nothing fetched"),
        Refresh::Updated { count } => {
            println!("Fetched {count} rates from {}", src.url())
        }
        Refresh::Failed {
            reason,
            kept_cached,
        } => {
            eprintln!("Fetch failed: {reason}");
            if kept_cached {
                eprintln!("Keeping previously cached rates");
            } else {
                std::process::exit(1);
            }
        }
    }
}

pub fn show(store_path: &Path) {
    let store = open_store(store_path);
    let Some(snapshot) = RateSnapshot::load(&store) else {
        println!("No cached rates; run `fxtool rates update`");
        return;
    };
    let now = now_ms();
    let stale = snapshot.is_stale(now, settings().rates.max_age_ms());
    println!(
        "{} rates, updated {}{}",
        snapshot.rates.len(),
        describe_age(now.saturating_sub(snapshot.last_updated_ms)),
        if stale { " (stale)" } else { "" }
    );
    print_rates(&snapshot.rates);
}
