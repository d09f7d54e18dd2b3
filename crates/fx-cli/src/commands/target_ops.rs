use std::path::Path;

use fx_core::registry::Registry;
use fx_core::store::{set_target_currency, target_currency};

use super::open_store;

pub fn set(store_path: &Path, code: &str) {
    let reg = Registry::global();
    let Some(def) = reg.get(code.trim()) else {
        eprintln!("Error: unknown currency code {code:?} (see `fxtool currencies list`)");
        std::process::exit(1);
    };
    let store = open_store(store_path);
    die!(
        set_target_currency(&store, &def.code),
        "Error writing {}: {}",
        store_path.display()
    );
    println!("Target currency: {} ({} {})", def.code, def.symbol, def.name);
}

pub fn show(store_path: &Path) {
    let store = open_store(store_path);
    match target_currency(&store) {
        Some(code) => {
            let reg = Registry::global();
            match reg.get(&code) {
                Some(def) => println!("{} ({} {})", def.code, def.symbol, def.name),
                None => println!("{code} (not in registry)"),
            }
        }
        None => println!("No target currency set"),
    }
}
