use std::path::PathBuf;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod rates_ops;
pub mod scan_ops;
pub mod target_ops;
pub mod words_ops;

/// Store file used when `--store` is not given: `$FXTOOL_STORE`, else
/// `~/.config/fxconv/store.json`, else `fxconv-store.json` in the working
/// directory.
pub fn default_store_path() -> PathBuf {
    if let Some(path) = std::env::var_os("FXTOOL_STORE") {
        return PathBuf::from(path);
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("fxconv")
            .join("store.json"),
        None => PathBuf::from("fxconv-store.json"),
    }
}

pub(crate) fn open_store(path: &std::path::Path) -> fx_core::store::FileStore {
    die!(
        fx_core::store::FileStore::open(path),
        "Error opening store {}: {}",
        path.display()
    )
}
