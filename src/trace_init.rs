#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::OnceLock;

#[cfg(feature = "trace")]
use tracing_appender::rolling::{Builder, Rotation};
#[cfg(feature = "trace")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "fx_core=debug,fxconv_engine=debug";

/// Install a JSON subscriber writing `<log_dir>/fxconv-trace.jsonl`.
///
/// Only the first call does anything; its outcome is returned to every
/// later caller. Fails (returns `false`) when the log file can't be opened
/// or the host already installed a global subscriber.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> bool {
    static INSTALLED: OnceLock<bool> = OnceLock::new();
    *INSTALLED.get_or_init(|| {
        let appender = match Builder::new()
            .rotation(Rotation::NEVER)
            .filename_prefix("fxconv-trace")
            .filename_suffix("jsonl")
            .build(log_dir)
        {
            Ok(appender) => appender,
            Err(e) => {
                eprintln!("fxconv: trace log unavailable in {}: {e}", log_dir.display());
                return false;
            }
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        // the host keeps the engine loaded for its whole lifetime
        std::mem::forget(guard);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    })
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) -> bool {
    false
}
