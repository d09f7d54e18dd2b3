//! Host-facing engine: UniFFI bindings over `fx_core` for the browser
//! extension and native shells.

uniffi::setup_scaffolding!();

pub mod api;
pub mod trace_init;
