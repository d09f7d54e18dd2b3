pub mod commands;
pub mod rate_source;
