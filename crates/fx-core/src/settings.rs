//! Engine settings loaded from TOML, following the same OnceLock pattern as
//! the currency registry.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub precision: PrecisionSettings,
    pub rates: RateSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrecisionSettings {
    /// Literals with more digits than this are reported as too large.
    pub max_safe_digits: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateSettings {
    pub source_url: String,
    pub max_age_hours: u64,
}

impl RateSettings {
    pub fn max_age_ms(&self) -> u64 {
        self.max_age_hours.saturating_mul(60 * 60 * 1000)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    pub result_separator: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_positive!(precision.max_safe_digits);
    check_positive!(rates.max_age_hours);
    check_non_empty!(rates.source_url);
    check_non_empty!(display.result_separator);

    // Decimal has 28 significant digits; beyond that parsing itself fails.
    if s.precision.max_safe_digits > 28 {
        return Err(SettingsError::InvalidValue {
            field: "precision.max_safe_digits".to_string(),
            reason: "must be at most 28".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.precision.max_safe_digits, 15);
        assert_eq!(s.rates.source_url, "https://open.er-api.com/v6/latest/USD");
        assert_eq!(s.rates.max_age_hours, 24);
        assert_eq!(s.rates.max_age_ms(), 86_400_000);
        assert_eq!(s.display.result_separator, "; ");
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[precision]
max_safe_digits = 12

[rates]
source_url = "http://localhost:8080/latest"
max_age_hours = 6

[display]
result_separator = " | "
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.precision.max_safe_digits, 12);
        assert_eq!(s.rates.max_age_hours, 6);
        assert_eq!(s.display.result_separator, " | ");
    }

    #[test]
    fn error_zero_digits() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_safe_digits = 15", "max_safe_digits = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("precision.max_safe_digits"));
    }

    #[test]
    fn error_too_many_digits() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_safe_digits = 15", "max_safe_digits = 40");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("at most 28"));
    }

    #[test]
    fn error_zero_max_age() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_age_hours = 24", "max_age_hours = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("rates.max_age_hours"));
    }

    #[test]
    fn error_empty_separator() {
        let toml =
            DEFAULT_SETTINGS_TOML.replace("result_separator = \"; \"", "result_separator = \"\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("display.result_separator"));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[precision]\nmax_safe_digits = 15\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
