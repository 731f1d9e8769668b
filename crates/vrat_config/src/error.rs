use thiserror::Error;
use vrat_base::VedicError;
use vrat_search::SearchError;

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or the merged tree does not deserialize.
    #[error("configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),
    /// Tradition or festival selection that the rule registry rejects.
    #[error("calendar settings: {0}")]
    Calendar(#[from] SearchError),
    #[error("unknown ayanamsha model {0:?}")]
    Ayanamsha(String),
    #[error("location settings: {0}")]
    Location(#[from] VedicError),
    #[error("ephemeris window {from}..={to} is empty")]
    EphemerisWindow { from: i32, to: i32 },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}
