//! Layered settings for the vrat calendar engine.
//!
//! Sources are merged in order, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (`vrat.toml` unless another path is given)
//! 3. `VRAT_` environment variables, sections separated by `__`
//!    (`VRAT_LOCATION__LATITUDE=19.07`)
//!
//! Command-line flags are applied by the binary on top of the result.

use chrono_tz::Tz;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use vrat_base::{AyanamshaModel, GeoLocation, parse_zone};
use vrat_ephem::EphemerisConfig;
use vrat_search::{AssemblyOptions, CategoryFlags, FestivalSelection, Tradition};

mod error;

pub use error::SettingsError;

/// File stem searched when no explicit path is given.
pub const DEFAULT_FILE: &str = "vrat";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "VRAT";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub location: LocationSettings,
    pub calendar: CalendarSettings,
    pub ephemeris: EphemerisSettings,
    pub logging: LoggingSettings,
}

/// Observer coordinates. Latitude and longitude have no default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationSettings {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub altitude_m: f64,
    /// IANA zone label; looked up from the coordinates when absent.
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarSettings {
    pub tradition: String,
    pub ayanamsha: String,
    /// `"all"` or a comma-separated list of festival keys.
    pub festivals: String,
    pub include: IncludeSettings,
}

/// Per-category switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IncludeSettings {
    pub ekadashi: bool,
    pub sankashti: bool,
    pub amavasya_purnima: bool,
    pub festivals: bool,
    pub rahu_kaal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EphemerisSettings {
    pub valid_from_year: i32,
    pub valid_to_year: i32,
    pub apply_delta_t: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    let eph = EphemerisConfig::default();
    Config::builder()
        .set_default("location.altitude_m", 0.0)?
        .set_default("calendar.tradition", Tradition::default().key())?
        .set_default("calendar.ayanamsha", AyanamshaModel::default().key())?
        .set_default("calendar.festivals", "all")?
        .set_default("calendar.include.ekadashi", true)?
        .set_default("calendar.include.sankashti", true)?
        .set_default("calendar.include.amavasya_purnima", true)?
        .set_default("calendar.include.festivals", true)?
        .set_default("calendar.include.rahu_kaal", true)?
        .set_default("ephemeris.valid_from_year", i64::from(eph.valid_from_year))?
        .set_default("ephemeris.valid_to_year", i64::from(eph.valid_to_year))?
        .set_default("ephemeris.apply_delta_t", eph.apply_delta_t)?
        .set_default("logging.level", "info")
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .ignore_empty(true)
        .try_parsing(true)
}

impl Settings {
    /// Defaults, then `vrat.toml` if present, then the environment.
    ///
    /// ## Errors
    /// Returns an error if a source fails to parse or the merged settings
    /// do not validate.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(DEFAULT_FILE)
    }

    /// Like [`Settings::load`] with an explicit file path or stem.
    ///
    /// A missing file is not an error.
    pub fn load_from(path: &str) -> Result<Self, SettingsError> {
        let settings: Settings = defaults()?
            .add_source(File::with_name(path).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        tracing::debug!(path, "settings loaded");
        Ok(settings)
    }

    /// Defaults overlaid with a TOML document. Ignores the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
        let settings: Settings = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Built-in defaults only.
    pub fn defaults() -> Result<Self, SettingsError> {
        Ok(defaults()?.build()?.try_deserialize()?)
    }

    /// Check every field that has a typed counterpart.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.tradition()?;
        self.ayanamsha()?;
        self.festivals()?;
        self.zone()?;
        if let Some(loc) = self.location() {
            loc.validate()?;
        }
        if self.ephemeris.valid_from_year > self.ephemeris.valid_to_year {
            return Err(SettingsError::EphemerisWindow {
                from: self.ephemeris.valid_from_year,
                to: self.ephemeris.valid_to_year,
            });
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(SettingsError::LogLevel(self.logging.level.clone()));
        }
        Ok(())
    }

    /// Configured observer, if both coordinates are set.
    pub fn location(&self) -> Option<GeoLocation> {
        let loc = &self.location;
        Some(GeoLocation::new(loc.latitude?, loc.longitude?, loc.altitude_m))
    }

    /// Configured civil timezone, if any.
    pub fn zone(&self) -> Result<Option<Tz>, SettingsError> {
        Ok(self.location.timezone.as_deref().map(parse_zone).transpose()?)
    }

    pub fn tradition(&self) -> Result<Tradition, SettingsError> {
        Ok(self.calendar.tradition.parse()?)
    }

    pub fn ayanamsha(&self) -> Result<AyanamshaModel, SettingsError> {
        self.calendar
            .ayanamsha
            .parse()
            .map_err(|_| SettingsError::Ayanamsha(self.calendar.ayanamsha.clone()))
    }

    pub fn festivals(&self) -> Result<FestivalSelection, SettingsError> {
        Ok(self.calendar.festivals.parse()?)
    }

    pub fn categories(&self) -> CategoryFlags {
        let inc = self.calendar.include;
        CategoryFlags {
            ekadashi: inc.ekadashi,
            sankashti: inc.sankashti,
            amavasya_purnima: inc.amavasya_purnima,
            festivals: inc.festivals,
            rahu_kaal: inc.rahu_kaal,
        }
    }

    /// Assembly options described by the calendar section.
    pub fn assembly_options(&self) -> Result<AssemblyOptions, SettingsError> {
        Ok(AssemblyOptions {
            tradition: self.tradition()?,
            categories: self.categories(),
            festivals: self.festivals()?,
            ayanamsha: self.ayanamsha()?,
        })
    }

    pub fn ephemeris_config(&self) -> EphemerisConfig {
        EphemerisConfig {
            valid_from_year: self.ephemeris.valid_from_year,
            valid_to_year: self.ephemeris.valid_to_year,
            apply_delta_t: self.ephemeris.apply_delta_t,
        }
    }
}
