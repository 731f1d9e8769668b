//! Calendar primitives for the vrat observance engine.
//!
//! - Tithi and paksha arithmetic over Moon−Sun elongation
//! - Lahiri ayanamsha approximations and sidereal solar longitude
//! - Amanta month and rashi naming
//! - Sunrise/sunset and moonrise behind [`RiseSetProvider`]
//! - Timezone resolution and local-clock helpers
//! - Rahu Kaal daylight segmentation

pub mod ayanamsha;
pub mod error;
pub mod masa;
pub mod rahu_kaal;
pub mod rashi;
pub mod riseset;
pub mod riseset_types;
pub mod timezone;
pub mod tithi;
mod util;

pub use ayanamsha::{AyanamshaModel, ayanamsha_deg, sidereal_solar_longitude};
pub use error::VedicError;
pub use masa::{ALL_MASAS, Masa, amanta_index, masa_for_sidereal};
pub use rahu_kaal::{RahuKaalWindow, daylight_segments, rahu_kaal_for, rahu_kaal_window, rahu_segment};
pub use rashi::{ALL_RASHIS, Rashi, rashi_from_sidereal, rashi_index};
pub use riseset::{AstronomicalRiseSet, RiseSetProvider};
pub use riseset_types::{GeoLocation, RiseSetConfig, SunTimes};
pub use timezone::{
    CoordinateZoneResolver, FixedZoneResolver, TimezoneResolver, local_day_bounds, local_instant,
    noon_utc, parse_zone,
};
pub use tithi::{AMAVASYA, PURNIMA, Paksha, Tithi, paksha_for, tithi_abs, tithi_at};
