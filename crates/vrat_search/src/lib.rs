//! Lunisolar observance search and event assembly.
//!
//! This crate provides:
//! - New-moon root finding and yearly lunation enumeration
//! - Amanta month naming and a date → month map
//! - The observance rule registry (Ekadashi, Sankashti, Amavasya/Purnima,
//!   and eighteen festivals)
//! - Rahu Kaal over a year with inspectable tie-breaks
//! - Event sets, stable identifiers and viewer-timezone coalescing

pub mod assembler;
pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod lunation;
pub mod lunation_types;
pub mod masa_map;
pub mod rahu_kaal;
pub mod rules;
pub(crate) mod search_util;

pub use assembler::{
    AssemblyOptions, CategoryFlags, Coalesced, FestivalSelection, assemble, coalesce_rahu_kaal,
};
pub use context::{DayOutcome, ObservanceContext, Probe, SkipReason, Tradition, scan_first};
pub use engine::{ObservanceEngine, YearData};
pub use error::SearchError;
pub use event::{Event, EventCategory, EventSet, EventTiming};
pub use lunation::{
    MEAN_SYNODIC_MONTH_DAYS, find_new_moon, lunation_guesses, lunations_covering_year,
    new_moon_offset_deg,
};
pub use lunation_types::{Lunation, LunationInterval, LunationSearchConfig};
pub use masa_map::{AmantaMonthMap, MonthMapError, amanta_lunation_intervals, interval_containing};
pub use rahu_kaal::{
    RAHU_KAAL_SUMMARY, RahuKaalConflict, RahuKaalReport, rahu_kaal_year, window_event,
};
pub use rules::{ALL_OBSERVANCES, Observance, ObservanceRule};
