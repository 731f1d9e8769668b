//! Observance engine: wires the collaborators and runs rules per year.

use std::sync::Arc;

use chrono_tz::Tz;
use vrat_base::{
    AstronomicalRiseSet, AyanamshaModel, CoordinateZoneResolver, FixedZoneResolver, GeoLocation,
    RiseSetConfig, RiseSetProvider, TimezoneResolver,
};
use vrat_ephem::PositionProvider;

use crate::assembler::{AssemblyOptions, assemble};
use crate::context::{ObservanceContext, Tradition};
use crate::error::SearchError;
use crate::event::{Event, EventSet};
use crate::lunation::lunations_covering_year;
use crate::lunation_types::{Lunation, LunationInterval, LunationSearchConfig};
use crate::masa_map::{AmantaMonthMap, amanta_lunation_intervals};
use crate::rahu_kaal::{RahuKaalReport, rahu_kaal_year};
use crate::rules::{Observance, ObservanceRule};

/// Lunations, named intervals and the date → month map for one year.
#[derive(Debug, Clone)]
pub struct YearData {
    pub year: i32,
    pub lunations: Vec<Lunation>,
    pub intervals: Vec<LunationInterval>,
    /// `None` when no month map could be built; see the logged warning.
    pub month_map: Option<AmantaMonthMap>,
}

/// Computes observances for locations and years.
///
/// Collaborators are injected; [`ObservanceEngine::with_defaults`] uses the
/// process-wide analytic ephemeris.
#[derive(Clone)]
pub struct ObservanceEngine {
    positions: Arc<dyn PositionProvider>,
    rise_set: Arc<dyn RiseSetProvider>,
    timezones: Arc<dyn TimezoneResolver>,
    lunation_config: LunationSearchConfig,
}

impl std::fmt::Debug for ObservanceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservanceEngine")
            .field("lunation_config", &self.lunation_config)
            .finish_non_exhaustive()
    }
}

impl ObservanceEngine {
    pub fn new(
        positions: Arc<dyn PositionProvider>,
        rise_set: Arc<dyn RiseSetProvider>,
        timezones: Arc<dyn TimezoneResolver>,
    ) -> Self {
        Self {
            positions,
            rise_set,
            timezones,
            lunation_config: LunationSearchConfig::default(),
        }
    }

    /// Shared ephemeris and astronomical rise/set.
    ///
    /// Civil dates are counted in `zone` when given, otherwise in the zone
    /// looked up from each location's coordinates.
    pub fn with_defaults(zone: Option<Tz>) -> Self {
        let positions: Arc<dyn PositionProvider> = vrat_ephem::global::handle();
        let rise_set = AstronomicalRiseSet::new(Arc::clone(&positions), RiseSetConfig::default());
        let timezones: Arc<dyn TimezoneResolver> = match zone {
            Some(zone) => Arc::new(FixedZoneResolver::new(zone)),
            None => Arc::new(CoordinateZoneResolver::default()),
        };
        Self::new(positions, Arc::new(rise_set), timezones)
    }

    pub fn with_lunation_config(mut self, config: LunationSearchConfig) -> Self {
        self.lunation_config = config;
        self
    }

    pub fn positions(&self) -> &dyn PositionProvider {
        self.positions.as_ref()
    }

    pub fn rise_set(&self) -> &dyn RiseSetProvider {
        self.rise_set.as_ref()
    }

    pub fn zone_for(&self, location: &GeoLocation) -> Tz {
        self.timezones.zone_for(location)
    }

    /// New moons covering a civil year.
    pub fn lunations(&self, year: i32) -> Result<Vec<Lunation>, SearchError> {
        Ok(lunations_covering_year(
            self.positions(),
            year,
            &self.lunation_config,
        )?)
    }

    /// Named amanta months covering a civil year.
    pub fn lunation_intervals(
        &self,
        year: i32,
        model: AyanamshaModel,
    ) -> Result<Vec<LunationInterval>, SearchError> {
        let lunations = self.lunations(year)?;
        Ok(amanta_lunation_intervals(self.positions(), &lunations, model)?)
    }

    /// Date → month lookup for a civil year.
    pub fn month_map(
        &self,
        year: i32,
        model: AyanamshaModel,
    ) -> Result<AmantaMonthMap, SearchError> {
        let intervals = self.lunation_intervals(year, model)?;
        Ok(AmantaMonthMap::build(year, &intervals)?)
    }

    /// Everything the rules need for a year, computed once.
    pub fn prepare_year(&self, year: i32, model: AyanamshaModel) -> Result<YearData, SearchError> {
        let lunations = self.lunations(year)?;
        let intervals = amanta_lunation_intervals(self.positions(), &lunations, model)?;
        let month_map = match AmantaMonthMap::build(year, &intervals) {
            Ok(map) => Some(map),
            Err(e) => {
                tracing::warn!(year, error = %e, "month map unavailable");
                None
            }
        };
        tracing::info!(
            year,
            lunations = lunations.len(),
            intervals = intervals.len(),
            "year prepared"
        );
        Ok(YearData {
            year,
            lunations,
            intervals,
            month_map,
        })
    }

    fn context<'a>(
        &'a self,
        location: &'a GeoLocation,
        data: &'a YearData,
        tradition: Tradition,
        ayanamsha: AyanamshaModel,
    ) -> ObservanceContext<'a> {
        ObservanceContext {
            location,
            tz: self.zone_for(location),
            year: data.year,
            tradition,
            ayanamsha,
            intervals: &data.intervals,
            month_map: data.month_map.as_ref(),
            positions: self.positions(),
            rise_set: self.rise_set(),
        }
    }

    /// Run one rule against prepared year data.
    pub fn evaluate_prepared(
        &self,
        rule: Observance,
        location: &GeoLocation,
        data: &YearData,
        tradition: Tradition,
        ayanamsha: AyanamshaModel,
    ) -> Result<Vec<Event>, SearchError> {
        location.validate()?;
        let ctx = self.context(location, data, tradition, ayanamsha);
        rule.evaluate(&ctx)
    }

    /// Run one rule standalone.
    pub fn evaluate(
        &self,
        rule: Observance,
        location: &GeoLocation,
        year: i32,
        tradition: Tradition,
        ayanamsha: AyanamshaModel,
    ) -> Result<Vec<Event>, SearchError> {
        location.validate()?;
        let data = self.prepare_year(year, ayanamsha)?;
        self.evaluate_prepared(rule, location, &data, tradition, ayanamsha)
    }

    /// Rahu Kaal windows for every date of a year.
    pub fn rahu_kaal(&self, location: &GeoLocation, year: i32) -> Result<RahuKaalReport, SearchError> {
        location.validate()?;
        let tz = self.zone_for(location);
        rahu_kaal_year(self.rise_set(), location, &tz, year)
    }

    /// Unordered `(all_day, timed)` events of one year.
    fn collect_year(
        &self,
        location: &GeoLocation,
        year: i32,
        options: &AssemblyOptions,
    ) -> Result<(Vec<Event>, Vec<Event>), SearchError> {
        let rules = options.selected_rules();
        let mut all_day = Vec::new();
        if !rules.is_empty() {
            let data = self.prepare_year(year, options.ayanamsha)?;
            for rule in rules {
                all_day.extend(self.evaluate_prepared(
                    rule,
                    location,
                    &data,
                    options.tradition,
                    options.ayanamsha,
                )?);
            }
        }
        let timed = if options.categories.rahu_kaal {
            let tz = self.zone_for(location);
            self.rahu_kaal(location, year)?.to_events(&tz)
        } else {
            Vec::new()
        };
        Ok((all_day, timed))
    }

    /// Ordered, deduplicated events of one year.
    pub fn events_for_year(
        &self,
        location: &GeoLocation,
        year: i32,
        options: &AssemblyOptions,
    ) -> Result<EventSet, SearchError> {
        location.validate()?;
        let (all_day, timed) = self.collect_year(location, year, options)?;
        let set = assemble(all_day, timed);
        tracing::info!(year, events = set.len(), "events assembled");
        Ok(set)
    }

    /// Events of `from..=to`, ordered and deduplicated as one set.
    pub fn events_for_years(
        &self,
        location: &GeoLocation,
        from: i32,
        to: i32,
        options: &AssemblyOptions,
    ) -> Result<EventSet, SearchError> {
        if from > to {
            return Err(SearchError::InvalidYearRange { from, to });
        }
        location.validate()?;
        let mut all_day = Vec::new();
        let mut timed = Vec::new();
        for year in from..=to {
            let (a, t) = self.collect_year(location, year, options)?;
            all_day.extend(a);
            timed.extend(t);
        }
        let set = assemble(all_day, timed);
        tracing::info!(from, to, events = set.len(), "events assembled");
        Ok(set)
    }
}
