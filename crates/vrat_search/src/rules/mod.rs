//! Observance rule registry.
//!
//! Every rule is a variant of [`Observance`] and evaluates independently
//! against an [`ObservanceContext`]. An empty result means the target tithi
//! did not occur in the rule's window; it is not an error.

use std::str::FromStr;

use crate::context::ObservanceContext;
use crate::error::SearchError;
use crate::event::{Event, EventCategory};

pub mod diwali;
pub mod ekadashi;
pub mod festivals;
pub mod lunar_days;
pub mod navaratri;
pub mod ram_navami;
pub mod sankranti;

/// Common interface of all rules.
pub trait ObservanceRule {
    /// Registry key, e.g. `"gudi_padwa"`.
    fn key(&self) -> &'static str;

    /// Category of the events produced.
    fn category(&self) -> EventCategory;

    /// Candidate events for the context's year, in date order.
    fn evaluate(&self, ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError>;
}

/// The fixed rule catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Observance {
    Ekadashi,
    Sankashti,
    AmavasyaPurnima,
    MakaraSankranti,
    GudiPadwa,
    GaneshChaturthi,
    HartalikaTeej,
    HariyaliTeej,
    NagPanchami,
    Navaratri,
    PitruPaksha,
    KarwaChauth,
    Diwali,
    RamNavami,
    AkshayaTritiya,
    GuruNanak,
    Mahashivratri,
    Holi,
    RakshaBandhan,
    Janmashtami,
    HanumanJayanti,
}

/// All rules in evaluation order.
pub const ALL_OBSERVANCES: [Observance; 21] = [
    Observance::Ekadashi,
    Observance::Sankashti,
    Observance::AmavasyaPurnima,
    Observance::MakaraSankranti,
    Observance::GudiPadwa,
    Observance::GaneshChaturthi,
    Observance::HartalikaTeej,
    Observance::HariyaliTeej,
    Observance::NagPanchami,
    Observance::Navaratri,
    Observance::PitruPaksha,
    Observance::KarwaChauth,
    Observance::Diwali,
    Observance::RamNavami,
    Observance::AkshayaTritiya,
    Observance::GuruNanak,
    Observance::Mahashivratri,
    Observance::Holi,
    Observance::RakshaBandhan,
    Observance::Janmashtami,
    Observance::HanumanJayanti,
];

impl Observance {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ekadashi => "ekadashi",
            Self::Sankashti => "sankashti",
            Self::AmavasyaPurnima => "amavasya_purnima",
            Self::MakaraSankranti => "makara_sankranti",
            Self::GudiPadwa => "gudi_padwa",
            Self::GaneshChaturthi => "ganesh_chaturthi",
            Self::HartalikaTeej => "hartalika_teej",
            Self::HariyaliTeej => "hariyali_teej",
            Self::NagPanchami => "nag_panchami",
            Self::Navaratri => "navaratri",
            Self::PitruPaksha => "pitru_paksha",
            Self::KarwaChauth => "karwa_chauth",
            Self::Diwali => "diwali",
            Self::RamNavami => "ram_navami",
            Self::AkshayaTritiya => "akshaya_tritiya",
            Self::GuruNanak => "guru_nanak",
            Self::Mahashivratri => "mahashivratri",
            Self::Holi => "holi",
            Self::RakshaBandhan => "raksha_bandhan",
            Self::Janmashtami => "janmashtami",
            Self::HanumanJayanti => "hanuman_jayanti",
        }
    }

    pub const fn category(self) -> EventCategory {
        match self {
            Self::Ekadashi => EventCategory::Ekadashi,
            Self::Sankashti => EventCategory::Sankashti,
            Self::AmavasyaPurnima => EventCategory::AmavasyaPurnima,
            _ => EventCategory::Festival,
        }
    }

    /// Whether the rule is selected through the festival allowlist.
    pub const fn is_festival(self) -> bool {
        matches!(self.category(), EventCategory::Festival)
    }

    /// Registry lookup; `navaratri_start` is accepted for `navaratri`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "navaratri_start" => Some(Self::Navaratri),
            key => ALL_OBSERVANCES.into_iter().find(|o| o.key() == key),
        }
    }

    /// Festival rules in registry order.
    pub fn festivals() -> impl Iterator<Item = Observance> {
        ALL_OBSERVANCES.into_iter().filter(|o| o.is_festival())
    }
}

impl FromStr for Observance {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| SearchError::UnknownFestival(s.trim().to_string()))
    }
}

impl std::fmt::Display for Observance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl ObservanceRule for Observance {
    fn key(&self) -> &'static str {
        Observance::key(*self)
    }

    fn category(&self) -> EventCategory {
        Observance::category(*self)
    }

    fn evaluate(&self, ctx: &ObservanceContext<'_>) -> Result<Vec<Event>, SearchError> {
        let events = match self {
            Self::Ekadashi => ekadashi::ekadashi_events(ctx)?,
            Self::Sankashti => lunar_days::sankashti_events(ctx)?,
            Self::AmavasyaPurnima => lunar_days::amavasya_purnima_events(ctx)?,
            Self::MakaraSankranti => sankranti::makara_sankranti(ctx)?,
            Self::GudiPadwa => festivals::gudi_padwa(ctx)?,
            Self::GaneshChaturthi => festivals::ganesh_chaturthi(ctx)?,
            Self::HartalikaTeej => festivals::hartalika_teej(ctx)?,
            Self::HariyaliTeej => festivals::hariyali_teej(ctx)?,
            Self::NagPanchami => festivals::nag_panchami(ctx)?,
            Self::Navaratri => navaratri::navaratri(ctx)?,
            Self::PitruPaksha => festivals::pitru_paksha(ctx)?,
            Self::KarwaChauth => festivals::karwa_chauth(ctx)?,
            Self::Diwali => diwali::diwali_bundle(ctx)?,
            Self::RamNavami => ram_navami::ram_navami(ctx)?,
            Self::AkshayaTritiya => festivals::akshaya_tritiya(ctx)?,
            Self::GuruNanak => festivals::guru_nanak_jayanti(ctx)?,
            Self::Mahashivratri => festivals::mahashivratri(ctx)?,
            Self::Holi => festivals::holi(ctx)?,
            Self::RakshaBandhan => festivals::raksha_bandhan(ctx)?,
            Self::Janmashtami => festivals::janmashtami(ctx)?,
            Self::HanumanJayanti => festivals::hanuman_jayanti(ctx)?,
        };
        tracing::debug!(rule = self.key(), year = ctx.year, count = events.len(), "rule evaluated");
        Ok(events)
    }
}

/// `"{what} ({zone})."`, the description format shared by all rules.
pub(crate) fn describe(ctx: &ObservanceContext<'_>, what: &str) -> String {
    format!("{what} ({}).", ctx.tz.name())
}
