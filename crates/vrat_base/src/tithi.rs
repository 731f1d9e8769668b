//! Tithi (lunar day) and paksha arithmetic.
//!
//! The Moon−Sun elongation is divided into 30 bins of 12° each. Tithis 1–15
//! form the Shukla (waxing) paksha and 16–30 the Krishna (waning) paksha.

use chrono::{DateTime, Utc};
use vrat_ephem::{EphemerisError, PositionProvider};

/// Degrees of elongation per tithi.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Tithi number of Purnima (full moon).
pub const PURNIMA: u8 = 15;

/// Tithi number of Amavasya (new moon).
pub const AMAVASYA: u8 = 30;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Paksha {
    /// Waxing half, tithis 1–15.
    Shukla,
    /// Waning half, tithis 16–30.
    Krishna,
}

impl Paksha {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shukla => "Shukla",
            Self::Krishna => "Krishna",
        }
    }
}

/// Names of the 15 tithis within a paksha; index 14 is Purnima for Shukla.
const ORDINAL_NAMES: [&str; 15] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
];

/// A tithi, numbered 1–30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tithi(u8);

impl Tithi {
    /// Tithi from its absolute number; `None` outside 1..=30.
    pub const fn from_number(n: u8) -> Option<Self> {
        if n >= 1 && n <= 30 { Some(Self(n)) } else { None }
    }

    /// Tithi containing a Moon−Sun elongation (any real angle).
    pub fn from_elongation(elongation_deg: f64) -> Self {
        let e = elongation_deg.rem_euclid(360.0);
        let idx = (e / TITHI_SEGMENT_DEG).floor() as i64;
        // rem_euclid may round up to exactly 360 for tiny negative inputs
        Self((idx.clamp(0, 29) + 1) as u8)
    }

    /// Tithi from paksha and ordinal 1..=15; `None` for other ordinals.
    pub const fn from_paksha(paksha: Paksha, ordinal: u8) -> Option<Self> {
        if ordinal >= 1 && ordinal <= 15 {
            Some(Self(tithi_abs(paksha, ordinal)))
        } else {
            None
        }
    }

    /// Absolute number 1..=30.
    pub const fn number(self) -> u8 {
        self.0
    }

    pub const fn paksha(self) -> Paksha {
        paksha_for(self.0)
    }

    /// Position within the paksha, 1..=15.
    pub const fn ordinal(self) -> u8 {
        if self.0 <= 15 { self.0 } else { self.0 - 15 }
    }

    /// Sanskrit name; tithi 30 is Amavasya.
    pub const fn name(self) -> &'static str {
        if self.0 == AMAVASYA {
            "Amavasya"
        } else {
            ORDINAL_NAMES[(self.ordinal() - 1) as usize]
        }
    }
}

impl std::fmt::Display for Tithi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.paksha().name(), self.name(), self.0)
    }
}

/// Paksha of an absolute tithi number.
pub const fn paksha_for(tithi: u8) -> Paksha {
    if tithi >= 1 && tithi <= 15 {
        Paksha::Shukla
    } else {
        Paksha::Krishna
    }
}

/// Absolute tithi number for a paksha and ordinal in 1..=15.
///
/// Krishna Chaturthi → 19, Shukla Ekadashi → 11.
pub const fn tithi_abs(paksha: Paksha, ordinal: u8) -> u8 {
    match paksha {
        Paksha::Shukla => ordinal,
        Paksha::Krishna => 15 + ordinal,
    }
}

/// Tithi in force at an instant.
pub fn tithi_at(
    provider: &dyn PositionProvider,
    at: &DateTime<Utc>,
) -> Result<Tithi, EphemerisError> {
    let lon = provider.ecliptic_longitudes(at)?;
    Ok(Tithi::from_elongation(lon.elongation_deg()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elongation_bins() {
        assert_eq!(Tithi::from_elongation(0.0).number(), 1);
        assert_eq!(Tithi::from_elongation(11.999).number(), 1);
        assert_eq!(Tithi::from_elongation(12.0).number(), 2);
        assert_eq!(Tithi::from_elongation(179.9).number(), 15);
        assert_eq!(Tithi::from_elongation(180.0).number(), 16);
        assert_eq!(Tithi::from_elongation(359.999).number(), 30);
    }

    #[test]
    fn negative_and_tiny_elongations_stay_in_range() {
        assert_eq!(Tithi::from_elongation(-1.0).number(), 30);
        let t = Tithi::from_elongation(-1e-17).number();
        assert!((1..=30).contains(&t));
        assert_eq!(Tithi::from_elongation(725.0).number(), 1);
    }

    #[test]
    fn paksha_and_abs_are_inverse() {
        for n in 1..=30u8 {
            let t = Tithi::from_number(n).unwrap();
            assert_eq!(tithi_abs(t.paksha(), t.ordinal()), n);
        }
        for ord in 1..=15u8 {
            for p in [Paksha::Shukla, Paksha::Krishna] {
                let t = Tithi::from_paksha(p, ord).unwrap();
                assert_eq!((t.paksha(), t.ordinal()), (p, ord));
            }
        }
    }

    #[test]
    fn krishna_chaturthi_is_19() {
        assert_eq!(tithi_abs(Paksha::Krishna, 4), 19);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(Tithi::from_number(0).is_none());
        assert!(Tithi::from_number(31).is_none());
        assert!(Tithi::from_paksha(Paksha::Shukla, 16).is_none());
    }

    #[test]
    fn names() {
        assert_eq!(Tithi::from_number(15).unwrap().name(), "Purnima");
        assert_eq!(Tithi::from_number(30).unwrap().name(), "Amavasya");
        assert_eq!(Tithi::from_number(26).unwrap().name(), "Ekadashi");
        assert_eq!(
            Tithi::from_number(19).unwrap().to_string(),
            "Krishna Chaturthi (19)"
        );
    }
}
