//! Sidereal zodiac signs.

use crate::util::floor_index;

/// The 12 rashis starting from Mesha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// 0-based index (Mesha = 0).
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rashi index `⌊λsid / 30⌋` in 0..12.
pub fn rashi_index(sidereal_deg: f64) -> usize {
    floor_index(sidereal_deg.rem_euclid(360.0), 30.0, 12)
}

/// Rashi containing a sidereal longitude.
pub fn rashi_from_sidereal(sidereal_deg: f64) -> Rashi {
    ALL_RASHIS[rashi_index(sidereal_deg)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(rashi_from_sidereal(0.0), Rashi::Mesha);
        assert_eq!(rashi_from_sidereal(270.0), Rashi::Makara);
        assert_eq!(rashi_from_sidereal(195.0), Rashi::Tula);
        assert_eq!(rashi_from_sidereal(-0.5), Rashi::Meena);
    }

    #[test]
    fn makara_is_index_nine() {
        assert_eq!(Rashi::Makara.index(), 9);
        assert_eq!(rashi_index(285.0), 9);
    }
}
