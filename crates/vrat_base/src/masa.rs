//! Amanta lunar month names.
//!
//! A month runs from one new moon to the next and takes its name from the
//! sidereal sign the Sun occupies at the opening new moon: Sun in Meena
//! opens Chaitra, Sun in Mesha opens Vaisakha, and so on.

use crate::util::floor_index;

/// The 12 amanta months starting from Chaitra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Masa {
    Chaitra,
    Vaisakha,
    Jyeshtha,
    Ashadha,
    Shravana,
    Bhadrapada,
    Ashwin,
    Kartika,
    Margashirsha,
    Pausha,
    Magha,
    Phalguna,
}

/// All 12 months in order (0 = Chaitra, 11 = Phalguna).
pub const ALL_MASAS: [Masa; 12] = [
    Masa::Chaitra,
    Masa::Vaisakha,
    Masa::Jyeshtha,
    Masa::Ashadha,
    Masa::Shravana,
    Masa::Bhadrapada,
    Masa::Ashwin,
    Masa::Kartika,
    Masa::Margashirsha,
    Masa::Pausha,
    Masa::Magha,
    Masa::Phalguna,
];

impl Masa {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chaitra => "Chaitra",
            Self::Vaisakha => "Vaisakha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Ashadha => "Ashadha",
            Self::Shravana => "Shravana",
            Self::Bhadrapada => "Bhadrapada",
            Self::Ashwin => "Ashwin",
            Self::Kartika => "Kartika",
            Self::Margashirsha => "Margashirsha",
            Self::Pausha => "Pausha",
            Self::Magha => "Magha",
            Self::Phalguna => "Phalguna",
        }
    }

    /// 0-based index (Chaitra = 0).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The month following this one.
    pub const fn next(self) -> Self {
        ALL_MASAS[(self.index() + 1) % 12]
    }

    /// The month preceding this one.
    pub const fn prev(self) -> Self {
        ALL_MASAS[(self.index() + 11) % 12]
    }
}

impl std::fmt::Display for Masa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Month index `⌊((λsid + 30) mod 360) / 30⌋` for the sidereal solar
/// longitude at the opening new moon.
pub fn amanta_index(sidereal_deg: f64) -> usize {
    floor_index((sidereal_deg + 30.0).rem_euclid(360.0), 30.0, 12)
}

/// Month named by the sidereal solar longitude at its opening new moon.
pub fn masa_for_sidereal(sidereal_deg: f64) -> Masa {
    ALL_MASAS[amanta_index(sidereal_deg)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_in_meena_opens_chaitra() {
        assert_eq!(masa_for_sidereal(345.0), Masa::Chaitra);
        assert_eq!(masa_for_sidereal(330.0), Masa::Chaitra);
    }

    #[test]
    fn sun_in_mesha_opens_vaisakha() {
        assert_eq!(masa_for_sidereal(0.0), Masa::Vaisakha);
        assert_eq!(masa_for_sidereal(29.99), Masa::Vaisakha);
    }

    #[test]
    fn sun_in_simha_opens_bhadrapada() {
        assert_eq!(masa_for_sidereal(125.0), Masa::Bhadrapada);
    }

    #[test]
    fn index_never_overflows() {
        for tenth in 0..3600 {
            let idx = amanta_index(f64::from(tenth) / 10.0);
            assert!(idx < 12);
        }
        assert!(amanta_index(329.999_999_999_999_9) < 12);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(Masa::Phalguna.next(), Masa::Chaitra);
        assert_eq!(Masa::Chaitra.prev(), Masa::Phalguna);
        assert_eq!(Masa::Shravana.next(), Masa::Bhadrapada);
    }
}
