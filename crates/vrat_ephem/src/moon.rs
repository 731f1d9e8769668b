//! Geometric lunar position from the principal ELP-2000/82 terms.
//!
//! Meeus ch. 47: periodic terms in longitude and distance (table 47.A) and
//! latitude (table 47.B), with the Venus/Jupiter/flattening corrections
//! A1–A3. Accuracy is about 10″ in longitude and 4″ in latitude.

use crate::util::normalize_360;

/// Geometric lunar longitude, latitude and distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LunarGeometry {
    /// Geocentric longitude referred to the mean equinox of date (degrees).
    pub longitude_deg: f64,
    /// Geocentric latitude (degrees).
    pub latitude_deg: f64,
    /// Earth–Moon distance between centres (km).
    pub distance_km: f64,
}

/// Longitude and distance terms: `[D, M, M', F, Σl (1e-6 deg), Σr (1e-3 km)]`.
#[rustfmt::skip]
const LON_DIST_TERMS: [[i64; 6]; 60] = [
    [0,  0,  1,  0, 6_288_774, -20_905_355],
    [2,  0, -1,  0, 1_274_027,  -3_699_111],
    [2,  0,  0,  0,   658_314,  -2_955_968],
    [0,  0,  2,  0,   213_618,    -569_925],
    [0,  1,  0,  0,  -185_116,      48_888],
    [0,  0,  0,  2,  -114_332,      -3_149],
    [2,  0, -2,  0,    58_793,     246_158],
    [2, -1, -1,  0,    57_066,    -152_138],
    [2,  0,  1,  0,    53_322,    -170_733],
    [2, -1,  0,  0,    45_758,    -204_586],
    [0,  1, -1,  0,   -40_923,    -129_620],
    [1,  0,  0,  0,   -34_720,     108_743],
    [0,  1,  1,  0,   -30_383,     104_755],
    [2,  0,  0, -2,    15_327,      10_321],
    [0,  0,  1,  2,   -12_528,           0],
    [0,  0,  1, -2,    10_980,      79_661],
    [4,  0, -1,  0,    10_675,     -34_782],
    [0,  0,  3,  0,    10_034,     -23_210],
    [4,  0, -2,  0,     8_548,     -21_636],
    [2,  1, -1,  0,    -7_888,      24_208],
    [2,  1,  0,  0,    -6_766,      30_824],
    [1,  0, -1,  0,    -5_163,      -8_379],
    [1,  1,  0,  0,     4_987,     -16_675],
    [2, -1,  1,  0,     4_036,     -12_831],
    [2,  0,  2,  0,     3_994,     -10_445],
    [4,  0,  0,  0,     3_861,     -11_650],
    [2,  0, -3,  0,     3_665,      14_403],
    [0,  1, -2,  0,    -2_689,      -7_003],
    [2,  0, -1,  2,    -2_602,           0],
    [2, -1, -2,  0,     2_390,      10_056],
    [1,  0,  1,  0,    -2_348,       6_322],
    [2, -2,  0,  0,     2_236,      -9_884],
    [0,  1,  2,  0,    -2_120,       5_751],
    [0,  2,  0,  0,    -2_069,           0],
    [2, -2, -1,  0,     2_048,      -4_950],
    [2,  0,  1, -2,    -1_773,       4_130],
    [2,  0,  0,  2,    -1_595,           0],
    [4, -1, -1,  0,     1_215,      -3_958],
    [0,  0,  2,  2,    -1_110,           0],
    [3,  0, -1,  0,      -892,       3_258],
    [2,  1,  1,  0,      -810,       2_616],
    [4, -1, -2,  0,       759,      -1_897],
    [0,  2, -1,  0,      -713,      -2_117],
    [2,  2, -1,  0,      -700,       2_354],
    [2,  1, -2,  0,       691,           0],
    [2, -1,  0, -2,       596,           0],
    [4,  0,  1,  0,       549,      -1_423],
    [0,  0,  4,  0,       537,      -1_117],
    [4, -1,  0,  0,       520,      -1_571],
    [1,  0, -2,  0,      -487,      -1_739],
    [2,  1,  0, -2,      -399,           0],
    [0,  0,  2, -2,      -381,      -4_421],
    [1,  1,  1,  0,       351,           0],
    [3,  0, -2,  0,      -340,           0],
    [4,  0, -3,  0,       330,           0],
    [2, -1,  2,  0,       327,           0],
    [0,  2,  1,  0,      -323,       1_165],
    [1,  1, -1,  0,       299,           0],
    [2,  0,  3,  0,       294,           0],
    [2,  0, -1, -2,         0,       8_752],
];

/// Latitude terms: `[D, M, M', F, Σb (1e-6 deg)]`.
#[rustfmt::skip]
const LAT_TERMS: [[i64; 5]; 60] = [
    [0,  0,  0,  1, 5_128_122],
    [0,  0,  1,  1,   280_602],
    [0,  0,  1, -1,   277_693],
    [2,  0,  0, -1,   173_237],
    [2,  0, -1,  1,    55_413],
    [2,  0, -1, -1,    46_271],
    [2,  0,  0,  1,    32_573],
    [0,  0,  2,  1,    17_198],
    [2,  0,  1, -1,     9_266],
    [0,  0,  2, -1,     8_822],
    [2, -1,  0, -1,     8_216],
    [2,  0, -2, -1,     4_324],
    [2,  0,  1,  1,     4_200],
    [2,  1,  0, -1,    -3_359],
    [2, -1, -1,  1,     2_463],
    [2, -1,  0,  1,     2_211],
    [2, -1, -1, -1,     2_065],
    [0,  1, -1, -1,    -1_870],
    [4,  0, -1, -1,     1_828],
    [0,  1,  0,  1,    -1_794],
    [0,  0,  0,  3,    -1_749],
    [0,  1, -1,  1,    -1_565],
    [1,  0,  0,  1,    -1_491],
    [0,  1,  1,  1,    -1_475],
    [0,  1,  1, -1,    -1_410],
    [0,  1,  0, -1,    -1_344],
    [1,  0,  0, -1,    -1_335],
    [0,  0,  3,  1,     1_107],
    [4,  0,  0, -1,     1_021],
    [4,  0, -1,  1,       833],
    [0,  0,  1, -3,       777],
    [4,  0, -2,  1,       671],
    [2,  0,  0, -3,       607],
    [2,  0,  2, -1,       596],
    [2, -1,  1, -1,       491],
    [2,  0, -2,  1,      -451],
    [0,  0,  3, -1,       439],
    [2,  0,  2,  1,       422],
    [2,  0, -3, -1,       421],
    [2,  1, -1,  1,      -366],
    [2,  1,  0,  1,      -351],
    [4,  0,  0,  1,       331],
    [2, -1,  1,  1,       315],
    [2, -2,  0, -1,       302],
    [0,  0,  1,  3,      -283],
    [2,  1,  1, -1,      -229],
    [1,  1,  0, -1,       223],
    [1,  1,  0,  1,       223],
    [0,  1, -2, -1,      -220],
    [2,  1, -1, -1,      -220],
    [1,  0,  1,  1,      -185],
    [2, -1, -2, -1,       181],
    [0,  1,  2,  1,      -177],
    [4,  0, -2, -1,       176],
    [4, -1, -1, -1,       166],
    [1,  0,  1, -1,      -164],
    [4,  0,  1, -1,       132],
    [1,  0, -1, -1,      -119],
    [4, -1,  0, -1,       115],
    [2, -2,  0,  1,       107],
];

/// Mean arguments of the lunar theory in degrees.
struct Arguments {
    l_prime: f64,
    d: f64,
    m: f64,
    m_prime: f64,
    f: f64,
    /// Eccentricity factor of Earth's orbit applied to terms in M.
    e: f64,
}

impl Arguments {
    fn at(t: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        Self {
            l_prime: 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
                - t4 / 65_194_000.0,
            d: 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
                - t4 / 113_065_000.0,
            m: 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0,
            m_prime: 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
                - t4 / 14_712_000.0,
            f: 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
                + t4 / 863_310_000.0,
            e: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
        }
    }

    /// Argument of a periodic term and its eccentricity weight.
    fn term(&self, d: i64, m: i64, mp: i64, f: i64) -> (f64, f64) {
        let arg = (d as f64 * self.d
            + m as f64 * self.m
            + mp as f64 * self.m_prime
            + f as f64 * self.f)
            .to_radians();
        let weight = match m.abs() {
            0 => 1.0,
            1 => self.e,
            _ => self.e * self.e,
        };
        (arg, weight)
    }
}

/// Lunar geometry at `t` Julian centuries (TT) since J2000.0.
pub fn lunar_geometry(t: f64) -> LunarGeometry {
    let args = Arguments::at(t);

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &[d, m, mp, f, cl, cr] in &LON_DIST_TERMS {
        let (arg, w) = args.term(d, m, mp, f);
        sum_l += cl as f64 * w * arg.sin();
        sum_r += cr as f64 * w * arg.cos();
    }

    let mut sum_b = 0.0;
    for &[d, m, mp, f, cb] in &LAT_TERMS {
        let (arg, w) = args.term(d, m, mp, f);
        sum_b += cb as f64 * w * arg.sin();
    }

    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();
    let lp = args.l_prime.to_radians();
    let f = args.f.to_radians();
    let mp = args.m_prime.to_radians();

    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    LunarGeometry {
        longitude_deg: normalize_360(args.l_prime + sum_l / 1e6),
        latitude_deg: sum_b / 1e6,
        distance_km: 385_000.56 + sum_r / 1000.0,
    }
}

/// Equatorial horizontal parallax of the Moon in degrees.
pub fn horizontal_parallax_deg(distance_km: f64) -> f64 {
    (6378.14 / distance_km).asin().to_degrees()
}
