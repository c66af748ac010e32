//! The compiled-in celestial body catalog.
//!
//! Element sets follow JPL approximations: planets and dwarf planets at
//! the J2000.0 epoch, moons at JD 2458849.5, comets at JD 2460990.5.
//! Angles are tabulated in degrees and converted when an element set is
//! built. Radii are rendering metadata and play no role in propagation.

use serde::{Deserialize, Serialize};

use crate::kepler::orbits::OrbitalElements;
use crate::time::J2000_JD;

use Primary as P;

/// Standard gravitational parameter of the Sun (`km^3/s^2`).
pub const GM_SUN: f64 = 1.327e11;
/// One astronomical unit (`km`).
pub const AU_KM: f64 = 149_597_870.7;
/// Element epoch shared by every moon in the catalog (Julian Day).
pub const MOON_EPOCH_JD: f64 = 2_458_849.5;
/// Element epoch shared by every comet in the catalog (Julian Day).
pub const COMET_EPOCH_JD: f64 = 2_460_990.5;

pub const SUN_RADIUS_KM: f64 = 696_340.0;
/// Equatorial rotation period of the Sun (`sec`).
pub const SUN_ROTATION_PERIOD: f64 = 25.0 * DAY;
/// Tilt of the solar rotation axis to the ecliptic (degrees).
pub const SUN_AXIAL_TILT_DEG: f64 = 7.25;

const DAY: f64 = 86_400.0;
const HOUR: f64 = 3_600.0;

/// A planet or dwarf planet orbiting the Sun.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primary {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Eris,
    Haumea,
    Makemake,
    Ceres,
}

impl Primary {
    pub const ALL: [Primary; 13] = [
        P::Mercury,
        P::Venus,
        P::Earth,
        P::Mars,
        P::Jupiter,
        P::Saturn,
        P::Uranus,
        P::Neptune,
        P::Pluto,
        P::Eris,
        P::Haumea,
        P::Makemake,
        P::Ceres,
    ];

    pub fn name(self) -> &'static str {
        match self {
            P::Mercury => "Mercury",
            P::Venus => "Venus",
            P::Earth => "Earth",
            P::Mars => "Mars",
            P::Jupiter => "Jupiter",
            P::Saturn => "Saturn",
            P::Uranus => "Uranus",
            P::Neptune => "Neptune",
            P::Pluto => "Pluto",
            P::Eris => "Eris",
            P::Haumea => "Haumea",
            P::Makemake => "Makemake",
            P::Ceres => "Ceres",
        }
    }

    /// Standard gravitational parameter (`km^3/s^2`), used both for
    /// the barycentric wobble and as the attracting mass for this
    /// body's moons.
    pub fn mu(self) -> f64 {
        match self {
            P::Mercury => 2.2032e4,
            P::Venus => 3.249e5,
            P::Earth => 3.986e5,
            P::Mars => 4.282_837e4,
            P::Jupiter => 1.266_865_3e8,
            P::Saturn => 3.793_118_7e7,
            P::Uranus => 5.793_939e6,
            P::Neptune => 6.836_529e6,
            P::Pluto => 8.71e6,
            P::Eris => 8.31e6,
            P::Haumea => 4.00e6,
            P::Makemake => 3.19e6,
            P::Ceres => 6.26e4,
        }
    }

    /// Mean radius (`km`); rendering metadata.
    pub fn radius_km(self) -> f64 {
        match self {
            P::Mercury => 2440.0,
            P::Venus => 6052.0,
            P::Earth => 6371.0,
            P::Mars => 3390.0,
            P::Jupiter => 71_492.0,
            P::Saturn => 58_232.0,
            P::Uranus => 25_559.0,
            P::Neptune => 24_622.0,
            P::Pluto => 1188.3,
            P::Eris => 1163.0,
            P::Haumea => 816.0,
            P::Makemake => 715.0,
            P::Ceres => 473.0,
        }
    }

    /// Heliocentric element set at the J2000.0 epoch.
    #[rustfmt::skip]
    pub fn elements(self) -> OrbitalElements {
        let (a, e, i, lan, argpe, ma): (f64, f64, f64, f64, f64, f64) = match self {
            P::Mercury  => (0.387_099_27,  0.205_635_93, 7.004_979_02,  48.330_765_93,  29.127_030_35,  174.792_527_22),
            P::Venus    => (0.723_335_66,  0.006_776_72, 3.394_676_05,  76.679_842_55,  54.922_624_63,  50.376_632_32),
            P::Earth    => (1.000_002_61,  0.016_711_23, -0.000_015_31, 0.0,            102.937_681_93, 357.526_889_73),
            P::Mars     => (1.523_710_34,  0.093_394_10, 1.849_691_42,  49.559_538_91,  286.496_831_5,  19.390_197_54),
            P::Jupiter  => (5.202_887_00,  0.048_386_24, 1.304_396_95,  100.473_909_09, 274.254_570_74, 19.667_960_68),
            P::Saturn   => (9.536_675_94,  0.053_861_79, 2.485_991_87,  113.662_424_48, 338.936_453_83, 317.355_365_92),
            P::Uranus   => (19.189_164_64, 0.047_257_44, 0.772_637_83,  74.016_925_03,  96.937_351_27,  142.283_828_21),
            P::Neptune  => (30.069_922_76, 0.008_590_48, 1.770_043_47,  131.784_225_74, 273.180_536_53, 259.915_208_04),
            P::Pluto    => (39.48,         0.2488,       17.16,         110.30,         113.78,         14.53),
            P::Eris     => (67.78,         0.4407,       44.04,         35.19,          54.07,          330.00),
            P::Haumea   => (43.13,         0.1951,       28.22,         338.07,         240.85,         359.00),
            P::Makemake => (45.79,         0.159,        29.01,         150.35,         148.72,         289.00),
            P::Ceres    => (2.77,          0.0758,       10.59,         80.33,          73.60,          95.00),
        };
        OrbitalElements {
            a: a * AU_KM,
            e,
            i: i.to_radians(),
            lan: lan.to_radians(),
            argpe: argpe.to_radians(),
            ma: ma.to_radians(),
            epoch: J2000_JD,
        }
    }

    /// Sidereal rotation period (`sec`); negative for retrograde spin.
    pub fn rotation_period(self) -> f64 {
        match self {
            P::Mercury => 58.646 * DAY,
            P::Venus => -243.025 * DAY,
            P::Earth => 0.997_269_68 * DAY,
            P::Mars => 1.025_957 * DAY,
            P::Jupiter => 9.925 * HOUR,
            P::Saturn => 10.656 * HOUR,
            P::Uranus => -17.24 * HOUR,
            P::Neptune => 16.11 * HOUR,
            P::Pluto => -153.29 * HOUR,
            P::Eris => 25.9 * HOUR,
            P::Haumea => 3.915 * HOUR,
            P::Makemake => 22.48 * HOUR,
            P::Ceres => 9.074 * HOUR,
        }
    }

    /// Axial tilt to the orbital plane (degrees).
    pub fn axial_tilt_deg(self) -> f64 {
        match self {
            P::Mercury => 0.03,
            P::Venus => 177.4,
            P::Earth => 23.44,
            P::Mars => 25.19,
            P::Jupiter => 3.13,
            P::Saturn => 26.73,
            P::Uranus => 97.77,
            P::Neptune => 28.32,
            P::Pluto => 122.5,
            P::Eris | P::Haumea | P::Makemake | P::Ceres => 0.0,
        }
    }

    pub fn is_dwarf(self) -> bool {
        matches!(self, P::Pluto | P::Eris | P::Haumea | P::Makemake | P::Ceres)
    }
}

/// A natural satellite, anchored to its [`Primary`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Moon {
    pub name: &'static str,
    pub parent: Primary,
    /// Semi-major axis about the parent (`km`).
    pub a: f64,
    /// Eccentricity (dimensionless).
    pub e: f64,
    /// Inclination to the parent equatorial plane (degrees).
    pub i: f64,
    /// Longitude of ascending node (degrees).
    pub lan: f64,
    /// Argument of periapsis (degrees).
    pub argpe: f64,
    /// Mean anomaly at the moon epoch (degrees).
    pub ma: f64,
    /// Mean radius (`km`); rendering metadata.
    pub radius_km: f64,
    /// Sidereal rotation period (`sec`) where it is known to differ
    /// from the synchronous default.
    pub rotation_period: Option<f64>,
    /// Axial tilt relative to the parent equator (degrees).
    pub axial_tilt_deg: f64,
}

impl Moon {
    /// Element set about the parent, at the shared moon epoch.
    pub fn elements(&self) -> OrbitalElements {
        OrbitalElements {
            a: self.a,
            e: self.e,
            i: self.i.to_radians(),
            lan: self.lan.to_radians(),
            argpe: self.argpe.to_radians(),
            ma: self.ma.to_radians(),
            epoch: MOON_EPOCH_JD,
        }
    }

    /// Spin period (`sec`): the tabulated value where one exists,
    /// otherwise the synchronous default of one orbital period.
    pub fn spin_period(&self) -> f64 {
        self.rotation_period
            .or_else(|| self.elements().period(self.parent.mu()))
            .unwrap_or(0.0)
    }
}

#[allow(clippy::too_many_arguments)]
const fn m(
    name: &'static str,
    parent: Primary,
    a: f64,
    e: f64,
    i: f64,
    lan: f64,
    argpe: f64,
    ma: f64,
    radius_km: f64,
    rotation_period: Option<f64>,
    axial_tilt_deg: f64,
) -> Moon {
    Moon {
        name,
        parent,
        a,
        e,
        i,
        lan,
        argpe,
        ma,
        radius_km,
        rotation_period,
        axial_tilt_deg,
    }
}

#[rustfmt::skip]
static MOONS: &[Moon] = &[
    m("Moon",        P::Earth,    384_400.0,    0.0554, 5.16,  125.08,  318.15, 135.27,  1737.4, Some(27.321_661 * DAY), -1.54),

    m("Phobos",      P::Mars,     9375.0,       0.015,  1.1,   169.2,   216.3,  189.7,   11.2,   Some(0.318_91 * DAY),   0.0),
    m("Deimos",      P::Mars,     23_457.0,     0.0,    1.8,   54.3,    0.0,    205.0,   6.4,    Some(1.262_44 * DAY),   0.0),

    m("Metis",       P::Jupiter,  128_000.0,    0.0002, 0.06,  0.0,     0.0,    0.0,     21.0,   None, 0.0),
    m("Adrastea",    P::Jupiter,  129_000.0,    0.0015, 0.03,  0.0,     0.0,    0.0,     7.0,    None, 0.0),
    m("Amalthea",    P::Jupiter,  181_400.0,    0.0032, 0.374, 0.0,     0.0,    0.0,     83.9,   None, 0.0),
    m("Thebe",       P::Jupiter,  221_900.0,    0.0175, 1.076, 0.0,     0.0,    0.0,     48.9,   None, 0.0),
    m("Io",          P::Jupiter,  421_800.0,    0.0041, 0.05,  43.977,  84.129, 171.016, 1821.6, None, 0.0),
    m("Europa",      P::Jupiter,  671_100.0,    0.009,  0.47,  219.106, 88.97,  317.021, 1560.8, None, 0.0),
    m("Ganymede",    P::Jupiter,  1_070_400.0,  0.0013, 0.2,   0.0,     0.0,    0.0,     2631.2, None, 0.0),
    m("Callisto",    P::Jupiter,  1_882_700.0,  0.0074, 0.192, 0.0,     0.0,    0.0,     2410.3, None, 0.0),
    m("Themisto",    P::Jupiter,  7_397_000.0,  0.257,  44.3,  0.0,     0.0,    0.0,     7.0,    None, 0.0),
    m("Leda",        P::Jupiter,  11_145_200.0, 0.162,  28.2,  0.0,     0.0,    0.0,     14.0,   None, 0.0),
    m("Ersa",        P::Jupiter,  11_399_400.0, 0.117,  29.0,  0.0,     0.0,    0.0,     1.4,    None, 0.0),
    m("S/2018 J 2",  P::Jupiter,  11_419_700.0, 0.152,  28.3,  0.0,     0.0,    0.0,     1.4,    None, 0.0),
    m("Himalia",     P::Jupiter,  11_439_000.0, 0.16,   28.4,  0.0,     0.0,    0.0,     69.9,   None, 0.0),
    m("Pandia",      P::Jupiter,  11_479_600.0, 0.178,  28.9,  0.0,     0.0,    0.0,     1.4,    None, 0.0),
    m("Lysithea",    P::Jupiter,  11_699_100.0, 0.117,  27.7,  0.0,     0.0,    0.0,     21.0,   None, 0.0),
    m("Elara",       P::Jupiter,  11_710_700.0, 0.212,  27.8,  0.0,     0.0,    0.0,     41.9,   None, 0.0),
    m("S/2011 J 3",  P::Jupiter,  11_716_800.0, 0.192,  27.6,  0.0,     0.0,    0.0,     1.4,    None, 0.0),
    m("Dia",         P::Jupiter,  12_257_900.0, 0.232,  29.1,  0.0,     0.0,    0.0,     2.1,    None, 0.0),
    m("S/2018 J 4",  P::Jupiter,  16_328_500.0, 0.177,  50.2,  0.0,     0.0,    0.0,     0.7,    None, 0.0),
    m("Carpo",       P::Jupiter,  17_039_500.0, 0.415,  53.3,  0.0,     0.0,    0.0,     1.4,    None, 0.0),
    m("Valetudo",    P::Jupiter,  18_690_100.0, 0.217,  34.5,  0.0,     0.0,    0.0,     0.5,    None, 0.0),
    m("Euporie",     P::Jupiter,  19_261_900.0, 0.148,  145.5, 0.0,     0.0,    0.0,     0.7,    None, 0.0),
    m("S/2003 J 18", P::Jupiter,  20_332_800.0, 0.102,  145.7, 0.0,     0.0,    0.0,     0.7,    None, 0.0),
    m("Eupheme",     P::Jupiter,  20_763_400.0, 0.234,  147.9, 0.0,     0.0,    0.0,     0.7,    None, 0.0),
    m("S/2021 J 3",  P::Jupiter,  20_776_600.0, 0.239,  147.9, 0.0,     0.0,    0.0,     0.7,    None, 0.0),
    m("S/2010 J 2",  P::Jupiter,  20_786_900.0, 0.244,  148.0, 0.0,     0.0,    0.0,     0.5,    None, 0.0),
    m("S/2016 J 1",  P::Jupiter,  20_796_700.0, 0.245,  145.1, 0.0,     0.0,    0.0,     0.5,    None, 0.0),
    m("Mneme",       P::Jupiter,  20_815_800.0, 0.24,   147.8, 0.0,     0.0,    0.0,     0.7,    None, 0.0),
    m("Euanthe",     P::Jupiter,  20_822_900.0, 0.243,  148.1, 0.0,     0.0,    0.0,     1.4,    None, 0.0),
    m("S/2003 J 16", P::Jupiter,  20_877_500.0, 0.238,  147.8, 0.0,     0.0,    0.0,     0.7,    None, 0.0),

    m("S/2009 S 1",  P::Saturn,   116_900.0,    0.0,    0.0,   0.0,     0.0,    0.0,     151.4,  None, 0.0),
    m("Pan",         P::Saturn,   133_600.0,    0.0,    0.0,   0.0,     0.0,    0.0,     11.6,   None, 0.0),
    m("Daphnis",     P::Saturn,   136_500.0,    0.0,    0.0,   0.0,     0.0,    0.0,     4.1,    None, 0.0),
    m("Atlas",       P::Saturn,   137_700.0,    0.001,  0.0,   0.0,     0.0,    0.0,     17.5,   None, 0.0),
    m("Prometheus",  P::Saturn,   139_400.0,    0.002,  0.0,   0.0,     0.0,    0.0,     40.8,   None, 0.0),
    m("Pandora",     P::Saturn,   141_700.0,    0.004,  0.0,   0.0,     0.0,    0.0,     40.8,   None, 0.0),
    m("Epimetheus",  P::Saturn,   151_400.0,    0.02,   0.3,   0.0,     0.0,    0.0,     58.2,   None, 0.0),
    m("Janus",       P::Saturn,   151_500.0,    0.007,  0.2,   0.0,     0.0,    0.0,     87.3,   None, 0.0),
    m("Aegaeon",     P::Saturn,   167_500.0,    0.0,    0.0,   0.0,     0.0,    0.0,     0.3,    None, 0.0),
    m("Mimas",       P::Saturn,   186_000.0,    0.02,   1.6,   0.0,     0.0,    0.0,     198.0,  None, 0.0),
    m("Methone",     P::Saturn,   194_700.0,    0.002,  0.0,   0.0,     0.0,    0.0,     1.2,    None, 0.0),
    m("Anthe",       P::Saturn,   198_100.0,    0.002,  0.0,   0.0,     0.0,    0.0,     0.9,    None, 0.0),
    m("Pallene",     P::Saturn,   212_300.0,    0.004,  0.2,   0.0,     0.0,    0.0,     2.3,    None, 0.0),
    m("Enceladus",   P::Saturn,   238_400.0,    0.005,  0.0,   0.0,     0.0,    0.0,     252.1,  None, 0.0),
    m("Tethys",      P::Saturn,   295_000.0,    0.001,  1.1,   0.0,     0.0,    0.0,     531.0,  None, 0.0),
    m("Telesto",     P::Saturn,   295_000.0,    0.001,  1.2,   0.0,     0.0,    0.0,     11.6,   None, 0.0),
    m("Calypso",     P::Saturn,   295_000.0,    0.001,  1.5,   0.0,     0.0,    0.0,     11.6,   None, 0.0),
    m("Helene",      P::Saturn,   377_600.0,    0.007,  0.2,   0.0,     0.0,    0.0,     17.5,   None, 0.0),
    m("Polydeuces",  P::Saturn,   377_600.0,    0.019,  0.2,   0.0,     0.0,    0.0,     1.2,    None, 0.0),
    m("Dione",       P::Saturn,   377_700.0,    0.002,  0.0,   0.0,     0.0,    0.0,     561.7,  None, 0.0),
    m("Rhea",        P::Saturn,   527_200.0,    0.001,  0.3,   0.0,     0.0,    0.0,     764.5,  None, 0.0),
    m("Titan",       P::Saturn,   1_221_900.0,  0.029,  0.3,   28.06,   186.59, 230.0,   2575.0, None, 0.0),
    m("Hyperion",    P::Saturn,   1_481_500.0,  0.105,  0.6,   0.0,     0.0,    0.0,     134.0,  None, 0.0),
    m("Iapetus",     P::Saturn,   3_561_700.0,  0.028,  7.6,   0.0,     0.0,    0.0,     734.5,  None, 0.0),
    m("S/2023 S 1",  P::Saturn,   11_205_400.0, 0.386,  48.8,  0.0,     0.0,    0.0,     1.5,    None, 0.0),
    m("S/2019 S 1",  P::Saturn,   11_245_400.0, 0.384,  49.5,  0.0,     0.0,    0.0,     2.5,    None, 0.0),

    m("Cordelia",    P::Uranus,   49_800.0,     0.0,    0.2,   0.0,     0.0,    0.0,     20.3,   None, 0.0),
    m("Ophelia",     P::Uranus,   53_800.0,     0.011,  0.1,   0.0,     0.0,    0.0,     20.3,   None, 0.0),
    m("S/2025 U 1",  P::Uranus,   57_800.0,     0.039,  4.0,   0.0,     0.0,    0.0,     10.1,   None, 0.0),
    m("Bianca",      P::Uranus,   59_200.0,     0.001,  0.1,   0.0,     0.0,    0.0,     25.4,   None, 0.0),
    m("Cressida",    P::Uranus,   61_800.0,     0.0,    0.1,   0.0,     0.0,    0.0,     40.6,   None, 0.0),
    m("Desdemona",   P::Uranus,   62_700.0,     0.0,    0.1,   0.0,     0.0,    0.0,     35.5,   None, 0.0),
    m("Juliet",      P::Uranus,   64_400.0,     0.001,  0.1,   0.0,     0.0,    0.0,     46.7,   None, 0.0),
    m("Portia",      P::Uranus,   66_100.0,     0.0,    0.1,   0.0,     0.0,    0.0,     67.6,   None, 0.0),
    m("Rosalind",    P::Uranus,   69_900.0,     0.0,    0.1,   0.0,     0.0,    0.0,     36.0,   None, 0.0),
    m("Belinda",     P::Uranus,   75_300.0,     0.0,    0.1,   0.0,     0.0,    0.0,     45.3,   None, 0.0),
    m("Puck",        P::Uranus,   86_000.0,     0.0,    0.3,   0.0,     0.0,    0.0,     81.0,   None, 0.0),
    m("Miranda",     P::Uranus,   129_900.0,    0.0013, 4.3,   0.0,     0.0,    0.0,     235.8,  None, 0.0),
    m("Ariel",       P::Uranus,   190_900.0,    0.0012, 0.0,   0.0,     0.0,    0.0,     578.9,  None, 0.0),
    m("Umbriel",     P::Uranus,   266_000.0,    0.0039, 0.0,   0.0,     0.0,    0.0,     584.7,  None, 0.0),
    m("Titania",     P::Uranus,   436_300.0,    0.0011, 0.0,   0.0,     0.0,    0.0,     788.9,  None, 0.0),
    m("Oberon",      P::Uranus,   583_500.0,    0.0014, 0.0,   0.0,     0.0,    0.0,     761.4,  None, 0.0),
    m("Francisco",   P::Uranus,   4_282_900.0,  0.145,  147.3, 0.0,     0.0,    0.0,     11.0,   None, 0.0),
    m("Caliban",     P::Uranus,   7_231_000.0,  0.181,  141.7, 0.0,     0.0,    0.0,     36.0,   None, 0.0),
    m("Stephano",    P::Uranus,   8_004_000.0,  0.229,  143.8, 0.0,     0.0,    0.0,     16.0,   None, 0.0),
    m("Trinculo",    P::Uranus,   8_504_000.0,  0.219,  166.3, 0.0,     0.0,    0.0,     9.0,    None, 0.0),
    m("Sycorax",     P::Uranus,   12_179_000.0, 0.522,  159.4, 0.0,     0.0,    0.0,     75.0,   None, 0.0),
    m("Margaret",    P::Uranus,   14_345_000.0, 0.677,  57.4,  0.0,     0.0,    0.0,     10.0,   None, 0.0),
    m("Prospero",    P::Uranus,   16_268_000.0, 0.445,  151.8, 0.0,     0.0,    0.0,     25.0,   None, 0.0),
    m("Setebos",     P::Uranus,   17_420_000.0, 0.591,  158.2, 0.0,     0.0,    0.0,     24.0,   None, 0.0),
    m("Ferdinand",   P::Uranus,   20_430_000.0, 0.368,  169.8, 0.0,     0.0,    0.0,     10.0,   None, 0.0),

    m("Naiad",       P::Neptune,  48_224.0,     0.0047, 4.691, 0.0,     0.0,    0.0,     29.5,   None, 0.0),
    m("Thalassa",    P::Neptune,  50_074.0,     0.0018, 0.2,   0.0,     0.0,    0.0,     41.0,   None, 0.0),
    m("Despina",     P::Neptune,  52_526.0,     0.0002, 0.2,   0.0,     0.0,    0.0,     75.0,   None, 0.0),
    m("Galatea",     P::Neptune,  61_953.0,     0.0001, 0.1,   0.0,     0.0,    0.0,     87.0,   None, 0.0),
    m("Larissa",     P::Neptune,  73_548.0,     0.0014, 0.2,   0.0,     0.0,    0.0,     97.0,   None, 0.0),
    m("Hippocamp",   P::Neptune,  105_283.0,    0.0009, 0.0,   0.0,     0.0,    0.0,     17.4,   None, 0.0),
    m("Proteus",     P::Neptune,  117_646.0,    0.0005, 0.1,   0.0,     0.0,    0.0,     210.0,  None, 0.0),
    m("Triton",      P::Neptune,  354_759.0,    0.0,    156.8, 0.0,     0.0,    0.0,     1353.4, None, 0.0),
    m("Nereid",      P::Neptune,  5_513_400.0,  0.7507, 7.1,   0.0,     0.0,    0.0,     178.5,  None, 0.0),
    m("Halimede",    P::Neptune,  16_611_000.0, 0.264,  134.1, 0.0,     0.0,    0.0,     31.0,   None, 0.0),
    m("Sao",         P::Neptune,  22_228_000.0, 0.293,  49.9,  0.0,     0.0,    0.0,     22.0,   None, 0.0),
    m("Laomedeia",   P::Neptune,  23_567_000.0, 0.424,  34.7,  0.0,     0.0,    0.0,     21.0,   None, 0.0),
    m("Psamathe",    P::Neptune,  46_695_000.0, 0.461,  137.7, 0.0,     0.0,    0.0,     20.0,   None, 0.0),
    m("Neso",        P::Neptune,  49_245_000.0, 0.424,  136.5, 0.0,     0.0,    0.0,     30.0,   None, 0.0),

    m("Charon",      P::Pluto,    19_571.0,     0.0002, 0.0,   0.0,     0.0,    0.0,     606.0,  Some(6.387 * DAY), 0.0),
    m("Styx",        P::Pluto,    42_656.0,     0.0,    0.9,   0.0,     0.0,    0.0,     6.0,    Some(3.24 * DAY),  0.0),
    m("Nix",         P::Pluto,    48_694.0,     0.0,    0.1,   0.0,     0.0,    0.0,     19.0,   Some(25.9 * DAY),  0.0),
    m("Kerberos",    P::Pluto,    57_783.0,     0.0,    0.4,   0.0,     0.0,    0.0,     9.0,    Some(32.2 * DAY),  0.0),
    m("Hydra",       P::Pluto,    64_738.0,     0.0,    0.3,   0.0,     0.0,    0.0,     24.0,   Some(38.2 * DAY),  0.0),

    m("Dysnomia",    P::Eris,     37_350.0,     0.0,    0.0,   0.0,     0.0,    0.0,     35.0,   None, 0.0),
    m("Hi'iaka",     P::Haumea,   49_100.0,     0.07,   0.0,   0.0,     0.0,    0.0,     80.0,   None, 0.0),
    m("MK2",         P::Makemake, 21_000.0,     0.0,    0.0,   0.0,     0.0,    0.0,     175.0,  None, 0.0),
];

/// A comet on a heliocentric orbit.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Comet {
    pub name: &'static str,
    /// Semi-major axis (AU).
    pub a_au: f64,
    /// Eccentricity (dimensionless).
    pub e: f64,
    /// Inclination (degrees).
    pub i: f64,
    /// Longitude of ascending node (degrees).
    pub lan: f64,
    /// Argument of periapsis (degrees).
    pub argpe: f64,
    /// Mean anomaly at the comet epoch (degrees).
    pub ma: f64,
    /// Nucleus radius (`km`); rendering metadata.
    pub radius_km: f64,
}

impl Comet {
    /// Heliocentric element set at the shared comet epoch.
    pub fn elements(&self) -> OrbitalElements {
        OrbitalElements {
            a: self.a_au * AU_KM,
            e: self.e,
            i: self.i.to_radians(),
            lan: self.lan.to_radians(),
            argpe: self.argpe.to_radians(),
            ma: self.ma.to_radians(),
            epoch: COMET_EPOCH_JD,
        }
    }
}

#[rustfmt::skip]
static COMETS: &[Comet] = &[
    Comet { name: "Halley",    a_au: 17.84,  e: 0.9671,  i: 162.26, lan: 59.40,  argpe: 112.05, ma: 345.5, radius_km: 5.5 },
    Comet { name: "Hale-Bopp", a_au: 177.43, e: 0.99498, i: 89.29,  lan: 282.73, argpe: 130.41, ma: 3.9,   radius_km: 25.0 },
    Comet { name: "Encke",     a_au: 2.215,  e: 0.84833, i: 11.76,  lan: 334.6,  argpe: 186.5,  ma: 180.2, radius_km: 2.0 },
    Comet { name: "Lovejoy",   a_au: 393.0,  e: 0.998,   i: 80.3,   lan: 12.4,   argpe: 90.3,   ma: 0.27,  radius_km: 10.0 },
];

/// Every moon in the catalog.
pub fn moons() -> &'static [Moon] {
    MOONS
}

/// Every comet in the catalog.
pub fn comets() -> &'static [Comet] {
    COMETS
}

pub fn moons_of(parent: Primary) -> impl Iterator<Item = &'static Moon> {
    MOONS.iter().filter(move |moon| moon.parent == parent)
}

pub fn moon(name: &str) -> Option<&'static Moon> {
    MOONS.iter().find(|moon| moon.name.eq_ignore_ascii_case(name))
}

pub fn comet(name: &str) -> Option<&'static Comet> {
    COMETS
        .iter()
        .find(|comet| comet.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_finite_and_positive() {
        for primary in Primary::ALL {
            assert!(primary.mu() > 0.0, "{}", primary.name());
            assert!(primary.radius_km() > 0.0, "{}", primary.name());
            assert!(primary.rotation_period() != 0.0, "{}", primary.name());
            let elements = primary.elements();
            assert!(elements.a > 0.0 && elements.e < 1.0, "{}", primary.name());
            assert!(
                elements.state_at(GM_SUN, J2000_JD).is_ok(),
                "{}",
                primary.name()
            );
        }
        for moon in moons() {
            assert!(moon.a > 0.0 && (0.0..1.0).contains(&moon.e), "{}", moon.name);
            assert!(moon.radius_km > 0.0, "{}", moon.name);
        }
        for comet in comets() {
            assert!(comet.a_au > 0.0 && comet.e < 1.0, "{}", comet.name);
        }
    }

    #[test]
    fn elements_scale_into_kilometers_and_radians() {
        let mercury = Primary::Mercury.elements();
        assert!((mercury.a - 0.387_099_27 * AU_KM).abs() < 1e-6);
        assert!((mercury.e - 0.205_635_93).abs() < 1e-12);
        assert!((mercury.i - 7.004_979_02_f64.to_radians()).abs() < 1e-12);
        assert!((mercury.ma - 174.792_527_22_f64.to_radians()).abs() < 1e-12);
        assert!((mercury.epoch - J2000_JD).abs() < f64::EPSILON);
    }

    #[test]
    fn moon_counts_by_parent() {
        assert_eq!(moons().len(), 106);
        assert_eq!(moons_of(Primary::Earth).count(), 1);
        assert_eq!(moons_of(Primary::Mars).count(), 2);
        assert_eq!(moons_of(Primary::Jupiter).count(), 30);
        assert_eq!(moons_of(Primary::Saturn).count(), 26);
        assert_eq!(moons_of(Primary::Uranus).count(), 25);
        assert_eq!(moons_of(Primary::Neptune).count(), 14);
        assert_eq!(moons_of(Primary::Pluto).count(), 5);
        assert_eq!(moons_of(Primary::Mercury).count(), 0);
        assert_eq!(moons_of(Primary::Venus).count(), 0);
    }

    #[test]
    fn dwarf_planets_are_flagged() {
        assert_eq!(Primary::ALL.iter().filter(|p| p.is_dwarf()).count(), 5);
        assert!(Primary::Pluto.is_dwarf());
        assert!(Primary::Ceres.is_dwarf());
        assert!(!Primary::Earth.is_dwarf());
        assert!(!Primary::Neptune.is_dwarf());
    }

    #[test]
    fn lookups_are_case_insensitive() {
        assert_eq!(moon("io").unwrap().name, "Io");
        assert_eq!(moon("TRITON").unwrap().parent, Primary::Neptune);
        assert!(moon("Vulcan").is_none());
        assert_eq!(comet("halley").unwrap().name, "Halley");
        assert!(comet("Biela").is_none());
    }

    #[test]
    fn earth_year_from_elements() {
        let period = Primary::Earth.elements().period(GM_SUN).unwrap();
        assert!((period / DAY - 365.25).abs() < 0.5);
    }

    #[test]
    fn lunar_orbit_matches_tabulated_rotation() {
        // The Moon is tidally locked, so the period derived from its
        // elements should sit close to the tabulated spin.
        let moon = moon("Moon").unwrap();
        let orbital = moon.elements().period(Primary::Earth.mu()).unwrap();
        let spin = moon.rotation_period.unwrap();
        assert!((orbital - spin).abs() / spin < 0.01);
    }

    #[test]
    fn comet_orbits_are_closed() {
        for comet in comets() {
            let elements = comet.elements();
            assert!(elements.period(GM_SUN).is_some(), "{}", comet.name);
            assert!(elements.e > 0.8, "{}", comet.name);
        }
    }
}
