/// Reference ellipsoid parameters.
///
/// Only the semi-major axis and the squared first eccentricity are stored;
/// `es == 0` denotes a sphere and switches every projection to its spherical
/// formula set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Display name
    pub name: &'static str,
    /// Semi-major axis (metres)
    pub a: f64,
    /// First eccentricity squared
    pub es: f64,
}

impl Ellipsoid {
    pub const fn new(name: &'static str, a: f64, es: f64) -> Self {
        Self { name, a, es }
    }

    /// Build from flattening: es = 2f - f².
    pub const fn from_flattening(name: &'static str, a: f64, f: f64) -> Self {
        Self {
            name,
            a,
            es: 2.0 * f - f * f,
        }
    }

    /// First eccentricity (computed at runtime, sqrt is not const).
    pub fn eccentricity(&self) -> f64 {
        self.es.sqrt()
    }

    /// 1 - es, the factor that turns up in most ellipsoidal denominators.
    pub fn one_es(&self) -> f64 {
        1.0 - self.es
    }

    pub fn is_sphere(&self) -> bool {
        self.es == 0.0
    }
}

/// Authalic sphere (mean radius).
pub const SPHERE: Ellipsoid = Ellipsoid::new("Sphere", 6_371_008.7714, 0.0);

pub const WGS84: Ellipsoid =
    Ellipsoid::from_flattening("WGS84", 6_378_137.0, 1.0 / 298.257_223_563);

pub const GRS80: Ellipsoid =
    Ellipsoid::from_flattening("GRS80", 6_378_137.0, 1.0 / 298.257_222_101);
