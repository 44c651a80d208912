pub mod albers;
pub mod azimuthal_equidistant;
pub mod bonne;
pub mod cassini;
pub mod common;
pub mod cylindrical_equal_area;
pub mod ellipsoid;
pub mod equidistant_conic;
pub mod lambert_azimuthal;
pub mod lambert_conformal;
pub mod mercator;
pub mod orthographic;
pub mod plate_carree;
pub mod sinusoidal;
pub mod stereographic;
pub mod winkel_tripel;

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::ProjError;
use ellipsoid::{Ellipsoid, SPHERE};

/// Mutable projection configuration, shared by every family.
///
/// Longitudes in the domain bounds are relative to the central meridian;
/// latitudes are absolute. All angles are radians.
#[derive(Clone, Copy, Debug)]
pub struct ProjConfig {
    /// Longitude of origin (central meridian)
    pub lon0: f64,
    /// Latitude of origin
    pub lat0: f64,
    pub ellipsoid: Ellipsoid,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Default for ProjConfig {
    fn default() -> Self {
        Self {
            lon0: 0.0,
            lat0: 0.0,
            ellipsoid: SPHERE,
            lon_min: -PI,
            lon_max: PI,
            lat_min: -FRAC_PI_2,
            lat_max: FRAC_PI_2,
        }
    }
}

impl ProjConfig {
    /// Whether the bound shape selects the spherical formula set.
    pub fn spherical(&self) -> bool {
        self.ellipsoid.is_sphere()
    }
}

/// Capability contract implemented once per projection family.
///
/// Lifecycle: configure (origin, ellipsoid) → `initialize()` → `forward()` /
/// `inverse()`. Derived constants are recomputed by `initialize()`; any
/// configuration change invalidates them, and using the transforms before the
/// next successful `initialize()` yields [`ProjError::NotInitialized`].
///
/// A single instance is not safe for concurrent reconfiguration and
/// evaluation; parallel callers must use independent instances.
pub trait Projection {
    fn config(&self) -> &ProjConfig;

    /// Mutable access to the configuration. Implementations drop their
    /// derived state here, so every edit forces a re-`initialize()`.
    fn config_mut(&mut self) -> &mut ProjConfig;

    /// Recompute all derived constants from the current configuration.
    fn initialize(&mut self) -> Result<(), ProjError>;

    /// Forward: absolute (lon_rad, lat_rad) → planar (x, y) in metres.
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError>;

    /// Inverse: planar (x, y) in metres → absolute (lon_rad, lat_rad).
    /// Defined only when `has_inverse()` is true.
    fn inverse(&self, _x: f64, _y: f64) -> Result<(f64, f64), ProjError> {
        Err(ProjError::InverseUnsupported(self.name()))
    }

    /// Static per-family capability flag.
    fn has_inverse(&self) -> bool;

    /// Whether the latitude-of-origin parameter is meaningful for this
    /// family (true for azimuthal projections).
    fn needs_origin_latitude(&self) -> bool {
        false
    }

    /// Stable display name, used as the registry key.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn attribution(&self) -> &'static str;

    fn set_origin_longitude(&mut self, degrees: f64) {
        self.config_mut().lon0 = degrees.to_radians();
    }

    fn set_origin_latitude(&mut self, degrees: f64) {
        self.config_mut().lat0 = degrees.to_radians();
    }

    fn set_ellipsoid(&mut self, e: Ellipsoid) {
        self.config_mut().ellipsoid = e;
    }
}

#[cfg(test)]
mod tests {
    use super::plate_carree::PlateCarree;
    use super::*;
    use crate::error::ProjError;

    #[test]
    fn test_forward_before_initialize_fails() {
        let p = PlateCarree::new();
        assert!(matches!(p.forward(0.1, 0.2), Err(ProjError::NotInitialized)));
    }

    #[test]
    fn test_reconfiguration_invalidates_state() {
        let mut p = PlateCarree::new();
        p.initialize().unwrap();
        assert!(p.forward(0.1, 0.2).is_ok());

        p.set_origin_longitude(10.0);
        assert!(matches!(p.forward(0.1, 0.2), Err(ProjError::NotInitialized)));

        p.initialize().unwrap();
        assert!(p.forward(0.1, 0.2).is_ok());
    }

    #[test]
    fn test_setters_store_radians() {
        let mut p = PlateCarree::new();
        p.set_origin_longitude(90.0);
        p.set_origin_latitude(-45.0);
        assert!((p.config().lon0 - FRAC_PI_2).abs() < 1e-12);
        assert!((p.config().lat0 + 45.0_f64.to_radians()).abs() < 1e-12);
    }
}
