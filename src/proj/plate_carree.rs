//! Plate Carrée (equidistant cylindrical) projection.
//!
//! forward: x = a·λ, y = a·φ
//! inverse: λ = x/a, φ = y/a
//!
//! The spherical and ellipsoidal cases share one formula set; `es` only
//! selects the radius.

use crate::error::ProjError;
use crate::proj::common::adjlon;
use crate::proj::{ProjConfig, Projection};

pub struct PlateCarree {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
}

impl PlateCarree {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }
}

impl Default for PlateCarree {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for PlateCarree {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        crate::proj::common::enfn(self.cfg.ellipsoid.es)?; // eccentricity sanity check
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        Ok((st.a * lam, st.a * lat))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        Ok((adjlon(x / st.a + self.cfg.lon0), y / st.a))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Plate Carrée"
    }

    fn description(&self) -> &'static str {
        "Equidistant cylindrical; meridians and parallels form a uniform grid"
    }

    fn attribution(&self) -> &'static str {
        "Marinus of Tyre, ca. 100 AD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::SPHERE;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn init() -> PlateCarree {
        let mut p = PlateCarree::new();
        p.initialize().unwrap();
        p
    }

    #[test]
    fn test_roundtrip() {
        let p = init();
        for &(lon_deg, lat_deg) in &[(0.0, 0.0), (10.0, 45.0), (-73.99, 40.75), (170.0, -80.0)] {
            let lon = (lon_deg as f64).to_radians();
            let lat = (lat_deg as f64).to_radians();
            let (x, y) = p.forward(lon, lat).unwrap();
            let (lon2, lat2) = p.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-12);
            assert_relative_eq!(lat2, lat, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_origin() {
        let p = init();
        let (x, y) = p.forward(0.0, 0.0).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_shifted_central_meridian() {
        let mut p = PlateCarree::new();
        p.set_origin_longitude(90.0);
        p.initialize().unwrap();
        let (x, _) = p.forward(90.0_f64.to_radians(), 0.0).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-9);
        // 100°E is 10° east of the new central meridian
        let (x, _) = p.forward(100.0_f64.to_radians(), 0.0).unwrap();
        assert_relative_eq!(x, SPHERE.a * 10.0_f64.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_dateline_symmetry() {
        let p = init();
        let (xe, _) = p.forward(PI, 0.0).unwrap();
        let (xw, _) = p.forward(-PI, 0.0).unwrap();
        assert_relative_eq!(xe, -xw, epsilon = 1e-6);
    }
}
