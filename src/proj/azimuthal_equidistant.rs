//! Azimuthal Equidistant projection: distances and directions from the
//! origin are true.
//!
//! forward: c = angular distance to origin, k = c/sin(c),
//!          x = a·k·cosφ·sinλ, y = a·k·(cosφ₀·sinφ - sinφ₀·cosφ·cosλ)
//!
//! Spherical formulas are used for any bound shape; the true ellipsoidal
//! variant requires geodesic computations, which are out of scope with
//! datum transformation chains.

use crate::error::ProjError;
use crate::proj::common::{aacos, aasin, adjlon};
use crate::proj::{ProjConfig, Projection};
use std::f64::consts::PI;

const EPS10: f64 = 1e-10;

pub struct AzimuthalEquidistant {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl AzimuthalEquidistant {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }
}

impl Default for AzimuthalEquidistant {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for AzimuthalEquidistant {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        crate::proj::common::enfn(self.cfg.ellipsoid.es)?;
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
            sin_lat0: self.cfg.lat0.sin(),
            cos_lat0: self.cfg.lat0.cos(),
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let cos_c = st.sin_lat0 * sin_lat + st.cos_lat0 * cos_lat * lam.cos();
        let c = aacos(cos_c);
        if PI - c < EPS10 {
            // the antipode maps to the entire bounding circle
            return Err(ProjError::OutsideDomain);
        }
        let k = if c.abs() < EPS10 { 1.0 } else { c / c.sin() };
        let x = st.a * k * cos_lat * lam.sin();
        let y = st.a * k * (st.cos_lat0 * sin_lat - st.sin_lat0 * cos_lat * lam.cos());
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let xu = x / st.a;
        let yu = y / st.a;
        let rho = (xu * xu + yu * yu).sqrt();
        if rho > PI + EPS10 {
            return Err(ProjError::OutsideDomain);
        }
        if rho < EPS10 {
            return Ok((self.cfg.lon0, self.cfg.lat0));
        }
        let sin_c = rho.sin();
        let cos_c = rho.cos();
        let lat = aasin(cos_c * st.sin_lat0 + yu * sin_c * st.cos_lat0 / rho);
        let lam = (xu * sin_c).atan2(rho * st.cos_lat0 * cos_c - yu * st.sin_lat0 * sin_c);
        Ok((adjlon(lam + self.cfg.lon0), lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn needs_origin_latitude(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Azimuthal Equidistant"
    }

    fn description(&self) -> &'static str {
        "Distances and directions from the center are true"
    }

    fn attribution(&self) -> &'static str {
        "Abū Rayḥān al-Bīrūnī, ca. 1000"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::SPHERE;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn init(lat0_deg: f64) -> AzimuthalEquidistant {
        let mut p = AzimuthalEquidistant::new();
        p.set_origin_latitude(lat0_deg);
        p.initialize().unwrap();
        p
    }

    #[test]
    fn test_roundtrip_equatorial_aspect() {
        let p = init(0.0);
        let cases: &[(f64, f64)] = &[(0.0, 0.0), (10.0, 45.0), (-120.0, -30.0), (170.0, 80.0)];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = p.forward(lon, lat).unwrap();
            let (lon2, lat2) = p.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_roundtrip_polar_aspect() {
        let p = init(90.0);
        let cases: &[(f64, f64)] = &[(0.0, 80.0), (90.0, 45.0), (-135.0, 10.0)];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = p.forward(lon, lat).unwrap();
            let (lon2, lat2) = p.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_distance_from_center_is_true() {
        let p = init(0.0);
        // 30° along the equator → arc length a·30°
        let (x, y) = p.forward(30.0_f64.to_radians(), 0.0).unwrap();
        let d = (x * x + y * y).sqrt();
        assert_relative_eq!(d, SPHERE.a * 30.0_f64.to_radians(), epsilon = 1e-6);
        // and toward the pole
        let (x, y) = p.forward(0.0, FRAC_PI_2).unwrap();
        let d = (x * x + y * y).sqrt();
        assert_relative_eq!(d, SPHERE.a * FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_antipode_rejected() {
        let p = init(0.0);
        assert!(matches!(
            p.forward(std::f64::consts::PI, 0.0),
            Err(ProjError::OutsideDomain)
        ));
    }

    #[test]
    fn test_origin() {
        let p = init(40.0);
        let (x, y) = p
            .forward(0.0, 40.0_f64.to_radians())
            .unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }
}
