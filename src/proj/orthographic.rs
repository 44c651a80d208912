//! Orthographic projection: the globe as seen from infinity.
//!
//! forward: x = a·cosφ·sinλ, y = a·(cosφ₀·sinφ - sinφ₀·cosφ·cosλ),
//! defined on the open hemisphere facing the viewer; the limb itself is
//! excluded because the inverse is ill-conditioned there.
//!
//! Perspective projections are inherently spherical; `es` is ignored apart
//! from the radius.

use crate::error::ProjError;
use crate::proj::common::{aasin, adjlon};
use crate::proj::{ProjConfig, Projection};

const EPS10: f64 = 1e-10;

pub struct Orthographic {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    sin_lat0: f64,
    cos_lat0: f64,
}

impl Orthographic {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }
}

impl Default for Orthographic {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for Orthographic {
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
        if cos_c < EPS10 {
            // only the open front hemisphere is visible; the limb is excluded
            return Err(ProjError::OutsideDomain);
        }
        let x = st.a * cos_lat * lam.sin();
        let y = st.a * (st.cos_lat0 * sin_lat - st.sin_lat0 * cos_lat * lam.cos());
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let xu = x / st.a;
        let yu = y / st.a;
        let rho = (xu * xu + yu * yu).sqrt();
        if rho > 1.0 + EPS10 {
            return Err(ProjError::OutsideDomain);
        }
        if rho < EPS10 {
            return Ok((self.cfg.lon0, self.cfg.lat0));
        }
        let c = aasin(rho);
        let sin_c = c.sin();
        let cos_c = c.cos();
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
        "Orthographic"
    }

    fn description(&self) -> &'static str {
        "Perspective view of the globe from infinite distance"
    }

    fn attribution(&self) -> &'static str {
        "Hipparchus, ca. 150 BC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::SPHERE;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn init(lat0_deg: f64) -> Orthographic {
        let mut p = Orthographic::new();
        p.set_origin_latitude(lat0_deg);
        p.initialize().unwrap();
        p
    }

    #[test]
    fn test_roundtrip_front_hemisphere() {
        let p = init(0.0);
        let cases: &[(f64, f64)] = &[(0.0, 0.0), (10.0, 45.0), (-60.0, -30.0), (80.0, 80.0)];
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
    fn test_back_hemisphere_rejected() {
        let p = init(0.0);
        assert!(matches!(
            p.forward(120.0_f64.to_radians(), 0.0),
            Err(ProjError::OutsideDomain)
        ));
    }

    #[test]
    fn test_limb_rejected() {
        // Points exactly 90° from the center sit on the bounding circle,
        // where the inverse cannot recover them
        let p = init(0.0);
        assert!(matches!(
            p.forward(FRAC_PI_2, 0.0),
            Err(ProjError::OutsideDomain)
        ));
        assert!(matches!(
            p.forward(-FRAC_PI_2, -80.0_f64.to_radians()),
            Err(ProjError::OutsideDomain)
        ));
    }

    #[test]
    fn test_roundtrip_near_limb() {
        let p = init(0.0);
        let cases: &[(f64, f64)] = &[(-89.0, -80.0), (89.0, 10.0), (-1.0, 89.0)];
        for &(lon_deg, lat_deg) in cases {
            let lon = lon_deg.to_radians();
            let lat = lat_deg.to_radians();
            let (x, y) = p.forward(lon, lat).unwrap();
            let (lon2, lat2) = p.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-8);
            assert_relative_eq!(lat2, lat, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_origin() {
        let p = init(30.0);
        let (x, y) = p.forward(0.0, 30.0_f64.to_radians()).unwrap();
        assert_relative_eq!(x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_outside_disc_rejected_on_inverse() {
        let p = init(0.0);
        assert!(matches!(
            p.inverse(2.0 * SPHERE.a, 0.0),
            Err(ProjError::OutsideDomain)
        ));
    }
}
