//! Lambert cylindrical equal-area projection (standard parallel at the
//! equator).
//!
//! spherical:   x = a·λ, y = a·sin(φ)
//! ellipsoidal: x = a·λ, y = a·q(φ)/2; inverse via the authalic latitude

use crate::error::ProjError;
use crate::proj::common::{aasin, adjlon, phi_from_q, qsfn};
use crate::proj::{ProjConfig, Projection};

pub struct CylindricalEqualArea {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    e: f64,
    one_es: f64,
    /// q at the pole; |q(φ)| ≤ qp
    qp: f64,
}

impl CylindricalEqualArea {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }
}

impl Default for CylindricalEqualArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for CylindricalEqualArea {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        crate::proj::common::enfn(self.cfg.ellipsoid.es)?;
        let e = self.cfg.ellipsoid.eccentricity();
        let one_es = self.cfg.ellipsoid.one_es();
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
            spherical: self.cfg.spherical(),
            e,
            one_es,
            qp: qsfn(1.0, e, one_es),
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        let x = st.a * lam;
        let y = if st.spherical {
            st.a * lat.sin()
        } else {
            st.a * 0.5 * qsfn(lat.sin(), st.e, st.one_es)
        };
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lon = adjlon(x / st.a + self.cfg.lon0);
        let lat = if st.spherical {
            aasin(y / st.a)
        } else {
            let q = (2.0 * y / st.a).clamp(-st.qp, st.qp);
            if st.qp - q.abs() < 1e-12 {
                // at the poles the Newton step degenerates
                std::f64::consts::FRAC_PI_2.copysign(q)
            } else {
                phi_from_q(q, st.e, st.one_es)?
            }
        };
        Ok((lon, lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Cylindrical Equal-Area"
    }

    fn description(&self) -> &'static str {
        "Equal-area cylindrical; severe shape distortion toward the poles"
    }

    fn attribution(&self) -> &'static str {
        "Johann Heinrich Lambert, 1772"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::{SPHERE, WGS84};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn init(e: crate::proj::ellipsoid::Ellipsoid) -> CylindricalEqualArea {
        let mut p = CylindricalEqualArea::new();
        p.set_ellipsoid(e);
        p.initialize().unwrap();
        p
    }

    #[test]
    fn test_roundtrip_both_modes() {
        let cases: &[(f64, f64)] = &[(0.0, 0.0), (10.0, 45.0), (-170.0, 80.0), (60.0, -75.0)];
        for e in [SPHERE, WGS84] {
            let p = init(e);
            for &(lon_deg, lat_deg) in cases {
                let lon = lon_deg.to_radians();
                let lat = lat_deg.to_radians();
                let (x, y) = p.forward(lon, lat).unwrap();
                let (lon2, lat2) = p.inverse(x, y).unwrap();
                assert_relative_eq!(lon2, lon, epsilon = 1e-9);
                assert_relative_eq!(lat2, lat, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_origin() {
        for e in [SPHERE, WGS84] {
            let p = init(e);
            let (x, y) = p.forward(0.0, 0.0).unwrap();
            assert_relative_eq!(x, 0.0, epsilon = 1e-9);
            assert_relative_eq!(y, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pole_height_sphere() {
        // On the sphere the pole line sits at y = a
        let p = init(SPHERE);
        let (_, y) = p.forward(0.0, FRAC_PI_2).unwrap();
        assert_relative_eq!(y, SPHERE.a, epsilon = 1e-6);
    }

    #[test]
    fn test_area_ratio_sphere() {
        // Equal-area: a band from the equator to 30° has sin(30°) = half the
        // height of the full hemisphere
        let p = init(SPHERE);
        let (_, y30) = p.forward(0.0, 30.0_f64.to_radians()).unwrap();
        let (_, y90) = p.forward(0.0, FRAC_PI_2).unwrap();
        assert_relative_eq!(y30 / y90, 0.5, epsilon = 1e-12);
    }
}
