//! Equidistant Conic projection, standard parallels 30°/60°.
//!
//! ρ = c - m(φ), with m the meridian arc on the ellipsoid and simply φ on
//! the sphere; parallels are concentric arcs spaced true to scale along
//! every meridian.

use crate::error::ProjError;
use crate::proj::common::{adjlon, enfn, inv_mlfn, mlfn, msfn};
use crate::proj::{ProjConfig, Projection};

const LAT1_DEG: f64 = 30.0;
const LAT2_DEG: f64 = 60.0;
const EPS10: f64 = 1e-10;

pub struct EquidistantConic {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    es: f64,
    en: [f64; 5],
    n: f64,
    c: f64,
    rho0: f64,
}

impl EquidistantConic {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }

    fn ml(st: &State, phi: f64) -> f64 {
        if st.spherical {
            phi
        } else {
            mlfn(phi, phi.sin(), phi.cos(), &st.en)
        }
    }
}

impl Default for EquidistantConic {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for EquidistantConic {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        let phi1 = LAT1_DEG.to_radians();
        let phi2 = LAT2_DEG.to_radians();
        let es = self.cfg.ellipsoid.es;
        let spherical = self.cfg.spherical();
        let en = enfn(es)?;

        let mut st = State {
            a: self.cfg.ellipsoid.a,
            spherical,
            es,
            en,
            n: 0.0,
            c: 0.0,
            rho0: 0.0,
        };
        if spherical {
            st.n = (phi1.cos() - phi2.cos()) / (phi2 - phi1);
        } else {
            let m1 = msfn(phi1.sin(), phi1.cos(), es);
            let m2 = msfn(phi2.sin(), phi2.cos(), es);
            let ml1 = Self::ml(&st, phi1);
            let ml2 = Self::ml(&st, phi2);
            if (ml2 - ml1).abs() < EPS10 {
                return Err(ProjError::Configuration(
                    "standard parallels coincide".to_string(),
                ));
            }
            st.n = (m1 - m2) / (ml2 - ml1);
        }
        if !st.n.is_finite() || st.n.abs() < EPS10 {
            return Err(ProjError::Configuration(
                "degenerate cone constant".to_string(),
            ));
        }
        st.c = Self::ml(&st, phi1) + msfn(phi1.sin(), phi1.cos(), if spherical { 0.0 } else { es }) / st.n;
        st.rho0 = st.c - Self::ml(&st, self.cfg.lat0);
        self.state = Some(st);
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        let rho = st.c - Self::ml(st, lat);
        let theta = st.n * lam;
        let x = st.a * rho * theta.sin();
        let y = st.a * (st.rho0 - rho * theta.cos());
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let xu = x / st.a;
        let yu = st.rho0 - y / st.a;
        let (xn, yn) = if st.n < 0.0 { (-xu, -yu) } else { (xu, yu) };
        let rho = (xn * xn + yn * yn).sqrt();
        let ml = st.c - rho * if st.n < 0.0 { -1.0 } else { 1.0 };
        let lat = if st.spherical {
            ml
        } else {
            inv_mlfn(ml, st.es, &st.en)?
        };
        let lon = adjlon(xn.atan2(yn) / st.n + self.cfg.lon0);
        Ok((lon, lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Equidistant Conic"
    }

    fn description(&self) -> &'static str {
        "Conic with true scale along all meridians and two standard parallels"
    }

    fn attribution(&self) -> &'static str {
        "Claudius Ptolemy, ca. 150 AD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::{SPHERE, WGS84};
    use approx::assert_relative_eq;

    fn init(e: crate::proj::ellipsoid::Ellipsoid) -> EquidistantConic {
        let mut p = EquidistantConic::new();
        p.set_ellipsoid(e);
        p.initialize().unwrap();
        p
    }

    #[test]
    fn test_roundtrip_both_modes() {
        let cases: &[(f64, f64)] = &[
            (0.0, 0.0),
            (15.0, 52.0),
            (-74.0, 40.7),
            (120.0, -35.0),
            (-170.0, 80.0),
        ];
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
            assert_relative_eq!(x, 0.0, epsilon = 1e-6);
            assert_relative_eq!(y, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_meridian_scale_true() {
        // Along the central meridian, distances equal the meridian arc
        let p = init(SPHERE);
        let (_, y1) = p.forward(0.0, 10.0_f64.to_radians()).unwrap();
        let (_, y2) = p.forward(0.0, 20.0_f64.to_radians()).unwrap();
        assert_relative_eq!(y2 - y1, SPHERE.a * 10.0_f64.to_radians(), epsilon = 1.0);
    }
}
