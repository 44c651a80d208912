//! Bonne projection, standard parallel 45°.
//!
//! Pseudoconic equal-area: parallels are concentric circular arcs of true
//! length. ρ = cot(φ₁) + φ₁ - φ on the sphere; on the ellipsoid the arc
//! length along the meridian replaces φ.

use crate::error::ProjError;
use crate::proj::common::{adjlon, enfn, inv_mlfn, mlfn, msfn};
use crate::proj::{ProjConfig, Projection};

const LAT1_DEG: f64 = 45.0;
const EPS10: f64 = 1e-10;

pub struct Bonne {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    es: f64,
    en: [f64; 5],
    phi1: f64,
    /// cot(φ₁) + φ₁ (sphere) or m₁/(sinφ₁·cosφ₁-factor) + M(φ₁) (ellipsoid)
    cot_or_am1: f64,
    m1: f64,
}

impl Bonne {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }
}

impl Default for Bonne {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for Bonne {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        let phi1 = LAT1_DEG.to_radians();
        if phi1.abs() < EPS10 {
            // the cone degenerates to the sinusoidal cylinder
            return Err(ProjError::Configuration(
                "standard parallel must be nonzero".to_string(),
            ));
        }
        let es = self.cfg.ellipsoid.es;
        let en = enfn(es)?;
        let spherical = self.cfg.spherical();
        let (cot_or_am1, m1) = if spherical {
            (phi1.cos() / phi1.sin() + phi1, 0.0)
        } else {
            let sin1 = phi1.sin();
            let cos1 = phi1.cos();
            let m1 = mlfn(phi1, sin1, cos1, &en);
            let am1 = msfn(sin1, cos1, es) / sin1;
            (am1 + m1, m1)
        };
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
            spherical,
            es,
            en,
            phi1,
            cot_or_am1,
            m1,
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        if st.spherical {
            let rho = st.cot_or_am1 - lat;
            let e = if rho.abs() > EPS10 {
                lam * lat.cos() / rho
            } else {
                0.0
            };
            let x = st.a * rho * e.sin();
            let y = st.a * (st.cot_or_am1 - st.phi1 - rho * e.cos());
            return Ok((x, y));
        }
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let rho = st.cot_or_am1 - mlfn(lat, sin_lat, cos_lat, &st.en);
        let e = if rho.abs() > EPS10 {
            lam * cos_lat / ((1.0 - st.es * sin_lat * sin_lat).sqrt() * rho)
        } else {
            0.0
        };
        let x = st.a * rho * e.sin();
        let y = st.a * (st.cot_or_am1 - st.m1 - rho * e.cos());
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let xu = x / st.a;
        if st.spherical {
            let yu = st.cot_or_am1 - st.phi1 - y / st.a;
            let rho = (xu * xu + yu * yu).sqrt().copysign(st.phi1);
            let lat = st.cot_or_am1 - rho;
            if lat.abs() > std::f64::consts::FRAC_PI_2 + EPS10 {
                return Err(ProjError::OutsideDomain);
            }
            let cos_lat = lat.cos();
            let lam = if cos_lat.abs() < EPS10 {
                0.0
            } else {
                rho * xu.atan2(yu) / cos_lat
            };
            return Ok((adjlon(lam + self.cfg.lon0), lat));
        }
        let yu = st.cot_or_am1 - st.m1 - y / st.a;
        let rho = (xu * xu + yu * yu).sqrt().copysign(st.phi1);
        let lat = inv_mlfn(st.cot_or_am1 - rho, st.es, &st.en)?;
        if lat.abs() > std::f64::consts::FRAC_PI_2 + EPS10 {
            return Err(ProjError::OutsideDomain);
        }
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let lam = if cos_lat.abs() < EPS10 {
            0.0
        } else {
            rho * xu.atan2(yu) * (1.0 - st.es * sin_lat * sin_lat).sqrt() / cos_lat
        };
        Ok((adjlon(lam + self.cfg.lon0), lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Bonne"
    }

    fn description(&self) -> &'static str {
        "Equal-area pseudoconic with heart-shaped outline"
    }

    fn attribution(&self) -> &'static str {
        "Rigobert Bonne, 1752"
    }
}
