//! Lambert Conformal Conic projection, two standard parallels (33°/45°).
//!
//! ellipsoidal: ρ = c·t(φ)ⁿ with t = tsfn, inverse via phi2
//! spherical:   ρ = c·tan(π/4 + φ/2)⁻ⁿ

use crate::error::ProjError;
use crate::proj::common::{adjlon, msfn, phi2, tsfn};
use crate::proj::{ProjConfig, Projection};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const LAT1_DEG: f64 = 33.0;
const LAT2_DEG: f64 = 45.0;
const EPS10: f64 = 1e-10;

pub struct LambertConformalConic {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    e: f64,
    /// cone constant
    n: f64,
    c: f64,
    rho0: f64,
}

impl LambertConformalConic {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }

    fn rho(&self, st: &State, phi: f64) -> Result<f64, ProjError> {
        if (phi.abs() - FRAC_PI_2).abs() < EPS10 {
            // the pole on the cone axis is a point, the opposite one is at infinity
            return if phi * st.n > 0.0 {
                Ok(0.0)
            } else {
                Err(ProjError::OutsideDomain)
            };
        }
        Ok(if st.spherical {
            st.c * (FRAC_PI_4 + 0.5 * phi).tan().powf(-st.n)
        } else {
            st.c * tsfn(phi, phi.sin(), st.e).powf(st.n)
        })
    }
}

impl Default for LambertConformalConic {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for LambertConformalConic {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        crate::proj::common::enfn(self.cfg.ellipsoid.es)?;
        let phi1 = LAT1_DEG.to_radians();
        let phi2_ = LAT2_DEG.to_radians();
        let phi0 = self.cfg.lat0;
        let spherical = self.cfg.spherical();
        let e = self.cfg.ellipsoid.eccentricity();
        let es = self.cfg.ellipsoid.es;

        let (n, c, rho0) = if spherical {
            let t1 = (FRAC_PI_4 + 0.5 * phi1).tan();
            let t2 = (FRAC_PI_4 + 0.5 * phi2_).tan();
            let n = (phi1.cos() / phi2_.cos()).ln() / (t2 / t1).ln();
            let c = phi1.cos() * t1.powf(n) / n;
            let rho0 = c * (FRAC_PI_4 + 0.5 * phi0).tan().powf(-n);
            (n, c, rho0)
        } else {
            let m1 = msfn(phi1.sin(), phi1.cos(), es);
            let m2 = msfn(phi2_.sin(), phi2_.cos(), es);
            let t1 = tsfn(phi1, phi1.sin(), e);
            let t2 = tsfn(phi2_, phi2_.sin(), e);
            let n = (m1 / m2).ln() / (t1 / t2).ln();
            let c = m1 * t1.powf(-n) / n;
            let rho0 = c * tsfn(phi0, phi0.sin(), e).powf(n);
            (n, c, rho0)
        };
        if !n.is_finite() || n.abs() < EPS10 {
            return Err(ProjError::Configuration(
                "degenerate cone constant".to_string(),
            ));
        }
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
            spherical,
            e,
            n,
            c,
            rho0,
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        let rho = self.rho(st, lat)?;
        let theta = st.n * lam;
        let x = st.a * rho * theta.sin();
        let y = st.a * (st.rho0 - rho * theta.cos());
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let xu = x / st.a;
        let yu = st.rho0 - y / st.a;
        // for n < 0 flip signs before taking the angle and radius
        let (xn, yn) = if st.n < 0.0 { (-xu, -yu) } else { (xu, yu) };
        let rho = (xn * xn + yn * yn).sqrt();
        if rho < EPS10 {
            let lat = if st.n > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
            return Ok((self.cfg.lon0, lat));
        }
        let lat = if st.spherical {
            2.0 * (st.c / rho).powf(1.0 / st.n).atan() - FRAC_PI_2
        } else {
            phi2((rho / st.c).powf(1.0 / st.n), st.e)?
        };
        let lon = adjlon(xn.atan2(yn) / st.n + self.cfg.lon0);
        Ok((lon, lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Lambert Conformal Conic"
    }

    fn description(&self) -> &'static str {
        "Conformal conic with two standard parallels"
    }

    fn attribution(&self) -> &'static str {
        "Johann Heinrich Lambert, 1772"
    }
}
