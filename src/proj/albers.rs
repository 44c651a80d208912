//! Albers Equal-Area Conic projection, standard parallels 29.5°/45.5°.
//!
//! ρ = √(c - n·q(φ))/n where q is the authalic function; on the sphere
//! q degrades to 2·sin(φ). Inverse recovers φ from q by Newton iteration.

use crate::error::ProjError;
use crate::proj::common::{aasin, adjlon, msfn, phi_from_q, qsfn};
use crate::proj::{ProjConfig, Projection};

const LAT1_DEG: f64 = 29.5;
const LAT2_DEG: f64 = 45.5;
const EPS10: f64 = 1e-10;

pub struct AlbersEqualArea {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    e: f64,
    one_es: f64,
    n: f64,
    c: f64,
    rho0: f64,
    qp: f64,
}

impl AlbersEqualArea {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }

    fn q(st: &State, sinphi: f64) -> f64 {
        if st.spherical {
            2.0 * sinphi
        } else {
            qsfn(sinphi, st.e, st.one_es)
        }
    }
}

impl Default for AlbersEqualArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for AlbersEqualArea {
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
        let phi2 = LAT2_DEG.to_radians();
        let es = self.cfg.ellipsoid.es;
        let spherical = self.cfg.spherical();
        let e = self.cfg.ellipsoid.eccentricity();
        let one_es = self.cfg.ellipsoid.one_es();

        let m1 = msfn(phi1.sin(), phi1.cos(), es);
        let m2 = msfn(phi2.sin(), phi2.cos(), es);
        let mut st = State {
            a: self.cfg.ellipsoid.a,
            spherical,
            e,
            one_es,
            n: 0.0,
            c: 0.0,
            rho0: 0.0,
            qp: qsfn(1.0, e, one_es),
        };
        let q1 = Self::q(&st, phi1.sin());
        let q2 = Self::q(&st, phi2.sin());
        let q0 = Self::q(&st, self.cfg.lat0.sin());

        st.n = (m1 * m1 - m2 * m2) / (q2 - q1);
        if !st.n.is_finite() || st.n.abs() < EPS10 {
            return Err(ProjError::Configuration(
                "degenerate cone constant".to_string(),
            ));
        }
        st.c = m1 * m1 + st.n * q1;
        st.rho0 = (st.c - st.n * q0).max(0.0).sqrt() / st.n;
        self.state = Some(st);
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        let arg = st.c - st.n * Self::q(st, lat.sin());
        if arg < 0.0 {
            return Err(ProjError::OutsideDomain);
        }
        let rho = arg.sqrt() / st.n;
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
        let q = (st.c - rho * rho * st.n * st.n) / st.n;
        let lat = if st.spherical {
            aasin(0.5 * q)
        } else {
            let q = q.clamp(-st.qp, st.qp);
            if st.qp - q.abs() < 1e-12 {
                // at the poles the Newton step degenerates
                std::f64::consts::FRAC_PI_2.copysign(q)
            } else {
                phi_from_q(q, st.e, st.one_es)?
            }
        };
        let lon = adjlon(xn.atan2(yn) / st.n + self.cfg.lon0);
        Ok((lon, lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Albers Equal-Area Conic"
    }

    fn description(&self) -> &'static str {
        "Equal-area conic with two standard parallels"
    }

    fn attribution(&self) -> &'static str {
        "Heinrich Christian Albers, 1805"
    }
}
