//! Lambert Azimuthal Equal-Area projection.
//!
//! spherical: k = √(2/(1 + cos c)), x = a·k·cosφ·sinλ, ...
//! ellipsoidal: projected on the authalic sphere via q(φ), with the oblique
//! aspect stretched by D = cosφ₀/(√(1-es·sin²φ₀)·cosβ₁) and a dedicated
//! polar aspect (the stretch is singular at the poles).

use crate::error::ProjError;
use crate::proj::common::{aasin, adjlon, phi_from_q, qsfn};
use crate::proj::{ProjConfig, Projection};
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

pub struct LambertAzimuthalEqualArea {
    cfg: ProjConfig,
    state: Option<State>,
}

enum Aspect {
    Oblique {
        sinb1: f64,
        cosb1: f64,
        /// stretch of the authalic sphere in the oblique aspect
        dd: f64,
    },
    Polar {
        north: bool,
    },
}

struct State {
    a: f64,
    spherical: bool,
    e: f64,
    one_es: f64,
    qp: f64,
    /// radius of the authalic sphere, √(qp/2)
    rq: f64,
    sin_lat0: f64,
    cos_lat0: f64,
    aspect: Aspect,
}

impl LambertAzimuthalEqualArea {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }

    fn phi_from_q_guarded(st: &State, q: f64) -> Result<f64, ProjError> {
        if st.qp - q.abs() < 1e-12 {
            Ok(FRAC_PI_2.copysign(q))
        } else {
            phi_from_q(q, st.e, st.one_es)
        }
    }
}

impl Default for LambertAzimuthalEqualArea {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for LambertAzimuthalEqualArea {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        crate::proj::common::enfn(self.cfg.ellipsoid.es)?;
        let lat0 = self.cfg.lat0;
        let e = self.cfg.ellipsoid.eccentricity();
        let es = self.cfg.ellipsoid.es;
        let one_es = self.cfg.ellipsoid.one_es();
        let qp = qsfn(1.0, e, one_es);
        let aspect = if FRAC_PI_2 - lat0.abs() < EPS10 {
            Aspect::Polar { north: lat0 > 0.0 }
        } else {
            let sinb1 = (qsfn(lat0.sin(), e, one_es) / qp).clamp(-1.0, 1.0);
            let cosb1 = (1.0 - sinb1 * sinb1).sqrt();
            let dd = if e < 1e-10 {
                1.0
            } else {
                lat0.cos() / ((1.0 - es * lat0.sin() * lat0.sin()).sqrt() * cosb1)
            };
            Aspect::Oblique { sinb1, cosb1, dd }
        };
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
            spherical: self.cfg.spherical(),
            e,
            one_es,
            qp,
            rq: (0.5 * qp).sqrt(),
            sin_lat0: lat0.sin(),
            cos_lat0: lat0.cos(),
            aspect,
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        if st.spherical {
            let sin_lat = lat.sin();
            let cos_lat = lat.cos();
            let b = 1.0 + st.sin_lat0 * sin_lat + st.cos_lat0 * cos_lat * lam.cos();
            if b < EPS10 {
                return Err(ProjError::OutsideDomain);
            }
            let k = (2.0 / b).sqrt();
            let x = st.a * k * cos_lat * lam.sin();
            let y = st.a * k * (st.cos_lat0 * sin_lat - st.sin_lat0 * cos_lat * lam.cos());
            return Ok((x, y));
        }
        let q = qsfn(lat.sin(), st.e, st.one_es);
        match st.aspect {
            Aspect::Oblique { sinb1, cosb1, dd } => {
                let sinb = (q / st.qp).clamp(-1.0, 1.0);
                let cosb = (1.0 - sinb * sinb).sqrt();
                let b = 1.0 + sinb1 * sinb + cosb1 * cosb * lam.cos();
                if b < EPS10 {
                    return Err(ProjError::OutsideDomain);
                }
                let b = (2.0 / b).sqrt();
                let x = st.a * st.rq * dd * b * cosb * lam.sin();
                let y = st.a * (st.rq / dd) * b * (cosb1 * sinb - sinb1 * cosb * lam.cos());
                Ok((x, y))
            }
            Aspect::Polar { north } => {
                let rho = if north {
                    (st.qp - q).max(0.0).sqrt()
                } else {
                    (st.qp + q).max(0.0).sqrt()
                };
                let x = st.a * rho * lam.sin();
                let y = st.a * rho * lam.cos() * if north { -1.0 } else { 1.0 };
                Ok((x, y))
            }
        }
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let xu = x / st.a;
        let yu = y / st.a;
        if st.spherical {
            let rho = (xu * xu + yu * yu).sqrt();
            if rho > 2.0 + EPS10 {
                return Err(ProjError::OutsideDomain);
            }
            if rho < EPS10 {
                return Ok((self.cfg.lon0, self.cfg.lat0));
            }
            let c = 2.0 * aasin(0.5 * rho);
            let sin_c = c.sin();
            let cos_c = c.cos();
            let lat = aasin(cos_c * st.sin_lat0 + yu * sin_c * st.cos_lat0 / rho);
            let lam =
                (xu * sin_c).atan2(rho * st.cos_lat0 * cos_c - yu * st.sin_lat0 * sin_c);
            return Ok((adjlon(lam + self.cfg.lon0), lat));
        }
        match st.aspect {
            Aspect::Oblique { sinb1, cosb1, dd } => {
                let xs = xu / dd;
                let ys = yu * dd;
                let rho = (xs * xs + ys * ys).sqrt();
                if rho < EPS10 {
                    return Ok((self.cfg.lon0, self.cfg.lat0));
                }
                if rho > 2.0 * st.rq + EPS10 {
                    return Err(ProjError::OutsideDomain);
                }
                let ce = 2.0 * aasin(0.5 * rho / st.rq);
                let s_ce = ce.sin();
                let c_ce = ce.cos();
                let q = st.qp * (c_ce * sinb1 + ys * s_ce * cosb1 / rho);
                let lam =
                    (xs * s_ce).atan2(rho * cosb1 * c_ce - ys * sinb1 * s_ce);
                let lat = Self::phi_from_q_guarded(st, q.clamp(-st.qp, st.qp))?;
                Ok((adjlon(lam + self.cfg.lon0), lat))
            }
            Aspect::Polar { north } => {
                let rho2 = xu * xu + yu * yu;
                if rho2 > 2.0 * st.qp + EPS10 {
                    return Err(ProjError::OutsideDomain);
                }
                let q = if north { st.qp - rho2 } else { rho2 - st.qp };
                let lam = if north {
                    xu.atan2(-yu)
                } else {
                    xu.atan2(yu)
                };
                let lat = Self::phi_from_q_guarded(st, q.clamp(-st.qp, st.qp))?;
                Ok((adjlon(lam + self.cfg.lon0), lat))
            }
        }
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn needs_origin_latitude(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Lambert Azimuthal Equal-Area"
    }

    fn description(&self) -> &'static str {
        "Equal-area azimuthal; area is preserved everywhere"
    }

    fn attribution(&self) -> &'static str {
        "Johann Heinrich Lambert, 1772"
    }
}
