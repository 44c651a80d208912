//! Sinusoidal (Sanson–Flamsteed) projection: equal-area pseudocylindrical.
//!
//! spherical:   x = a·λ·cos(φ), y = a·φ
//! ellipsoidal: x = a·λ·cos(φ)/√(1 - es·sin²φ), y = a·m(φ)
//! where m(φ) is the meridian arc; the ellipsoidal inverse recovers φ from
//! the inverse meridian-arc series.

use crate::error::ProjError;
use crate::proj::common::{adjlon, enfn, inv_mlfn, mlfn};
use crate::proj::{ProjConfig, Projection};

pub struct Sinusoidal {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    es: f64,
    en: [f64; 5],
}

impl Sinusoidal {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }
}

impl Default for Sinusoidal {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for Sinusoidal {
    fn config(&self) -> &ProjConfig {
        &self.cfg
    }

    fn config_mut(&mut self) -> &mut ProjConfig {
        self.state = None;
        &mut self.cfg
    }

    fn initialize(&mut self) -> Result<(), ProjError> {
        let es = self.cfg.ellipsoid.es;
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
            spherical: self.cfg.spherical(),
            es,
            en: enfn(es)?,
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        if st.spherical {
            Ok((st.a * lam * lat.cos(), st.a * lat))
        } else {
            let s = lat.sin();
            let c = lat.cos();
            let x = st.a * lam * c / (1.0 - st.es * s * s).sqrt();
            let y = st.a * mlfn(lat, s, c, &st.en);
            Ok((x, y))
        }
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lat = if st.spherical {
            y / st.a
        } else {
            inv_mlfn(y / st.a, st.es, &st.en)?
        };
        let cos_lat = lat.cos();
        if cos_lat.abs() < 1e-15 {
            // longitude is undefined at the pole point
            return Ok((self.cfg.lon0, lat));
        }
        let s = lat.sin();
        let lam = if st.spherical {
            x / (st.a * cos_lat)
        } else {
            x * (1.0 - st.es * s * s).sqrt() / (st.a * cos_lat)
        };
        Ok((adjlon(lam + self.cfg.lon0), lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Sinusoidal"
    }

    fn description(&self) -> &'static str {
        "Equal-area pseudocylindrical with sinusoid meridians"
    }

    fn attribution(&self) -> &'static str {
        "Nicolas Sanson, ca. 1650"
    }
}
