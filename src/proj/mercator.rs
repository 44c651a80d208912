//! Mercator projection: conformal cylindrical.
//!
//! spherical:   x = a·λ, y = a·ln(tan(π/4 + φ/2))
//! ellipsoidal: x = a·λ, y = -a·ln(tsfn(φ, e)); inverse via phi2
//!
//! The declared latitude domain is clipped to ±85°; the poles map to
//! infinity.

use crate::error::ProjError;
use crate::proj::common::{adjlon, phi2, tsfn};
use crate::proj::{ProjConfig, Projection};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const MAX_LAT_DEG: f64 = 85.0;

pub struct Mercator {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    e: f64,
}

impl Mercator {
    pub fn new() -> Self {
        let mut cfg = ProjConfig::default();
        cfg.lat_min = -MAX_LAT_DEG.to_radians();
        cfg.lat_max = MAX_LAT_DEG.to_radians();
        Self { cfg, state: None }
    }
}

impl Default for Mercator {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for Mercator {
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
            spherical: self.cfg.spherical(),
            e: self.cfg.ellipsoid.eccentricity(),
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        if lat.abs() > self.cfg.lat_max + 1e-9 {
            return Err(ProjError::OutsideDomain);
        }
        let lam = adjlon(lon - self.cfg.lon0);
        let x = st.a * lam;
        let y = if st.spherical {
            st.a * (FRAC_PI_4 + 0.5 * lat).tan().ln()
        } else {
            st.a * (-tsfn(lat, lat.sin(), st.e).ln())
        };
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lon = adjlon(x / st.a + self.cfg.lon0);
        let lat = if st.spherical {
            2.0 * (y / st.a).exp().atan() - FRAC_PI_2
        } else {
            phi2((-y / st.a).exp(), st.e)?
        };
        Ok((lon, lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Mercator"
    }

    fn description(&self) -> &'static str {
        "Conformal cylindrical; rhumb lines are straight"
    }

    fn attribution(&self) -> &'static str {
        "Gerardus Mercator, 1569"
    }
}
