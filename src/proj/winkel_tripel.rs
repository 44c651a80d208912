//! Winkel Tripel projection: arithmetic mean of the equirectangular
//! projection and the Aitoff projection, with cosφ₁ = 2/π.
//!
//! No closed-form inverse exists; the family is forward-only.

use crate::error::ProjError;
use crate::proj::common::{aacos, adjlon};
use crate::proj::{ProjConfig, Projection};
use std::f64::consts::FRAC_2_PI;

pub struct WinkelTripel {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
}

impl WinkelTripel {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }
}

impl Default for WinkelTripel {
    fn default() -> Self {
        Self::new()
    }
}

/// sin(x)/x with the removable singularity filled in.
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        x.sin() / x
    }
}

impl Projection for WinkelTripel {
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
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        let cos_lat = lat.cos();
        let alpha = aacos(cos_lat * (0.5 * lam).cos());
        let s = sinc(alpha);
        let x = 0.5 * st.a * (lam * FRAC_2_PI + 2.0 * cos_lat * (0.5 * lam).sin() / s);
        let y = 0.5 * st.a * (lat + lat.sin() / s);
        Ok((x, y))
    }

    fn has_inverse(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "Winkel Tripel"
    }

    fn description(&self) -> &'static str {
        "Compromise world map; mean of equirectangular and Aitoff"
    }

    fn attribution(&self) -> &'static str {
        "Oswald Winkel, 1921"
    }
}
