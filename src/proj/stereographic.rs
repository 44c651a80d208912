//! Stereographic projection: conformal azimuthal, oblique aspect.
//!
//! spherical: k = 2/(1 + cos c), closed form.
//! ellipsoidal: double projection via the Gauss conformal sphere of radius
//! R = a·√(1-es)/(1 - es·sin²φ₀); geodetic latitude maps to the conformal
//! latitude χ, then the spherical formulas apply on (χ, C·λ).

use crate::error::ProjError;
use crate::proj::common::{aasin, adjlon};
use crate::proj::{ProjConfig, Projection};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

const EPS10: f64 = 1e-10;
const GAUSS_TOL: f64 = 1e-14;
const GAUSS_MAX_ITER: usize = 20;

pub struct Stereographic {
    cfg: ProjConfig,
    state: Option<State>,
}

struct State {
    a: f64,
    spherical: bool,
    e: f64,
    sin_lat0: f64,
    cos_lat0: f64,
    // Gauss conformal sphere constants (ellipsoidal path)
    c: f64,
    k: f64,
    ratexp: f64,
    sin_chi0: f64,
    cos_chi0: f64,
    r_sphere: f64,
}

fn srat(esinp: f64, exp: f64) -> f64 {
    ((1.0 - esinp) / (1.0 + esinp)).powf(exp)
}

impl Stereographic {
    pub fn new() -> Self {
        Self {
            cfg: ProjConfig::default(),
            state: None,
        }
    }

    fn conformal_lat(st: &State, lat: f64) -> f64 {
        2.0 * (st.k
            * (0.5 * lat + FRAC_PI_4).tan().powf(st.c)
            * srat(st.e * lat.sin(), st.ratexp))
        .atan()
            - FRAC_PI_2
    }

    /// Recover the geodetic latitude from the conformal latitude by fixed
    /// point iteration.
    fn geodetic_lat(st: &State, chi: f64) -> Result<f64, ProjError> {
        let num = ((0.5 * chi + FRAC_PI_4).tan() / st.k).powf(1.0 / st.c);
        let mut phi = chi;
        for _ in 0..GAUSS_MAX_ITER {
            let next =
                2.0 * (num * srat(st.e * phi.sin(), -0.5 * st.e)).atan() - FRAC_PI_2;
            if (next - phi).abs() < GAUSS_TOL {
                return Ok(next);
            }
            phi = next;
        }
        Err(ProjError::NoConvergence("conformal sphere latitude"))
    }
}

impl Default for Stereographic {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for Stereographic {
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
        let sphi = lat0.sin();
        let cphi = lat0.cos();
        if es > 0.0 && FRAC_PI_2 - lat0.abs() < EPS10 {
            // the Gauss constants degenerate at the poles
            return Err(ProjError::Configuration(
                "polar origin requires a spherical shape".to_string(),
            ));
        }

        let c = (1.0 + es * cphi.powi(4) / (1.0 - es)).sqrt();
        let chi0 = aasin(sphi / c);
        let ratexp = 0.5 * c * e;
        let k = (0.5 * chi0 + FRAC_PI_4).tan()
            / ((0.5 * lat0 + FRAC_PI_4).tan().powf(c) * srat(e * sphi, ratexp));
        self.state = Some(State {
            a: self.cfg.ellipsoid.a,
            spherical: self.cfg.spherical(),
            e,
            sin_lat0: sphi,
            cos_lat0: cphi,
            c,
            k,
            ratexp,
            sin_chi0: chi0.sin(),
            cos_chi0: chi0.cos(),
            r_sphere: self.cfg.ellipsoid.a * (1.0 - es).sqrt()
                / (1.0 - es * sphi * sphi),
        });
        Ok(())
    }

    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        let lam = adjlon(lon - self.cfg.lon0);
        if st.spherical {
            let sin_lat = lat.sin();
            let cos_lat = lat.cos();
            let denom = 1.0 + st.sin_lat0 * sin_lat + st.cos_lat0 * cos_lat * lam.cos();
            if denom < EPS10 {
                return Err(ProjError::OutsideDomain);
            }
            let k = 2.0 / denom;
            let x = st.a * k * cos_lat * lam.sin();
            let y = st.a * k * (st.cos_lat0 * sin_lat - st.sin_lat0 * cos_lat * lam.cos());
            return Ok((x, y));
        }
        let chi = Self::conformal_lat(st, lat);
        let lambda = st.c * lam;
        let sin_chi = chi.sin();
        let cos_chi = chi.cos();
        let denom = 1.0 + st.sin_chi0 * sin_chi + st.cos_chi0 * cos_chi * lambda.cos();
        if denom < EPS10 {
            return Err(ProjError::OutsideDomain);
        }
        let b = 2.0 * st.r_sphere / denom;
        let x = b * cos_chi * lambda.sin();
        let y = b * (st.cos_chi0 * sin_chi - st.sin_chi0 * cos_chi * lambda.cos());
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let st = self.state.as_ref().ok_or(ProjError::NotInitialized)?;
        if st.spherical {
            let xu = x / st.a;
            let yu = y / st.a;
            let rho = (xu * xu + yu * yu).sqrt();
            if rho < EPS10 {
                return Ok((self.cfg.lon0, self.cfg.lat0));
            }
            let c = 2.0 * (0.5 * rho).atan();
            let sin_c = c.sin();
            let cos_c = c.cos();
            let lat = aasin(cos_c * st.sin_lat0 + yu * sin_c * st.cos_lat0 / rho);
            let lam =
                (xu * sin_c).atan2(rho * st.cos_lat0 * cos_c - yu * st.sin_lat0 * sin_c);
            return Ok((adjlon(lam + self.cfg.lon0), lat));
        }
        let rho = (x * x + y * y).sqrt();
        if rho < EPS10 {
            return Ok((self.cfg.lon0, self.cfg.lat0));
        }
        let ang = 2.0 * (0.5 * rho / st.r_sphere).atan();
        let sin_c = ang.sin();
        let cos_c = ang.cos();
        let chi = aasin(cos_c * st.sin_chi0 + y * sin_c * st.cos_chi0 / rho);
        let lambda =
            (x * sin_c).atan2(rho * st.cos_chi0 * cos_c - y * st.sin_chi0 * sin_c);
        let lon = adjlon(lambda / st.c + self.cfg.lon0);
        let lat = Self::geodetic_lat(st, chi)?;
        Ok((lon, lat))
    }

    fn has_inverse(&self) -> bool {
        true
    }

    fn needs_origin_latitude(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "Stereographic"
    }

    fn description(&self) -> &'static str {
        "Conformal azimuthal; circles on the globe map to circles"
    }

    fn attribution(&self) -> &'static str {
        "Known to Hipparchus, ca. 150 BC"
    }
}
