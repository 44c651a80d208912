//! Common helpers for projection math: meridian-arc series, conformal and
//! authalic latitude conversions, domain-clamped trig.
//!
//! The series coefficients are the classic USGS/PROJ truncations; all
//! functions work on the unit sphere (multiply by `a` for metres).

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::ProjError;

const TWO_PI: f64 = 2.0 * PI;

// Meridian-arc series coefficients (fixed 5-term truncation in powers of es).
const C00: f64 = 1.0;
const C02: f64 = 0.25;
const C04: f64 = 0.046875;
const C06: f64 = 0.01953125;
const C08: f64 = 0.01068115234375;
const C22: f64 = 0.75;
const C44: f64 = 0.46875;
const C46: f64 = 0.013_020_833_333_333_333;
const C48: f64 = 0.007_120_768_229_166_667;
const C66: f64 = 0.364_583_333_333_333_3;
const C68: f64 = 0.005_696_614_583_333_333;
const C88: f64 = 0.3076171875;

const INV_MLFN_TOL: f64 = 1e-11;
const INV_MLFN_MAX_ITER: usize = 10;
const PHI2_TOL: f64 = 1e-10;
const PHI2_MAX_ITER: usize = 15;
const PHI_FROM_Q_TOL: f64 = 1e-10;
const PHI_FROM_Q_MAX_ITER: usize = 15;

/// Meridian-arc series coefficients for a given squared eccentricity.
///
/// Fails when `es` is outside [0, 1), where the series is not constructible.
pub fn enfn(es: f64) -> Result<[f64; 5], ProjError> {
    if !(0.0..1.0).contains(&es) {
        return Err(ProjError::Configuration(format!(
            "squared eccentricity {es} outside [0, 1)"
        )));
    }
    let t = es * es;
    Ok([
        C00 - es * (C02 + es * (C04 + es * (C06 + es * C08))),
        es * (C22 - es * (C04 + es * (C06 + es * C08))),
        t * (C44 - es * (C46 + es * C48)),
        t * es * (C66 - es * C68),
        t * t * C88,
    ])
}

/// Meridian arc length from the equator to latitude `phi` (unit sphere).
pub fn mlfn(phi: f64, sphi: f64, cphi: f64, en: &[f64; 5]) -> f64 {
    let cphi = cphi * sphi;
    let sphi = sphi * sphi;
    en[0] * phi - cphi * (en[1] + sphi * (en[2] + sphi * (en[3] + sphi * en[4])))
}

/// Latitude for a given meridian arc length, by Newton iteration seeded with
/// the spherical value.
pub fn inv_mlfn(arg: f64, es: f64, en: &[f64; 5]) -> Result<f64, ProjError> {
    let k = 1.0 / (1.0 - es);
    let mut phi = arg;
    for _ in 0..INV_MLFN_MAX_ITER {
        let s = phi.sin();
        let mut t = 1.0 - es * s * s;
        t = (mlfn(phi, s, phi.cos(), en) - arg) * (t * t.sqrt()) * k;
        phi -= t;
        if t.abs() < INV_MLFN_TOL {
            return Ok(phi);
        }
    }
    Err(ProjError::NoConvergence("inverse meridian arc"))
}

/// Radius of the parallel at latitude phi, divided by a: cosφ / √(1 - es·sin²φ).
pub fn msfn(sinphi: f64, cosphi: f64, es: f64) -> f64 {
    cosphi / (1.0 - es * sinphi * sinphi).sqrt()
}

/// Isometric-latitude half-angle tangent t(φ) used by conformal projections.
pub fn tsfn(phi: f64, sinphi: f64, e: f64) -> f64 {
    let con = e * sinphi;
    (0.5 * (FRAC_PI_2 - phi)).tan() / ((1.0 - con) / (1.0 + con)).powf(0.5 * e)
}

/// Latitude from t(φ), the inverse of [`tsfn`] by fixed-point iteration.
pub fn phi2(ts: f64, e: f64) -> Result<f64, ProjError> {
    let eccnth = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..PHI2_MAX_ITER {
        let con = e * phi.sin();
        let dphi =
            FRAC_PI_2 - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(eccnth)).atan() - phi;
        phi += dphi;
        if dphi.abs() <= PHI2_TOL {
            return Ok(phi);
        }
    }
    Err(ProjError::NoConvergence("conformal latitude"))
}

/// Authalic function q(φ); q(π/2) is the full-pole value qp.
pub fn qsfn(sinphi: f64, e: f64, one_es: f64) -> f64 {
    if e >= 1e-7 {
        let con = e * sinphi;
        one_es
            * (sinphi / (1.0 - con * con) - (0.5 / e) * ((1.0 - con) / (1.0 + con)).ln())
    } else {
        2.0 * sinphi
    }
}

/// Latitude from the authalic function q by Newton iteration, spherical seed.
pub fn phi_from_q(q: f64, e: f64, one_es: f64) -> Result<f64, ProjError> {
    let mut phi = aasin(0.5 * q);
    if e < 1e-7 {
        return Ok(phi);
    }
    for _ in 0..PHI_FROM_Q_MAX_ITER {
        let sinphi = phi.sin();
        let cosphi = phi.cos();
        let con = e * sinphi;
        let com = 1.0 - con * con;
        let dphi = 0.5 * com * com / cosphi
            * (q / one_es - sinphi / com + (0.5 / e) * ((1.0 - con) / (1.0 + con)).ln());
        phi += dphi;
        if dphi.abs() <= PHI_FROM_Q_TOL {
            return Ok(phi);
        }
    }
    Err(ProjError::NoConvergence("authalic latitude"))
}

/// asin with the argument clamped to [-1, 1], so rounding near the poles never
/// produces NaN.
pub fn aasin(v: f64) -> f64 {
    v.clamp(-1.0, 1.0).asin()
}

/// acos with the argument clamped to [-1, 1].
pub fn aacos(v: f64) -> f64 {
    v.clamp(-1.0, 1.0).acos()
}

/// Wrap a longitude into [-π, π].
pub fn adjlon(mut lon: f64) -> f64 {
    if lon.abs() <= PI {
        return lon;
    }
    while lon > PI {
        lon -= TWO_PI;
    }
    while lon < -PI {
        lon += TWO_PI;
    }
    lon
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_meridian_arc_equator() {
        let en = enfn(WGS84.es).unwrap();
        assert_relative_eq!(mlfn(0.0, 0.0, 1.0, &en), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_meridian_arc_45_degrees() {
        // Arc to 45° on WGS84 is ~4984944 m
        let en = enfn(WGS84.es).unwrap();
        let m = WGS84.a * mlfn(FRAC_PI_4, FRAC_PI_4.sin(), FRAC_PI_4.cos(), &en);
        assert!(m > 4_900_000.0 && m < 5_100_000.0, "arc = {m}");
    }

    #[test]
    fn test_inv_mlfn_roundtrip() {
        let en = enfn(WGS84.es).unwrap();
        for lat_deg in [-80.0_f64, -45.0, -10.0, 0.0, 10.0, 45.0, 80.0] {
            let phi = lat_deg.to_radians();
            let ml = mlfn(phi, phi.sin(), phi.cos(), &en);
            let phi2 = inv_mlfn(ml, WGS84.es, &en).unwrap();
            assert_relative_eq!(phi2, phi, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_enfn_rejects_bad_eccentricity() {
        assert!(enfn(-0.1).is_err());
        assert!(enfn(1.0).is_err());
        assert!(enfn(0.0).is_ok());
    }

    #[test]
    fn test_phi2_inverts_tsfn() {
        let e = WGS84.eccentricity();
        for lat_deg in [-70.0_f64, -30.0, 0.0, 30.0, 70.0] {
            let phi = lat_deg.to_radians();
            let ts = tsfn(phi, phi.sin(), e);
            assert_relative_eq!(phi2(ts, e).unwrap(), phi, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_phi_from_q_inverts_qsfn() {
        let e = WGS84.eccentricity();
        let one_es = WGS84.one_es();
        for lat_deg in [-80.0_f64, -45.0, 0.0, 45.0, 80.0] {
            let phi = lat_deg.to_radians();
            let q = qsfn(phi.sin(), e, one_es);
            assert_relative_eq!(phi_from_q(q, e, one_es).unwrap(), phi, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_qsfn_spherical_limit() {
        assert_relative_eq!(qsfn(0.5, 0.0, 1.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_clamped_trig() {
        assert_relative_eq!(aasin(1.0 + 1e-14), FRAC_PI_2);
        assert_relative_eq!(aacos(-1.0 - 1e-14), std::f64::consts::PI);
        assert!(aasin(2.0).is_finite());
    }

    #[test]
    fn test_adjlon() {
        assert_relative_eq!(adjlon(3.0 * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(adjlon(-3.0 * PI), -PI, epsilon = 1e-12);
        assert_relative_eq!(adjlon(0.5), 0.5);
    }
}
