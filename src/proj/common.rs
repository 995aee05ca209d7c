//! Common helpers for projection math: longitude reduction, the conformal
//! and authalic latitude functions, and domain-tolerant trigonometry.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::{trace, warn};

use crate::error::ProjError;

/// Generic tolerance used by the projection formulas.
pub const EPS10: f64 = 1e-10;
/// Iteration ceiling of the latitude solvers.
pub const MAX_ITER: usize = 15;

const ONE_TOL: f64 = 1.000_000_000_000_01;
const ATOL: f64 = 1e-50;
const QSFN_EPS: f64 = 1e-7;

/// Reduce a longitude to [-π, π]. Values already inside (with a 1e-12
/// slack) are returned unchanged.
pub fn adjlon(lon: f64) -> f64 {
    if lon.abs() < PI + 1e-12 {
        return lon;
    }
    let shifted = lon + PI;
    shifted - TAU * (shifted / TAU).floor() - PI
}

/// Isometric latitude helper t(φ):
///   tan(½(π/2 − φ)) / ((1 − e·sinφ)/(1 + e·sinφ))^(e/2)
pub fn tsfn(phi: f64, sinphi: f64, e: f64) -> Result<f64, ProjError> {
    let denominator = 1.0 + e * sinphi;
    if denominator == 0.0 {
        return Err(ProjError::ToleranceCondition);
    }
    Ok((0.5 * (FRAC_PI_2 - phi)).tan() / ((1.0 - e * sinphi) / denominator).powf(0.5 * e))
}

/// Parallel radius on the unit ellipsoid: cosφ / √(1 − e²·sin²φ).
pub fn msfn(sinphi: f64, cosphi: f64, es: f64) -> f64 {
    cosphi / (1.0 - es * sinphi * sinphi).sqrt()
}

/// Authalic latitude function q(φ).
pub fn qsfn(sinphi: f64, e: f64, one_es: f64) -> Result<f64, ProjError> {
    if e < QSFN_EPS {
        return Ok(sinphi + sinphi);
    }
    let con = e * sinphi;
    let div1 = 1.0 - con * con;
    let div2 = 1.0 + con;
    if div1 == 0.0 || div2 == 0.0 {
        return Err(ProjError::ToleranceCondition);
    }
    Ok(one_es * (sinphi / div1 - (0.5 / e) * ((1.0 - con) / div2).ln()))
}

/// Recover φ from t = tsfn(φ) by fixed-point iteration.
///
/// Fails with [`ProjError::NonConvergent`] after [`MAX_ITER`] steps.
pub fn phi2(ts: f64, e: f64) -> Result<f64, ProjError> {
    let half_e = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..MAX_ITER {
        let con = e * phi.sin();
        let dphi = FRAC_PI_2 - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(half_e)).atan() - phi;
        phi += dphi;
        if dphi.abs() <= EPS10 {
            return Ok(phi);
        }
    }
    trace!(ts, e, "phi2 did not converge");
    Err(ProjError::NonConvergent)
}

/// asin that saturates at ±π/2 instead of returning NaN.
pub fn aasin(v: f64) -> f64 {
    let av = v.abs();
    if av >= 1.0 {
        if av > ONE_TOL {
            warn!(value = v, "asin argument out of range");
        }
        return if v < 0.0 { -FRAC_PI_2 } else { FRAC_PI_2 };
    }
    v.asin()
}

/// acos that saturates at 0 or π instead of returning NaN.
pub fn aacos(v: f64) -> f64 {
    let av = v.abs();
    if av >= 1.0 {
        if av > ONE_TOL {
            warn!(value = v, "acos argument out of range");
        }
        return if v < 0.0 { PI } else { 0.0 };
    }
    v.acos()
}

/// sqrt clamped to zero for non-positive input.
pub fn asqrt(v: f64) -> f64 {
    if v <= 0.0 {
        0.0
    } else {
        v.sqrt()
    }
}

/// atan2 that returns 0 when both arguments vanish.
pub fn aatan2(n: f64, d: f64) -> f64 {
    if n.abs() < ATOL && d.abs() < ATOL {
        0.0
    } else {
        n.atan2(d)
    }
}
