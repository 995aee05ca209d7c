//! Mercator projection (`merc`), ellipsoidal and spherical.
//!
//! Ellipsoidal:
//!   forward: x = k₀·λ, y = -k₀·ln(tsfn(φ, e))
//!   inverse: λ = x/k₀, φ = phi2(exp(-y/k₀), e)
//!
//! Spherical (e.g. Web Mercator, EPSG:3857):
//!   forward: x = k₀·λ, y = k₀·ln(tan(π/4 + φ/2))
//!   inverse: λ = x/k₀, φ = π/2 - 2·atan(exp(-y/k₀))
//!
//! With `lat_ts`, k₀ becomes the parallel radius at the latitude of true scale.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ProjError;
use crate::proj::common::{msfn, phi2, tsfn, EPS10};
use crate::proj::context::Context;
use crate::proj::coord::{CoordKind, Lp, Xy};
use crate::proj::registry::OperationInfo;
use crate::proj::Projection;

pub static MERC: OperationInfo = OperationInfo {
    id: "merc",
    description: "Mercator",
    params: "lat_ts=",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: true,
    constructor: new_merc,
};

fn new_merc(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    let lat_ts = match ctx.params.get_angle("lat_ts")? {
        Some(phits) => {
            let phits = phits.abs();
            if phits >= FRAC_PI_2 {
                return Err(ProjError::LatTsLargerThan90);
            }
            Some(phits)
        }
        None => None,
    };

    let es = ctx.ellipsoid.es;
    if es != 0.0 {
        if let Some(phits) = lat_ts {
            ctx.k0 = msfn(phits.sin(), phits.cos(), es);
        }
        Ok(Box::new(Mercator {
            k0: ctx.k0,
            e: ctx.ellipsoid.e,
        }))
    } else {
        if let Some(phits) = lat_ts {
            ctx.k0 = phits.cos();
        }
        Ok(Box::new(SphericalMercator { k0: ctx.k0 }))
    }
}

fn check_pole(phi: f64) -> Result<(), ProjError> {
    if (phi.abs() - FRAC_PI_2).abs() <= EPS10 {
        return Err(ProjError::ToleranceCondition);
    }
    Ok(())
}

/// Ellipsoidal Mercator.
pub struct Mercator {
    k0: f64,
    e: f64,
}

impl Projection for Mercator {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        check_pole(lp.phi)?;
        let ts = tsfn(lp.phi, lp.phi.sin(), self.e)?;
        Ok(Xy::new(self.k0 * lp.lam, -self.k0 * ts.ln()))
    }

    fn inverse(&self, xy: Xy) -> Result<Lp, ProjError> {
        let phi = phi2((-xy.y / self.k0).exp(), self.e)?;
        Ok(Lp::new(xy.x / self.k0, phi))
    }
}

/// Spherical Mercator.
pub struct SphericalMercator {
    k0: f64,
}

impl Projection for SphericalMercator {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        check_pole(lp.phi)?;
        Ok(Xy::new(
            self.k0 * lp.lam,
            self.k0 * (FRAC_PI_4 + 0.5 * lp.phi).tan().ln(),
        ))
    }

    fn inverse(&self, xy: Xy) -> Result<Lp, ProjError> {
        Ok(Lp::new(
            xy.x / self.k0,
            FRAC_PI_2 - 2.0 * (-xy.y / self.k0).exp().atan(),
        ))
    }
}
