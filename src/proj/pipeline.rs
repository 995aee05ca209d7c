//! Operation: a concrete projection wrapped by the shared prepare/finalize
//! steps that handle range checks, central meridian, false origin, units,
//! axis order and latitude conventions.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::ProjError;
use crate::params::{self, ParamList};
use crate::proj::common::adjlon;
use crate::proj::context::{geocentric_latitude, Context, LatitudeConversion};
use crate::proj::coord::{IoUnits, Lp, Xy};
use crate::proj::registry::{self, OperationInfo, Registry};
use crate::proj::Projection;

/// Slack allowed past the poles before a latitude is rejected.
const LAT_EPS: f64 = 1e-12;
/// Longitudes beyond this many radians are rejected outright.
const MAX_LON: f64 = 10.0;

/// A projection ready for repeated forward/inverse calls.
pub struct Operation {
    info: &'static OperationInfo,
    ctx: Context,
    projection: Box<dyn Projection>,
}

/// Resolve a parameter list into an operation using the built-in projections.
pub fn build(params: ParamList) -> Result<Operation, ProjError> {
    Operation::with_registry(params, registry::global())
}

impl Operation {
    /// Parse a proj-string and build the operation it describes.
    pub fn new(definition: &str) -> Result<Self, ProjError> {
        build(params::parse(definition)?)
    }

    pub fn with_registry(params: ParamList, registry: &Registry) -> Result<Self, ProjError> {
        let mut ctx = Context::from_params(params)?;
        let info = registry.lookup(&ctx.proj_id)?;
        let projection = (info.constructor)(&mut ctx)?;
        debug!(
            proj = info.id,
            k0 = ctx.k0,
            lam0 = ctx.lam0,
            spherical = ctx.ellipsoid.is_sphere(),
            "operation ready"
        );
        Ok(Self {
            info,
            ctx,
            projection,
        })
    }

    pub fn info(&self) -> &'static OperationInfo {
        self.info
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn has_inverse(&self) -> bool {
        self.info.inverse
    }

    /// Geographic (radians) to projected coordinates.
    pub fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        let lp = self.forward_prepare(lp)?;
        let xy = self.forward_finalize(self.projection.forward(lp)?);
        if !xy.is_finite() {
            return Err(ProjError::ToleranceCondition);
        }
        Ok(xy)
    }

    /// Projected coordinates back to geographic (radians).
    pub fn inverse(&self, xy: Xy) -> Result<Lp, ProjError> {
        if !self.info.inverse {
            return Err(ProjError::NoInverse);
        }
        let xy = self.inverse_prepare(xy)?;
        let lp = self.inverse_finalize(self.projection.inverse(xy)?);
        if !lp.is_finite() {
            return Err(ProjError::ToleranceCondition);
        }
        Ok(lp)
    }

    /// Forward-project every point, stopping at the first failure.
    pub fn forward_batch(&self, coords: &[Lp]) -> Result<Vec<Xy>, ProjError> {
        coords.iter().map(|&lp| self.forward(lp)).collect()
    }

    pub fn inverse_batch(&self, coords: &[Xy]) -> Result<Vec<Lp>, ProjError> {
        coords.iter().map(|&xy| self.inverse(xy)).collect()
    }

    fn forward_prepare(&self, lp: Lp) -> Result<Lp, ProjError> {
        let ctx = &self.ctx;
        if !lp.is_finite() {
            return Err(ProjError::LatOrLonExceededLimit);
        }

        let t = lp.phi.abs() - FRAC_PI_2;
        if t > LAT_EPS || lp.lam.abs() > MAX_LON {
            return Err(ProjError::LatOrLonExceededLimit);
        }

        let mut phi = lp.phi;
        if t.abs() <= LAT_EPS {
            phi = FRAC_PI_2.copysign(phi);
        } else if ctx.geoc {
            phi = geocentric_latitude(&ctx.ellipsoid, LatitudeConversion::GeocentricToGeographic, phi);
        }

        let mut lam = lp.lam;
        if !ctx.over {
            lam = adjlon(lam);
        }
        lam = lam - ctx.from_greenwich - ctx.lam0;
        if !ctx.over {
            lam = adjlon(lam);
        }

        Ok(Lp::new(lam, phi))
    }

    fn forward_finalize(&self, mut xy: Xy) -> Xy {
        let ctx = &self.ctx;
        if ctx.right == IoUnits::Classic {
            xy.x *= ctx.ellipsoid.a;
            xy.y *= ctx.ellipsoid.a;
        }
        if matches!(ctx.right, IoUnits::Classic | IoUnits::Projected) {
            xy.x = ctx.fr_meter * (xy.x + ctx.x0);
            xy.y = ctx.fr_meter * (xy.y + ctx.y0);
        }
        if ctx.axis.is_default() {
            xy
        } else {
            ctx.axis.to_output(xy)
        }
    }

    fn inverse_prepare(&self, xy: Xy) -> Result<Xy, ProjError> {
        let ctx = &self.ctx;
        if !xy.is_finite() {
            return Err(ProjError::InvalidXOrY);
        }

        let mut xy = if ctx.axis.is_default() {
            xy
        } else {
            ctx.axis.from_output(xy)
        };

        match ctx.right {
            IoUnits::Classic | IoUnits::Projected => {
                xy.x = ctx.to_meter * xy.x - ctx.x0;
                xy.y = ctx.to_meter * xy.y - ctx.y0;
                if ctx.right == IoUnits::Classic {
                    // reciprocal, not a division by a
                    xy.x *= ctx.ellipsoid.ra;
                    xy.y *= ctx.ellipsoid.ra;
                }
            }
            IoUnits::Radians => {}
        }
        Ok(xy)
    }

    fn inverse_finalize(&self, lp: Lp) -> Lp {
        let ctx = &self.ctx;

        let mut lam = lp.lam + ctx.from_greenwich + ctx.lam0;
        if !ctx.over {
            lam = adjlon(lam);
        }
        if let Some(center) = ctx.lon_wrap {
            lam = center + adjlon(lam - center);
        }

        let mut phi = lp.phi;
        if ctx.geoc {
            phi = geocentric_latitude(&ctx.ellipsoid, LatitudeConversion::GeographicToGeocentric, phi);
        }

        Lp::new(lam, phi)
    }
}

impl FromStr for Operation {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("id", &self.info.id)
            .field("params", &self.ctx.params.to_string())
            .finish()
    }
}
