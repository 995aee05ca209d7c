//! Lambert Conformal Conic (`lcc`), one or two standard parallels.
//!
//!   ρ = c·t(φ)ⁿ,  θ = n·λ
//!   x = k₀·ρ·sin θ,  y = k₀·(ρ₀ − ρ·cos θ)
//!
//! With only `lat_1` the cone is tangent and, unless `lat_0` is given, the
//! origin sits on the standard parallel.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ProjError;
use crate::proj::common::{aatan2, msfn, phi2, tsfn, EPS10};
use crate::proj::context::Context;
use crate::proj::coord::{CoordKind, Lp, Xy};
use crate::proj::registry::OperationInfo;
use crate::proj::Projection;

pub static LCC: OperationInfo = OperationInfo {
    id: "lcc",
    description: "Lambert Conformal Conic",
    params: "lat_1= lat_2= lat_0=",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: true,
    constructor: new_lcc,
};

fn new_lcc(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    let phi1 = ctx.params.get_angle("lat_1")?.unwrap_or(0.0);
    let phi2 = match ctx.params.get_angle("lat_2")? {
        Some(phi2) => phi2,
        None => {
            if !ctx.params.contains("lat_0") {
                ctx.phi0 = phi1;
            }
            phi1
        }
    };
    Ok(Box::new(LambertConformalConic::new(ctx, phi1, phi2)?))
}

pub struct LambertConformalConic {
    e: f64,
    ellipsoidal: bool,
    k0: f64,
    /// Cone constant
    n: f64,
    c: f64,
    rho0: f64,
}

fn near_pole(phi: f64) -> bool {
    (phi.abs() - FRAC_PI_2).abs() < EPS10
}

impl LambertConformalConic {
    pub fn new(ctx: &Context, phi1: f64, phi2: f64) -> Result<Self, ProjError> {
        if (phi1 + phi2).abs() < EPS10 {
            return Err(ProjError::ConicLatEqual);
        }

        let ell = &ctx.ellipsoid;
        let (e, es) = (ell.e, ell.es);
        let (sinphi, cosphi) = phi1.sin_cos();
        let secant = (phi1 - phi2).abs() >= EPS10;
        let ellipsoidal = es != 0.0;
        let mut n = sinphi;

        let (c, rho0) = if ellipsoidal {
            let m1 = msfn(sinphi, cosphi, es);
            let ml1 = tsfn(phi1, sinphi, e)?;
            if secant {
                let (sinphi2, cosphi2) = phi2.sin_cos();
                n = (m1 / msfn(sinphi2, cosphi2, es)).ln() / (ml1 / tsfn(phi2, sinphi2, e)?).ln();
            }
            if n == 0.0 || !n.is_finite() {
                return Err(ProjError::ConeDegenerate);
            }
            let c = m1 * ml1.powf(-n) / n;
            let rho0 = if near_pole(ctx.phi0) {
                0.0
            } else {
                c * tsfn(ctx.phi0, ctx.phi0.sin(), e)?.powf(n)
            };
            (c, rho0)
        } else {
            if secant {
                n = (cosphi / phi2.cos()).ln()
                    / ((FRAC_PI_4 + 0.5 * phi2).tan() / (FRAC_PI_4 + 0.5 * phi1).tan()).ln();
            }
            if n == 0.0 || !n.is_finite() {
                return Err(ProjError::ConeDegenerate);
            }
            let c = cosphi * (FRAC_PI_4 + 0.5 * phi1).tan().powf(n) / n;
            let rho0 = if near_pole(ctx.phi0) {
                0.0
            } else {
                c * (FRAC_PI_4 + 0.5 * ctx.phi0).tan().powf(-n)
            };
            (c, rho0)
        };

        Ok(Self {
            e,
            ellipsoidal,
            k0: ctx.k0,
            n,
            c,
            rho0,
        })
    }
}

impl Projection for LambertConformalConic {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        let rho = if near_pole(lp.phi) {
            if lp.phi * self.n <= 0.0 {
                return Err(ProjError::ToleranceCondition);
            }
            0.0
        } else if self.ellipsoidal {
            self.c * tsfn(lp.phi, lp.phi.sin(), self.e)?.powf(self.n)
        } else {
            self.c * (FRAC_PI_4 + 0.5 * lp.phi).tan().powf(-self.n)
        };

        let theta = self.n * lp.lam;
        Ok(Xy::new(
            self.k0 * (rho * theta.sin()),
            self.k0 * (self.rho0 - rho * theta.cos()),
        ))
    }

    fn inverse(&self, xy: Xy) -> Result<Lp, ProjError> {
        let mut x = xy.x / self.k0;
        let mut y = self.rho0 - xy.y / self.k0;
        let mut rho = x.hypot(y);

        if rho == 0.0 {
            let phi = if self.n > 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 };
            return Ok(Lp::new(0.0, phi));
        }
        if self.n < 0.0 {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let phi = if self.ellipsoidal {
            phi2((rho / self.c).powf(1.0 / self.n), self.e)?
        } else {
            2.0 * (self.c / rho).powf(1.0 / self.n).atan() - FRAC_PI_2
        };
        Ok(Lp::new(aatan2(x, y) / self.n, phi))
    }
}
