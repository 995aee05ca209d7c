//! Albers Equal Area Conic (`aea`) and Lambert Equal Area Conic (`leac`).
//!
//! Both are area-preserving cones built on the authalic function `qsfn`:
//!   ρ = (1/n)·√(C − n·q(φ)),  θ = n·λ
//!   x = ρ·sin θ,  y = ρ₀ − ρ·cos θ
//! `leac` is the limiting case with one standard parallel at a pole.

use std::f64::consts::FRAC_PI_2;

use tracing::trace;

use crate::error::ProjError;
use crate::proj::common::{aasin, aatan2, asqrt, msfn, qsfn, EPS10, MAX_ITER};
use crate::proj::context::Context;
use crate::proj::coord::{CoordKind, Lp, Xy};
use crate::proj::registry::OperationInfo;
use crate::proj::Projection;

const EPS7: f64 = 1e-7;

pub static AEA: OperationInfo = OperationInfo {
    id: "aea",
    description: "Albers Equal Area",
    params: "lat_1= lat_2=",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: true,
    constructor: new_aea,
};

pub static LEAC: OperationInfo = OperationInfo {
    id: "leac",
    description: "Lambert Equal Area Conic",
    params: "lat_1= south",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: true,
    constructor: new_leac,
};

fn new_aea(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    let phi1 = ctx.params.get_angle("lat_1")?.unwrap_or(0.0);
    let phi2 = ctx.params.get_angle("lat_2")?.unwrap_or(0.0);
    Ok(Box::new(AlbersEqualArea::new(ctx, phi1, phi2)?))
}

fn new_leac(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    let phi2 = ctx.params.get_angle("lat_1")?.unwrap_or(0.0);
    let phi1 = if ctx.params.contains("south") {
        -FRAC_PI_2
    } else {
        FRAC_PI_2
    };
    Ok(Box::new(AlbersEqualArea::new(ctx, phi1, phi2)?))
}

pub struct AlbersEqualArea {
    e: f64,
    one_es: f64,
    ellipsoidal: bool,
    /// Cone constant
    n: f64,
    n2: f64,
    c: f64,
    /// 1/n
    dd: f64,
    /// q at the pole, used to detect polar points in the inverse
    ec: f64,
    rho0: f64,
}

impl AlbersEqualArea {
    /// Cone through standard parallels `phi1` and `phi2` (radians).
    pub fn new(ctx: &Context, phi1: f64, phi2: f64) -> Result<Self, ProjError> {
        if (phi1 + phi2).abs() < EPS10 {
            return Err(ProjError::ConicLatEqual);
        }

        let ell = &ctx.ellipsoid;
        let (e, es, one_es) = (ell.e, ell.es, ell.one_es);
        let (mut sinphi, mut cosphi) = phi1.sin_cos();
        let mut n = sinphi;
        let secant = (phi1 - phi2).abs() >= EPS10;

        if es > 0.0 {
            let m1 = msfn(sinphi, cosphi, es);
            let ml1 = qsfn(sinphi, e, one_es)?;
            if secant {
                (sinphi, cosphi) = phi2.sin_cos();
                let m2 = msfn(sinphi, cosphi, es);
                let ml2 = qsfn(sinphi, e, one_es)?;
                if ml2 == ml1 {
                    return Err(ProjError::ConeDegenerate);
                }
                n = (m1 * m1 - m2 * m2) / (ml2 - ml1);
            }
            if n == 0.0 {
                return Err(ProjError::ConeDegenerate);
            }
            let ec = 1.0 - 0.5 * one_es * ((1.0 - e) / (1.0 + e)).ln() / e;
            let c = m1 * m1 + n * ml1;
            let dd = 1.0 / n;
            let rho0 = dd * asqrt(c - n * qsfn(ctx.phi0.sin(), e, one_es)?);
            Ok(Self {
                e,
                one_es,
                ellipsoidal: true,
                n,
                n2: 2.0 * n,
                c,
                dd,
                ec,
                rho0,
            })
        } else {
            if secant {
                n = 0.5 * (n + phi2.sin());
            }
            if n == 0.0 {
                return Err(ProjError::ConeDegenerate);
            }
            let n2 = n + n;
            let c = cosphi * cosphi + n2 * sinphi;
            let dd = 1.0 / n;
            let rho0 = dd * asqrt(c - n2 * ctx.phi0.sin());
            Ok(Self {
                e,
                one_es,
                ellipsoidal: false,
                n,
                n2,
                c,
                dd,
                ec: 0.0,
                rho0,
            })
        }
    }

    /// φ from the authalic value q by Newton iteration.
    fn phi1(&self, qs: f64) -> Result<f64, ProjError> {
        let (e, one_es) = (self.e, self.one_es);
        let mut phi = (0.5 * qs).asin();
        if e < EPS7 {
            return Ok(phi);
        }
        for _ in 0..MAX_ITER {
            let (sinpi, cospi) = phi.sin_cos();
            let con = e * sinpi;
            let com = 1.0 - con * con;
            let dphi = 0.5 * com * com / cospi
                * (qs / one_es - sinpi / com + 0.5 / e * ((1.0 - con) / (1.0 + con)).ln());
            phi += dphi;
            if dphi.abs() <= EPS10 {
                return Ok(phi);
            }
        }
        trace!(qs, e, "authalic latitude did not converge");
        Err(ProjError::NonConvergent)
    }
}

impl Projection for AlbersEqualArea {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        let sinphi = lp.phi.sin();
        let mut rho = if self.ellipsoidal {
            self.c - self.n * qsfn(sinphi, self.e, self.one_es)?
        } else {
            self.c - self.n2 * sinphi
        };
        if rho < 0.0 {
            return Err(ProjError::ToleranceCondition);
        }
        rho = self.dd * rho.sqrt();
        let theta = self.n * lp.lam;
        Ok(Xy::new(rho * theta.sin(), self.rho0 - rho * theta.cos()))
    }

    fn inverse(&self, xy: Xy) -> Result<Lp, ProjError> {
        let (mut x, mut y) = (xy.x, self.rho0 - xy.y);
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

        let r = rho / self.dd;
        let phi = if self.ellipsoidal {
            let qs = (self.c - r * r) / self.n;
            if (self.ec - qs.abs()).abs() > EPS7 {
                self.phi1(qs)?
            } else {
                FRAC_PI_2.copysign(qs)
            }
        } else {
            aasin((self.c - r * r) / self.n2)
        };

        Ok(Lp::new(aatan2(x, y) / self.n, phi))
    }
}
