//! Airy's minimum-error azimuthal projection (`airy`), spherical, forward only.
//!
//! `lat_b` is the angular radius of the region of minimum error, measured
//! from the projection centre. Points beyond the antipodal hemisphere are
//! rejected unless `no_cut` is set.

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::proj::context::Context;
use crate::proj::coord::{CoordKind, Lp, Xy};
use crate::proj::registry::OperationInfo;
use crate::proj::Projection;

const EPS: f64 = 1e-10;

pub static AIRY: OperationInfo = OperationInfo {
    id: "airy",
    description: "Airy",
    params: "no_cut lat_b=",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: false,
    constructor: new_airy,
};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Aspect {
    NorthPole,
    SouthPole,
    Equatorial,
    Oblique { sinph0: f64, cosph0: f64 },
}

fn new_airy(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    let no_cut = ctx.params.flag("no_cut");
    let lat_b = ctx.params.get_angle("lat_b")?.unwrap_or(0.0);

    let beta = 0.5 * (FRAC_PI_2 - lat_b);
    let cb = if beta.abs() < EPS {
        -0.5
    } else {
        let cb = 1.0 / beta.tan();
        cb * cb * beta.cos().ln()
    };

    let phi0 = ctx.phi0;
    let aspect = if (phi0.abs() - FRAC_PI_2).abs() < EPS {
        if phi0 < 0.0 {
            Aspect::SouthPole
        } else {
            Aspect::NorthPole
        }
    } else if phi0.abs() < EPS {
        Aspect::Equatorial
    } else {
        let (sinph0, cosph0) = phi0.sin_cos();
        Aspect::Oblique { sinph0, cosph0 }
    };

    ctx.ellipsoid = ctx.ellipsoid.to_sphere();
    Ok(Box::new(Airy { cb, no_cut, aspect }))
}

pub struct Airy {
    cb: f64,
    no_cut: bool,
    aspect: Aspect,
}

impl Airy {
    fn radial(&self, cosz: f64) -> Result<f64, ProjError> {
        let s = 1.0 - cosz;
        if s.abs() <= EPS {
            return Ok(0.5 - self.cb);
        }
        let t = 0.5 * (1.0 + cosz);
        if t == 0.0 {
            return Err(ProjError::ToleranceCondition);
        }
        Ok(-t.ln() / s - self.cb / t)
    }
}

impl Projection for Airy {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        let (sinlam, coslam) = lp.lam.sin_cos();
        let (sinphi, cosphi) = lp.phi.sin_cos();

        match self.aspect {
            Aspect::Equatorial | Aspect::Oblique { .. } => {
                let cosz = match self.aspect {
                    Aspect::Oblique { sinph0, cosph0 } => {
                        sinph0 * sinphi + cosph0 * cosphi * coslam
                    }
                    _ => cosphi * coslam,
                };
                if !self.no_cut && cosz < -EPS {
                    return Err(ProjError::ToleranceCondition);
                }
                let krho = self.radial(cosz)?;
                let x = krho * cosphi * sinlam;
                let y = match self.aspect {
                    Aspect::Oblique { sinph0, cosph0 } => {
                        krho * (cosph0 * sinphi - sinph0 * cosphi * coslam)
                    }
                    _ => krho * sinphi,
                };
                Ok(Xy::new(x, y))
            }
            Aspect::NorthPole | Aspect::SouthPole => {
                let pole = if self.aspect == Aspect::NorthPole {
                    FRAC_PI_2
                } else {
                    -FRAC_PI_2
                };
                let z = (pole - lp.phi).abs();
                if !self.no_cut && z - EPS > FRAC_PI_2 {
                    return Err(ProjError::ToleranceCondition);
                }
                let z = 0.5 * z;
                if z <= EPS {
                    return Ok(Xy::new(0.0, 0.0));
                }
                let t = z.tan();
                let krho = -2.0 * (z.cos().ln() / t + t * self.cb);
                let x = krho * sinlam;
                let y = krho * coslam;
                Ok(if self.aspect == Aspect::NorthPole {
                    Xy::new(x, -y)
                } else {
                    Xy::new(x, y)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::pipeline::Operation;
    use approx::assert_relative_eq;

    #[test]
    fn test_equatorial_forward() {
        let op = Operation::new("+proj=airy +a=6400000 +lat_1=0 +lat_2=2").unwrap();
        assert!(!op.has_inverse());
        let xy = op.forward(Lp::from_degrees(2.0, 1.0)).unwrap();
        assert_relative_eq!(xy.x, 189109.886908621, epsilon = 1e-4);
        assert_relative_eq!(xy.y, 94583.752387504, epsilon = 1e-4);

        let xy = op.forward(Lp::from_degrees(-2.0, -1.0)).unwrap();
        assert_relative_eq!(xy.x, -189109.886908621, epsilon = 1e-4);
        assert_relative_eq!(xy.y, -94583.752387504, epsilon = 1e-4);

        assert_eq!(
            op.inverse(Xy::new(0.0, 0.0)).unwrap_err(),
            ProjError::NoInverse
        );
    }

    #[test]
    fn test_centre_maps_to_origin() {
        for def in [
            "+proj=airy +R=1 +lat_0=90",
            "+proj=airy +R=1 +lat_0=-90",
            "+proj=airy +R=1 +lat_0=45 +lon_0=10",
        ] {
            let op = Operation::new(def).unwrap();
            let ctx = op.context();
            let centre = Lp::new(ctx.lam0, ctx.phi0);
            let xy = op.forward(centre).unwrap();
            assert_relative_eq!(xy.x, 0.0, epsilon = 1e-12);
            assert_relative_eq!(xy.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_polar_aspect_is_radially_symmetric() {
        let op = Operation::new("+proj=airy +R=1 +lat_0=90 +lat_b=60").unwrap();
        let a = op.forward(Lp::from_degrees(30.0, 50.0)).unwrap();
        let b = op.forward(Lp::from_degrees(120.0, 50.0)).unwrap();
        assert_relative_eq!(a.x.hypot(a.y), b.x.hypot(b.y), epsilon = 1e-12);
        // northern pole aspect puts the 180 meridian at positive y
        let c = op.forward(Lp::from_degrees(180.0, 50.0)).unwrap();
        assert!(c.y > 0.0);
    }

    #[test]
    fn test_far_side_is_cut() {
        let op = Operation::new("+proj=airy +R=1").unwrap();
        assert_eq!(
            op.forward(Lp::from_degrees(150.0, 0.0)).unwrap_err(),
            ProjError::ToleranceCondition
        );
        let op = Operation::new("+proj=airy +R=1 +no_cut").unwrap();
        assert!(op.forward(Lp::from_degrees(150.0, 0.0)).is_ok());
    }

    #[test]
    fn test_forces_sphere() {
        let op = Operation::new("+proj=airy +ellps=GRS80").unwrap();
        assert!(op.context().ellipsoid.is_sphere());
        assert_relative_eq!(op.context().ellipsoid.a, 6378137.0);
    }
}
