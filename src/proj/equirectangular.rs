//! Equidistant Cylindrical / Plate Carrée (`eqc`), always spherical.
//!
//! forward: x = λ·cos(φts), y = φ − φ₀
//! inverse: λ = x / cos(φts), φ = y + φ₀

use crate::error::ProjError;
use crate::proj::context::Context;
use crate::proj::coord::{CoordKind, Lp, Xy};
use crate::proj::registry::OperationInfo;
use crate::proj::Projection;

pub static EQC: OperationInfo = OperationInfo {
    id: "eqc",
    description: "Equidistant Cylindrical (Plate Carree)",
    params: "lat_ts= lat_0=",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: true,
    constructor: new_eqc,
};

fn new_eqc(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    let lat_ts = ctx.params.get_angle("lat_ts")?.unwrap_or(0.0);
    let rc = lat_ts.cos();
    if rc <= 0.0 {
        return Err(ProjError::LatTsLargerThan90);
    }
    ctx.ellipsoid = ctx.ellipsoid.to_sphere();
    Ok(Box::new(Equirectangular { rc, phi0: ctx.phi0 }))
}

pub struct Equirectangular {
    rc: f64,
    phi0: f64,
}

impl Projection for Equirectangular {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        Ok(Xy::new(self.rc * lp.lam, lp.phi - self.phi0))
    }

    fn inverse(&self, xy: Xy) -> Result<Lp, ProjError> {
        Ok(Lp::new(xy.x / self.rc, xy.y + self.phi0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::pipeline::Operation;
    use approx::assert_relative_eq;

    const EPSG_4087: &str =
        "+proj=eqc +lat_ts=0 +lat_0=0 +lon_0=0 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs";

    #[test]
    fn test_world_equidistant_cylindrical() {
        let op = Operation::new(EPSG_4087).unwrap();
        assert!(op.context().ellipsoid.is_sphere());

        let xy = op.forward(Lp::from_degrees(-0.127758, 51.507351)).unwrap();
        assert_relative_eq!(xy.x, -14221.96, epsilon = 1e-2);
        assert_relative_eq!(xy.y, 5733772.09, epsilon = 1e-2);

        let (lon, lat) = op.inverse(xy).unwrap().to_degrees();
        assert_relative_eq!(lon, -0.127758, epsilon = 1e-10);
        assert_relative_eq!(lat, 51.507351, epsilon = 1e-10);
    }

    #[test]
    fn test_lat_ts_and_origin() {
        let op = Operation::new("+proj=eqc +R=1 +lat_ts=60 +lat_0=10").unwrap();
        let xy = op.forward(Lp::from_degrees(90.0, 10.0)).unwrap();
        assert_relative_eq!(xy.x, std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(xy.y, 0.0, epsilon = 1e-12);

        let lp = op.inverse(Xy::new(0.0, 0.0)).unwrap();
        assert_relative_eq!(lp.phi, 10.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_lat_ts_at_pole_rejected() {
        assert_eq!(
            Operation::new("+proj=eqc +R=1 +lat_ts=90").unwrap_err(),
            ProjError::LatTsLargerThan90
        );
    }
}
