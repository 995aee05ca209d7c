//! August Epicycloidal (`august`), spherical, forward only.

use crate::error::ProjError;
use crate::proj::context::Context;
use crate::proj::coord::{CoordKind, Lp, Xy};
use crate::proj::registry::OperationInfo;
use crate::proj::Projection;

const M: f64 = 1.333333333333333;

pub static AUGUST: OperationInfo = OperationInfo {
    id: "august",
    description: "August Epicycloidal",
    params: "",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: false,
    constructor: new_august,
};

fn new_august(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    ctx.ellipsoid = ctx.ellipsoid.to_sphere();
    Ok(Box::new(August))
}

pub struct August;

impl Projection for August {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        let t = (0.5 * lp.phi).tan();
        let c1 = (1.0 - t * t).sqrt();
        let lam = 0.5 * lp.lam;
        let c = 1.0 + c1 * lam.cos();
        let x1 = lam.sin() * c1 / c;
        let y1 = t / c;
        let (x1s, y1s) = (x1 * x1, y1 * y1);
        Ok(Xy::new(
            M * x1 * (3.0 + x1s - 3.0 * y1s),
            M * y1 * (3.0 + 3.0 * x1s - y1s),
        ))
    }
}
