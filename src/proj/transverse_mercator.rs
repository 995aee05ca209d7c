//! Extended Transverse Mercator (`etmerc`) and Universal Transverse Mercator
//! (`utm`), Poder/Engsager formulation with 6th-order series in the third
//! flattening n.
//!
//! Forward: geodetic φ → Gaussian latitude (series cbg) → complex
//! Gauss-Krüger coordinates → Krüger α series (gtu) → scaled by Qn.
//! Inverse runs the β series (utg) and the cgb series back to φ.

use std::f64::consts::PI;

use crate::error::ProjError;
use crate::proj::common::adjlon;
use crate::proj::context::Context;
use crate::proj::coord::{CoordKind, Lp, Xy};
use crate::proj::registry::OperationInfo;
use crate::proj::Projection;

/// Largest normalised easting handled; beyond this the series diverge.
const MAX_CE: f64 = 2.623_395_162_778;

pub static ETMERC: OperationInfo = OperationInfo {
    id: "etmerc",
    description: "Extended Transverse Mercator",
    params: "lat_0= lon_0= k_0=",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: true,
    constructor: new_etmerc,
};

pub static UTM: OperationInfo = OperationInfo {
    id: "utm",
    description: "Universal Transverse Mercator (UTM)",
    params: "zone= south",
    input: CoordKind::Angular,
    output: CoordKind::Planar,
    inverse: true,
    constructor: new_utm,
};

fn new_etmerc(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    Ok(Box::new(TransverseMercator::new(ctx)?))
}

fn new_utm(ctx: &mut Context) -> Result<Box<dyn Projection>, ProjError> {
    if ctx.ellipsoid.es == 0.0 {
        return Err(ProjError::EllipsoidUseRequired);
    }

    ctx.y0 = if ctx.params.contains("south") {
        10_000_000.0
    } else {
        0.0
    };
    ctx.x0 = 500_000.0;

    let zone = match ctx.params.get_i64("zone")? {
        Some(zone @ 1..=60) => zone - 1,
        Some(_) => return Err(ProjError::InvalidUtmZone),
        None => {
            // nearest zone to lon_0
            let zone = ((adjlon(ctx.lam0) + PI) * 30.0 / PI).floor() as i64;
            zone.clamp(0, 59)
        }
    };

    ctx.lam0 = (zone as f64 + 0.5) * PI / 30.0 - PI;
    ctx.k0 = 0.9996;
    ctx.phi0 = 0.0;

    Ok(Box::new(TransverseMercator::new(ctx)?))
}

pub struct TransverseMercator {
    /// Meridian quadrant scaled by k₀, on the unit ellipsoid
    qn: f64,
    /// Northing of the origin latitude
    zb: f64,
    /// Gaussian → geodetic latitude
    cgb: [f64; 6],
    /// Geodetic → Gaussian latitude
    cbg: [f64; 6],
    /// Transverse Mercator → Gaussian
    utg: [f64; 6],
    /// Gaussian → transverse Mercator
    gtu: [f64; 6],
}

impl TransverseMercator {
    pub fn new(ctx: &Context) -> Result<Self, ProjError> {
        let es = ctx.ellipsoid.es;
        if es <= 0.0 {
            return Err(ProjError::EllipsoidUseRequired);
        }

        let f = es / (1.0 + (1.0 - es).sqrt());
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;

        let (cgb, cbg) = Self::gauss_coefficients(n);
        let gtu = Self::alpha_coefficients(n, n2, n3, n4, n5, n6);
        let utg = Self::beta_coefficients(n, n2, n3, n4, n5, n6).map(|b| -b);

        let qn = ctx.k0 / (1.0 + n) * (1.0 + n2 * (1.0 / 4.0 + n2 * (1.0 / 64.0 + n2 / 256.0)));

        let z = gatg(&cbg, ctx.phi0);
        let zb = -qn * (z + clens(&gtu, 2.0 * z));

        Ok(Self {
            qn,
            zb,
            cgb,
            cbg,
            utg,
            gtu,
        })
    }

    /// Series between geodetic and Gaussian latitude, as (cgb, cbg).
    fn gauss_coefficients(n: f64) -> ([f64; 6], [f64; 6]) {
        let mut cgb = [0.0; 6];
        let mut cbg = [0.0; 6];
        let mut np = n;

        cgb[0] = n * (2.0 + n * (-2.0 / 3.0 + n * (-2.0 + n * (116.0 / 45.0 + n * (26.0 / 45.0 + n * (-2854.0 / 675.0))))));
        cbg[0] = n * (-2.0 + n * (2.0 / 3.0 + n * (4.0 / 3.0 + n * (-82.0 / 45.0 + n * (32.0 / 45.0 + n * (4642.0 / 4725.0))))));
        np *= n;
        cgb[1] = np * (7.0 / 3.0 + n * (-8.0 / 5.0 + n * (-227.0 / 45.0 + n * (2704.0 / 315.0 + n * (2323.0 / 945.0)))));
        cbg[1] = np * (5.0 / 3.0 + n * (-16.0 / 15.0 + n * (-13.0 / 9.0 + n * (904.0 / 315.0 + n * (-1522.0 / 945.0)))));
        np *= n;
        cgb[2] = np * (56.0 / 15.0 + n * (-136.0 / 35.0 + n * (-1262.0 / 105.0 + n * (73814.0 / 2835.0))));
        cbg[2] = np * (-26.0 / 15.0 + n * (34.0 / 21.0 + n * (8.0 / 5.0 + n * (-12686.0 / 2835.0))));
        np *= n;
        cgb[3] = np * (4279.0 / 630.0 + n * (-332.0 / 35.0 + n * (-399572.0 / 14175.0)));
        cbg[3] = np * (1237.0 / 630.0 + n * (-12.0 / 5.0 + n * (-24832.0 / 14175.0)));
        np *= n;
        cgb[4] = np * (4174.0 / 315.0 + n * (-144838.0 / 6237.0));
        cbg[4] = np * (-734.0 / 315.0 + n * (109598.0 / 31185.0));
        np *= n;
        cgb[5] = np * (601676.0 / 22275.0);
        cbg[5] = np * (444337.0 / 155925.0);

        (cgb, cbg)
    }

    /// Forward series coefficients α₁..α₆ (Krüger, 6th order).
    fn alpha_coefficients(n: f64, n2: f64, n3: f64, n4: f64, n5: f64, n6: f64) -> [f64; 6] {
        [
            // α₁
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4 - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            // α₂
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1983433.0 / 1935360.0 * n6,
            // α₃
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4
                + 15061.0 / 26880.0 * n5
                + 167603.0 / 181440.0 * n6,
            // α₄
            49561.0 / 161280.0 * n4 - 179.0 / 168.0 * n5 + 6601661.0 / 7257600.0 * n6,
            // α₅
            34729.0 / 80640.0 * n5 - 3418889.0 / 1995840.0 * n6,
            // α₆
            212378941.0 / 319334400.0 * n6,
        ]
    }

    /// Inverse series coefficients β₁..β₆ (Krüger, 6th order).
    fn beta_coefficients(n: f64, n2: f64, n3: f64, n4: f64, n5: f64, n6: f64) -> [f64; 6] {
        [
            // β₁
            n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
                + 96199.0 / 604800.0 * n6,
            // β₂
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1118711.0 / 3870720.0 * n6,
            // β₃
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5 + 5569.0 / 90720.0 * n6,
            // β₄
            4397.0 / 161280.0 * n4 - 11.0 / 504.0 * n5 - 830251.0 / 7257600.0 * n6,
            // β₅
            4583.0 / 161280.0 * n5 - 108847.0 / 3991680.0 * n6,
            // β₆
            20648693.0 / 638668800.0 * n6,
        ]
    }
}

impl Projection for TransverseMercator {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError> {
        // ellipsoidal latitude, longitude -> Gaussian latitude, longitude
        let cn = gatg(&self.cbg, lp.phi);
        let (sin_cn, cos_cn) = cn.sin_cos();
        let (sin_ce, cos_ce) = lp.lam.sin_cos();

        // Gaussian -> complex spherical transverse Mercator
        let cn = sin_cn.atan2(cos_ce * cos_cn);
        let ce = (sin_ce * cos_cn).atan2(sin_cn.hypot(cos_cn * cos_ce));
        let ce = ce.tan().asinh();

        // spherical -> ellipsoidal normalised
        let (dcn, dce) = clen_s(&self.gtu, 2.0 * cn, 2.0 * ce);
        let cn = cn + dcn;
        let ce = ce + dce;

        if ce.abs() > MAX_CE {
            return Err(ProjError::ToleranceCondition);
        }
        Ok(Xy::new(self.qn * ce, self.qn * cn + self.zb))
    }

    fn inverse(&self, xy: Xy) -> Result<Lp, ProjError> {
        let cn = (xy.y - self.zb) / self.qn;
        let ce = xy.x / self.qn;
        if ce.abs() > MAX_CE {
            return Err(ProjError::ToleranceCondition);
        }

        // normalised -> spherical
        let (dcn, dce) = clen_s(&self.utg, 2.0 * cn, 2.0 * ce);
        let cn = cn + dcn;
        let ce = (ce + dce).sinh().atan();

        // complex spherical -> Gaussian
        let (sin_cn, cos_cn) = cn.sin_cos();
        let (sin_ce, cos_ce) = ce.sin_cos();
        let ce = sin_ce.atan2(cos_ce * cos_cn);
        let cn = (sin_cn * cos_ce).atan2(sin_ce.hypot(cos_ce * cos_cn));

        Ok(Lp::new(ce, gatg(&self.cgb, cn)))
    }
}

/// Real Clenshaw summation of a latitude series: B + Σ pₖ·sin(2kB).
fn gatg(p: &[f64; 6], b: f64) -> f64 {
    let (sin_2b, cos_2b) = (2.0 * b).sin_cos();
    let two_cos_2b = 2.0 * cos_2b;
    let mut h1 = p[5];
    let mut h2 = 0.0;
    let mut h = 0.0;
    for &coef in p[..5].iter().rev() {
        h = -h2 + two_cos_2b * h1 + coef;
        h2 = h1;
        h1 = h;
    }
    b + h * sin_2b
}

/// Real Clenshaw summation Σ aₖ·sin(k·arg).
fn clens(a: &[f64; 6], arg: f64) -> f64 {
    let (sin_arg, cos_arg) = arg.sin_cos();
    let r = 2.0 * cos_arg;
    let mut hr1 = 0.0;
    let mut hr = a[5];
    for &coef in a[..5].iter().rev() {
        let hr2 = hr1;
        hr1 = hr;
        hr = -hr2 + r * hr1 + coef;
    }
    sin_arg * hr
}

/// Complex Clenshaw summation Σ aₖ·sin(k·(arg_r + i·arg_i)), returned as
/// (real, imaginary).
fn clen_s(a: &[f64; 6], arg_r: f64, arg_i: f64) -> (f64, f64) {
    let (sin_r, cos_r) = arg_r.sin_cos();
    let (sinh_i, cosh_i) = (arg_i.sinh(), arg_i.cosh());
    let r = 2.0 * cos_r * cosh_i;
    let i = -2.0 * sin_r * sinh_i;

    let (mut hr, mut hi) = (a[5], 0.0);
    let (mut hr1, mut hi1) = (0.0, 0.0);
    for &coef in a[..5].iter().rev() {
        let (hr2, hi2) = (hr1, hi1);
        hr1 = hr;
        hi1 = hi;
        hr = -hr2 + r * hr1 - i * hi1 + coef;
        hi = -hi2 + i * hr1 + r * hi1;
    }

    let r = sin_r * cosh_i;
    let i = cos_r * sinh_i;
    (r * hr - i * hi, r * hi + i * hr)
}
