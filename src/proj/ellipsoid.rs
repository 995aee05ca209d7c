//! Reference ellipsoid and its resolution from proj-string parameters.
//!
//! Resolution order:
//!   1. `R` gives a sphere and ends resolution.
//!   2. `ellps` seeds size and shape from the named table entry.
//!   3. `a` overrides the size.
//!   4. The first of `rf`, `f`, `es`, `e`, `b` present overrides the shape;
//!      with neither a seed nor an explicit shape the body is a sphere.
//!   5. The remaining parameters are derived from `a` and `es`.
//!   6. `R_A`, `R_V`, `R_a`, `R_g`, `R_h`, `R_lat_a` or `R_lat_g` replace the
//!      ellipsoid with a sphere of the corresponding mean radius.

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::params::{Param, ParamList};
use crate::tables::lookup_ellipsoid;

const SIXTH: f64 = 1.0 / 6.0;
const RA4: f64 = 17.0 / 360.0;
const RA6: f64 = 67.0 / 3024.0;
const RV4: f64 = 5.0 / 72.0;
const RV6: f64 = 55.0 / 1296.0;

/// Fully derived ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// 1/a
    pub ra: f64,
    /// 1/b
    pub rb: f64,
    /// Angular eccentricity: asin(e)
    pub alpha: f64,
    /// First eccentricity
    pub e: f64,
    /// First eccentricity squared
    pub es: f64,
    /// Second eccentricity: tan(alpha)
    pub e2: f64,
    pub e2s: f64,
    /// Third eccentricity
    pub e3: f64,
    pub e3s: f64,
    /// 1 - es
    pub one_es: f64,
    /// 1 / (1 - es)
    pub rone_es: f64,
    /// Flattening
    pub f: f64,
    /// Second flattening
    pub f2: f64,
    /// Third flattening
    pub n: f64,
    pub rf: f64,
    pub rf2: f64,
    pub rn: f64,
}

/// Shape as read from one parameter source, before derivation.
#[derive(Clone, Copy, Debug, Default)]
struct Shape {
    es: f64,
    f: Option<f64>,
    e: Option<f64>,
    b: Option<f64>,
}

impl Ellipsoid {
    /// Resolve an ellipsoid from a parameter list.
    pub fn from_params(params: &ParamList) -> Result<Self, ProjError> {
        if let Some(r) = params.get_f64("R")? {
            if !(r > 0.0) {
                return Err(ProjError::MajorAxisNotGiven);
            }
            return Ok(Self::sphere(r));
        }

        let mut size = None;
        let mut shape = None;

        if let Some(name) = params.get("ellps") {
            let entry =
                lookup_ellipsoid(name).ok_or_else(|| ProjError::UnknownEllipsoid(name.to_owned()))?;
            let mut seed = ParamList::tokenize(entry.major)?;
            seed.extend_from(&ParamList::tokenize(entry.ell)?);
            let seed_a = seed.get_f64("a")?.ok_or(ProjError::MajorAxisNotGiven)?;
            size = Some(seed_a);
            shape = read_shape(&seed, seed_a)?;
        }

        if let Some(a) = params.get_f64("a")? {
            size = Some(a);
        }
        let a = size.ok_or(ProjError::MajorAxisNotGiven)?;
        if !(a > 0.0) {
            return Err(ProjError::MajorAxisNotGiven);
        }

        if let Some(explicit) = read_shape(params, a)? {
            shape = Some(explicit);
        }
        let shape = shape.unwrap_or_default();
        if shape.es < 0.0 {
            return Err(ProjError::EsLessThanZero);
        }
        if shape.es > 1.0 {
            return Err(ProjError::InvalidArg(format!("es={}", shape.es)));
        }

        let ellipsoid = Self::compute(a, shape);
        if ellipsoid.one_es == 0.0 {
            return Err(ProjError::EccentricityIsOne);
        }
        ellipsoid.spherify(params)
    }

    /// Look up a named ellipsoid from the reference table.
    pub fn from_name(name: &str) -> Result<Self, ProjError> {
        let mut params = ParamList::new();
        params.push(Param::new("ellps", Some(name)));
        Self::from_params(&params)
    }

    /// Sphere of radius `r`.
    pub fn sphere(r: f64) -> Self {
        Self::compute(r, Shape::default())
    }

    /// Same semi-major axis, zero eccentricity.
    pub fn to_sphere(&self) -> Self {
        Self::sphere(self.a)
    }

    pub fn is_sphere(&self) -> bool {
        self.es == 0.0
    }

    fn compute(a: f64, shape: Shape) -> Self {
        let es = shape.es;
        let e = shape.e.unwrap_or_else(|| es.sqrt());
        let alpha = e.asin();
        let (sin_alpha, cos_alpha) = alpha.sin_cos();

        let e2 = alpha.tan();
        let e3 = if alpha != 0.0 {
            sin_alpha / (2.0 - sin_alpha * sin_alpha).sqrt()
        } else {
            0.0
        };

        let f = shape.f.unwrap_or(1.0 - cos_alpha);
        let f2 = if cos_alpha != 0.0 { 1.0 / cos_alpha - 1.0 } else { 0.0 };
        let n = (alpha / 2.0).tan().powi(2);
        let b = shape.b.unwrap_or((1.0 - f) * a);
        let one_es = 1.0 - es;

        Self {
            a,
            b,
            ra: 1.0 / a,
            rb: 1.0 / b,
            alpha,
            e,
            es,
            e2,
            e2s: e2 * e2,
            e3,
            e3s: e3 * e3,
            one_es,
            rone_es: 1.0 / one_es,
            f,
            f2,
            n,
            rf: reciprocal(f),
            rf2: reciprocal(f2),
            rn: reciprocal(n),
        }
    }

    /// Replace the ellipsoid by a mean-radius sphere if requested.
    fn spherify(self, params: &ParamList) -> Result<Self, ProjError> {
        let (a, b, es) = (self.a, self.b, self.es);

        let radius = if params.contains("R_A") {
            a * (1.0 - es * (SIXTH + es * (RA4 + es * RA6)))
        } else if params.contains("R_V") {
            a * (1.0 - es * (SIXTH + es * (RV4 + es * RV6)))
        } else if params.contains("R_a") {
            0.5 * (a + b)
        } else if params.contains("R_g") {
            (a * b).sqrt()
        } else if params.contains("R_h") {
            if a + b == 0.0 {
                return Err(ProjError::ToleranceCondition);
            }
            2.0 * a * b / (a + b)
        } else if let Some(lat) = params.get_angle("R_lat_a")? {
            let t = latitude_term(lat, es)?;
            a * 0.5 * (1.0 - es + t) / (t * t.sqrt())
        } else if let Some(lat) = params.get_angle("R_lat_g")? {
            a * (1.0 - es).sqrt() / latitude_term(lat, es)?
        } else {
            return Ok(self);
        };

        Ok(Self::sphere(radius))
    }
}

/// 1 − es·sin²φ for the latitude-dependent spheres.
fn latitude_term(lat: f64, es: f64) -> Result<f64, ProjError> {
    if lat.abs() > FRAC_PI_2 {
        return Err(ProjError::RefRadLargerThan90);
    }
    let s = lat.sin();
    let t = 1.0 - es * s * s;
    if t == 0.0 {
        return Err(ProjError::EccentricityIsOne);
    }
    Ok(t)
}

fn reciprocal(v: f64) -> f64 {
    if v != 0.0 {
        1.0 / v
    } else {
        f64::INFINITY
    }
}

/// Read the first shape key present, in priority order.
fn read_shape(params: &ParamList, a: f64) -> Result<Option<Shape>, ProjError> {
    if let Some(rf) = params.get_f64("rf")? {
        if rf == 0.0 {
            return Err(ProjError::ReverseFlatteningIsZero);
        }
        return Ok(Some(from_flattening(1.0 / rf)));
    }
    if let Some(f) = params.get_f64("f")? {
        if f == 0.0 {
            return Err(ProjError::InvalidArg("f=0".into()));
        }
        return Ok(Some(from_flattening(f)));
    }
    if let Some(es) = params.get_f64("es")? {
        if es == 1.0 {
            return Err(ProjError::EccentricityIsOne);
        }
        return Ok(Some(Shape {
            es,
            ..Shape::default()
        }));
    }
    if let Some(e) = params.get_f64("e")? {
        if e == 1.0 {
            return Err(ProjError::EccentricityIsOne);
        }
        if e == 0.0 {
            return Err(ProjError::InvalidArg("e=0".into()));
        }
        return Ok(Some(Shape {
            es: e * e,
            e: Some(e),
            ..Shape::default()
        }));
    }
    if let Some(b) = params.get_f64("b")? {
        if !(b > 0.0 && b.is_finite()) {
            return Err(ProjError::InvalidArg(format!("b={b}")));
        }
        if b == a {
            return Ok(Some(Shape {
                b: Some(b),
                ..Shape::default()
            }));
        }
        let f = (a - b) / a;
        return Ok(Some(Shape {
            b: Some(b),
            ..from_flattening(f)
        }));
    }
    Ok(None)
}

fn from_flattening(f: f64) -> Shape {
    Shape {
        es: 2.0 * f - f * f,
        f: Some(f),
        ..Shape::default()
    }
}
