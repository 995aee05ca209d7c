//! Projection context: the ellipsoid, datum, origin, scaling and axis
//! conventions resolved from a proj-string, shared by every projection.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::dms::dms_to_rad;
use crate::error::ProjError;
use crate::params::ParamList;
use crate::proj::coord::{IoUnits, Xy};
use crate::proj::datum::Datum;
use crate::proj::ellipsoid::Ellipsoid;
use crate::tables::{lookup_prime_meridian, lookup_unit};

/// Poles closer than this are left alone by the geocentric conversion.
const GEOCENTRIC_POLE_GUARD: f64 = 1e-9;

/// Axis orientation of planar coordinates, e.g. `enu` or `neu`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Axis([u8; 3]);

impl Default for Axis {
    fn default() -> Self {
        Axis(*b"enu")
    }
}

impl Axis {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Map internal (east, north) onto the configured output order.
    pub fn to_output(&self, xy: Xy) -> Xy {
        let pick = |c: u8| match c {
            b'e' => xy.x,
            b'w' => -xy.x,
            b'n' => xy.y,
            _ => -xy.y,
        };
        Xy::new(pick(self.0[0]), pick(self.0[1]))
    }

    /// Inverse of [`Axis::to_output`].
    pub fn from_output(&self, xy: Xy) -> Xy {
        let mut internal = Xy::default();
        for (c, v) in [(self.0[0], xy.x), (self.0[1], xy.y)] {
            match c {
                b'e' => internal.x = v,
                b'w' => internal.x = -v,
                b'n' => internal.y = v,
                _ => internal.y = -v,
            }
        }
        internal
    }
}

impl FromStr for Axis {
    type Err = ProjError;

    /// Three characters from `ewnsud`: two horizontal directions on
    /// different axes followed by `u` or `d`.
    ///
    /// Orders that cannot be mapped onto x/y (`nsu`, `uen`, `eeu`) are
    /// rejected here, when the context is built, instead of at mapping time.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ProjError::Axis(s.to_owned());
        let bytes: [u8; 3] = s.as_bytes().try_into().map_err(|_| err())?;
        let horizontal = |c: u8| match c {
            b'e' | b'w' => Some(0),
            b'n' | b's' => Some(1),
            _ => None,
        };
        match (horizontal(bytes[0]), horizontal(bytes[1]), bytes[2]) {
            (Some(a), Some(b), b'u' | b'd') if a != b => Ok(Axis(bytes)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            write!(f, "{}", c as char)?;
        }
        Ok(())
    }
}

/// Direction of a geographic/geocentric latitude conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatitudeConversion {
    GeographicToGeocentric,
    GeocentricToGeographic,
}

/// Convert between geographic and geocentric latitude. Near-polar latitudes
/// and spheres pass through unchanged.
pub fn geocentric_latitude(ellipsoid: &Ellipsoid, direction: LatitudeConversion, phi: f64) -> f64 {
    let limit = FRAC_PI_2 - GEOCENTRIC_POLE_GUARD;
    if phi > limit || phi < -limit || ellipsoid.es == 0.0 {
        return phi;
    }
    match direction {
        LatitudeConversion::GeographicToGeocentric => (ellipsoid.one_es * phi.tan()).atan(),
        LatitudeConversion::GeocentricToGeographic => (ellipsoid.rone_es * phi.tan()).atan(),
    }
}

/// Everything resolved from a proj-string apart from the projection's own
/// constants. Projection setup may still adjust the origin, scale and
/// ellipsoid; afterwards the context is read-only.
#[derive(Clone, Debug)]
pub struct Context {
    pub params: ParamList,
    pub proj_id: String,
    pub ellipsoid: Ellipsoid,
    pub datum: Datum,
    /// Central meridian (radians)
    pub lam0: f64,
    /// Latitude of origin (radians)
    pub phi0: f64,
    pub x0: f64,
    pub y0: f64,
    pub z0: f64,
    pub t0: f64,
    pub k0: f64,
    pub to_meter: f64,
    pub fr_meter: f64,
    pub vto_meter: f64,
    pub vfr_meter: f64,
    /// Prime meridian offset east of Greenwich (radians)
    pub from_greenwich: f64,
    pub axis: Axis,
    pub geoc: bool,
    pub over: bool,
    pub lon_wrap: Option<f64>,
    pub left: IoUnits,
    pub right: IoUnits,
}

impl Context {
    pub fn from_params(mut params: ParamList) -> Result<Self, ProjError> {
        params.validate()?;

        let mut datum = Datum::resolve(&mut params)?;
        let ellipsoid = Ellipsoid::from_params(&params)?;
        datum.reclassify_wgs84(&ellipsoid);

        let proj_id = params.get("proj").unwrap_or_default().to_owned();

        let lon_wrap = params.get_angle("lon_wrap")?;
        if let Some(center) = lon_wrap {
            if !(center.abs() < 10.0 * TAU) {
                return Err(ProjError::InvalidArg("lon_wrap".into()));
            }
        }

        let axis = match params.get("axis") {
            Some(s) => s.parse()?,
            None => Axis::default(),
        };

        let k0 = match params.get_f64("k_0")? {
            Some(k) => k,
            None => params.get_f64("k")?.unwrap_or(1.0),
        };
        if !(k0 > 0.0) {
            return Err(ProjError::KLessThanZero);
        }

        let to_meter = unit_factor(&params, "units", "to_meter")?.unwrap_or(1.0);
        let vto_meter = unit_factor(&params, "vunits", "vto_meter")?.unwrap_or(to_meter);

        let ctx = Self {
            geoc: ellipsoid.es != 0.0 && params.flag("geoc"),
            over: params.flag("over"),
            lam0: params.get_angle("lon_0")?.unwrap_or(0.0),
            phi0: params.get_angle("lat_0")?.unwrap_or(0.0),
            x0: params.get_f64("x_0")?.unwrap_or(0.0),
            y0: params.get_f64("y_0")?.unwrap_or(0.0),
            z0: params.get_f64("z_0")?.unwrap_or(0.0),
            t0: params.get_f64("t_0")?.unwrap_or(0.0),
            from_greenwich: prime_meridian(&params)?,
            k0,
            to_meter,
            fr_meter: 1.0 / to_meter,
            vto_meter,
            vfr_meter: 1.0 / vto_meter,
            axis,
            lon_wrap,
            left: IoUnits::Radians,
            right: IoUnits::Classic,
            proj_id,
            ellipsoid,
            datum,
            params,
        };

        debug!(
            proj = %ctx.proj_id,
            a = ctx.ellipsoid.a,
            es = ctx.ellipsoid.es,
            datum = ?ctx.datum.kind,
            "context resolved"
        );
        Ok(ctx)
    }
}

/// Named unit or explicit factor; named units take precedence.
fn unit_factor(params: &ParamList, units_key: &str, factor_key: &str) -> Result<Option<f64>, ProjError> {
    if let Some(name) = params.get(units_key) {
        let unit = lookup_unit(name).ok_or_else(|| ProjError::UnknownUnit(name.to_owned()))?;
        return Ok(Some(unit.factor));
    }
    params.get(factor_key).map(parse_ratio).transpose()
}

/// A conversion factor written as `n` or `a/b`.
pub fn parse_ratio(s: &str) -> Result<f64, ProjError> {
    let number = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| ProjError::InvalidArg(s.to_owned()))
    };
    let value = match s.split_once('/') {
        Some((num, den)) => number(num)? / number(den)?,
        None => number(s)?,
    };
    if !(value > 0.0 && value.is_finite()) {
        return Err(ProjError::UnitFactorLessThanZero);
    }
    Ok(value)
}

/// Named prime meridian, or a literal DMS offset.
fn prime_meridian(params: &ParamList) -> Result<f64, ProjError> {
    match params.get("pm") {
        None => Ok(0.0),
        Some(name) => {
            let definition = lookup_prime_meridian(name).map_or(name, |pm| pm.definition);
            dms_to_rad(definition)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::parse;
    use crate::proj::datum::DatumKind;
    use crate::tables::UNITS;
    use approx::assert_relative_eq;

    fn context(definition: &str) -> Result<Context, ProjError> {
        Context::from_params(ParamList::tokenize(definition).unwrap())
    }

    #[test]
    fn test_defaults() {
        let ctx = context("+proj=merc +ellps=GRS80").unwrap();
        assert_eq!(ctx.proj_id, "merc");
        assert_eq!(ctx.k0, 1.0);
        assert_eq!(ctx.to_meter, 1.0);
        assert_eq!(ctx.vto_meter, 1.0);
        assert_eq!(ctx.lam0, 0.0);
        assert!(ctx.axis.is_default());
        assert_eq!(ctx.left, IoUnits::Radians);
        assert_eq!(ctx.right, IoUnits::Classic);
        assert!(!ctx.over && !ctx.geoc);
        assert_eq!(ctx.lon_wrap, None);
    }

    #[test]
    fn test_validation_runs_first() {
        assert_eq!(
            context("+ellps=GRS80").unwrap_err().category(),
            crate::error::ErrorCategory::Syntax
        );
        assert!(matches!(
            context("+proj=merc +init=epsg:3857"),
            Err(ProjError::Unsupported(_))
        ));
    }

    #[test]
    fn test_origin_and_offsets() {
        let ctx = context("+proj=utm +lon_0=9 +lat_0=-10d30 +x_0=100 +y_0=-5 +ellps=GRS80").unwrap();
        assert_relative_eq!(ctx.lam0, 9.0_f64.to_radians());
        assert_relative_eq!(ctx.phi0, (-10.5_f64).to_radians(), epsilon = 1e-15);
        assert_eq!(ctx.x0, 100.0);
        assert_eq!(ctx.y0, -5.0);
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(context("+proj=merc +a=1 +k=2").unwrap().k0, 2.0);
        assert_eq!(context("+proj=merc +a=1 +k=2 +k_0=3").unwrap().k0, 3.0);
        assert_eq!(
            context("+proj=merc +a=1 +k=0").unwrap_err(),
            ProjError::KLessThanZero
        );
        assert_eq!(
            context("+proj=merc +a=1 +k_0=-1").unwrap_err(),
            ProjError::KLessThanZero
        );
    }

    #[test]
    fn test_units() {
        let ctx = context("+proj=merc +a=1 +units=us-ft").unwrap();
        assert_relative_eq!(ctx.to_meter, 0.304_800_609_601_219);
        assert_relative_eq!(ctx.fr_meter * ctx.to_meter, 1.0);
        assert_eq!(ctx.vto_meter, ctx.to_meter);

        let ctx = context("+proj=merc +a=1 +to_meter=1/10 +vunits=km").unwrap();
        assert_relative_eq!(ctx.to_meter, 0.1);
        assert_eq!(ctx.vto_meter, 1000.0);

        // units takes precedence over to_meter
        let ctx = context("+proj=merc +a=1 +to_meter=5 +units=km").unwrap();
        assert_eq!(ctx.to_meter, 1000.0);

        assert_eq!(
            context("+proj=merc +a=1 +units=furlong").unwrap_err(),
            ProjError::UnknownUnit("furlong".into())
        );
        assert_eq!(
            context("+proj=merc +a=1 +to_meter=0").unwrap_err(),
            ProjError::UnitFactorLessThanZero
        );
        assert_eq!(
            context("+proj=merc +a=1 +to_meter=1/0").unwrap_err(),
            ProjError::UnitFactorLessThanZero
        );
    }

    #[test]
    fn test_unit_table_factors_match_definitions() {
        for unit in UNITS {
            assert_relative_eq!(parse_ratio(unit.to_meter).unwrap(), unit.factor, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_prime_meridian() {
        let ctx = context("+proj=merc +a=1 +pm=paris").unwrap();
        let expected = 2.0 + 20.0 / 60.0 + 14.025 / 3600.0_f64;
        assert_relative_eq!(ctx.from_greenwich, expected.to_radians(), epsilon = 1e-15);

        let ctx = context("+proj=merc +a=1 +pm=-10.5").unwrap();
        assert_relative_eq!(ctx.from_greenwich, (-10.5_f64).to_radians(), epsilon = 1e-15);

        assert!(matches!(
            context("+proj=merc +a=1 +pm=atlantis"),
            Err(ProjError::InvalidDms(_))
        ));
    }

    #[test]
    fn test_axis() {
        let ctx = context("+proj=merc +a=1 +axis=neu").unwrap();
        assert_eq!(ctx.axis.to_string(), "neu");
        let out = ctx.axis.to_output(Xy::new(1.0, 2.0));
        assert_eq!(out, Xy::new(2.0, 1.0));
        assert_eq!(ctx.axis.from_output(out), Xy::new(1.0, 2.0));

        let wsu: Axis = "wsu".parse().unwrap();
        let out = wsu.to_output(Xy::new(1.0, 2.0));
        assert_eq!(out, Xy::new(-1.0, -2.0));
        assert_eq!(wsu.from_output(out), Xy::new(1.0, 2.0));

        for bad in ["en", "enuu", "eeu", "nsu", "enx", "uen"] {
            assert!(
                matches!(context(&format!("+proj=merc +a=1 +axis={bad}")), Err(ProjError::Axis(_))),
                "{bad} accepted"
            );
        }
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        assert!(matches!(
            context("+proj=merc +a=1 +x_0=inf"),
            Err(ProjError::InvalidArg(_))
        ));
        assert!(matches!(
            context("+proj=merc +a=1 +y_0=nan"),
            Err(ProjError::InvalidArg(_))
        ));
        assert!(matches!(
            context("+proj=merc +a=1 +lon_0=nan"),
            Err(ProjError::InvalidDms(_))
        ));
        assert!(matches!(
            context("+proj=merc +a=1 +k_0=inf"),
            Err(ProjError::InvalidArg(_))
        ));
    }

    #[test]
    fn test_lon_wrap_and_flags() {
        let ctx = context("+proj=merc +a=1 +lon_wrap=180 +over").unwrap();
        assert_relative_eq!(ctx.lon_wrap.unwrap(), std::f64::consts::PI);
        assert!(ctx.over);
        assert!(matches!(
            context("+proj=merc +a=1 +lon_wrap=4000"),
            Err(ProjError::InvalidArg(_))
        ));
        assert!(matches!(
            context("+proj=merc +a=1 +lon_wrap=nan"),
            Err(ProjError::InvalidDms(_))
        ));

        // geoc only applies to an ellipsoid
        assert!(!context("+proj=merc +a=1 +geoc").unwrap().geoc);
        assert!(context("+proj=merc +ellps=GRS80 +geoc").unwrap().geoc);
    }

    #[test]
    fn test_datum_reclassified() {
        let ctx = Context::from_params(parse("+proj=merc +datum=WGS84").unwrap()).unwrap();
        assert_eq!(ctx.datum.kind, DatumKind::Wgs84);
        assert_eq!(ctx.ellipsoid.a, 6_378_137.0);
    }

    #[test]
    fn test_geocentric_latitude() {
        let ell = Ellipsoid::from_name("WGS84").unwrap();
        let phi = 45.0_f64.to_radians();
        let geocentric = geocentric_latitude(&ell, LatitudeConversion::GeographicToGeocentric, phi);
        assert!(geocentric < phi);
        let back = geocentric_latitude(&ell, LatitudeConversion::GeocentricToGeographic, geocentric);
        assert_relative_eq!(back, phi, epsilon = 1e-14);

        let pole = FRAC_PI_2;
        assert_eq!(
            geocentric_latitude(&ell, LatitudeConversion::GeographicToGeocentric, pole),
            pole
        );
        let sphere = Ellipsoid::sphere(1.0);
        assert_eq!(
            geocentric_latitude(&sphere, LatitudeConversion::GeographicToGeocentric, phi),
            phi
        );
    }
}
