//! Coordinate records passed through the projection pipeline.

/// Angular coordinate: longitude λ and latitude φ, both in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lp {
    pub lam: f64,
    pub phi: f64,
}

impl Lp {
    pub const fn new(lam: f64, phi: f64) -> Self {
        Self { lam, phi }
    }

    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self::new(lon.to_radians(), lat.to_radians())
    }

    /// (longitude, latitude) in degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lam.to_degrees(), self.phi.to_degrees())
    }

    pub fn is_finite(self) -> bool {
        self.lam.is_finite() && self.phi.is_finite()
    }
}

/// Planar coordinate: easting and northing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl Xy {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Which kind of coordinate an operation consumes or produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CoordKind {
    Angular,
    Planar,
}

/// Unit convention on one side of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IoUnits {
    /// Angular input in radians.
    Radians,
    /// Planar output on the unit ellipsoid, scaled by the semi-major axis
    /// before false origin and unit conversion are applied.
    Classic,
    /// Planar output already in metres.
    Projected,
}
