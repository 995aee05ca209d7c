//! Projection engine: context resolution, the operation registry, the
//! shared coordinate pipeline and the concrete projections.

pub mod airy;
pub mod albers_equal_area;
pub mod august;
pub mod common;
pub mod context;
pub mod coord;
pub mod crs;
pub mod datum;
pub mod ellipsoid;
pub mod equirectangular;
pub mod lambert_conformal;
pub mod mercator;
pub mod pipeline;
pub mod registry;
pub mod transverse_mercator;

pub use context::Context;
pub use coord::{CoordKind, IoUnits, Lp, Xy};
pub use ellipsoid::Ellipsoid;
pub use pipeline::Operation;
pub use registry::{OperationInfo, Registry};

use crate::error::ProjError;

/// A map projection working on normalized coordinates.
///
/// Input to `forward` is already relative to the central meridian and in
/// radians; output is in units of the semi-major axis. Offsets, scaling and
/// axis order are applied by [`Operation`].
pub trait Projection: Send + Sync {
    fn forward(&self, lp: Lp) -> Result<Xy, ProjError>;

    /// Projections without an inverse keep the default.
    fn inverse(&self, _xy: Xy) -> Result<Lp, ProjError> {
        Err(ProjError::NoInverse)
    }
}
