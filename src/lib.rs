//! Cartographic projections driven by PROJ-style parameter strings.
//!
//! ```no_run
//! use projkit::{Lp, Operation};
//!
//! let utm = Operation::new("+proj=utm +zone=32 +ellps=GRS80")?;
//! let xy = utm.forward(Lp::from_degrees(12.0, 55.0))?;
//! let lp = utm.inverse(xy)?;
//! # Ok::<(), projkit::ProjError>(())
//! ```

pub mod dms;
pub mod error;
pub mod params;
pub mod proj;
pub mod tables;

pub use error::{ErrorCategory, ProjError};
pub use params::{parse, Param, ParamList};
pub use proj::crs::{convert, inverse, EpsgCode, Projector};
pub use proj::{Lp, Operation, Xy};
