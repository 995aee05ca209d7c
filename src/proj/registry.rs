//! Registry of projection constructors keyed by `proj=` identifier.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::ProjError;
use crate::proj::context::Context;
use crate::proj::coord::CoordKind;
use crate::proj::{
    airy, albers_equal_area, august, equirectangular, lambert_conformal, mercator,
    transverse_mercator, Projection,
};

/// Builds a projection from a resolved context. The constructor may adjust
/// the context (origin, scale, ellipsoid) before it is frozen.
pub type Constructor = fn(&mut Context) -> Result<Box<dyn Projection>, ProjError>;

/// Static description of one projection.
#[derive(Debug)]
pub struct OperationInfo {
    pub id: &'static str,
    pub description: &'static str,
    /// Projection-specific parameters, in proj-string notation.
    pub params: &'static str,
    pub input: CoordKind,
    pub output: CoordKind,
    pub inverse: bool,
    pub constructor: Constructor,
}

static BUILTINS: [&OperationInfo; 9] = [
    &mercator::MERC,
    &albers_equal_area::AEA,
    &albers_equal_area::LEAC,
    &transverse_mercator::ETMERC,
    &transverse_mercator::UTM,
    &lambert_conformal::LCC,
    &equirectangular::EQC,
    &airy::AIRY,
    &august::AUGUST,
];

#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<&'static str, &'static OperationInfo>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every projection shipped with the crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for info in BUILTINS {
            registry.register(info);
        }
        registry
    }

    /// Add a projection.
    ///
    /// # Panics
    ///
    /// Panics if `info.id` is already registered. Registration happens while
    /// the registry is assembled, so a duplicate is a programming error.
    pub fn register(&mut self, info: &'static OperationInfo) {
        let previous = self.entries.insert(info.id, info);
        assert!(previous.is_none(), "projection {:?} registered twice", info.id);
    }

    pub fn get(&self, id: &str) -> Option<&'static OperationInfo> {
        self.entries.get(id).copied()
    }

    pub fn lookup(&self, id: &str) -> Result<&'static OperationInfo, ProjError> {
        self.get(id)
            .ok_or_else(|| ProjError::UnknownProjection(id.to_owned()))
    }

    /// Registered identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide registry of the built-in projections, populated on first use.
pub fn global() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = Registry::with_builtins();
        debug!(operations = registry.len(), "projection registry populated");
        registry
    })
}
