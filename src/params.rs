//! Proj-string tokenizer and ordered parameter list.
//!
//! A proj-string such as `+proj=utm +zone=32 +ellps=GRS80` becomes an ordered
//! list of key/value pairs. Order matters and duplicates are kept: every
//! lookup returns the *first* occurrence of a key, so pairs appended later
//! (datum definitions, ellipsoid seeds) never override what the user wrote.

use std::fmt;
use std::str::FromStr;

use crate::dms::dms_to_rad;
use crate::error::ProjError;

/// One `key` or `key=value` token.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Param {
    pub key: String,
    pub value: Option<String>,
}

impl Param {
    pub fn new(key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            key: key.into(),
            value: value.map(str::to_owned),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "+{}={}", self.key, v),
            None => write!(f, "+{}", self.key),
        }
    }
}

/// Ordered list of parameters, duplicates allowed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParamList {
    pairs: Vec<Param>,
}

/// Tokenize and validate a proj-string.
///
/// Exactly one non-empty `proj` is required; `init` and `pipeline` are
/// recognized but rejected.
pub fn parse(definition: &str) -> Result<ParamList, ProjError> {
    let list = ParamList::tokenize(definition)?;
    list.validate()?;
    Ok(list)
}

impl ParamList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `source` into pairs without any semantic validation.
    pub fn tokenize(source: &str) -> Result<Self, ProjError> {
        let mut list = Self::new();
        for word in source.split_whitespace() {
            let word = word.strip_prefix('+').unwrap_or(word);
            let mut parts = word.split('=');
            let key = parts.next().unwrap_or_default();
            if key.is_empty() {
                return Err(ProjError::BadProjString(format!("empty key in {word:?}")));
            }
            let value = parts.next();
            if parts.next().is_some() {
                return Err(ProjError::BadProjString(format!(
                    "more than one '=' in {word:?}"
                )));
            }
            list.push(Param::new(key, value));
        }
        Ok(list)
    }

    /// Check the list is a usable projection definition.
    pub fn validate(&self) -> Result<(), ProjError> {
        match self.count("init") {
            0 => {}
            1 => return Err(ProjError::Unsupported("init".into())),
            _ => return Err(ProjError::BadProjString("more than one init".into())),
        }
        if self.contains("pipeline") {
            return Err(ProjError::Unsupported("pipeline".into()));
        }
        if self.count("proj") != 1 {
            return Err(ProjError::BadProjString(
                "exactly one proj key is required".into(),
            ));
        }
        match self.get("proj") {
            Some(name) if !name.is_empty() => Ok(()),
            _ => Err(ProjError::ProjValueMissing),
        }
    }

    pub fn push(&mut self, param: Param) {
        self.pairs.push(param);
    }

    /// Append every pair of `other`, preserving its order.
    pub fn extend_from(&mut self, other: &ParamList) {
        self.pairs.extend(other.pairs.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.pairs.iter()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|p| p.key == key)
    }

    pub fn count(&self, key: &str) -> usize {
        self.pairs.iter().filter(|p| p.key == key).count()
    }

    fn first(&self, key: &str) -> Option<&Param> {
        self.pairs.iter().find(|p| p.key == key)
    }

    /// Value of the first occurrence of `key`; a bare key yields `""`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.first(key)
            .map(|p| p.value.as_deref().unwrap_or_default())
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ProjError> {
        self.get(key).map(|v| parse_f64(key, v)).transpose()
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, ProjError> {
        self.get(key)
            .map(|v| {
                v.trim()
                    .parse::<i64>()
                    .map_err(|_| ProjError::InvalidArg(format!("{key}={v}")))
            })
            .transpose()
    }

    /// Comma-separated floats, as used by `towgs84`.
    pub fn get_floats(&self, key: &str) -> Result<Option<Vec<f64>>, ProjError> {
        self.get(key)
            .map(|v| v.split(',').map(|n| parse_f64(key, n)).collect())
            .transpose()
    }

    /// Angle given in degrees or DMS notation, returned in radians.
    pub fn get_angle(&self, key: &str) -> Result<Option<f64>, ProjError> {
        self.get(key).map(dms_to_rad).transpose()
    }

    /// Boolean flag: a bare key is true, as is any value starting with `t`/`T`.
    pub fn flag(&self, key: &str) -> bool {
        match self.first(key) {
            None => false,
            Some(Param { value: None, .. }) => true,
            Some(Param {
                value: Some(v), ..
            }) => !v.starts_with(['f', 'F']),
        }
    }
}

/// Finite decimal; `nan` and `inf` are rejected along with malformed text.
fn parse_f64(key: &str, value: &str) -> Result<f64, ProjError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ProjError::InvalidArg(format!("{key}={value}")))
}

impl FromStr for ParamList {
    type Err = ProjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for ParamList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}
