use thiserror::Error;

/// Broad classification of a [`ProjError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed proj-string syntax.
    Syntax,
    /// A required parameter (`proj`, major axis) is absent.
    MissingParameter,
    /// A parameter is present but semantically invalid.
    InvalidParameter,
    /// A named ellipsoid, datum, unit, projection or EPSG code was not found.
    UnknownReference,
    /// Iteration did not converge, or the input is outside the projection domain.
    Numeric,
    /// The feature is recognized but not implemented.
    Unsupported,
    /// Misuse of the convenience API.
    Usage,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("bad proj string: {0}")]
    BadProjString(String),

    #[error("proj value missing in string")]
    ProjValueMissing,

    #[error("major axis not given")]
    MajorAxisNotGiven,

    #[error("eccentricity is one")]
    EccentricityIsOne,

    #[error("squared eccentricity is less than zero")]
    EsLessThanZero,

    #[error("reverse flattening is zero")]
    ReverseFlatteningIsZero,

    #[error("invalid argument: {0}")]
    InvalidArg(String),

    #[error("invalid DMS value: {0}")]
    InvalidDms(String),

    #[error("reference latitude larger than 90 degrees")]
    RefRadLargerThan90,

    #[error("latitude or longitude exceeded limits")]
    LatOrLonExceededLimit,

    #[error("latitude of true scale larger than 90 degrees")]
    LatTsLargerThan90,

    #[error("invalid axis: {0}")]
    Axis(String),

    #[error("k must be greater than zero")]
    KLessThanZero,

    #[error("unit conversion factor must be positive and finite")]
    UnitFactorLessThanZero,

    #[error("conic lat_1 = -lat_2")]
    ConicLatEqual,

    #[error("standard parallels give a degenerate cone")]
    ConeDegenerate,

    #[error("projection requires an ellipsoid, got a sphere")]
    EllipsoidUseRequired,

    #[error("invalid UTM zone")]
    InvalidUtmZone,

    #[error("unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    #[error("no such datum: {0}")]
    NoSuchDatum(String),

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("unknown projection: {0}")]
    UnknownProjection(String),

    #[error("tolerance condition error")]
    ToleranceCondition,

    #[error("latitude iteration did not converge")]
    NonConvergent,

    #[error("invalid x or y")]
    InvalidXOrY,

    #[error("projection has no inverse")]
    NoInverse,

    #[error("not yet supported: {0}")]
    Unsupported(String),

    #[error("epsg code is not a supported projection")]
    UnsupportedEpsg,

    #[error("input array of {0} values must be an even number")]
    OddCoordinateCount(&'static str),
}

impl ProjError {
    pub fn category(&self) -> ErrorCategory {
        use ProjError::*;
        match self {
            BadProjString(_) | InvalidDms(_) => ErrorCategory::Syntax,
            ProjValueMissing | MajorAxisNotGiven => ErrorCategory::MissingParameter,
            EccentricityIsOne
            | EsLessThanZero
            | ReverseFlatteningIsZero
            | InvalidArg(_)
            | RefRadLargerThan90
            | LatTsLargerThan90
            | Axis(_)
            | KLessThanZero
            | UnitFactorLessThanZero
            | ConicLatEqual
            | EllipsoidUseRequired
            | InvalidUtmZone => ErrorCategory::InvalidParameter,
            UnknownEllipsoid(_) | NoSuchDatum(_) | UnknownUnit(_) | UnknownProjection(_) => {
                ErrorCategory::UnknownReference
            }
            LatOrLonExceededLimit
            | ConeDegenerate
            | ToleranceCondition
            | NonConvergent
            | InvalidXOrY => ErrorCategory::Numeric,
            NoInverse | Unsupported(_) => ErrorCategory::Unsupported,
            UnsupportedEpsg | OddCoordinateCount(_) => ErrorCategory::Usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_reference_wording() {
        assert_eq!(
            ProjError::ToleranceCondition.to_string(),
            "tolerance condition error"
        );
        assert_eq!(
            ProjError::OddCoordinateCount("lon/lat").to_string(),
            "input array of lon/lat values must be an even number"
        );
        assert_eq!(
            ProjError::UnsupportedEpsg.to_string(),
            "epsg code is not a supported projection"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            ProjError::BadProjString("x".into()).category(),
            ErrorCategory::Syntax
        );
        assert_eq!(
            ProjError::MajorAxisNotGiven.category(),
            ErrorCategory::MissingParameter
        );
        assert_eq!(
            ProjError::KLessThanZero.category(),
            ErrorCategory::InvalidParameter
        );
        assert_eq!(
            ProjError::NoSuchDatum("foo".into()).category(),
            ErrorCategory::UnknownReference
        );
        assert_eq!(ProjError::NonConvergent.category(), ErrorCategory::Numeric);
        assert_eq!(
            ProjError::Unsupported("pipeline".into()).category(),
            ErrorCategory::Unsupported
        );
    }
}
