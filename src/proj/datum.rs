//! Datum resolution and shift classification.

use crate::error::ProjError;
use crate::params::{Param, ParamList};
use crate::proj::ellipsoid::Ellipsoid;
use crate::tables::lookup_datum;

/// Arc-seconds to radians.
const SEC_TO_RAD: f64 = 4.848_136_811_095_36e-6;

const WGS84_A: f64 = 6_378_137.0;
const WGS84_ES: f64 = 0.006_694_379_990_141_316_5;
const WGS84_ES_TOL: f64 = 5e-11;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DatumKind {
    /// No shift information.
    #[default]
    Unknown,
    /// Geocentric translation, metres.
    ThreeParam,
    /// Helmert transform: translations (m), rotations (rad), scale factor.
    SevenParam,
    /// Grid-based shift. Only the null grid is accepted.
    GridShift,
    /// Equivalent to WGS84, no shift needed.
    Wgs84,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Datum {
    pub id: Option<String>,
    pub definition: Option<String>,
    pub ellipse_id: Option<String>,
    pub kind: DatumKind,
    pub params: [f64; 7],
}

impl Datum {
    /// Resolve the datum described by `params`.
    ///
    /// A named `datum` appends its ellipsoid and definition to `params`, so any
    /// explicit keys already in the list take precedence.
    pub fn resolve(params: &mut ParamList) -> Result<Self, ProjError> {
        let mut datum = Datum::default();

        if let Some(name) = params.get("datum").map(str::to_owned) {
            let entry = lookup_datum(&name).ok_or(ProjError::NoSuchDatum(name))?;
            params.push(Param::new("ellps", Some(entry.ellipse_id)));
            params.extend_from(&ParamList::tokenize(entry.definition)?);
            datum.id = Some(entry.id.to_owned());
            datum.definition = Some(entry.definition.to_owned());
            datum.ellipse_id = Some(entry.ellipse_id.to_owned());
        }

        if let Some(grids) = params.get("nadgrids") {
            if !grids.split(',').all(is_null_grid) {
                return Err(ProjError::Unsupported(format!("nadgrids={grids}")));
            }
            datum.kind = DatumKind::GridShift;
        } else if params.contains("catalog") {
            return Err(ProjError::Unsupported("catalog".into()));
        } else if let Some(values) = params.get_floats("towgs84")? {
            match values.len() {
                3 => {
                    datum.kind = DatumKind::ThreeParam;
                    datum.params[..3].copy_from_slice(&values);
                }
                7 => {
                    datum.kind = DatumKind::SevenParam;
                    datum.params.copy_from_slice(&values);
                    for rotation in &mut datum.params[3..6] {
                        *rotation *= SEC_TO_RAD;
                    }
                    datum.params[6] = datum.params[6] / 1_000_000.0 + 1.0;
                }
                n => {
                    return Err(ProjError::BadProjString(format!(
                        "towgs84 needs 3 or 7 values, got {n}"
                    )))
                }
            }
        }

        Ok(datum)
    }

    /// Mark a zero translation on the WGS84 ellipsoid as WGS84-equivalent.
    pub fn reclassify_wgs84(&mut self, ellipsoid: &Ellipsoid) {
        if self.kind == DatumKind::ThreeParam
            && self.params[..3].iter().all(|&p| p == 0.0)
            && ellipsoid.a == WGS84_A
            && (ellipsoid.es - WGS84_ES).abs() < WGS84_ES_TOL
        {
            self.kind = DatumKind::Wgs84;
        }
    }
}

fn is_null_grid(grid: &str) -> bool {
    matches!(grid.trim_start_matches('@'), "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resolve(definition: &str) -> Result<(Datum, ParamList), ProjError> {
        let mut params = ParamList::tokenize(definition).unwrap();
        let datum = Datum::resolve(&mut params)?;
        Ok((datum, params))
    }

    #[test]
    fn test_named_datum_appends_definition() {
        let (datum, params) = resolve("proj=merc datum=OSGB36").unwrap();
        assert_eq!(datum.id.as_deref(), Some("OSGB36"));
        assert_eq!(datum.kind, DatumKind::SevenParam);
        assert_eq!(params.get("ellps"), Some("airy"));
        assert_relative_eq!(datum.params[0], 446.448);
        assert_relative_eq!(datum.params[3], 0.1502 * SEC_TO_RAD);
        assert_relative_eq!(datum.params[6], 1.0 - 20.4894e-6);
    }

    #[test]
    fn test_explicit_keys_win_over_datum() {
        let (datum, params) = resolve("proj=merc ellps=intl towgs84=1,2,3 datum=WGS84").unwrap();
        assert_eq!(params.get("ellps"), Some("intl"));
        assert_eq!(datum.kind, DatumKind::ThreeParam);
        assert_eq!(&datum.params[..3], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_unknown_datum() {
        assert_eq!(
            resolve("proj=merc datum=nowhere").unwrap_err(),
            ProjError::NoSuchDatum("nowhere".into())
        );
    }

    #[test]
    fn test_towgs84_counts() {
        assert!(matches!(
            resolve("towgs84=1,2").unwrap_err(),
            ProjError::BadProjString(_)
        ));
        assert!(matches!(
            resolve("towgs84=1,2,3,4").unwrap_err(),
            ProjError::BadProjString(_)
        ));
        assert_eq!(resolve("").unwrap().0.kind, DatumKind::Unknown);
    }

    #[test]
    fn test_grids() {
        assert_eq!(
            resolve("nadgrids=@null").unwrap().0.kind,
            DatumKind::GridShift
        );
        assert!(matches!(
            resolve("datum=NAD27").unwrap_err(),
            ProjError::Unsupported(_)
        ));
        assert!(matches!(
            resolve("nadgrids=@null,conus").unwrap_err(),
            ProjError::Unsupported(_)
        ));
        assert!(matches!(
            resolve("catalog=foo").unwrap_err(),
            ProjError::Unsupported(_)
        ));
    }

    #[test]
    fn test_wgs84_reclassification() {
        let (mut datum, params) = resolve("datum=WGS84").unwrap();
        assert_eq!(datum.kind, DatumKind::ThreeParam);
        let ell = Ellipsoid::from_params(&params).unwrap();
        datum.reclassify_wgs84(&ell);
        assert_eq!(datum.kind, DatumKind::Wgs84);

        // GRS80 lies within the es tolerance of WGS84.
        let (mut datum, params) = resolve("datum=NAD83").unwrap();
        let ell = Ellipsoid::from_params(&params).unwrap();
        datum.reclassify_wgs84(&ell);
        assert_eq!(datum.kind, DatumKind::Wgs84);

        let (mut datum, params) = resolve("ellps=intl towgs84=0,0,0").unwrap();
        let ell = Ellipsoid::from_params(&params).unwrap();
        datum.reclassify_wgs84(&ell);
        assert_eq!(datum.kind, DatumKind::ThreeParam);
    }
}
