//! EPSG-code convenience layer over [`Operation`].
//!
//! A handful of EPSG codes map to fixed proj-strings. Coordinates travel as
//! interleaved `[x0, y0, x1, y1, ...]` slices: degrees on the geographic
//! side, projected units on the other.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use tracing::debug;

use crate::error::ProjError;
use crate::proj::coord::{Lp, Xy};
use crate::proj::pipeline::Operation;

/// EPSG codes with a built-in definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EpsgCode {
    /// Geographic WGS 84, longitude/latitude in degrees.
    Wgs84 = 4326,
    WorldMercator = 3395,
    WebMercator = 3857,
    /// World Equidistant Cylindrical.
    PlateCarree = 4087,
}

impl EpsgCode {
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Canonical proj-string, `None` for the geographic system.
    pub fn definition(self) -> Option<&'static str> {
        match self {
            EpsgCode::Wgs84 => None,
            EpsgCode::WorldMercator => {
                Some("+proj=merc +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84")
            }
            EpsgCode::WebMercator => Some(
                "+proj=merc +a=6378137 +b=6378137 +lat_ts=0.0 +lon_0=0.0 +x_0=0.0 +y_0=0 \
                 +k=1.0 +units=m +nadgrids=@null +wktext +no_defs",
            ),
            EpsgCode::PlateCarree => Some(
                "+proj=eqc +lat_ts=0 +lat_0=0 +lon_0=0 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs",
            ),
        }
    }

    pub fn is_geographic(self) -> bool {
        self.definition().is_none()
    }
}

impl TryFrom<u32> for EpsgCode {
    type Error = ProjError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            4326 => Ok(EpsgCode::Wgs84),
            3395 => Ok(EpsgCode::WorldMercator),
            3857 => Ok(EpsgCode::WebMercator),
            4087 => Ok(EpsgCode::PlateCarree),
            _ => Err(ProjError::UnsupportedEpsg),
        }
    }
}

impl FromStr for EpsgCode {
    type Err = ProjError;

    /// Accepts `EPSG:3857` (any case) or a bare `3857`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = match s.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => return Err(ProjError::UnsupportedEpsg),
            None => s,
        };
        let code: u32 = digits.parse().map_err(|_| ProjError::UnsupportedEpsg)?;
        Self::try_from(code)
    }
}

impl fmt::Display for EpsgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.code())
    }
}

/// One side of a [`Projector`].
enum Endpoint {
    Geographic,
    Projected(Operation),
}

impl Endpoint {
    fn new(code: EpsgCode) -> Result<Self, ProjError> {
        match code.definition() {
            None => Ok(Endpoint::Geographic),
            Some(definition) => Ok(Endpoint::Projected(Operation::new(definition)?)),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Endpoint::Geographic => "lon/lat",
            Endpoint::Projected(_) => "x/y",
        }
    }

    /// Native pair to geographic radians.
    fn unproject(&self, a: f64, b: f64) -> Result<Lp, ProjError> {
        match self {
            Endpoint::Geographic => Ok(Lp::from_degrees(a, b)),
            Endpoint::Projected(op) => op.inverse(Xy::new(a, b)),
        }
    }

    /// Geographic radians to a native pair.
    fn project(&self, lp: Lp) -> Result<(f64, f64), ProjError> {
        match self {
            Endpoint::Geographic => Ok(lp.to_degrees()),
            Endpoint::Projected(op) => op.forward(lp).map(|xy| (xy.x, xy.y)),
        }
    }
}

/// Converts interleaved coordinates between two EPSG systems.
pub struct Projector {
    src: EpsgCode,
    dst: EpsgCode,
    from: Endpoint,
    to: Endpoint,
}

impl Projector {
    /// Build a projector from `src` to `dst`. The two codes must differ.
    pub fn new(src: EpsgCode, dst: EpsgCode) -> Result<Self, ProjError> {
        if src == dst {
            return Err(ProjError::UnsupportedEpsg);
        }
        let projector = Self {
            src,
            dst,
            from: Endpoint::new(src)?,
            to: Endpoint::new(dst)?,
        };
        debug!(src = %src, dst = %dst, "projector ready");
        Ok(projector)
    }

    pub fn source(&self) -> EpsgCode {
        self.src
    }

    pub fn destination(&self) -> EpsgCode {
        self.dst
    }

    /// Source to destination.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>, ProjError> {
        convert_pairs(&self.from, &self.to, input)
    }

    /// Destination back to source.
    pub fn inverse(&self, input: &[f64]) -> Result<Vec<f64>, ProjError> {
        convert_pairs(&self.to, &self.from, input)
    }

    /// [`Projector::forward`] spread across the rayon pool.
    pub fn forward_par(&self, input: &[f64]) -> Result<Vec<f64>, ProjError> {
        convert_pairs_par(&self.from, &self.to, input)
    }

    /// [`Projector::inverse`] spread across the rayon pool.
    pub fn inverse_par(&self, input: &[f64]) -> Result<Vec<f64>, ProjError> {
        convert_pairs_par(&self.to, &self.from, input)
    }
}

fn convert_pair(from: &Endpoint, to: &Endpoint, pair: &[f64]) -> Result<[f64; 2], ProjError> {
    let lp = from.unproject(pair[0], pair[1])?;
    let (a, b) = to.project(lp)?;
    Ok([a, b])
}

fn check_even(from: &Endpoint, input: &[f64]) -> Result<(), ProjError> {
    if input.len() % 2 != 0 {
        return Err(ProjError::OddCoordinateCount(from.label()));
    }
    Ok(())
}

fn convert_pairs(from: &Endpoint, to: &Endpoint, input: &[f64]) -> Result<Vec<f64>, ProjError> {
    check_even(from, input)?;
    let mut output = Vec::with_capacity(input.len());
    for pair in input.chunks_exact(2) {
        output.extend(convert_pair(from, to, pair)?);
    }
    Ok(output)
}

fn convert_pairs_par(from: &Endpoint, to: &Endpoint, input: &[f64]) -> Result<Vec<f64>, ProjError> {
    check_even(from, input)?;
    let pairs: Vec<[f64; 2]> = input
        .par_chunks(2)
        .map(|pair| convert_pair(from, to, pair))
        .collect::<Result<_, _>>()?;
    Ok(pairs.into_iter().flatten().collect())
}

/// Project WGS 84 degrees into `dest`.
pub fn convert(dest: EpsgCode, input: &[f64]) -> Result<Vec<f64>, ProjError> {
    Projector::new(EpsgCode::Wgs84, dest)?.forward(input)
}

/// Unproject coordinates in `src` back to WGS 84 degrees.
pub fn inverse(src: EpsgCode, input: &[f64]) -> Result<Vec<f64>, ProjError> {
    Projector::new(EpsgCode::Wgs84, src)?.inverse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LONLAT: [f64; 8] = [
        -0.127758, 51.507351, // London
        2.352222, 48.856614, // Paris
        12.496366, 41.902783, // Rome
        -77.625583, 38.833846,
    ];

    const WORLD_MERCATOR: [f64; 8] = [
        -14221.96, 6678068.96,
        261848.16, 6218371.80,
        1391089.10, 5117883.04,
        -8641240.37, 4671101.60,
    ];

    const WEB_MERCATOR: [f64; 8] = [
        -14221.96, 6711533.71,
        261848.16, 6250566.72,
        1391089.10, 5146427.91,
        -8641240.37, 4697899.31,
    ];

    const PLATE_CARREE: [f64; 8] = [
        -14221.96, 5733772.09,
        261848.16, 5438693.39,
        1391089.10, 4664596.47,
        -8641240.37, 4322963.96,
    ];

    fn assert_all_close(actual: &[f64], expected: &[f64], epsilon: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(*a, *e, epsilon = epsilon);
        }
    }

    #[test]
    fn test_reference_tables() {
        for (code, expected) in [
            (EpsgCode::WorldMercator, WORLD_MERCATOR),
            (EpsgCode::WebMercator, WEB_MERCATOR),
            (EpsgCode::PlateCarree, PLATE_CARREE),
        ] {
            let xy = convert(code, &LONLAT).unwrap();
            assert_all_close(&xy, &expected, 1e-2);

            let lonlat = inverse(code, &xy).unwrap();
            assert_all_close(&lonlat, &LONLAT, 1e-6);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let projector = Projector::new(EpsgCode::Wgs84, EpsgCode::WebMercator).unwrap();
        let seq = projector.forward(&LONLAT).unwrap();
        let par = projector.forward_par(&LONLAT).unwrap();
        assert_eq!(seq, par);
        let back = projector.inverse_par(&par).unwrap();
        assert_all_close(&back, &LONLAT, 1e-6);
    }

    #[test]
    fn test_projected_to_projected() {
        let projector = Projector::new(EpsgCode::WebMercator, EpsgCode::PlateCarree).unwrap();
        let xy = projector.forward(&WEB_MERCATOR).unwrap();
        // inputs are rounded to the centimetre
        assert_all_close(&xy, &PLATE_CARREE, 2e-2);
    }

    #[test]
    fn test_pole_is_tolerance_error() {
        let err = convert(EpsgCode::WebMercator, &[-180.0, 90.0]).unwrap_err();
        assert_eq!(err.to_string(), "tolerance condition error");
    }

    #[test]
    fn test_odd_length_rejected() {
        let err = convert(EpsgCode::WorldMercator, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "input array of lon/lat values must be an even number"
        );
        let err = inverse(EpsgCode::WorldMercator, &[1.0]).unwrap_err();
        assert_eq!(err, ProjError::OddCoordinateCount("x/y"));

        let projector = Projector::new(EpsgCode::Wgs84, EpsgCode::PlateCarree).unwrap();
        assert!(projector.forward_par(&[0.0]).is_err());
        assert!(projector.forward(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_epsg_parsing() {
        assert_eq!("EPSG:3857".parse::<EpsgCode>().unwrap(), EpsgCode::WebMercator);
        assert_eq!("epsg:4087".parse::<EpsgCode>().unwrap(), EpsgCode::PlateCarree);
        assert_eq!("4326".parse::<EpsgCode>().unwrap(), EpsgCode::Wgs84);
        assert_eq!(EpsgCode::WorldMercator.to_string(), "EPSG:3395");
        assert_eq!("EPSG:32633".parse::<EpsgCode>(), Err(ProjError::UnsupportedEpsg));
        assert_eq!("ESRI:3857".parse::<EpsgCode>(), Err(ProjError::UnsupportedEpsg));
        assert_eq!(EpsgCode::try_from(9999), Err(ProjError::UnsupportedEpsg));
        assert!(EpsgCode::Wgs84.is_geographic());
    }

    #[test]
    fn test_same_code_pair_rejected() {
        assert!(matches!(
            Projector::new(EpsgCode::WebMercator, EpsgCode::WebMercator),
            Err(ProjError::UnsupportedEpsg)
        ));
    }
}
