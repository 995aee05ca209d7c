//! Read-only reference data: named ellipsoids, datums, prime meridians and
//! linear units.

mod datums;
mod ellipsoids;
mod meridians;
mod units;

pub use datums::{lookup_datum, DatumEntry, DATUMS};
pub use ellipsoids::{lookup_ellipsoid, EllipsoidEntry, ELLIPSOIDS};
pub use meridians::{lookup_prime_meridian, PrimeMeridianEntry, PRIME_MERIDIANS};
pub use units::{lookup_unit, UnitEntry, UNITS};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique<'a>(ids: impl Iterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for id in ids {
            assert!(seen.insert(id), "duplicate table id {id}");
        }
    }

    #[test]
    fn test_ids_are_unique() {
        assert_unique(ELLIPSOIDS.iter().map(|e| e.id));
        assert_unique(DATUMS.iter().map(|d| d.id));
        assert_unique(PRIME_MERIDIANS.iter().map(|p| p.id));
        assert_unique(UNITS.iter().map(|u| u.id));
    }

    #[test]
    fn test_every_datum_names_a_known_ellipsoid() {
        for d in DATUMS {
            assert!(
                lookup_ellipsoid(d.ellipse_id).is_some(),
                "datum {} references unknown ellipsoid {}",
                d.id,
                d.ellipse_id
            );
        }
    }
}
