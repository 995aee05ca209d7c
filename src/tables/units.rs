/// A named linear unit. `to_meter` is kept in its textual form (it may be a
/// ratio such as `1/10`), `factor` is the evaluated multiplier.
#[derive(Clone, Copy, Debug)]
pub struct UnitEntry {
    pub id: &'static str,
    pub to_meter: &'static str,
    pub name: &'static str,
    pub factor: f64,
}

const fn u(id: &'static str, to_meter: &'static str, name: &'static str, factor: f64) -> UnitEntry {
    UnitEntry {
        id,
        to_meter,
        name,
        factor,
    }
}

pub static UNITS: &[UnitEntry] = &[
    u("km", "1000.", "Kilometer", 1000.0),
    u("m", "1.", "Meter", 1.0),
    u("dm", "1/10", "Decimeter", 0.1),
    u("cm", "1/100", "Centimeter", 0.01),
    u("mm", "1/1000", "Millimeter", 0.001),
    u("kmi", "1852.0", "International Nautical Mile", 1852.0),
    u("in", "0.0254", "International Inch", 0.0254),
    u("ft", "0.3048", "International Foot", 0.3048),
    u("yd", "0.9144", "International Yard", 0.9144),
    u("mi", "1609.344", "International Statute Mile", 1609.344),
    u("fath", "1.8288", "International Fathom", 1.8288),
    u("ch", "20.1168", "International Chain", 20.1168),
    u("link", "0.201168", "International Link", 0.201168),
    u("us-in", "1./39.37", "U.S. Surveyor's Inch", 1.0 / 39.37),
    u("us-ft", "0.304800609601219", "U.S. Surveyor's Foot", 0.304800609601219),
    u("us-yd", "0.914401828803658", "U.S. Surveyor's Yard", 0.914401828803658),
    u("us-ch", "20.11684023368047", "U.S. Surveyor's Chain", 20.11684023368047),
    u("us-mi", "1609.347218694437", "U.S. Surveyor's Statute Mile", 1609.347218694437),
    u("ind-yd", "0.91439523", "Indian Yard", 0.91439523),
    u("ind-ft", "0.30479841", "Indian Foot", 0.30479841),
    u("ind-ch", "20.11669506", "Indian Chain", 20.11669506),
];

pub fn lookup_unit(id: &str) -> Option<&'static UnitEntry> {
    UNITS.iter().find(|u| u.id == id)
}
