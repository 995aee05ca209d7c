/// A named prime meridian, defined as a DMS offset from Greenwich.
#[derive(Clone, Copy, Debug)]
pub struct PrimeMeridianEntry {
    pub id: &'static str,
    pub definition: &'static str,
}

const fn pm(id: &'static str, definition: &'static str) -> PrimeMeridianEntry {
    PrimeMeridianEntry { id, definition }
}

pub static PRIME_MERIDIANS: &[PrimeMeridianEntry] = &[
    pm("greenwich", "0dE"),
    pm("lisbon", "9d07'54.862\"W"),
    pm("paris", "2d20'14.025\"E"),
    pm("bogota", "74d04'51.3\"W"),
    pm("madrid", "3d41'16.58\"W"),
    pm("rome", "12d27'8.4\"E"),
    pm("bern", "7d26'22.5\"E"),
    pm("jakarta", "106d48'27.79\"E"),
    pm("ferro", "17d40'W"),
    pm("brussels", "4d22'4.71\"E"),
    pm("stockholm", "18d3'29.8\"E"),
    pm("athens", "23d42'58.815\"E"),
    pm("oslo", "10d43'22.5\"E"),
    pm("copenhagen", "12d34'40.35\"E"),
];

pub fn lookup_prime_meridian(id: &str) -> Option<&'static PrimeMeridianEntry> {
    PRIME_MERIDIANS.iter().find(|p| p.id == id)
}
