use crate::angles::Satellite;

const BUILTIN: &[(&str, f64)] = &[
    ("KOREASAT 5A", 113.0),
    ("KOREASAT 6", 116.0),
    ("CHOLLIAN 2A", 128.2),
    ("INTELSAT-39", 105.0),
    ("ASIASAT 9", 122.0),
    ("JCSAT-4B", 124.0),
    ("APSTAR 6C", 134.0),
    ("THAICOM 6", 78.5),
    ("ASTRA 1KR", 19.2),
    ("GALAXY 19", -97.0),
];

/// Default geostationary slots shipped with the application.
pub fn builtin_satellites() -> Vec<Satellite> {
    BUILTIN
        .iter()
        .map(|(name, longitude)| Satellite {
            name: (*name).to_string(),
            longitude: *longitude,
        })
        .collect()
}
