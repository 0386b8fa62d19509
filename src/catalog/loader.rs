use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::angles::Satellite;
use crate::catalog::error::CatalogError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    satellites: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    name: String,
    longitude: f64,
}

/// Loads satellite lists from YAML files.
pub struct CatalogLoader {
    files: Vec<PathBuf>,
    satellites: Vec<Satellite>,
}

impl CatalogLoader {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            satellites: Vec::new(),
        }
    }

    /// Load every configured file. Files that fail to parse are logged and skipped.
    pub fn load_all(&mut self) -> usize {
        self.satellites.clear();
        let mut seen = HashSet::new();

        for path in &self.files {
            match parse_catalog_file(path) {
                Ok(entries) => {
                    for sat in entries {
                        if seen.insert(sat.name.clone()) {
                            self.satellites.push(sat);
                        } else {
                            log::warn!(
                                "Skipping duplicate satellite {} from {}",
                                sat.name,
                                path.display()
                            );
                        }
                    }
                }
                Err(e) => {
                    log::warn!("Failed to load catalog {}: {}", path.display(), e);
                }
            }
        }

        self.satellites.len()
    }

    pub fn into_satellites(self) -> Vec<Satellite> {
        self.satellites
    }
}

/// Parse and validate a single catalog file.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<Satellite>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    parse_catalog_str(&content, &filename)
}

pub fn parse_catalog_str(content: &str, filename: &str) -> Result<Vec<Satellite>, CatalogError> {
    let parsed: CatalogFile = serde_yaml::from_str(content).map_err(|e| CatalogError::Yaml {
        file: filename.to_string(),
        source: e,
    })?;

    let mut seen = HashSet::new();
    let mut results = Vec::with_capacity(parsed.satellites.len());

    for (i, raw) in parsed.satellites.into_iter().enumerate() {
        let sat = Satellite::new(raw.name, raw.longitude).map_err(|e| {
            CatalogError::InvalidEntry {
                file: filename.to_string(),
                message: format!("entry {}: {}", i + 1, e),
            }
        })?;
        if !seen.insert(sat.name.clone()) {
            return Err(CatalogError::InvalidEntry {
                file: filename.to_string(),
                message: format!("entry {}: duplicate name {}", i + 1, sat.name),
            });
        }
        results.push(sat);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "
satellites:
  - name: KOREASAT 7
    longitude: 116.0
  - name: ' NILESAT 201 '
    longitude: -7.0
";

    #[test]
    fn parses_valid_catalog() {
        let sats = parse_catalog_str(SAMPLE, "sample.yaml").unwrap();
        assert_eq!(sats.len(), 2);
        assert_eq!(sats[0].name, "KOREASAT 7");
        assert_eq!(sats[1].name, "NILESAT 201");
        assert_eq!(sats[1].longitude, -7.0);
    }

    #[test]
    fn empty_document_has_no_satellites() {
        let sats = parse_catalog_str("satellites: []", "empty.yaml").unwrap();
        assert!(sats.is_empty());
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        let content = "satellites:\n  - name: BAD\n    longitude: 200\n";
        let err = parse_catalog_str(content, "bad.yaml").unwrap_err();
        match err {
            CatalogError::InvalidEntry { file, message } => {
                assert_eq!(file, "bad.yaml");
                assert!(message.starts_with("entry 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_duplicate_names_within_file() {
        let content = "satellites:\n  - {name: A, longitude: 1}\n  - {name: A, longitude: 2}\n";
        assert!(matches!(
            parse_catalog_str(content, "dup.yaml"),
            Err(CatalogError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            parse_catalog_str("satellites: [name", "broken.yaml"),
            Err(CatalogError::Yaml { .. })
        ));
    }

    #[test]
    fn loader_skips_broken_files_and_duplicates() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("good.yaml");
        let more = dir.path().join("more.yaml");
        let broken = dir.path().join("broken.yaml");
        fs::File::create(&good)
            .unwrap()
            .write_all(SAMPLE.as_bytes())
            .unwrap();
        fs::write(
            &more,
            "satellites:\n  - {name: KOREASAT 7, longitude: 1}\n  - {name: EXTRA, longitude: 3}\n",
        )
        .unwrap();
        fs::write(&broken, "satellites: [").unwrap();

        let mut loader = CatalogLoader::new(vec![
            good,
            broken,
            dir.path().join("missing.yaml"),
            more,
        ]);
        assert_eq!(loader.load_all(), 3);
        let satellites = loader.into_satellites();
        let names: Vec<_> = satellites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["KOREASAT 7", "NILESAT 201", "EXTRA"]);
        assert_eq!(satellites[0].longitude, 116.0);
    }
}
