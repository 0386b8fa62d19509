mod builtin;
mod error;
mod loader;

pub use builtin::builtin_satellites;
pub use error::CatalogError;
pub use loader::{parse_catalog_file, parse_catalog_str, CatalogLoader};

use crate::angles::Satellite;

/// The working set of satellites: read-only built-ins followed by user-added
/// custom entries. Names are unique across both.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    builtin: Vec<Satellite>,
    custom: Vec<Satellite>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_builtin() -> Self {
        Self {
            builtin: builtin_satellites(),
            custom: Vec::new(),
        }
    }

    /// Extend the read-only part, e.g. with satellites from catalog files.
    /// Entries whose name is already taken are skipped.
    pub fn extend_builtin(&mut self, satellites: impl IntoIterator<Item = Satellite>) {
        for sat in satellites {
            if self.find(&sat.name).is_some() {
                log::warn!("Ignoring duplicate catalog satellite {}", sat.name);
                continue;
            }
            self.builtin.push(sat);
        }
    }

    pub fn add_custom(&mut self, satellite: Satellite) -> Result<(), CatalogError> {
        if self.find(&satellite.name).is_some() {
            return Err(CatalogError::DuplicateName(satellite.name));
        }
        self.custom.push(satellite);
        Ok(())
    }

    pub fn remove_custom(&mut self, name: &str) -> Result<Satellite, CatalogError> {
        let name = name.trim();
        if let Some(idx) = self.custom.iter().position(|s| s.name == name) {
            return Ok(self.custom.remove(idx));
        }
        if self.builtin.iter().any(|s| s.name == name) {
            return Err(CatalogError::BuiltinReadOnly(name.to_string()));
        }
        Err(CatalogError::NotFound(name.to_string()))
    }

    pub fn find(&self, name: &str) -> Option<&Satellite> {
        let name = name.trim();
        self.builtin
            .iter()
            .chain(self.custom.iter())
            .find(|s| s.name == name)
    }

    pub fn all(&self) -> Vec<Satellite> {
        self.builtin.iter().chain(self.custom.iter()).cloned().collect()
    }

    pub fn custom(&self) -> &[Satellite] {
        &self.custom
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
