use super::ReferenceData;
use crate::EmissionError;
use std::{
    path::Path,
    sync::{Arc, RwLock},
};

/// holds the active reference data and hands out consistent snapshots.
/// a calculation that took a snapshot keeps using it even if the store is
/// refreshed mid-flight.
#[derive(Debug)]
pub struct ReferenceDataStore {
    current: RwLock<Arc<ReferenceData>>,
}

impl ReferenceDataStore {
    pub fn new(data: ReferenceData) -> ReferenceDataStore {
        ReferenceDataStore {
            current: RwLock::new(Arc::new(data)),
        }
    }

    pub fn snapshot(&self) -> Result<Arc<ReferenceData>, EmissionError> {
        self.current
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|e| EmissionError::ReferenceDataError(format!("reference data lock poisoned: {e}")))
    }

    /// swaps in a new, already validated bundle.
    pub fn replace(&self, data: ReferenceData) -> Result<(), EmissionError> {
        let version = data.version().to_string();
        let mut guard = self.current.write().map_err(|e| {
            EmissionError::ReferenceDataError(format!("reference data lock poisoned: {e}"))
        })?;
        *guard = Arc::new(data);
        log::info!("reference data refreshed to version '{version}'");
        Ok(())
    }

    /// reloads from a file. on failure the active bundle is left untouched.
    pub fn reload_from_file(&self, path: &Path) -> Result<(), EmissionError> {
        let data = ReferenceData::from_file(path)?;
        self.replace(data)
    }
}
