//! Save/load of player progress
//!
//! Features:
//! - JSON blob compatible with the browser build's existing saves
//! - LocalStorage backend on web, in-memory backend elsewhere
//! - Failures are reported, never fatal: callers log and keep playing

use crate::error::PersistError;
use crate::progress::PersistentProgress;

/// LocalStorage key for the progress blob
pub const STORAGE_KEY: &str = "flippy-bottle-data";

/// Somewhere progress can be loaded from and saved to
pub trait ProgressStore {
    /// Load saved progress. A store with nothing saved yet returns defaults.
    fn load(&self) -> Result<PersistentProgress, PersistError>;

    fn save(&mut self, progress: &PersistentProgress) -> Result<(), PersistError>;
}

/// Encode progress as the save blob
pub fn encode(progress: &PersistentProgress) -> Result<String, PersistError> {
    serde_json::to_string(progress).map_err(PersistError::Serialize)
}

/// Decode a save blob, repairing anything the catalog no longer knows
pub fn decode(json: &str) -> Result<PersistentProgress, PersistError> {
    let mut progress: PersistentProgress =
        serde_json::from_str(json).map_err(PersistError::Deserialize)?;
    progress.sanitize();
    Ok(progress)
}

/// Load progress, falling back to defaults on any failure
pub fn load_or_default<S: ProgressStore + ?Sized>(store: &S) -> PersistentProgress {
    match store.load() {
        Ok(progress) => {
            log::info!(
                "Loaded progress (high score {}, {} points)",
                progress.high_score,
                progress.total_points
            );
            progress
        }
        Err(e) => {
            log::warn!("Load failed: {}", e);
            PersistentProgress::default()
        }
    }
}

/// Save progress, logging (and otherwise ignoring) failure
pub fn save_or_log<S: ProgressStore + ?Sized>(store: &mut S, progress: &PersistentProgress) -> bool {
    match store.save(progress) {
        Ok(()) => {
            log::info!("Progress saved");
            true
        }
        Err(e) => {
            log::warn!("Save failed: {}", e);
            false
        }
    }
}

/// Keeps the save blob in memory (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<PersistentProgress, PersistError> {
        match &self.blob {
            Some(json) => decode(json),
            None => Ok(PersistentProgress::default()),
        }
    }

    fn save(&mut self, progress: &PersistentProgress) -> Result<(), PersistError> {
        self.blob = Some(encode(progress)?);
        Ok(())
    }
}

/// Browser LocalStorage backend
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressStore for LocalStorageStore {
    fn load(&self) -> Result<PersistentProgress, PersistError> {
        let storage = Self::storage()?;
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => decode(&json),
            Ok(None) => Ok(PersistentProgress::default()),
            Err(e) => Err(PersistError::Storage(format!("{:?}", e))),
        }
    }

    fn save(&mut self, progress: &PersistentProgress) -> Result<(), PersistError> {
        let json = encode(progress)?;
        Self::storage()?
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| PersistError::Storage(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose backend always refuses
    struct BrokenStore;

    impl ProgressStore for BrokenStore {
        fn load(&self) -> Result<PersistentProgress, PersistError> {
            Err(PersistError::Unavailable)
        }

        fn save(&mut self, _progress: &PersistentProgress) -> Result<(), PersistError> {
            Err(PersistError::Storage("quota exceeded".into()))
        }
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), PersistentProgress::default());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut progress = PersistentProgress::default();
        progress.record_round(250);
        progress.buy_skin("fire").unwrap();

        store.save(&progress).unwrap();
        assert!(store.blob().unwrap().contains("\"highScore\":250"));
        assert_eq!(store.load().unwrap(), progress);
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_defaults() {
        let store = MemoryStore::with_blob("{ definitely not json");
        assert!(matches!(store.load(), Err(PersistError::Deserialize(_))));
        assert_eq!(load_or_default(&store), PersistentProgress::default());
    }

    #[test]
    fn test_decode_sanitizes() {
        let progress = decode(r#"{"ownedBottles":["ghost"],"selectedBottle":"ghost"}"#).unwrap();
        assert_eq!(progress.owned_skins, vec!["classic"]);
        assert_eq!(progress.selected_skin, "classic");
    }

    #[test]
    fn test_failures_are_swallowed() {
        let mut store = BrokenStore;
        assert_eq!(load_or_default(&store), PersistentProgress::default());
        assert!(!save_or_log(&mut store, &PersistentProgress::default()));
    }
}
