use super::error::SaveError;
use super::format::SessionDocument;
use crate::engine::RotationEngine;

use std::fs::{rename, File};
use std::io::Write;
use std::path::Path;

/// Reads and writes session documents on disk.
pub struct SessionFiles;

impl SessionFiles {
    /// Write the engine's full session document to `path`.
    pub fn save_to_path(engine: &RotationEngine, path: &Path) -> Result<(), SaveError> {
        let json = engine.to_json()?;
        Self::write_atomic(path, json.as_bytes())?;

        log::debug!("Saved {} bytes to {:?}", json.len(), path);
        Ok(())
    }

    /// Read a document from `path` and load it into `engine`.
    pub fn load_from_path(engine: &mut RotationEngine, path: &Path) -> Result<(), SaveError> {
        let document = Self::read_document(path)?;
        engine.load_document(document)?;

        log::info!("Session loaded from {:?}", path);
        Ok(())
    }

    pub fn read_document(path: &Path) -> Result<SessionDocument, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let contents = std::fs::read_to_string(path)?;
        let document = SessionDocument::from_json_str(&contents)?;

        log::debug!("Read {} bytes from {:?}", contents.len(), path);
        Ok(document)
    }

    fn write_atomic(path: &Path, data: &[u8]) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, path)?;
        Ok(())
    }
}
