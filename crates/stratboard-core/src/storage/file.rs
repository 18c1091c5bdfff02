//! File-based storage for native platforms.

use super::{
    BoxFuture, ImportError, MAP_EXTENSION, PayloadCodec, PlainCodec, SequenceFile, Storage,
    StorageError, StorageResult,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Read and decode an exported map from an arbitrary path.
///
/// Only `.map` files are accepted. The file is fully decoded and validated
/// before anything is returned.
pub fn read_map_file(path: &Path, codec: &dyn PayloadCodec) -> Result<SequenceFile, ImportError> {
    let is_map = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MAP_EXTENSION));
    if !is_map {
        return Err(ImportError::InvalidExtension(path.display().to_string()));
    }
    let payload = fs::read_to_string(path)?;
    let json = codec.decode(&payload)?;
    SequenceFile::from_json(&json)
}

/// Stores each map as `<name>.map` in a directory.
pub struct FileStorage {
    base_path: PathBuf,
    codec: Box<dyn PayloadCodec>,
}

impl FileStorage {
    /// Create storage rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        Self::with_codec(base_path, Box::new(PlainCodec))
    }

    /// Like [`FileStorage::new`] but encoding payloads with `codec`.
    pub fn with_codec(base_path: PathBuf, codec: Box<dyn PayloadCodec>) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {e}"))
            })?;
        }
        Ok(Self { base_path, codec })
    }

    /// Storage in the platform data directory.
    ///
    /// On Unix: `~/.local/share/stratboard/maps/`
    /// On Windows: `%LOCALAPPDATA%\stratboard\maps\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("stratboard").join("maps"))
    }

    fn map_path(&self, name: &str) -> PathBuf {
        let safe: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{safe}.{MAP_EXTENSION}"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, name: &str, file: &SequenceFile) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.map_path(name);
        let payload = file
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))
            .and_then(|json| {
                self.codec
                    .encode(&json)
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            });

        Box::pin(async move {
            let payload = payload?;
            fs::write(&path, payload).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {e}", path.display()))
            })
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SequenceFile>> {
        let path = self.map_path(name);
        let name = name.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(name));
            }
            Ok(read_map_file(&path, self.codec.as_ref())?)
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.map_path(name);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {e}", path.display()))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {e}")))?;

            let mut names: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|e| e == MAP_EXTENSION))
                .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
                .collect();
            names.sort();
            Ok(names)
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.map_path(name);
        Box::pin(async move { Ok(path.exists()) })
    }
}
