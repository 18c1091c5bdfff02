//! In-memory storage implementation.

use super::{BoxFuture, SequenceFile, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    maps: RwLock<HashMap<String, SequenceFile>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {e}"))
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, file: &SequenceFile) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let file = file.clone();
        Box::pin(async move {
            let mut maps = self.maps.write().map_err(lock_error)?;
            maps.insert(name, file);
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SequenceFile>> {
        let name = name.to_string();
        Box::pin(async move {
            let maps = self.maps.read().map_err(lock_error)?;
            maps.get(&name).cloned().ok_or(StorageError::NotFound(name))
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut maps = self.maps.write().map_err(lock_error)?;
            maps.remove(&name);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let maps = self.maps.read().map_err(lock_error)?;
            let mut names: Vec<String> = maps.keys().cloned().collect();
            names.sort();
            Ok(names)
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move {
            let maps = self.maps.read().map_err(lock_error)?;
            Ok(maps.contains_key(&name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    fn empty_file() -> SequenceFile {
        SequenceFile::new(std::iter::empty())
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let file = empty_file();

        block_on(storage.save("ascent", &file)).unwrap();
        let loaded = block_on(storage.load("ascent")).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("bind"));
        assert!(matches!(result, Err(StorageError::NotFound(name)) if name == "bind"));
    }

    #[test]
    fn test_delete_and_exists() {
        let storage = MemoryStorage::new();
        block_on(storage.save("haven", &empty_file())).unwrap();
        assert!(block_on(storage.exists("haven")).unwrap());

        block_on(storage.delete("haven")).unwrap();
        assert!(!block_on(storage.exists("haven")).unwrap());
    }

    #[test]
    fn test_list_is_sorted() {
        let storage = MemoryStorage::new();
        block_on(storage.save("split", &empty_file())).unwrap();
        block_on(storage.save("lotus", &empty_file())).unwrap();
        assert_eq!(block_on(storage.list()).unwrap(), vec!["lotus", "split"]);
    }
}
