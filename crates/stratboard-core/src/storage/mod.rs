//! Persistence of sequence files.
//!
//! A saved map is a [`SequenceFile`]: every slot's elements plus a schema
//! version. On disk the JSON is passed through a [`PayloadCodec`], which is
//! where an encryption layer plugs in.

mod codec;
mod memory;
mod schema;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use codec::{CodecError, PayloadCodec, PlainCodec};
pub use memory::MemoryStorage;
pub use schema::{
    CURRENT_VERSION, LEGACY_VERSION, MAP_EXTENSION, SequenceFile, SlotRecord, map_file_name,
};

#[cfg(not(target_arch = "wasm32"))]
pub use file::{FileStorage, read_map_file};

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Reasons an import is rejected. Nothing is modified when one is returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Please select a valid .map file (got {0})")]
    InvalidExtension(String),
    #[error("Could not decode map file: {0}")]
    Codec(#[from] CodecError),
    #[error("Map file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported map file version: {0}")]
    UnsupportedVersion(String),
    #[error("Map file is missing `{0}`")]
    MissingField(&'static str),
    #[error("Could not read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sequence {slot} contains element id `{id}` more than once")]
    DuplicateId { slot: usize, id: String },
    #[error("Cannot import while a sequence transition is running")]
    Busy,
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Map not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Named sequence-file store.
///
/// Native implementations must be `Send + Sync`; on WASM the bounds are
/// dropped since everything runs on one thread.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    fn save(&self, name: &str, file: &SequenceFile) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SequenceFile>>;

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Names of all stored maps.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Named sequence-file store (WASM version without `Send + Sync`).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    fn save(&self, name: &str, file: &SequenceFile) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SequenceFile>>;

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Minimal executor for driving storage futures in tests.
#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
