//! Transform between serialized JSON and the stored payload.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct CodecError(pub String);

/// Encodes JSON text into the on-disk payload and back.
///
/// Encryption of exported maps is provided by the host through this trait.
pub trait PayloadCodec: Send + Sync {
    fn encode(&self, json: &str) -> Result<String, CodecError>;

    fn decode(&self, payload: &str) -> Result<String, CodecError>;
}

/// Stores the JSON as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec;

impl PayloadCodec for PlainCodec {
    fn encode(&self, json: &str) -> Result<String, CodecError> {
        Ok(json.to_string())
    }

    fn decode(&self, payload: &str) -> Result<String, CodecError> {
        Ok(payload.to_string())
    }
}
