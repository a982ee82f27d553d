//! Gzip JSON encoding shared by every backend.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::SinkError;

/// Serializes `value` as UTF-8 JSON and gzip-compresses it.
pub fn encode_gzip_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SinkError> {
    let json = serde_json::to_vec(value)?;

    let mut encoder = GzEncoder::new(
        Vec::with_capacity((json.len() / 2).max(256)),
        Compression::default(),
    );
    encoder.write_all(&json).map_err(SinkError::Compression)?;
    encoder.finish().map_err(SinkError::Compression)
}

/// Inverse of [`encode_gzip_json`].
pub fn decode_gzip_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SinkError> {
    let mut json = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut json)
        .map_err(SinkError::Compression)?;
    Ok(serde_json::from_slice(&json)?)
}
