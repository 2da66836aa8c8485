#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Message types for the demystify service.
//!
//! A caller sends `{code, id}` and gets back either
//! `{success: true, result, id}` or `{success: false, error, id}`.
//! The `id` is opaque and echoed unchanged.
//!
//! ## Wire format
//! Messages use length-prefixed JSON:
//! - 4-byte little-endian u32 length prefix
//! - JSON payload bytes

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::{self, Read, Write};

/// A source text to rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub code: String,
    /// Caller-chosen correlation value.
    #[serde(default)]
    pub id: serde_json::Value,
}

impl Request {
    #[must_use]
    pub fn new(code: impl Into<String>, id: impl Into<serde_json::Value>) -> Self {
        Self {
            code: code.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub id: serde_json::Value,
}

impl Response {
    #[must_use]
    pub fn success(result: impl Into<String>, id: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            error: None,
            id,
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>, id: serde_json::Value) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error.into()),
            id,
        }
    }

    /// Map a handler outcome onto the success or failure shape.
    #[must_use]
    pub fn from_result<E: Display>(result: Result<String, E>, id: serde_json::Value) -> Self {
        match result {
            Ok(code) => Self::success(code, id),
            Err(e) => Self::failure(e.to_string(), id),
        }
    }
}

/// Encode a frame to bytes with length prefix.
///
/// Format: 4-byte little-endian length + JSON bytes
///
/// # Errors
/// Returns an error if serialization fails.
pub fn encode_frame<T: Serialize>(frame: &T) -> io::Result<Vec<u8>> {
    let json =
        serde_json::to_vec(frame).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let len = u32::try_from(json.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "frame too large"))?;

    let mut buf = Vec::with_capacity(4 + json.len());
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(&json);

    Ok(buf)
}

/// Decode a frame payload (without length prefix).
///
/// # Errors
/// Returns an error if deserialization fails.
pub fn decode_frame<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> io::Result<T> {
    serde_json::from_slice(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Write a length-prefixed frame and flush.
///
/// # Errors
/// Returns an error if encoding or writing fails.
pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, frame: &T) -> io::Result<()> {
    let encoded = encode_frame(frame)?;
    writer.write_all(&encoded)?;
    writer.flush()
}

/// Largest payload accepted by [`read_frame`] (16 MiB).
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Read one length-prefixed frame.
///
/// Returns `Ok(None)` on a clean end of stream before any prefix byte.
///
/// # Errors
/// Returns an error on a truncated frame, an oversized length or bad JSON.
pub fn read_frame<R: Read, T: for<'de> Deserialize<'de>>(reader: &mut R) -> io::Result<Option<T>> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    let len = u32::from_le_bytes(len_buf) as usize;

    if len > MAX_FRAME_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("frame too large: {len} bytes"),
        ));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;

    decode_frame(&buf).map(Some)
}
