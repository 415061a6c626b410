//! Debug image payloads
//!
//! The backend returns annotated detection images either as a URL to fetch
//! or inline as base64 (optionally wrapped in a `data:` URI).

use crate::error::IoError;
use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];

/// Image container detected from the leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Unknown,
}

impl ImageFormat {
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(PNG_MAGIC) {
            ImageFormat::Png
        } else if bytes.starts_with(JPEG_MAGIC) {
            ImageFormat::Jpeg
        } else {
            ImageFormat::Unknown
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Unknown => "application/octet-stream",
        }
    }
}

/// Where the bytes of a debug image come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote resource the page should load itself
    Url(String),
    /// Decoded image bytes
    Inline { format: ImageFormat, bytes: Vec<u8> },
}

impl ImageSource {
    /// Interpret a payload string from a response body
    pub fn from_payload(payload: &str) -> Result<Self> {
        let payload = payload.trim();
        if payload.starts_with("http://") || payload.starts_with("https://") || payload.starts_with('/') {
            return Ok(ImageSource::Url(payload.to_string()));
        }

        let encoded = match payload.strip_prefix("data:") {
            Some(rest) => rest
                .split_once(";base64,")
                .map(|(_, data)| data)
                .ok_or_else(|| IoError::DecodeError {
                    message: "data URI is not base64 encoded".to_string(),
                })?,
            None => payload,
        };

        Self::from_base64(encoded)
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = STANDARD.decode(encoded.trim()).map_err(|e| IoError::DecodeError {
            message: format!("invalid base64 image: {e}"),
        })?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        ImageSource::Inline {
            format: ImageFormat::sniff(&bytes),
            bytes,
        }
    }

    /// Size of the inline payload, zero for URLs
    pub fn byte_len(&self) -> usize {
        match self {
            ImageSource::Url(_) => 0,
            ImageSource::Inline { bytes, .. } => bytes.len(),
        }
    }
}
