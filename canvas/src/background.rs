//! Background image loading.
//!
//! Reading the file is the only I/O in the crate. It runs as an async
//! operation whose single continuation is "store the data URI on the target
//! floor". The continuation is guarded by an [`UploadTicket`]: the engine
//! hands one out when an upload starts and only accepts the result if the
//! ticket is still the newest for a floor that still exists. Dropping the
//! future cancels the read.

#[cfg(test)]
#[path = "background_test.rs"]
mod background_test;

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::doc::FloorId;
use crate::error::BackgroundError;

/// Proof that an upload was started for `floor_id`. `generation` increases
/// with every upload the engine starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub floor_id: FloorId,
    pub generation: u64,
}

/// MIME type for an image file, by extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

/// Encode raw image bytes as a `data:` URI.
#[must_use]
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read an image file and encode it as a `data:` URI.
///
/// `max_bytes` bounds the file size when set.
///
/// # Errors
///
/// Returns `UnsupportedType` for non-image extensions, `TooLarge` when the
/// file exceeds `max_bytes`, or `Io` if the file can't be read.
pub async fn load_data_uri(path: &Path, max_bytes: Option<u64>) -> Result<String, BackgroundError> {
    let mime = mime_for_path(path).ok_or_else(|| BackgroundError::UnsupportedType(path.display().to_string()))?;
    if let Some(limit) = max_bytes {
        let size = tokio::fs::metadata(path).await?.len();
        if size > limit {
            return Err(BackgroundError::TooLarge { size, limit });
        }
    }
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), bytes = bytes.len(), mime, "background image read");
    Ok(to_data_uri(mime, &bytes))
}
