// SPDX-FileCopyrightText: 2026 Life Debugger Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image intake: turns a user-selected file into an [`ImageFile`].
//!
//! Only the declared MIME type is checked. Bytes are never decoded,
//! resized, or inspected, and nothing here touches the network.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lifedebug_core::{ImageFile, LifeDebugError};
use tracing::debug;

/// Entry points for building an [`ImageFile`].
pub struct ImageIntake;

impl ImageIntake {
    /// Accepts raw bytes with a declared MIME type.
    ///
    /// Rejects anything whose MIME type does not start with `image/`, and
    /// empty payloads.
    pub fn from_bytes(bytes: &[u8], declared_mime: &str) -> Result<ImageFile, LifeDebugError> {
        let mime_type = check_mime(declared_mime)?;
        if bytes.is_empty() {
            return Err(LifeDebugError::invalid_input("image file is empty"));
        }

        let base64 = STANDARD.encode(bytes);
        let preview_url = format!("data:{mime_type};base64,{base64}");
        debug!(mime_type = %mime_type, bytes = bytes.len(), "image accepted");

        Ok(ImageFile {
            base64,
            mime_type,
            preview_url,
        })
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<ImageFile, LifeDebugError> {
        let path = path.as_ref();
        let mime = mime_guess::from_path(path).first().ok_or_else(|| {
            LifeDebugError::invalid_input(format!(
                "cannot determine file type of {}",
                path.display()
            ))
        })?;
        // Check before reading so non-images are never loaded.
        check_mime(mime.essence_str())?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            LifeDebugError::invalid_input(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_bytes(&bytes, mime.essence_str())
    }

    /// Accepts a `data:<mime>[;param=value]*;base64,<payload>` URL.
    ///
    /// The header and payload are split at the first comma. Media-type
    /// parameters are dropped; only the bare MIME type is kept.
    pub fn from_data_url(url: &str) -> Result<ImageFile, LifeDebugError> {
        let (header, payload) = url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or_else(|| LifeDebugError::invalid_input("not a data URL"))?;

        let params = header
            .strip_suffix(";base64")
            .ok_or_else(|| LifeDebugError::invalid_input("data URL is not base64-encoded"))?;
        let mime = params.split(';').next().unwrap_or_default();

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| LifeDebugError::invalid_input(format!("invalid base64 payload: {e}")))?;
        Self::from_bytes(&bytes, mime)
    }
}

fn check_mime(declared: &str) -> Result<String, LifeDebugError> {
    let mime = declared.trim().to_ascii_lowercase();
    if mime.starts_with("image/") {
        Ok(mime)
    } else {
        Err(LifeDebugError::invalid_input(format!(
            "unsupported file type `{declared}`: please upload an image"
        )))
    }
}
