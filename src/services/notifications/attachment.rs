//! Attachment resolution.
//!
//! An inline base64 payload takes priority over a file path. A configured
//! path that does not exist is not an error: the notification goes out
//! without an attachment.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use tracing::{debug, warn};

use super::provider::Attachment;
use crate::config::NotificationSettings;
use crate::error::{AppError, AppResult};

/// Mime type used when nothing better is known
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Part file name used for inline payloads
const INLINE_FILE_NAME: &str = "attachment";

/// Standard alphabet, padding optional
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Mime type for common image extensions
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

/// Decode an inline payload; whitespace and line breaks are ignored
pub fn decode_base64(payload: &str) -> AppResult<Vec<u8>> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(LENIENT_BASE64.decode(compact)?)
}

/// Relative paths are joined onto `base_dir`
pub fn resolve_path(path: &str, base_dir: &Path) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Builds the attachment configured in `settings`, if any
pub fn resolve_attachment(
    settings: &NotificationSettings,
    base_dir: &Path,
) -> AppResult<Option<Attachment>> {
    if let Some(payload) = settings.inline_attachment() {
        let bytes = decode_base64(payload)?;
        let mime_type = settings
            .attachment_type
            .clone()
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        debug!(len = bytes.len(), mime = %mime_type, "Using inline attachment");
        return Ok(Some(Attachment {
            file_name: INLINE_FILE_NAME.to_string(),
            mime_type,
            bytes,
        }));
    }

    let Some(configured) = settings.attachment_path() else {
        return Ok(None);
    };

    let path = resolve_path(configured, base_dir);
    if !path.exists() {
        warn!(path = %path.display(), "Pushover attachment not found");
        return Ok(None);
    }

    let bytes = std::fs::read(&path).map_err(|source| AppError::AttachmentRead {
        path: path.clone(),
        source,
    })?;
    let mime_type = guess_mime(&path)
        .map(str::to_string)
        .or_else(|| settings.attachment_type.clone())
        .unwrap_or_else(|| FALLBACK_MIME.to_string());
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| INLINE_FILE_NAME.to_string());

    debug!(path = %path.display(), len = bytes.len(), mime = %mime_type, "Using file attachment");
    Ok(Some(Attachment {
        file_name,
        mime_type,
        bytes,
    }))
}
