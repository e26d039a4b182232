//! Shared helpers for command handlers.

use std::path::Path;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use fourpaws_core::ImageUpload;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Take the password from the flag/env, or prompt without echo.
pub fn password_or_prompt(given: Option<String>) -> Result<SecretString, CliError> {
    match given {
        Some(password) => Ok(SecretString::from(password)),
        None => {
            let password = rpassword::prompt_password("Password: ")?;
            Ok(SecretString::from(password))
        }
    }
}

/// Read an image file for upload, inferring the MIME type from the
/// file extension.
pub fn read_image(path: &Path) -> Result<ImageUpload, CliError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".into());
    let mime_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string();
    Ok(ImageUpload {
        file_name,
        mime_type,
        bytes,
    })
}

/// Table-cell timestamp: date and minute, or "-" when absent.
pub fn timestamp(at: Option<&DateTime<Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}
