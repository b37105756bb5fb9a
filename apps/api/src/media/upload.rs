//! Upload validation, collision-resistant path allocation, and the storage
//! writer for package images.

use std::path::Path;

use chrono::Utc;
use rand::Rng;
use thiserror::Error;
use tokio::fs;

use crate::errors::AppError;

/// Public asset directory for package images. Stored paths are root-relative
/// under this directory; the static file service maps them back to disk.
pub const PACKAGE_IMAGE_DIR: &str = "assets/images/packages";

const RANDOM_TOKEN_LEN: usize = 13;

/// Upload acceptance policy. Supplied by configuration rather than
/// hardcoded so tests can force the set and size.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_mime_types: Vec<String>,
    pub max_size_bytes: u64,
}

impl UploadPolicy {
    /// The image-only policy used by the package upload endpoint.
    pub fn images(max_size_bytes: u64) -> Self {
        UploadPolicy {
            allowed_mime_types: [
                "image/jpeg",
                "image/jpg",
                "image/png",
                "image/webp",
                "image/gif",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
            max_size_bytes,
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file type '{0}'. Only images are allowed.")]
    InvalidMediaType(String),

    #[error("File size {size} exceeds the maximum of {max} bytes")]
    PayloadTooLarge { size: u64, max: u64 },
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidMediaType(_) => AppError::UnsupportedMediaType(err.to_string()),
            UploadError::PayloadTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
        }
    }
}

/// Validates an inbound file against the policy and computes its stored
/// path: `/{dir}/{timestamp_ms}-{random token}.{original extension}`.
///
/// The randomized suffix is best-effort collision avoidance, not a
/// transactional guarantee; concurrent uploads drawing the same millisecond
/// and token are astronomically unlikely and not retried.
pub fn allocate(
    filename: &str,
    mime_type: &str,
    size: u64,
    policy: &UploadPolicy,
) -> Result<String, UploadError> {
    if !policy.allowed_mime_types.iter().any(|m| m == mime_type) {
        return Err(UploadError::InvalidMediaType(mime_type.to_string()));
    }
    if size > policy.max_size_bytes {
        return Err(UploadError::PayloadTooLarge {
            size,
            max: policy.max_size_bytes,
        });
    }

    Ok(compose_stored_path(
        filename,
        Utc::now().timestamp_millis(),
        &random_token(),
    ))
}

/// The composition rule, separated from clock and RNG so tests can force
/// both components.
fn compose_stored_path(filename: &str, timestamp_ms: i64, token: &str) -> String {
    let extension = filename.rsplit('.').next().unwrap_or("");
    format!("/{PACKAGE_IMAGE_DIR}/{timestamp_ms}-{token}.{extension}")
}

fn random_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(RANDOM_TOKEN_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Writes the payload under the public directory, creating intermediate
/// directories as needed. Bytes land under a temporary name first and are
/// renamed into place, so a partially written file is never visible under
/// its final name.
pub async fn store(public_dir: &Path, stored_path: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let relative = stored_path.trim_start_matches('/');
    let final_path = public_dir.join(relative);

    if let Some(parent) = final_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let partial = final_path.with_extension("part");
    fs::write(&partial, bytes).await?;
    fs::rename(&partial, &final_path).await?;
    Ok(())
}
