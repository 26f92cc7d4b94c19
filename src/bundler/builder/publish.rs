//! The single commit point of a build.

use super::checksum::calculate_sha256;
use crate::bundler::{Result, error::ErrorExt, utils::fs::replace_file};
use std::path::{Path, PathBuf};

/// An executable that was written to the caller's output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishedExecutable {
    /// Final location.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex SHA-256 of the contents.
    pub checksum: String,
}

/// Copies the finished executable from the workspace to `destination`.
///
/// This is the only write to the caller's filesystem. Size and checksum are
/// taken from the workspace copy beforehand, so once the file is in place
/// nothing else can fail. The file appears atomically; an existing file with
/// the same name is replaced.
pub async fn publish(executable: &Path, destination: &Path) -> Result<PublishedExecutable> {
    let size = tokio::fs::metadata(executable)
        .await
        .fs_context("reading artifact metadata", executable)?
        .len();
    let checksum = calculate_sha256(executable).await?;

    replace_file(executable, destination).await?;

    log::info!(
        "✓ Published {} ({} bytes, sha256 {})",
        destination.display(),
        size,
        checksum
    );

    Ok(PublishedExecutable {
        path: destination.to_path_buf(),
        size,
        checksum,
    })
}
