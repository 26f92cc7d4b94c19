//! File system utilities for staging and publishing.
//!
//! Provides the exclusion-aware tree copy used for staging, plus the small
//! helpers the other stages share.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::absolute,
};
use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Summary of a [`copy_tree`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// Destination path that mirrors the copied source root.
    pub root: PathBuf,
    /// Number of regular files written.
    pub files: usize,
    /// Number of directories created.
    pub directories: usize,
    /// Number of excluded entries skipped (their contents are not counted).
    pub skipped: usize,
}

/// Returns whether `path` exists, treating permission errors as absence.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Returns whether `path` exists and is a directory.
pub async fn is_directory(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

/// Copies a file or directory tree into `to`, skipping excluded paths.
///
/// The source lands at `to/<basename of from>`. `exclude` entries are relative to
/// `from` unless absolute; an excluded entry is skipped before it is read, so
/// nothing beneath it is ever visited. `to` is created if missing and must
/// otherwise be a directory.
///
/// Traversal uses an explicit queue of `(source, path relative to to)` pairs rather
/// than recursion. Only directory structure and regular-file bytes are reproduced;
/// existing destination files are overwritten.
pub async fn copy_tree<E: AsRef<Path>>(
    from: &Path,
    to: &Path,
    exclude: &[E],
) -> Result<CopyOutcome> {
    let from = absolute(from)?;
    let to = absolute(to)?;
    let exclude = exclude
        .iter()
        .map(|e| absolute(&from.join(e)))
        .collect::<Result<Vec<_>>>()?;

    if !exists(&from).await {
        return Err(Error::not_found(from));
    }

    if !exists(&to).await {
        fs::create_dir_all(&to)
            .await
            .fs_context("creating copy destination", &to)?;
    } else if !is_directory(&to).await {
        return Err(Error::wrong_kind(to, "directory"));
    }

    let seed = from.file_name().map(PathBuf::from).unwrap_or_default();
    let mut outcome = CopyOutcome {
        root: to.join(&seed),
        files: 0,
        directories: 0,
        skipped: 0,
    };

    let mut queue = VecDeque::from([(from, seed)]);
    while let Some((source, relative)) = queue.pop_front() {
        if exclude.iter().any(|excluded| source.starts_with(excluded)) {
            log::debug!("Skipping excluded path {}", source.display());
            outcome.skipped += 1;
            continue;
        }

        let destination = to.join(&relative);
        let metadata = fs::metadata(&source)
            .await
            .fs_context("reading metadata", &source)?;

        if metadata.is_dir() {
            fs::create_dir_all(&destination)
                .await
                .fs_context("creating directory", &destination)?;
            outcome.directories += 1;

            let mut entries = fs::read_dir(&source)
                .await
                .fs_context("reading directory", &source)?;
            while let Some(entry) = entries
                .next_entry()
                .await
                .fs_context("reading directory entry", &source)?
            {
                let name = entry.file_name();
                queue.push_back((entry.path(), relative.join(name)));
            }
        } else {
            fs::copy(&source, &destination)
                .await
                .fs_context("copying file", &destination)?;
            outcome.files += 1;
        }
    }

    Ok(outcome)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !exists(from).await {
        return Err(Error::not_found(from));
    }
    if is_directory(from).await {
        return Err(Error::wrong_kind(from, "file"));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}

/// Copies `from` to `to` through a temporary sibling of `to`, then renames it
/// into place.
///
/// Readers of `to`'s directory never observe a partially written file, and a
/// failed copy leaves an existing `to` untouched. Permissions of `from` are
/// carried over.
pub async fn replace_file(from: &Path, to: &Path) -> Result<()> {
    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let dir = to
            .parent()
            .ok_or_else(|| Error::wrong_kind(&to, "file path"))?;

        let mut source = std::fs::File::open(&from).fs_context("opening file", &from)?;
        let permissions = source
            .metadata()
            .fs_context("reading metadata", &from)?
            .permissions();

        let mut staged = tempfile::Builder::new()
            .prefix(".kodegen-sea-")
            .tempfile_in(dir)
            .fs_context("creating temporary file in", dir)?;
        std::io::copy(&mut source, staged.as_file_mut())
            .fs_context("writing temporary file", staged.path())?;
        staged
            .as_file()
            .set_permissions(permissions)
            .fs_context("setting permissions", staged.path())?;
        staged
            .as_file()
            .sync_all()
            .fs_context("flushing temporary file", staged.path())?;

        staged
            .persist(&to)
            .map_err(|e| e.error)
            .fs_context("moving file into place", &to)?;
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("File replace task panicked: {}", e)))?
}
