//! Isolated temporary directory owned by a single build.
//!
//! A [`Workspace`] is the only place the pipeline mutates before publish. It is
//! released explicitly by the bundler once the stages finish, and again by `Drop`
//! if anything unwinds past it; [`Workspace::release`] is idempotent so both
//! paths are safe.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix for workspace directory names.
const WORKSPACE_PREFIX: &str = "kodegen-sea-";

/// Subdirectory holding the staged copy of the program.
const STAGE_DIR: &str = "stage";

/// Subdirectory holding bundle, SEA config, blob and executable.
const BUILD_DIR: &str = "build";

/// A uniquely named build directory that is removed exactly once.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    dir: Option<TempDir>,
}

impl Workspace {
    /// Creates a fresh workspace under `parent`, or the system temp area.
    ///
    /// # Errors
    ///
    /// Returns a Resource-kind error if the directory cannot be created.
    pub fn acquire(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let created = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        };
        let dir = created.map_err(|e| {
            Error::Resource(format!("unable to create a temporary workspace: {e}"))
        })?;

        let root = dir.path().to_path_buf();
        for sub in [STAGE_DIR, BUILD_DIR] {
            let path = root.join(sub);
            std::fs::create_dir(&path).fs_context("creating workspace directory", &path)?;
        }

        log::debug!("Acquired workspace {}", root.display());
        Ok(Self {
            root,
            dir: Some(dir),
        })
    }

    /// Returns the workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory the program tree is staged into.
    pub fn stage_dir(&self) -> PathBuf {
        self.root.join(STAGE_DIR)
    }

    /// Returns the directory for build outputs.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    /// Recursively removes the workspace directory.
    ///
    /// Calling this more than once, or after the directory vanished on its own,
    /// is a no-op.
    pub fn release(&mut self) -> Result<()> {
        let Some(dir) = self.dir.take() else {
            return Ok(());
        };

        if !dir.path().exists() {
            // Dropping a TempDir whose path is gone ignores the NotFound.
            drop(dir);
            return Ok(());
        }

        dir.close().fs_context("removing workspace", &self.root)?;
        log::debug!("Released workspace {}", self.root.display());
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            log::warn!("Failed to remove workspace: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_layout_under_parent() {
        let parent = tempfile::tempdir().unwrap();
        let ws = Workspace::acquire(Some(parent.path())).unwrap();

        assert!(ws.root().starts_with(parent.path()));
        assert!(ws.stage_dir().is_dir());
        assert!(ws.build_dir().is_dir());
        assert!(
            ws.root()
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(WORKSPACE_PREFIX)
        );
    }

    #[test]
    fn release_is_idempotent() {
        let parent = tempfile::tempdir().unwrap();
        let mut ws = Workspace::acquire(Some(parent.path())).unwrap();
        std::fs::write(ws.stage_dir().join("file.js"), "1").unwrap();

        ws.release().unwrap();
        assert!(!ws.root().exists());
        ws.release().unwrap();
    }

    #[test]
    fn release_tolerates_external_removal() {
        let parent = tempfile::tempdir().unwrap();
        let mut ws = Workspace::acquire(Some(parent.path())).unwrap();
        std::fs::remove_dir_all(ws.root()).unwrap();

        ws.release().unwrap();
    }

    #[test]
    fn drop_removes_directory() {
        let parent = tempfile::tempdir().unwrap();
        let root = {
            let ws = Workspace::acquire(Some(parent.path())).unwrap();
            ws.root().to_path_buf()
        };
        assert!(!root.exists());
        assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 0);
    }

    #[test]
    fn acquire_fails_as_resource_error_for_missing_parent() {
        let parent = tempfile::tempdir().unwrap();
        let missing = parent.path().join("absent");
        let err = Workspace::acquire(Some(&missing)).unwrap_err();
        assert_eq!(err.kind(), crate::bundler::ErrorKind::Resource);
    }
}
