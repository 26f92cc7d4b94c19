//! The Node.js runtime as blob generator and executable image.

use super::{SeaRuntime, ToolCommand, detection};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Node.js runtime used for `--experimental-sea-config`.
///
/// The same executable is duplicated to become the application, so the Node
/// version that generates the blob always matches the one that loads it.
#[derive(Clone, Debug, Default)]
pub struct NodeRuntime {
    configured: Option<PathBuf>,
}

impl NodeRuntime {
    /// Creates a runtime handle, optionally pinned to a specific node.
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }
}

impl SeaRuntime for NodeRuntime {
    fn executable(&self) -> Result<PathBuf> {
        detection::locate("node", self.configured.as_deref()).ok_or_else(|| {
            Error::MissingTool {
                tool: "node".into(),
                hint: None,
            }
        })
    }

    async fn generate_blob(&self, config: &Path) -> Result<()> {
        let node = ToolCommand::new(self.executable()?);

        if !config.is_file() {
            return Err(Error::not_found(config));
        }

        log::info!("Generating SEA blob from {}", config.display());
        let output = node
            .run(
                &[
                    std::ffi::OsStr::new("--experimental-sea-config"),
                    config.as_os_str(),
                ],
                config.parent(),
            )
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            log::debug!("{}", stdout.trim());
        }
        Ok(())
    }
}
