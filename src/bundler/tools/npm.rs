//! Dependency reinstallation with npm.

use super::{DependencyInstaller, ToolCommand, detection};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Runs `npm install` inside the staged package directory.
#[derive(Clone, Debug, Default)]
pub struct NpmInstaller {
    configured: Option<PathBuf>,
}

impl NpmInstaller {
    /// Creates an installer, optionally pinned to a specific npm.
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    fn command(&self) -> Option<ToolCommand> {
        detection::locate("npm", self.configured.as_deref()).map(ToolCommand::new)
    }
}

impl DependencyInstaller for NpmInstaller {
    fn tool_name(&self) -> &str {
        "npm"
    }

    async fn is_available(&self) -> bool {
        match self.command() {
            Some(npm) => detection::responds(&npm, "-v").await,
            None => false,
        }
    }

    async fn install(&self, package_dir: &Path) -> Result<()> {
        let npm = self.command().ok_or_else(|| Error::MissingTool {
            tool: self.tool_name().into(),
            hint: None,
        })?;

        log::info!("Installing dependencies in {}", package_dir.display());
        npm.run(&["install"], Some(package_dir)).await?;
        Ok(())
    }
}
