//! External tool detection and availability checking.
//!
//! Tools are looked up in a fixed order: an explicitly configured location,
//! then any project-local directories, then `PATH`. Package binaries that are
//! normally installed per project (esbuild, postject) can additionally fall
//! back to `npx`.

use super::command::ToolCommand;
use std::path::{Path, PathBuf};

/// Finds `tool`, preferring `configured`.
///
/// A configured value may be a path or a bare program name; bare names are
/// searched on `PATH`.
pub fn locate(tool: &str, configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(configured) = configured {
        if configured.is_file() {
            return Some(configured.to_path_buf());
        }
        return match which::which(configured) {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!(
                    "Configured {} at {} is not usable: {}",
                    tool,
                    configured.display(),
                    e
                );
                None
            }
        };
    }

    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool, e);
            None
        }
    }
}

/// Finds `tool` inside one of `dirs` only.
pub fn locate_in(tool: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    if dirs.is_empty() {
        return None;
    }
    let search = std::env::join_paths(dirs).ok()?;
    let cwd = dirs.first()?;
    which::which_in(tool, Some(search), cwd).ok()
}

/// Resolves a package binary: configured, then `local_dirs`, then `PATH`, then `npx`.
pub fn resolve_package_binary(
    tool: &str,
    configured: Option<&Path>,
    local_dirs: &[PathBuf],
) -> Option<ToolCommand> {
    if configured.is_some() {
        return locate(tool, configured).map(ToolCommand::new);
    }

    if let Some(path) = locate_in(tool, local_dirs) {
        log::debug!("Using project-local {} at {}", tool, path.display());
        return Some(ToolCommand::new(path));
    }

    if let Some(path) = locate(tool, None) {
        return Some(ToolCommand::new(path));
    }

    locate("npx", None).map(|npx| {
        log::info!("{} not installed, running it through npx", tool);
        ToolCommand::via_npx(npx, tool)
    })
}

/// Checks that a located tool actually runs, e.g. `npm -v`.
pub async fn responds(tool: &ToolCommand, version_arg: &str) -> bool {
    match tool.run(&[version_arg], None).await {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            log::info!(
                "✓ {} available: {}",
                tool.program().display(),
                version.trim()
            );
            true
        }
        Err(e) => {
            log::warn!(
                "{} found but {} check failed: {}",
                tool.program().display(),
                version_arg,
                e
            );
            false
        }
    }
}
