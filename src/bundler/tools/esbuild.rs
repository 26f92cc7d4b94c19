//! Bundling with esbuild.

use super::{ModuleBundler, detection};
use crate::bundler::error::{Error, Result};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Bundles the entry point into a single minified CommonJS module for Node.
///
/// esbuild is looked up in the staged project's `node_modules/.bin` first, so a
/// project that pins its own esbuild gets that version.
#[derive(Clone, Debug, Default)]
pub struct EsbuildBundler {
    configured: Option<PathBuf>,
}

impl EsbuildBundler {
    /// Creates a bundler, optionally pinned to a specific esbuild.
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    fn args(entry_point: &Path, outfile: &Path) -> Vec<OsString> {
        let mut outfile_arg = OsString::from("--outfile=");
        outfile_arg.push(outfile);

        vec![
            entry_point.as_os_str().to_owned(),
            "--bundle".into(),
            "--minify".into(),
            "--platform=node".into(),
            "--format=cjs".into(),
            "--log-level=error".into(),
            outfile_arg,
        ]
    }
}

impl ModuleBundler for EsbuildBundler {
    async fn bundle(&self, entry_point: &Path, outfile: &Path) -> Result<()> {
        let local_bins: Vec<PathBuf> = entry_point
            .parent()
            .map(|dir| dir.join("node_modules").join(".bin"))
            .into_iter()
            .collect();

        let esbuild =
            detection::resolve_package_binary("esbuild", self.configured.as_deref(), &local_bins)
                .ok_or_else(|| Error::MissingTool {
                    tool: "esbuild".into(),
                    hint: Some("or npx".into()),
                })?;

        log::info!("Bundling {}", entry_point.display());
        let cwd = entry_point.parent();
        esbuild
            .run(&Self::args(entry_point, outfile), cwd)
            .await
            .map_err(|e| match e {
                Error::ToolFailed { stderr, .. } if !stderr.is_empty() => Error::Bundle(stderr),
                other => Error::Bundle(other.to_string()),
            })?;

        if !outfile.is_file() {
            return Err(Error::Bundle(format!(
                "esbuild reported success but produced no {}",
                outfile.display()
            )));
        }
        Ok(())
    }
}
