//! Core Settings struct and implementations.

use super::ToolPaths;
use std::path::{Path, PathBuf};

/// A validated-shape build request.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Paths are absolute but
/// their existence is only checked when the bundler validates the request, so that
/// a missing entry point is reported before any workspace is created.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_sea::bundler::SettingsBuilder;
///
/// # fn example() -> kodegen_bundler_sea::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .entry_point("src/server")
///     .output_directory("dist")
///     .assets(vec!["assets/logo.png".into()])
///     .build()?;
///
/// assert_eq!(settings.name(), "server");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute path to the program's entry file.
    pub(super) entry_point: PathBuf,

    /// Executable name without platform suffix.
    pub(super) name: String,

    /// Directory that receives the finished executable.
    pub(super) output_directory: PathBuf,

    /// Auxiliary files in caller order, as given.
    pub(super) assets: Vec<PathBuf>,

    /// Keep Node's experimental SEA warning at startup.
    pub(super) enable_experimental_sea_warning: bool,

    /// Precompile the entry into a V8 startup snapshot.
    pub(super) use_snapshot: bool,

    /// Embed V8 code cache for the main script.
    pub(super) use_code_cache: bool,

    /// Locations of the external tools.
    pub(super) tools: ToolPaths,

    /// Parent directory for build workspaces (system temp when `None`).
    pub(super) temp_dir: Option<PathBuf>,
}

impl Settings {
    /// Returns the absolute entry point path.
    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    /// Returns the directory containing the entry point.
    ///
    /// This is the tree that gets staged.
    pub fn entry_point_directory(&self) -> &Path {
        self.entry_point.parent().unwrap_or(&self.entry_point)
    }

    /// Returns the executable display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the executable file name, with `.exe` on Windows.
    pub fn executable_file_name(&self) -> String {
        format!("{}{}", self.name, std::env::consts::EXE_SUFFIX)
    }

    /// Returns the output directory.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the requested asset paths in caller order.
    pub fn assets(&self) -> &[PathBuf] {
        &self.assets
    }

    /// Whether the experimental SEA warning stays enabled.
    pub fn enable_experimental_sea_warning(&self) -> bool {
        self.enable_experimental_sea_warning
    }

    /// Whether a V8 startup snapshot is requested.
    pub fn use_snapshot(&self) -> bool {
        self.use_snapshot
    }

    /// Whether V8 code cache is requested.
    pub fn use_code_cache(&self) -> bool {
        self.use_code_cache
    }

    /// Returns the configured tool locations.
    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    /// Returns the workspace parent override, if any.
    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }
}
