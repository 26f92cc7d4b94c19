//! Builder for constructing Settings.

use super::{Settings, ToolPaths};
use crate::bundler::error::{Error, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Builder for constructing [`Settings`].
///
/// Normalizes caller input the same way regardless of where it came from
/// (CLI or library use):
///
/// - the entry point gets a `.js` extension when it lacks one,
/// - the display name defaults to the entry point's file stem; a supplied name
///   keeps only its own stem, so `../out/tool.exe` becomes `tool`,
/// - every path is made absolute against the current directory.
///
/// Existence is deliberately not checked here.
#[derive(Default)]
pub struct SettingsBuilder {
    entry_point: Option<PathBuf>,
    name: Option<String>,
    output_directory: Option<PathBuf>,
    assets: Vec<PathBuf>,
    enable_experimental_sea_warning: bool,
    use_snapshot: bool,
    use_code_cache: bool,
    tools: ToolPaths,
    temp_dir: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the program entry point.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn entry_point<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_point = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the executable display name.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the directory that receives the executable.
    ///
    /// Default: current working directory
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the auxiliary asset paths.
    pub fn assets(mut self, assets: Vec<PathBuf>) -> Self {
        self.assets = assets;
        self
    }

    /// Keeps Node's experimental SEA warning.
    ///
    /// Default: false (warning suppressed)
    pub fn enable_experimental_sea_warning(mut self, enable: bool) -> Self {
        self.enable_experimental_sea_warning = enable;
        self
    }

    /// Requests a V8 startup snapshot.
    pub fn use_snapshot(mut self, enable: bool) -> Self {
        self.use_snapshot = enable;
        self
    }

    /// Requests V8 code cache.
    pub fn use_code_cache(mut self, enable: bool) -> Self {
        self.use_code_cache = enable;
        self
    }

    /// Sets explicit tool locations.
    pub fn tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the parent directory for build workspaces.
    pub fn temp_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.temp_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::InvalidArgument`] when the entry point is missing or
    /// a supplied name has no usable stem.
    pub fn build(self) -> Result<Settings> {
        let entry_point = self
            .entry_point
            .ok_or_else(|| Error::InvalidArgument("an entry point is required".into()))?;
        let entry_point = absolute(&with_js_extension(entry_point))?;

        let name = match self.name {
            Some(name) => stem(Path::new(&name)).ok_or_else(|| {
                Error::InvalidArgument(format!("'{name}' is not a usable executable name"))
            })?,
            None => stem(&entry_point).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "cannot derive a name from '{}'",
                    entry_point.display()
                ))
            })?,
        };

        let output_directory = match self.output_directory {
            Some(dir) => absolute(&dir)?,
            None => std::env::current_dir().fs_context("reading current directory", ".")?,
        };

        let temp_dir = self.temp_dir.as_deref().map(absolute).transpose()?;

        Ok(Settings {
            entry_point,
            name,
            output_directory,
            assets: self.assets,
            enable_experimental_sea_warning: self.enable_experimental_sea_warning,
            use_snapshot: self.use_snapshot,
            use_code_cache: self.use_code_cache,
            tools: self.tools,
            temp_dir,
        })
    }
}

/// Makes `path` absolute against the current directory without touching the filesystem.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving path", path)?
        .into_owned())
}

fn with_js_extension(path: PathBuf) -> PathBuf {
    let has_js = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("js"));
    if has_js {
        return path;
    }
    let mut raw: OsString = path.into_os_string();
    raw.push(".js");
    PathBuf::from(raw)
}

fn stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
}
