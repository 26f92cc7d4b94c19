//! Single executable assembly.
//!
//! Turns a bundled module plus resolved assets into a patched copy of the Node
//! runtime, entirely inside the build workspace:
//!
//! 1. write `sea-config.json`
//! 2. have the runtime turn it into `sea-prep.blob`
//! 3. duplicate the runtime executable under the target name
//! 4. inject the blob into the duplicate
//!
//! No step is retried; the first failure aborts assembly.

use crate::bundler::{
    Settings,
    assets::AssetMap,
    error::{Context, ErrorExt, Result},
    tools::{BlobInjector, InjectOptions, SeaRuntime},
    utils::fs,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the SEA configuration document.
pub const SEA_CONFIG_FILE: &str = "sea-config.json";

/// File name of the generated preparation blob.
pub const SEA_BLOB_FILE: &str = "sea-prep.blob";

/// Resource name Node looks up at startup.
pub const SEA_RESOURCE_NAME: &str = "NODE_SEA_BLOB";

/// Fuse string compiled into Node; must match byte for byte.
pub const SEA_SENTINEL_FUSE: &str = "NODE_SEA_FUSE_fce680ab2cc467b6e072b8b5df1996b2";

/// Mach-O segment that holds the blob on macOS.
pub const MACHO_SEGMENT_NAME: &str = "NODE_SEA";

/// The JSON document consumed by `node --experimental-sea-config`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeaConfig {
    /// Bundled main module.
    pub main: PathBuf,
    /// Where the blob is written.
    pub output: PathBuf,
    /// Suppresses Node's experimental feature warning.
    #[serde(rename = "disableExperimentalSEAWarning")]
    pub disable_experimental_sea_warning: bool,
    /// Build a V8 startup snapshot from `main`.
    pub use_snapshot: bool,
    /// Embed V8 code cache for `main`.
    pub use_code_cache: bool,
    /// Asset name → source path.
    pub assets: AssetMap,
}

impl SeaConfig {
    /// Builds the document for a bundled module written inside `build_dir`.
    pub fn new(settings: &Settings, main: PathBuf, build_dir: &Path, assets: AssetMap) -> Self {
        Self {
            main,
            output: build_dir.join(SEA_BLOB_FILE),
            disable_experimental_sea_warning: !settings.enable_experimental_sea_warning(),
            use_snapshot: settings.use_snapshot(),
            use_code_cache: settings.use_code_cache(),
            assets,
        }
    }
}

/// Injection options for the host platform.
pub fn inject_options() -> InjectOptions {
    InjectOptions {
        sentinel_fuse: SEA_SENTINEL_FUSE,
        macho_segment_name: cfg!(target_os = "macos").then_some(MACHO_SEGMENT_NAME),
    }
}

/// Assembles the executable `executable_name` inside `build_dir`.
///
/// Returns the path of the patched executable, still inside the workspace.
pub async fn assemble<R, J>(
    runtime: &R,
    injector: &J,
    config: &SeaConfig,
    build_dir: &Path,
    executable_name: &str,
) -> Result<PathBuf>
where
    R: SeaRuntime,
    J: BlobInjector,
{
    let config_path = build_dir.join(SEA_CONFIG_FILE);
    let document = serde_json::to_vec(config)?;
    tokio::fs::write(&config_path, document)
        .await
        .fs_context("writing SEA configuration", &config_path)?;
    log::debug!("Wrote {}", config_path.display());

    runtime
        .generate_blob(&config_path)
        .await
        .context("generating SEA blob")?;
    if !fs::exists(&config.output).await {
        crate::bail!(
            "blob generation succeeded but {} was not written",
            config.output.display()
        );
    }
    let blob = tokio::fs::read(&config.output)
        .await
        .fs_context("reading SEA blob", &config.output)?;

    let host = runtime.executable()?;
    let executable = build_dir.join(executable_name);
    fs::copy_file(&host, &executable).await?;
    make_owner_writable(&executable).await?;
    log::debug!("Duplicated {} to {}", host.display(), executable.display());

    injector
        .inject(&executable, SEA_RESOURCE_NAME, &blob, &inject_options())
        .await
        .with_context(|| format!("injecting blob into {}", executable.display()))?;

    Ok(executable)
}

/// Clears read-only bits on the duplicated runtime so it can be patched.
#[cfg(unix)]
async fn make_owner_writable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = tokio::fs::metadata(path)
        .await
        .fs_context("reading metadata", path)?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o200);
    tokio::fs::set_permissions(path, permissions)
        .await
        .fs_context("setting permissions", path)
}

#[cfg(not(unix))]
async fn make_owner_writable(path: &Path) -> Result<()> {
    let mut permissions = tokio::fs::metadata(path)
        .await
        .fs_context("reading metadata", path)?
        .permissions();
    if permissions.readonly() {
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);
        tokio::fs::set_permissions(path, permissions)
            .await
            .fs_context("setting permissions", path)?;
    }
    Ok(())
}
