//! External collaborators of the pipeline.
//!
//! The bundler never reimplements dependency installation, bundling, blob
//! generation or binary patching. Each is reached through a narrow trait so the
//! pipeline only depends on inputs, the produced artifact, and failure:
//!
//! | Trait | Default implementation | Tool |
//! |-------|------------------------|------|
//! | [`DependencyInstaller`] | [`NpmInstaller`] | `npm install` |
//! | [`ModuleBundler`] | [`EsbuildBundler`] | `esbuild --bundle` |
//! | [`SeaRuntime`] | [`NodeRuntime`] | `node --experimental-sea-config` |
//! | [`BlobInjector`] | [`PostjectInjector`] | `postject` |

#![allow(async_fn_in_trait)]

mod command;
pub mod detection;
mod esbuild;
mod node;
mod npm;
mod postject;

pub use command::ToolCommand;
pub use esbuild::EsbuildBundler;
pub use node::NodeRuntime;
pub use npm::NpmInstaller;
pub use postject::PostjectInjector;

use crate::bundler::error::Result;
use std::path::{Path, PathBuf};

/// Reinstalls a package's dependencies in place.
pub trait DependencyInstaller {
    /// Name reported when the installer is missing.
    fn tool_name(&self) -> &str;

    /// Whether the installer can run on this host.
    async fn is_available(&self) -> bool;

    /// Installs dependencies for the manifest in `package_dir`, mutating it.
    async fn install(&self, package_dir: &Path) -> Result<()>;
}

/// Flattens an entry point and its imports into one module file.
pub trait ModuleBundler {
    /// Writes the bundled module to `outfile`.
    ///
    /// Failures of the bundler itself are Bundle-kind errors.
    async fn bundle(&self, entry_point: &Path, outfile: &Path) -> Result<()>;
}

/// The runtime whose executable becomes the application.
pub trait SeaRuntime {
    /// Path of the runtime executable image to duplicate.
    fn executable(&self) -> Result<PathBuf>;

    /// Produces the preparation blob described by the SEA configuration at `config`.
    async fn generate_blob(&self, config: &Path) -> Result<()>;
}

/// Options for embedding a resource into an executable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InjectOptions {
    /// Marker string the runtime flips to detect an embedded blob.
    pub sentinel_fuse: &'static str,
    /// Mach-O segment for the resource; only set on macOS.
    pub macho_segment_name: Option<&'static str>,
}

/// Embeds a named resource into an executable in place.
pub trait BlobInjector {
    /// Injects `blob` under `resource_name` into `executable`.
    async fn inject(
        &self,
        executable: &Path,
        resource_name: &str,
        blob: &[u8],
        options: &InjectOptions,
    ) -> Result<()>;
}
