//! Single executable application bundler.
//!
//! Packages a Node.js program into one self-contained executable by staging it
//! into a private workspace, bundling it with esbuild, and injecting the result
//! into a copy of the Node runtime.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_sea::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_sea::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .entry_point("app/main.js")
//!     .output_directory("dist")
//!     .assets(vec!["app/config.json".into()])
//!     .build()?;
//!
//! let published = Bundler::new(settings).bundle().await?;
//! println!("SHA256: {}", published.checksum);
//! # Ok(())
//! # }
//! ```

pub mod assets;
mod builder;
pub mod error;
pub mod package;
mod settings;
pub mod tools;
mod utils;
mod workspace;

#[cfg(test)]
mod testing;

pub use assets::{AssetMap, resolve_assets};
pub use builder::{BuildStage, Bundler, PublishedExecutable};
pub use error::{Error, ErrorKind, Result};
pub use settings::{PACKAGE_MANIFEST, STAGING_EXCLUDES, Settings, SettingsBuilder, ToolPaths};
pub use workspace::Workspace;
