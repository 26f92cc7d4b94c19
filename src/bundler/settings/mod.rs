//! Configuration structures for a single executable build.
//!
//! [`Settings`] is the immutable build request handed to the [`Bundler`](crate::bundler::Bundler);
//! it is produced by [`SettingsBuilder`], which normalizes the entry point and derives
//! the executable's display name.

mod builder;
mod core;
mod toolchain;

pub(crate) use builder::absolute;
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use toolchain::ToolPaths;

/// Lockfiles and dependency caches that are never staged.
pub const STAGING_EXCLUDES: [&str; 4] = [
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "node_modules",
];

/// Manifest whose presence in the staged tree triggers a dependency install.
pub const PACKAGE_MANIFEST: &str = "package.json";
