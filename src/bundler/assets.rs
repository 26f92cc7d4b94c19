//! Asset validation and naming.
//!
//! Each asset is shipped under the basename of its path, so the resolver's job
//! is to make sure every requested path exists and that no two of them would be
//! shipped under the same name.

use crate::bundler::{
    error::{Error, Result},
    settings::absolute,
    utils::fs,
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Asset display name → absolute source path.
///
/// Ordered so the serialized SEA configuration is identical across builds.
pub type AssetMap = BTreeMap<String, PathBuf>;

/// Resolves asset paths into an [`AssetMap`].
///
/// Paths are processed in the order given and are never copied, only checked.
/// The first missing path, or the first path whose basename was already taken,
/// stops resolution.
///
/// # Errors
///
/// - Reference error if a path does not exist.
/// - Duplicate asset error naming the shared basename and both paths.
pub async fn resolve_assets<P: AsRef<Path>>(paths: &[P]) -> Result<AssetMap> {
    let mut assets = AssetMap::new();

    for path in paths {
        let resolved = absolute(path.as_ref())?;

        if !fs::exists(&resolved).await {
            return Err(Error::not_found(resolved));
        }

        let name = resolved
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "'{}' has no UTF-8 file name to use as an asset name",
                    resolved.display()
                ))
            })?;

        if let Some(first) = assets.get(&name) {
            return Err(Error::DuplicateAsset {
                name,
                first: first.clone(),
                second: resolved,
            });
        }

        log::debug!("Asset '{}' -> {}", name, resolved.display());
        assets.insert(name, resolved);
    }

    Ok(assets)
}
