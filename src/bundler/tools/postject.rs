//! Resource injection with postject.

use super::{BlobInjector, InjectOptions, detection};
use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
};

/// Embeds the SEA blob into the duplicated runtime with `postject`.
#[derive(Clone, Debug, Default)]
pub struct PostjectInjector {
    configured: Option<PathBuf>,
}

impl PostjectInjector {
    /// Creates an injector, optionally pinned to a specific postject.
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self { configured }
    }

    fn args(
        executable: &Path,
        resource_name: &str,
        blob_file: &Path,
        options: &InjectOptions,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            executable.as_os_str().to_owned(),
            resource_name.into(),
            blob_file.as_os_str().to_owned(),
            "--sentinel-fuse".into(),
            options.sentinel_fuse.into(),
        ];
        if let Some(segment) = options.macho_segment_name {
            args.push("--macho-segment-name".into());
            args.push(segment.into());
        }
        args
    }
}

impl BlobInjector for PostjectInjector {
    async fn inject(
        &self,
        executable: &Path,
        resource_name: &str,
        blob: &[u8],
        options: &InjectOptions,
    ) -> Result<()> {
        let postject =
            detection::resolve_package_binary("postject", self.configured.as_deref(), &[])
                .ok_or_else(|| Error::MissingTool {
                    tool: "postject".into(),
                    hint: Some("or npx".into()),
                })?;

        // postject reads the resource from a file.
        let dir = executable
            .parent()
            .ok_or_else(|| Error::wrong_kind(executable, "file path"))?;
        let mut blob_file = tempfile::Builder::new()
            .prefix("resource-")
            .suffix(".blob")
            .tempfile_in(dir)
            .fs_context("creating resource file in", dir)?;
        blob_file
            .write_all(blob)
            .fs_context("writing resource file", blob_file.path())?;
        blob_file
            .flush()
            .fs_context("writing resource file", blob_file.path())?;

        log::info!(
            "Injecting {} ({} bytes) into {}",
            resource_name,
            blob.len(),
            executable.display()
        );
        postject
            .run(
                &Self::args(executable, resource_name, blob_file.path(), options),
                Some(dir),
            )
            .await?;
        Ok(())
    }
}
