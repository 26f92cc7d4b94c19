//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the build as a
//! strictly linear sequence of stages inside a private workspace.

use super::publish::{PublishedExecutable, publish};
use crate::bundler::{
    Result, Settings,
    assets::resolve_assets,
    error::Error,
    package::{self, SeaConfig},
    settings::{PACKAGE_MANIFEST, STAGING_EXCLUDES},
    tools::{
        BlobInjector, DependencyInstaller, EsbuildBundler, ModuleBundler, NodeRuntime,
        NpmInstaller, PostjectInjector, SeaRuntime,
    },
    utils::fs,
    workspace::Workspace,
};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildStage {
    /// Entry point and output directory checks.
    Validate,
    /// Copying the program tree into the workspace.
    Stage,
    /// `npm install` in the staged tree (only with a manifest).
    InstallDependencies,
    /// Flattening the entry point into one module.
    Bundle,
    /// Checking and naming assets.
    ResolveAssets,
    /// Producing the patched executable.
    Assemble,
    /// Copying the executable to the output directory.
    Publish,
    /// Removing the workspace.
    Cleanup,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validate => "Validating arguments",
            Self::Stage => "Staging sources",
            Self::InstallDependencies => "Installing dependencies",
            Self::Bundle => "Bundling",
            Self::ResolveAssets => "Resolving assets",
            Self::Assemble => "Assembling executable",
            Self::Publish => "Publishing executable",
            Self::Cleanup => "Cleaning up",
        };
        f.write_str(label)
    }
}

type StageObserver = Box<dyn Fn(BuildStage)>;

/// Main bundler orchestrator.
///
/// Runs `Validate → Stage → InstallDependencies → Bundle → ResolveAssets →
/// Assemble → Publish`, then always `Cleanup`. Validation happens before any
/// workspace exists; from then on every exit path removes the workspace before
/// the result is returned, and nothing is written to the output directory
/// unless assembly fully succeeded.
///
/// The external tools are type parameters so they can be replaced; [`Bundler::new`]
/// wires up npm, esbuild, node and postject.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_sea::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> kodegen_bundler_sea::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .entry_point("server/index.js")
///     .output_directory("dist")
///     .build()?;
///
/// let published = Bundler::new(settings).bundle().await?;
/// println!("{} ({} bytes)", published.path.display(), published.size);
/// # Ok(())
/// # }
/// ```
pub struct Bundler<
    D = NpmInstaller,
    M = EsbuildBundler,
    R = NodeRuntime,
    J = PostjectInjector,
> {
    settings: Settings,
    installer: D,
    module_bundler: M,
    runtime: R,
    injector: J,
    observer: Option<StageObserver>,
}

impl<D, M, R, J> fmt::Debug for Bundler<D, M, R, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundler")
            .field("settings", &self.settings)
            .field("observer", &self.observer.as_ref().map(|_| "<observer>"))
            .finish_non_exhaustive()
    }
}

impl Bundler {
    /// Creates a bundler that uses the Node.js toolchain configured in `settings`.
    pub fn new(settings: Settings) -> Self {
        let tools = settings.tools().clone();
        Self::with_tools(
            settings,
            NpmInstaller::new(tools.npm),
            EsbuildBundler::new(tools.esbuild),
            NodeRuntime::new(tools.node),
            PostjectInjector::new(tools.postject),
        )
    }
}

impl<D, M, R, J> Bundler<D, M, R, J>
where
    D: DependencyInstaller,
    M: ModuleBundler,
    R: SeaRuntime,
    J: BlobInjector,
{
    /// Creates a bundler with explicit collaborators.
    pub fn with_tools(
        settings: Settings,
        installer: D,
        module_bundler: M,
        runtime: R,
        injector: J,
    ) -> Self {
        Self {
            settings,
            installer,
            module_bundler,
            runtime,
            injector,
            observer: None,
        }
    }

    /// Registers a callback invoked as each stage starts.
    pub fn on_stage(mut self, observer: impl Fn(BuildStage) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole build.
    ///
    /// # Returns
    ///
    /// The published executable. On error the output directory is unchanged and
    /// the workspace is gone.
    pub async fn bundle(&self) -> Result<PublishedExecutable> {
        self.enter(BuildStage::Validate);
        self.validate().await?;

        let mut workspace = Workspace::acquire(self.settings.temp_dir())?;
        let outcome = self.run_stages(&workspace).await;

        self.enter(BuildStage::Cleanup);
        let released = workspace.release();

        match (outcome, released) {
            (Ok(published), Ok(())) => Ok(published),
            (Ok(published), Err(e)) => {
                // Publish is the commit point.
                log::warn!("Executable published but workspace cleanup failed: {}", e);
                Ok(published)
            }
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup)) => {
                log::warn!("Workspace cleanup failed after error: {}", cleanup);
                Err(e)
            }
        }
    }

    fn enter(&self, stage: BuildStage) {
        log::info!("{}", stage);
        if let Some(observer) = &self.observer {
            observer(stage);
        }
    }

    async fn validate(&self) -> Result<()> {
        let entry_point = self.settings.entry_point();
        if !fs::exists(entry_point).await {
            return Err(Error::not_found(entry_point));
        }
        if fs::is_directory(entry_point).await {
            return Err(Error::wrong_kind(entry_point, "file"));
        }

        let output = self.settings.output_directory();
        if !fs::exists(output).await {
            return Err(Error::not_found(output));
        }
        if !fs::is_directory(output).await {
            return Err(Error::wrong_kind(output, "directory"));
        }

        Ok(())
    }

    async fn run_stages(&self, workspace: &Workspace) -> Result<PublishedExecutable> {
        self.enter(BuildStage::Stage);
        let staged_entry = self.stage(workspace).await?;
        let staged_dir = staged_entry
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| workspace.stage_dir());

        if fs::exists(&staged_dir.join(PACKAGE_MANIFEST)).await {
            self.enter(BuildStage::InstallDependencies);
            self.install_dependencies(&staged_dir).await?;
        } else {
            log::debug!("No {} in staged tree, skipping install", PACKAGE_MANIFEST);
        }

        self.enter(BuildStage::Bundle);
        let bundled = workspace.build_dir().join(file_name(&staged_entry)?);
        self.module_bundler.bundle(&staged_entry, &bundled).await?;

        self.enter(BuildStage::ResolveAssets);
        let assets = resolve_assets(self.settings.assets()).await?;

        self.enter(BuildStage::Assemble);
        let build_dir = workspace.build_dir();
        let config = SeaConfig::new(&self.settings, bundled, &build_dir, assets);
        let executable_name = self.settings.executable_file_name();
        let executable = package::assemble(
            &self.runtime,
            &self.injector,
            &config,
            &build_dir,
            &executable_name,
        )
        .await?;

        self.enter(BuildStage::Publish);
        let destination = self.settings.output_directory().join(&executable_name);
        publish(&executable, &destination).await
    }

    /// Copies the entry point's directory into the workspace and returns the
    /// staged entry point.
    ///
    /// The workspace itself is excluded, since it may live inside the source
    /// tree (`--temp-dir app/.tmp`, or an entry point directly in the temp area).
    async fn stage(&self, workspace: &Workspace) -> Result<PathBuf> {
        let source = self.settings.entry_point_directory();
        let exclude: Vec<&Path> = STAGING_EXCLUDES
            .iter()
            .map(|name| Path::new(*name))
            .chain([workspace.root()])
            .collect();
        let outcome = fs::copy_tree(source, &workspace.stage_dir(), &exclude).await?;
        log::debug!(
            "Staged {} into {} ({} files, {} directories, {} excluded)",
            source.display(),
            outcome.root.display(),
            outcome.files,
            outcome.directories,
            outcome.skipped
        );
        Ok(outcome.root.join(file_name(self.settings.entry_point())?))
    }

    async fn install_dependencies(&self, staged_dir: &Path) -> Result<()> {
        if !self.installer.is_available().await {
            return Err(Error::MissingTool {
                tool: self.installer.tool_name().to_string(),
                hint: None,
            });
        }
        self.installer.install(staged_dir).await
    }
}

fn file_name(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name().ok_or_else(|| Error::wrong_kind(path, "file"))
}
