//! Command line interface for the kodegen SEA bundler.
//!
//! Parses arguments, runs one build, and reports the outcome.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    bundler::{Bundler, PublishedExecutable, Settings},
    error::{CliError, Result},
};

/// Main CLI entry point
///
/// Returns the process exit code: 0 when the executable was published, 1 for
/// every failure. Failures are printed as `<Kind>: <message>`.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);

    match execute(&args, &config).await {
        Ok(()) => Ok(0),
        Err(e) => {
            log::debug!("Build failed: {:?}", e);
            config.output().error(&e.kind().to_string(), &e.message())?;
            Ok(1)
        }
    }
}

async fn execute(args: &Args, config: &RuntimeConfig) -> Result<()> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let settings = args.settings()?;
    describe(&settings, config)?;

    let existing = settings.output_directory().join(settings.executable_file_name());
    if existing.is_file() {
        config.warn(&format!(
            "'{}' already exists and will be replaced if the build succeeds",
            existing.display()
        ))?;
    }

    let output = config.output().clone();
    let bundler = Bundler::new(settings).on_stage(move |stage| {
        if let Err(e) = output.progress(&stage.to_string()) {
            log::debug!("Failed to print progress for '{}': {}", stage, e);
        }
    });

    let published = bundler.bundle().await?;
    report(&published, bundler.settings(), config)?;
    Ok(())
}

fn describe(settings: &Settings, config: &RuntimeConfig) -> Result<()> {
    config.verbose_println(&format!("Entry point: {}", settings.entry_point().display()))?;
    config.verbose_println(&format!(
        "Output directory: {}",
        settings.output_directory().display()
    ))?;
    let tools = settings.tools();
    for (tool, path) in [
        ("node", &tools.node),
        ("npm", &tools.npm),
        ("esbuild", &tools.esbuild),
        ("postject", &tools.postject),
    ] {
        if let Some(path) = path {
            config.verbose_println(&format!("Using {tool}: {}", path.display()))?;
        }
    }
    Ok(())
}

fn report(
    published: &PublishedExecutable,
    settings: &Settings,
    config: &RuntimeConfig,
) -> Result<()> {
    config.success(&format!(
        "'{}' has been successfully written to {}",
        settings.executable_file_name(),
        settings.output_directory().display()
    ))?;
    if config.output().is_verbose() {
        config.indent(&format!("size: {} bytes", published.size))?;
        config.indent(&format!("sha256: {}", published.checksum))?;
    }
    Ok(())
}
