//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap and turns the parsed
//! arguments into bundler [`Settings`].

use crate::bundler::{self, Settings, SettingsBuilder, ToolPaths};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Node.js single executable application bundler
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_sea",
    version,
    disable_version_flag = true,
    about = "Packages a Node.js program into a single executable application",
    long_about = "Packages a Node.js program and its dependencies into one executable.

The entry point's directory is staged into a private temporary workspace, dependencies
are installed there when a package.json is present, the program is bundled with esbuild,
and the bundle is injected into a copy of the Node.js runtime.

Usage:
  kodegen_sea server/index.js
  kodegen_sea app/main --name myapp --output dist --assets logo.png config.json
  kodegen_sea index.js -s -c

Exit code 0 = executable guaranteed to exist in the output directory."
)]
pub struct Args {
    /// Entry point of the program (`.js` is appended when missing)
    #[arg(value_name = "ENTRY")]
    pub entry: PathBuf,

    /// Name of the executable (defaults to the entry point's file name)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Directory that receives the executable (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Keep Node's experimental feature warning in the executable
    #[arg(short = 'w', long)]
    pub enable_experimental_sea_warning: bool,

    /// Build a V8 startup snapshot from the entry point
    #[arg(short = 's', long)]
    pub use_snapshot: bool,

    /// Embed V8 code cache for the entry point
    #[arg(short = 'c', long)]
    pub use_code_cache: bool,

    /// Files to embed, addressed by their file name at runtime
    #[arg(short, long, value_name = "PATH", num_args = 1.., action = ArgAction::Append)]
    pub assets: Vec<PathBuf>,

    /// Node.js executable to embed into (defaults to `node` on PATH)
    #[arg(long, value_name = "PATH", env = "KODEGEN_SEA_NODE")]
    pub node: Option<PathBuf>,

    /// npm executable used to install dependencies
    #[arg(long, value_name = "PATH", env = "KODEGEN_SEA_NPM")]
    pub npm: Option<PathBuf>,

    /// esbuild executable used for bundling
    #[arg(long, value_name = "PATH", env = "KODEGEN_SEA_ESBUILD")]
    pub esbuild: Option<PathBuf>,

    /// postject executable used for blob injection
    #[arg(long, value_name = "PATH", env = "KODEGEN_SEA_POSTJECT")]
    pub postject: Option<PathBuf>,

    /// Parent directory for the temporary build workspace
    #[arg(long, value_name = "DIR", env = "KODEGEN_SEA_TMPDIR")]
    pub temp_dir: Option<PathBuf>,

    /// Print only errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print tool locations and artifact details
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.entry.as_os_str().is_empty() {
            return Err("Entry point cannot be empty".to_string());
        }
        if self.name.as_deref().is_some_and(str::is_empty) {
            return Err("Name cannot be empty".to_string());
        }
        Ok(())
    }

    /// Builds the bundler settings described by these arguments.
    pub fn settings(&self) -> bundler::Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .entry_point(&self.entry)
            .assets(self.assets.clone())
            .enable_experimental_sea_warning(self.enable_experimental_sea_warning)
            .use_snapshot(self.use_snapshot)
            .use_code_cache(self.use_code_cache)
            .tools(ToolPaths {
                node: self.node.clone(),
                npm: self.npm.clone(),
                esbuild: self.esbuild.clone(),
                postject: self.postject.clone(),
            });

        if let Some(name) = &self.name {
            builder = builder.name(name);
        }
        if let Some(output) = &self.output {
            builder = builder.output_directory(output);
        }
        if let Some(temp_dir) = &self.temp_dir {
            builder = builder.temp_dir(temp_dir);
        }

        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
