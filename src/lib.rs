//! Single executable application bundler for Node.js programs.
//!
//! This library stages a Node.js program into a private workspace, bundles it
//! into one module, and embeds it into a copy of the Node.js runtime, producing
//! a single executable.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
