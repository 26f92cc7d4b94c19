//! Kodegen SEA - Node.js single executable application bundler.
//!
//! This binary packages a Node.js program into one executable and publishes it
//! to the output directory, or reports a categorized error.

use kodegen_bundler_sea::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", e.kind(), e.message());
            1
        }
    };

    process::exit(exit_code);
}
