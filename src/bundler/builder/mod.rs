//! Build orchestration.
//!
//! This module provides the main [`Bundler`] orchestrator that turns a Node.js
//! entry point into a single executable.
//!
//! # Overview
//!
//! The bundler:
//! 1. Validates the request from [`Settings`](crate::bundler::Settings)
//! 2. Stages the program tree into a private workspace
//! 3. Installs dependencies and bundles the entry point
//! 4. Assembles a patched copy of the Node runtime
//! 5. Publishes it and returns a [`PublishedExecutable`]
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the published file
//! - [`orchestrator`] - Main [`Bundler`] struct and stage sequencing
//! - [`publish`] - The single write into the output directory

mod checksum;
mod orchestrator;
mod publish;

pub use orchestrator::{BuildStage, Bundler};
pub use publish::PublishedExecutable;
