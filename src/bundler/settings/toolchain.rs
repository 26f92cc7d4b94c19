//! External tool locations.

use std::path::PathBuf;

/// Explicit paths for the external collaborators.
///
/// Any tool left as `None` is discovered at the point of use (see
/// [`tools::detection`](crate::bundler::tools::detection)).
#[derive(Clone, Debug, Default)]
pub struct ToolPaths {
    /// Node.js runtime; also the executable image that gets duplicated.
    pub node: Option<PathBuf>,
    /// npm, used to reinstall dependencies in the staged tree.
    pub npm: Option<PathBuf>,
    /// esbuild CLI.
    pub esbuild: Option<PathBuf>,
    /// postject CLI.
    pub postject: Option<PathBuf>,
}
