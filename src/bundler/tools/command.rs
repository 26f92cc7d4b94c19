//! External process execution.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Output, Stdio},
};
use tokio::process::Command;

/// A resolved external tool: a program plus any fixed leading arguments.
///
/// Leading arguments exist for tools reached through a launcher, e.g.
/// `npx --yes esbuild`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl ToolCommand {
    /// A tool invoked directly.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// A package binary run through `npx --yes <package>`.
    pub fn via_npx(npx: impl Into<PathBuf>, package: &str) -> Self {
        Self {
            program: npx.into(),
            leading_args: vec!["--yes".into(), package.into()],
        }
    }

    /// Path of the program that is spawned.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Human-readable command line for logs and errors.
    pub fn display_with<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.leading_args.iter().map(OsString::as_os_str))
            .chain(args.iter().map(AsRef::as_ref))
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the tool to completion and returns its output.
    ///
    /// Stdout and stderr are captured. A spawn failure becomes
    /// [`Error::CommandFailed`]; a non-zero exit becomes [`Error::ToolFailed`]
    /// carrying the trimmed stderr.
    pub async fn run<S: AsRef<OsStr>>(&self, args: &[S], cwd: Option<&Path>) -> Result<Output> {
        let command_line = self.display_with(args);
        log::debug!("Running: {}", command_line);

        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        let output = command.output().await.map_err(|error| Error::CommandFailed {
            command: command_line.clone(),
            error,
        })?;

        if !output.status.success() {
            return Err(Error::ToolFailed {
                command: command_line,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npx_launcher_prefixes_package() {
        let tool = ToolCommand::via_npx("/usr/bin/npx", "postject");
        assert_eq!(
            tool.display_with(&["app", "NODE_SEA_BLOB"]),
            "/usr/bin/npx --yes postject app NODE_SEA_BLOB"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_reports_stderr() {
        let tool = ToolCommand::new("sh");
        let err = tool
            .run(&["-c", "echo broken >&2; exit 3"], None)
            .await
            .unwrap_err();
        match err {
            Error::ToolFailed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_in_requested_directory() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("marker"), "").unwrap();
        let output = ToolCommand::new("ls")
            .run(&[] as &[&str], Some(temp.path()))
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&output.stdout).contains("marker"));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_failure() {
        let err = ToolCommand::new("kodegen-sea-definitely-not-installed")
            .run(&["-v"], None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
