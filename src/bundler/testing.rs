//! In-process stand-ins for the external tools, for pipeline tests.

use crate::bundler::{
    error::{Error, Result},
    package::SeaConfig,
    tools::{BlobInjector, DependencyInstaller, InjectOptions, ModuleBundler, SeaRuntime},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Bytes of the fake runtime executable.
pub const FAKE_RUNTIME_IMAGE: &[u8] = b"#fake-node-image\n";

#[derive(Default)]
pub struct FakeInstaller {
    unavailable: bool,
    fail: bool,
    installs: AtomicUsize,
}

impl FakeInstaller {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn missing() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }
}

impl DependencyInstaller for FakeInstaller {
    fn tool_name(&self) -> &str {
        "npm"
    }

    async fn is_available(&self) -> bool {
        !self.unavailable
    }

    async fn install(&self, package_dir: &Path) -> Result<()> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::ToolFailed {
                command: "npm install".into(),
                code: Some(1),
                stderr: "ERESOLVE unable to resolve dependency tree".into(),
            });
        }
        let modules = package_dir.join("node_modules");
        std::fs::create_dir_all(&modules)?;
        std::fs::write(modules.join(".installed"), "")?;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBundler {
    fail: bool,
    entries: Mutex<Vec<PathBuf>>,
}

impl FakeBundler {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> Vec<PathBuf> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ModuleBundler for FakeBundler {
    async fn bundle(&self, entry_point: &Path, outfile: &Path) -> Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry_point.to_path_buf());
        }
        if self.fail {
            return Err(Error::Bundle(format!(
                "{}: Could not resolve \"missing-module\"",
                entry_point.display()
            )));
        }
        std::fs::copy(entry_point, outfile)?;
        Ok(())
    }
}

pub struct FakeRuntime {
    image: PathBuf,
    fail: bool,
}

impl FakeRuntime {
    /// Writes the fake runtime image into `dir`.
    pub fn new(dir: &Path) -> Self {
        let image = dir.join("fake-node");
        std::fs::write(&image, FAKE_RUNTIME_IMAGE).unwrap();
        Self { image, fail: false }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn image(&self) -> &Path {
        &self.image
    }
}

impl SeaRuntime for FakeRuntime {
    fn executable(&self) -> Result<PathBuf> {
        Ok(self.image.clone())
    }

    async fn generate_blob(&self, config: &Path) -> Result<()> {
        if self.fail {
            return Err(Error::ToolFailed {
                command: "node --experimental-sea-config".into(),
                code: Some(9),
                stderr: "Cannot read main script".into(),
            });
        }
        let config: SeaConfig = serde_json::from_slice(&std::fs::read(config)?)?;
        let mut blob = Vec::new();
        for name in config.assets.keys() {
            writeln!(blob, "{name}")?;
        }
        blob.extend(std::fs::read(&config.main)?);
        std::fs::write(&config.output, blob)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeInjector {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeInjector {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BlobInjector for FakeInjector {
    async fn inject(
        &self,
        executable: &Path,
        _resource_name: &str,
        blob: &[u8],
        _options: &InjectOptions,
    ) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::ToolFailed {
                command: "postject".into(),
                code: Some(1),
                stderr: "Could not find the sentinel".into(),
            });
        }
        let mut file = std::fs::OpenOptions::new().append(true).open(executable)?;
        file.write_all(blob)?;
        Ok(())
    }
}
