//! [`TestChannels`] builder for channel-directory test scenarios.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A temporary channel root laid out the way the filesystem repository
/// expects it.
///
/// # Example
///
/// ```rust,no_run
/// use addon_test_utils::TestChannels;
///
/// let channels = TestChannels::new();
/// channels.write_channel("stable", &[("nginx", "2.0.0")]);
/// channels.write_manifest("nginx", "2.0.0", "deployment.yaml", "kind: Deployment\n");
/// let location = channels.location();
/// ```
pub struct TestChannels {
    temp_dir: TempDir,
}

impl Default for TestChannels {
    fn default() -> Self {
        Self::new()
    }
}

impl TestChannels {
    /// Create an empty channel root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root path as a location string for `ManifestLoader::new`.
    pub fn location(&self) -> String {
        self.root().to_string_lossy().into_owned()
    }

    /// Write channel `name` listing `(package, version)` entries.
    pub fn write_channel(&self, name: &str, entries: &[(&str, &str)]) {
        let mut content = String::from("manifests:\n");
        for (package, version) in entries {
            content.push_str(&format!(
                "  - package: {package}\n    version: \"{version}\"\n"
            ));
        }
        self.write_raw_channel(name, &content);
    }

    /// Write channel `name` with arbitrary content.
    pub fn write_raw_channel(&self, name: &str, content: &str) {
        fs::write(self.root().join(name), content).unwrap();
    }

    /// Write one manifest file for `component` at `version`.
    ///
    /// `file` may contain `/` to create nested directories.
    pub fn write_manifest(&self, component: &str, version: &str, file: &str, content: &str) {
        let path = self
            .root()
            .join("packages")
            .join(component)
            .join(version)
            .join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Create an empty manifest directory for `component` at `version`.
    pub fn create_empty_version(&self, component: &str, version: &str) {
        fs::create_dir_all(self.root().join("packages").join(component).join(version)).unwrap();
    }
}
