//! Release channels
//!
//! A channel is a named catalog of component versions, stored as a YAML file:
//!
//! ```text
//! manifests:
//!   - package: nginx
//!     version: 2.0.0
//!   - package: nginx
//!     version: 1.9.1
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Channel consulted when an addon names none.
pub const DEFAULT_CHANNEL: &str = "stable";

/// One component version listed in a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Component the version belongs to
    pub package: String,
    /// Version identifier, used verbatim as the manifest id
    pub version: String,
}

impl VersionInfo {
    pub fn new(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChannelFile {
    #[serde(default)]
    manifests: Vec<VersionInfo>,
}

/// A named release stream listing available versions per component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub manifests: Vec<VersionInfo>,
}

impl Channel {
    pub fn new(name: impl Into<String>, manifests: Vec<VersionInfo>) -> Self {
        Self {
            name: name.into(),
            manifests,
        }
    }

    /// Parse a channel file. An empty document is an empty channel.
    pub fn from_yaml(name: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        if content.trim().is_empty() {
            return Ok(Self::new(name, Vec::new()));
        }

        let file: ChannelFile =
            serde_yaml::from_str(content).map_err(|source| Error::ChannelParse {
                name: name.clone(),
                source,
            })?;
        Ok(Self {
            name,
            manifests: file.manifests,
        })
    }

    /// Highest-precedence version listed for `component`.
    ///
    /// Returns `Ok(None)` when the component is not listed. Versions compare by
    /// semver precedence; a leading `v` and `major.minor` shorthand are
    /// accepted. Ties keep the entry listed first.
    pub fn latest(&self, component: &str) -> Result<Option<&VersionInfo>> {
        let mut latest: Option<(&VersionInfo, semver::Version)> = None;

        for entry in self.entries(component) {
            let parsed = self.parse_version(entry)?;
            if latest.as_ref().is_none_or(|(_, best)| parsed > *best) {
                latest = Some((entry, parsed));
            }
        }

        Ok(latest.map(|(entry, _)| entry))
    }

    /// Versions listed for `component`, newest first.
    pub fn versions(&self, component: &str) -> Result<Vec<&VersionInfo>> {
        let mut parsed = self
            .entries(component)
            .map(|entry| Ok((self.parse_version(entry)?, entry)))
            .collect::<Result<Vec<_>>>()?;
        parsed.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(parsed.into_iter().map(|(_, entry)| entry).collect())
    }

    /// Sorted, deduplicated component names listed in this channel.
    pub fn components(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.manifests.iter().map(|m| m.package.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    // Entries with an empty version cannot address a manifest set.
    fn entries<'a, 'b>(
        &'a self,
        component: &'b str,
    ) -> impl Iterator<Item = &'a VersionInfo> + use<'a, 'b> {
        self.manifests
            .iter()
            .filter(move |m| m.package == component && !m.version.trim().is_empty())
    }

    fn parse_version(&self, entry: &VersionInfo) -> Result<semver::Version> {
        parse_version(&entry.version).map_err(|source| Error::InvalidVersion {
            channel: self.name.clone(),
            component: entry.package.clone(),
            version: entry.version.clone(),
            source,
        })
    }
}

/// Parse a channel version, appending `.0` for `major.minor` shorthand.
fn parse_version(raw: &str) -> std::result::Result<semver::Version, semver::Error> {
    let s = raw.trim();
    let s = s.strip_prefix('v').unwrap_or(s);

    match semver::Version::parse(s) {
        Ok(v) => Ok(v),
        Err(err) => semver::Version::parse(&format!("{s}.0")).map_err(|_| err),
    }
}
