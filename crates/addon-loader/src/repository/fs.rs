//! Filesystem-backed repository
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/
//!   stable                       # channel file
//!   beta
//!   packages/
//!     nginx/
//!       1.2.3/
//!         deployment.yaml
//!         rbac/role.yaml
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ManifestSet, Repository, validate_name};
use crate::channel::Channel;
use crate::context::Context;
use crate::{Error, Result};

/// Repository rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
    location: String,
}

impl FsRepository {
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            root: PathBuf::from(&location),
            location,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn manifest_dir(&self, component: &str, id: &str) -> PathBuf {
        self.root.join("packages").join(component).join(id)
    }
}

#[async_trait]
impl Repository for FsRepository {
    async fn load_channel(&self, ctx: &Context, name: &str) -> Result<Channel> {
        validate_name("channel", name)?;
        let path = self.root.join(name);
        tracing::debug!(path = %path.display(), "reading channel file");

        let content = ctx
            .run(async {
                tokio::fs::read_to_string(&path).await.map_err(|e| {
                    if e.kind() == ErrorKind::NotFound {
                        Error::ChannelNotFound {
                            name: name.to_string(),
                            location: self.location.clone(),
                        }
                    } else {
                        Error::io(&path, e)
                    }
                })
            })
            .await?;

        Channel::from_yaml(name, &content)
    }

    async fn load_manifest(&self, ctx: &Context, component: &str, id: &str) -> Result<ManifestSet> {
        validate_name("component", component)?;
        validate_name("version", id)?;
        let dir = self.manifest_dir(component, id);
        tracing::debug!(path = %dir.display(), "reading manifest directory");

        let not_found = || Error::ManifestNotFound {
            component: component.to_string(),
            version: id.to_string(),
            location: self.location.clone(),
        };

        let manifests = ctx
            .run(async {
                match tokio::fs::metadata(&dir).await {
                    Ok(meta) if meta.is_dir() => {}
                    Ok(_) => return Err(not_found()),
                    Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
                    Err(e) => return Err(Error::io(&dir, e)),
                }
                read_tree(&dir).await
            })
            .await?;

        if manifests.is_empty() {
            return Err(not_found());
        }
        Ok(manifests)
    }
}

/// Read every regular file below `dir`, keyed by `/`-separated relative path.
async fn read_tree(dir: &Path) -> Result<ManifestSet> {
    let mut manifests = ManifestSet::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&current)
            .await
            .map_err(|e| Error::io(&current, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io(&current, e))?
        {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(|e| Error::io(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
                continue;
            }

            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::io(&path, e))?;
            manifests.insert(relative_key(dir, &path), content);
        }
    }

    Ok(manifests)
}

fn relative_key(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
