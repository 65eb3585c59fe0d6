//! Manifest resolution for addon objects
//!
//! [`ManifestLoader::resolve_manifest`] turns an addon into its manifest set:
//!
//! 1. An explicit `spec.version` is used verbatim; the channel is never read.
//! 2. Otherwise the channel (default `stable`) is loaded and its latest
//!    version for the component becomes the id.
//! 3. The manifest set for component + id is loaded and returned.

use std::fmt;

use crate::channel::DEFAULT_CHANNEL;
use crate::config::LoaderConfig;
use crate::context::Context;
use crate::object::{CommonObject, Object};
use crate::repository::{Backend, HttpRepository, ManifestSet, Repository, RepositoryKind};
use crate::{Error, Result};

/// How a version id was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// Taken from the addon spec
    Explicit,
    /// Latest version in the named channel
    Channel { name: String },
}

/// Outcome of the version-resolution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub component: String,
    pub version: String,
    pub source: VersionSource,
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            VersionSource::Explicit => write!(f, "{}@{}", self.component, self.version),
            VersionSource::Channel { name } => {
                write!(f, "{}@{} (channel {})", self.component, self.version, name)
            }
        }
    }
}

/// Resolves addon objects to manifest sets through a [`Repository`].
///
/// Holds no mutable state, so one loader can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct ManifestLoader<R = Backend> {
    repo: R,
}

impl ManifestLoader<Backend> {
    /// Create a loader for `location`.
    ///
    /// `http://` and `https://` prefixes select the HTTP backend; anything
    /// else is a filesystem path. Nothing is opened until the first call.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            repo: Backend::for_location(location),
        }
    }

    /// Create a loader from configuration, applying the HTTP timeout if set.
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        let repo = match (RepositoryKind::for_location(&config.channel), config.timeout()) {
            (RepositoryKind::Http, Some(timeout)) => {
                Backend::Http(HttpRepository::with_timeout(config.channel.clone(), timeout)?)
            }
            _ => Backend::for_location(config.channel.clone()),
        };
        Ok(Self { repo })
    }
}

impl<R: Repository> ManifestLoader<R> {
    /// Create a loader over an existing repository.
    pub fn with_repository(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Resolve and load the manifests for `object`.
    ///
    /// Fails with [`Error::TypeMismatch`] when `object` is not an addon.
    pub async fn resolve_manifest(&self, ctx: &Context, object: &dyn Object) -> Result<ManifestSet> {
        let addon = object.as_common_object().ok_or_else(|| Error::TypeMismatch {
            type_name: object.type_name().to_string(),
        })?;
        self.resolve_common(ctx, addon).await
    }

    /// Resolve and load the manifests for an addon.
    pub async fn resolve_common(
        &self,
        ctx: &Context,
        addon: &dyn CommonObject,
    ) -> Result<ManifestSet> {
        let resolved = self.resolve_version(ctx, addon).await?;
        self.load_resolved(ctx, &resolved).await
    }

    /// Load the manifest set for an already resolved version.
    pub async fn load_resolved(
        &self,
        ctx: &Context,
        resolved: &ResolvedVersion,
    ) -> Result<ManifestSet> {
        async {
            ctx.check()?;
            self.repo
                .load_manifest(ctx, &resolved.component, &resolved.version)
                .await
        }
        .await
        .map_err(|source| Error::LoadManifest {
            component: resolved.component.clone(),
            version: resolved.version.clone(),
            source: Box::new(source),
        })
    }

    /// Decide which version of the addon's component to load.
    pub async fn resolve_version(
        &self,
        ctx: &Context,
        addon: &dyn CommonObject,
    ) -> Result<ResolvedVersion> {
        let component = addon.component_name();
        let spec = addon.common_spec();

        if !spec.version.is_empty() {
            tracing::info!(component, version = %spec.version, "using specified version");
            return Ok(ResolvedVersion {
                component: component.to_string(),
                version: spec.version.clone(),
                source: VersionSource::Explicit,
            });
        }

        let channel_name = if spec.channel.is_empty() {
            DEFAULT_CHANNEL
        } else {
            spec.channel.as_str()
        };

        let channel = async {
            ctx.check()?;
            self.repo.load_channel(ctx, channel_name).await
        }
        .await
        .map_err(|source| Error::LoadChannel {
            channel: channel_name.to_string(),
            source: Box::new(source),
        })?;

        let version = channel
            .latest(component)?
            .map(|v| v.version.clone())
            .ok_or_else(|| Error::NoLatestVersion {
                channel: channel_name.to_string(),
                component: component.to_string(),
            })?;

        tracing::info!(
            component,
            channel = channel_name,
            version = %version,
            "resolved version from channel"
        );

        Ok(ResolvedVersion {
            component: component.to_string(),
            version,
            source: VersionSource::Channel {
                name: channel_name.to_string(),
            },
        })
    }
}
