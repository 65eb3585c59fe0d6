//! Manifest repository abstraction
//!
//! A [`Repository`] loads channels and manifest sets from a storage location.
//! Two backends exist: [`FsRepository`] reads a local directory tree and
//! [`HttpRepository`] fetches the same logical paths from a base URL.
//! [`Backend`] picks one from a location string:
//!
//! ```text
//! http://...  https://...   -> Backend::Http
//! anything else             -> Backend::Filesystem
//! ```
//!
//! The choice is a plain prefix test, not a URL parse. `./http-mirror` and
//! `/srv/https://x` are filesystem paths.

mod fs;
mod http;

pub use fs::FsRepository;
pub use http::HttpRepository;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::channel::Channel;
use crate::context::Context;
use crate::{Error, Result};

/// Relative manifest path to raw manifest text.
pub type ManifestSet = HashMap<String, String>;

/// Backend contract for channel and manifest retrieval.
///
/// Implementations must abort promptly with a cancellation error when `ctx`
/// fires, and report missing channels or manifests as not-found errors
/// rather than I/O errors.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn load_channel(&self, ctx: &Context, name: &str) -> Result<Channel>;

    async fn load_manifest(&self, ctx: &Context, component: &str, id: &str) -> Result<ManifestSet>;
}

#[async_trait]
impl<R: Repository + ?Sized> Repository for Arc<R> {
    async fn load_channel(&self, ctx: &Context, name: &str) -> Result<Channel> {
        (**self).load_channel(ctx, name).await
    }

    async fn load_manifest(&self, ctx: &Context, component: &str, id: &str) -> Result<ManifestSet> {
        (**self).load_manifest(ctx, component, id).await
    }
}

/// Which backend a location string selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    Filesystem,
    Http,
}

impl RepositoryKind {
    pub fn for_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http
        } else {
            Self::Filesystem
        }
    }
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filesystem => f.write_str("filesystem"),
            Self::Http => f.write_str("http"),
        }
    }
}

/// The repository variant chosen for a location.
#[derive(Debug, Clone)]
pub enum Backend {
    Filesystem(FsRepository),
    Http(HttpRepository),
}

impl Backend {
    /// Select a backend for `location`. Nothing is validated or opened yet.
    pub fn for_location(location: impl Into<String>) -> Self {
        let location = location.into();
        match RepositoryKind::for_location(&location) {
            RepositoryKind::Http => Self::Http(HttpRepository::new(location)),
            RepositoryKind::Filesystem => Self::Filesystem(FsRepository::new(location)),
        }
    }

    pub fn kind(&self) -> RepositoryKind {
        match self {
            Self::Filesystem(_) => RepositoryKind::Filesystem,
            Self::Http(_) => RepositoryKind::Http,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Self::Filesystem(repo) => repo.location(),
            Self::Http(repo) => repo.location(),
        }
    }
}

#[async_trait]
impl Repository for Backend {
    async fn load_channel(&self, ctx: &Context, name: &str) -> Result<Channel> {
        match self {
            Self::Filesystem(repo) => repo.load_channel(ctx, name).await,
            Self::Http(repo) => repo.load_channel(ctx, name).await,
        }
    }

    async fn load_manifest(&self, ctx: &Context, component: &str, id: &str) -> Result<ManifestSet> {
        match self {
            Self::Filesystem(repo) => repo.load_manifest(ctx, component, id).await,
            Self::Http(repo) => repo.load_manifest(ctx, component, id).await,
        }
    }
}

/// Reject names that could escape the repository layout.
///
/// Allowed: non-empty, ASCII alphanumerics plus `-`, `_`, `.`, and not `.`
/// or `..`. Versions may also carry `+build` metadata.
pub(crate) fn validate_name(what: &'static str, name: &str) -> Result<()> {
    let allow_plus = what == "version";
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') || (allow_plus && c == '+')
        });

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName {
            what,
            name: name.to_string(),
        })
    }
}
