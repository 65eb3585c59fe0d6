//! Channel resolution and manifest loading for declarative addons.
//!
//! An addon names a component, optionally a version, and optionally a release
//! channel. This crate decides which version applies and loads that version's
//! manifests from a repository on the local filesystem or behind an HTTP base
//! URL.
//!
//! # Architecture
//!
//! ```text
//!        ManifestLoader            resolve_manifest(ctx, addon)
//!              |
//!           Backend                chosen once from the location string
//!         /        \
//!  FsRepository  HttpRepository    load_channel / load_manifest
//!              |
//!           Channel                latest(component)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use addon_loader::{Addon, CommonSpec, Context, ManifestLoader};
//!
//! # async fn example() -> addon_loader::Result<()> {
//! let loader = ManifestLoader::new("./channels");
//! let addon = Addon::new("Nginx", CommonSpec::default());
//!
//! let manifests = loader.resolve_manifest(&Context::background(), &addon).await?;
//! for (path, content) in &manifests {
//!     println!("{path}: {} bytes", content.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod context;
pub mod error;
pub mod loader;
pub mod logging;
pub mod object;
pub mod repository;

pub use channel::{Channel, DEFAULT_CHANNEL, VersionInfo};
pub use config::{DEFAULT_CHANNEL_LOCATION, LoaderConfig};
pub use context::Context;
pub use error::{Error, ErrorKind, Result};
pub use loader::{ManifestLoader, ResolvedVersion, VersionSource};
pub use object::{Addon, AddonSpec, CommonObject, CommonSpec, Object, ObjectMeta};
pub use repository::{
    Backend, FsRepository, HttpRepository, ManifestSet, Repository, RepositoryKind,
};
