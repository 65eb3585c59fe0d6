//! Error types for addon-loader

use std::path::PathBuf;

/// Result type for addon-loader operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`], looking through wrapping layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The supplied object does not expose the addon capability (caller bug).
    TypeMismatch,
    /// A channel or component/version combination does not exist.
    NotFound,
    /// The channel loaded but yielded no usable version.
    Resolution,
    /// I/O or network failure underneath a repository call.
    Backend,
    /// The context was cancelled or its deadline passed.
    Cancellation,
    /// Invalid loader configuration or addon input.
    Config,
}

/// Errors that can occur while resolving and loading addon manifests
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The object handed to the loader is not an addon
    #[error("object {type_name} was not an addon CommonObject")]
    TypeMismatch { type_name: String },

    /// No channel of that name exists at the repository location
    #[error("channel {name:?} not found at {location}")]
    ChannelNotFound { name: String, location: String },

    /// No manifests exist for the component at that version
    #[error("no manifests for {component} version {version} at {location}")]
    ManifestNotFound {
        component: String,
        version: String,
        location: String,
    },

    /// A channel, component, or version name that cannot address the store
    #[error("invalid {what} name: {name:?}")]
    InvalidName { what: &'static str, name: String },

    /// The channel has no version listed for the component
    #[error("could not find latest version in channel {channel:?}")]
    NoLatestVersion { channel: String, component: String },

    /// A channel entry carries a version that does not parse
    #[error("invalid version {version:?} for {component} in channel {channel:?}: {source}")]
    InvalidVersion {
        channel: String,
        component: String,
        version: String,
        #[source]
        source: semver::Error,
    },

    /// Channel file contents are not valid YAML for a channel
    #[error("failed to parse channel {name:?}: {source}")]
    ChannelParse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client for {location} could not be built: {message}")]
    HttpClient { location: String, message: String },

    #[error("HTTP request to {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Loading the named channel failed
    #[error("error loading channel {channel:?}: {source}")]
    LoadChannel {
        channel: String,
        #[source]
        source: Box<Error>,
    },

    /// Loading the manifest set for the resolved version failed
    #[error("error loading manifest: {source}")]
    LoadManifest {
        component: String,
        version: String,
        #[source]
        source: Box<Error>,
    },

    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    /// Addon resource could not be deserialized
    #[error("failed to parse addon: {0}")]
    AddonParse(#[source] serde_yaml::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify this error, looking through `LoadChannel`/`LoadManifest` wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::ChannelNotFound { .. }
            | Error::ManifestNotFound { .. }
            | Error::InvalidName { .. } => ErrorKind::NotFound,
            Error::NoLatestVersion { .. } | Error::InvalidVersion { .. } => ErrorKind::Resolution,
            Error::ChannelParse { .. }
            | Error::Io { .. }
            | Error::Http { .. }
            | Error::HttpClient { .. }
            | Error::HttpStatus { .. } => ErrorKind::Backend,
            Error::Cancelled | Error::DeadlineExceeded => ErrorKind::Cancellation,
            Error::LoadChannel { source, .. } | Error::LoadManifest { source, .. } => {
                source.kind()
            }
            Error::ConfigNotFound { .. } | Error::InvalidConfig { .. } | Error::AddonParse(_) => {
                ErrorKind::Config
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind() == ErrorKind::Cancellation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_latest_version_names_the_channel() {
        let err = Error::NoLatestVersion {
            channel: "stable".into(),
            component: "nginx".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not find latest version in channel \"stable\""
        );
        assert_eq!(err.kind(), ErrorKind::Resolution);
    }

    #[test]
    fn kind_looks_through_wrappers() {
        let err = Error::LoadChannel {
            channel: "beta".into(),
            source: Box::new(Error::ChannelNotFound {
                name: "beta".into(),
                location: "./channels".into(),
            }),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("beta"));

        let err = Error::LoadManifest {
            component: "nginx".into(),
            version: "1.0.0".into(),
            source: Box::new(Error::DeadlineExceeded),
        };
        assert!(err.is_cancelled());
        assert!(err.to_string().starts_with("error loading manifest: "));
    }

    #[test]
    fn io_error_is_backend() {
        let err = Error::io(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert!(err.to_string().contains("/tmp/x"));
    }
}
