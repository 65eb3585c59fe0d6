//! HTTP-backed repository
//!
//! Resolves the filesystem layout against a base URL:
//! `<base>/<channel>` for channels and
//! `<base>/packages/<component>/<version>/manifest.yaml` for manifests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::{ManifestSet, Repository, validate_name};
use crate::channel::Channel;
use crate::context::Context;
use crate::{Error, Result};

/// File name under which an HTTP manifest is returned.
pub const HTTP_MANIFEST_FILE: &str = "manifest.yaml";

/// Repository served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpRepository {
    location: String,
    base_url: String,
    // A client that failed to build is reported on first use.
    client: std::result::Result<Client, String>,
}

impl HttpRepository {
    /// Create a repository for `base_url`. No connection is made and this
    /// never fails; a client that cannot be built errors on the first request.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder().build().map_err(|err| {
            tracing::warn!(error = %err, "failed to build HTTP client");
            err.to_string()
        });
        Self::from_parts(base_url.into(), client)
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self::from_parts(base_url.into(), Ok(client))
    }

    fn from_parts(location: String, client: std::result::Result<Client, String>) -> Self {
        let base_url = if location.ends_with('/') {
            location.clone()
        } else {
            format!("{location}/")
        };
        Self {
            location,
            base_url,
            client,
        }
    }

    /// Build a client that gives up on requests after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| Error::Http {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `url`; `Ok(None)` on 404.
    async fn fetch(&self, ctx: &Context, url: &str) -> Result<Option<String>> {
        ctx.run(async {
            let client = self.client.as_ref().map_err(|message| Error::HttpClient {
                location: self.location.clone(),
                message: message.clone(),
            })?;
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|source| Error::Http {
                    url: url.to_string(),
                    source,
                })?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if !status.is_success() {
                return Err(Error::HttpStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response.text().await.map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;
            Ok(Some(body))
        })
        .await
    }
}

#[async_trait]
impl Repository for HttpRepository {
    async fn load_channel(&self, ctx: &Context, name: &str) -> Result<Channel> {
        validate_name("channel", name)?;
        let url = self.url(name);
        tracing::debug!(%url, "fetching channel");

        match self.fetch(ctx, &url).await? {
            Some(body) => Channel::from_yaml(name, &body),
            None => Err(Error::ChannelNotFound {
                name: name.to_string(),
                location: self.location.clone(),
            }),
        }
    }

    async fn load_manifest(&self, ctx: &Context, component: &str, id: &str) -> Result<ManifestSet> {
        validate_name("component", component)?;
        validate_name("version", id)?;
        let url = self.url(&format!("packages/{component}/{id}/{HTTP_MANIFEST_FILE}"));
        tracing::debug!(%url, "fetching manifest");

        match self.fetch(ctx, &url).await? {
            Some(body) => Ok(ManifestSet::from([(HTTP_MANIFEST_FILE.to_string(), body)])),
            None => Err(Error::ManifestNotFound {
                component: component.to_string(),
                version: id.to_string(),
                location: self.location.clone(),
            }),
        }
    }
}
