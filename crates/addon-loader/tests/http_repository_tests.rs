//! HTTP repository against a mock server.

use std::time::Duration;

use addon_loader::{
    Addon, CommonSpec, Context, Error, ErrorKind, HttpRepository, LoaderConfig, ManifestLoader,
    Repository, RepositoryKind,
};
use pretty_assertions::assert_eq;

const CHANNEL: &str = "manifests:\n  - package: nginx\n    version: 1.9.0\n  - package: nginx\n    version: 2.0.0\n";
const MANIFEST: &str = "apiVersion: apps/v1\nkind: Deployment\n";

#[tokio::test]
async fn test_load_channel_fetches_channel_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/channels/stable")
        .with_status(200)
        .with_body(CHANNEL)
        .expect(1)
        .create_async()
        .await;

    let repo = HttpRepository::new(format!("{}/channels", server.url()));
    let channel = repo
        .load_channel(&Context::background(), "stable")
        .await
        .unwrap();

    assert_eq!(channel.latest("nginx").unwrap().unwrap().version, "2.0.0");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_channel_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/nightly")
        .with_status(404)
        .create_async()
        .await;

    let repo = HttpRepository::new(server.url());
    let err = repo
        .load_channel(&Context::background(), "nightly")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ChannelNotFound { .. }));
}

#[tokio::test]
async fn test_server_error_is_backend_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/stable")
        .with_status(500)
        .create_async()
        .await;

    let repo = HttpRepository::new(server.url());
    let err = repo
        .load_channel(&Context::background(), "stable")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert_eq!(err.kind(), ErrorKind::Backend);
}

#[tokio::test]
async fn test_load_manifest_returns_single_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/packages/nginx/2.0.0/manifest.yaml")
        .with_status(200)
        .with_body(MANIFEST)
        .expect(1)
        .create_async()
        .await;

    let repo = HttpRepository::new(format!("{}/", server.url()));
    let manifests = repo
        .load_manifest(&Context::background(), "nginx", "2.0.0")
        .await
        .unwrap();

    assert_eq!(manifests.len(), 1);
    assert_eq!(manifests["manifest.yaml"], MANIFEST);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_manifest_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/packages/nginx/0.0.1/manifest.yaml")
        .with_status(404)
        .create_async()
        .await;

    let repo = HttpRepository::new(server.url());
    let err = repo
        .load_manifest(&Context::background(), "nginx", "0.0.1")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ManifestNotFound { .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_backend_error() {
    // Port 9 (discard) on localhost is not expected to be listening
    let repo = HttpRepository::new("http://127.0.0.1:9");
    let err = repo
        .load_channel(&Context::background(), "stable")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http { .. }));
    assert_eq!(err.kind(), ErrorKind::Backend);
}

#[tokio::test]
async fn test_cancelled_context_skips_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/stable")
        .with_status(200)
        .with_body(CHANNEL)
        .expect(0)
        .create_async()
        .await;

    let repo = HttpRepository::new(server.url());
    let ctx = Context::background();
    ctx.cancel();

    let err = repo.load_channel(&ctx, "stable").await.unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    mock.assert_async().await;
}

// ==========================================================================
// End to end through ManifestLoader
// ==========================================================================

#[tokio::test]
async fn test_channel_resolution_over_http() {
    let mut server = mockito::Server::new_async().await;
    let channel = server
        .mock("GET", "/stable")
        .with_status(200)
        .with_body(CHANNEL)
        .expect(1)
        .create_async()
        .await;
    let manifest = server
        .mock("GET", "/packages/nginx/2.0.0/manifest.yaml")
        .with_status(200)
        .with_body(MANIFEST)
        .expect(1)
        .create_async()
        .await;

    let loader = ManifestLoader::new(server.url());
    assert_eq!(loader.repository().kind(), RepositoryKind::Http);

    let addon = Addon::new("Nginx", CommonSpec::default());
    let manifests = loader
        .resolve_manifest(&Context::background(), &addon)
        .await
        .unwrap();

    assert_eq!(manifests["manifest.yaml"], MANIFEST);
    channel.assert_async().await;
    manifest.assert_async().await;
}

#[tokio::test]
async fn test_explicit_version_over_http_skips_channel() {
    let mut server = mockito::Server::new_async().await;
    let channel = server
        .mock("GET", "/stable")
        .expect(0)
        .create_async()
        .await;
    let manifest = server
        .mock("GET", "/packages/nginx/1.2.3/manifest.yaml")
        .with_status(200)
        .with_body(MANIFEST)
        .expect(1)
        .create_async()
        .await;

    let config = LoaderConfig {
        channel: server.url(),
        timeout_secs: Some(5),
    };
    let loader = ManifestLoader::from_config(&config).unwrap();
    let addon = Addon::new(
        "Nginx",
        CommonSpec {
            version: "1.2.3".into(),
            channel: "stable".into(),
        },
    );

    loader
        .resolve_manifest(&Context::with_timeout(Duration::from_secs(5)), &addon)
        .await
        .unwrap();

    channel.assert_async().await;
    manifest.assert_async().await;
}
