//! Request-level behavior of the Bintray and scan clients against a local
//! mock server.

use release_publisher::artifact::{BuildFlavor, plan};
use release_publisher::bintray::NewVersion;
use release_publisher::scan::upload_comment;
use release_publisher::{
    ArtifactReference, BintrayClient, Credentials, PackageRepository, ReleaseDescriptor,
    ReleaseError, ReleasePublisher, RemoteErrorKind, ScanConfig, ScanUploadClient,
};
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{
    basic_auth, body_json, body_string, body_string_contains, header, method, path, path_regex,
    query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VERSION_PATH: &str = "/packages/org/maven/sdk/versions/2.3.1";

fn client(server: &MockServer) -> BintrayClient {
    let credentials = Credentials {
        user: "ci".to_string(),
        api_key: "key".to_string(),
        organization: "org".to_string(),
        repository: "maven".to_string(),
    };
    BintrayClient::new(&server.uri(), credentials).unwrap()
}

fn descriptor() -> ReleaseDescriptor {
    ReleaseDescriptor {
        name: "sdk".to_string(),
        description: "Android SDK".to_string(),
        licenses: vec!["MIT".to_string()],
        website_url: "https://example.com".to_string(),
    }
}

fn artifacts_on_disk(root: &Path, version: &str) -> Vec<ArtifactReference> {
    let artifacts = plan(root, BuildFlavor::Standard, version);
    for artifact in &artifacts {
        std::fs::create_dir_all(artifact.local_path.parent().unwrap()).unwrap();
        std::fs::write(&artifact.local_path, b"artifact").unwrap();
    }
    artifacts
}

async fn mount_version_missing(server: &MockServer, message: &str) {
    Mock::given(method("GET"))
        .and(path(VERSION_PATH))
        .and(basic_auth("ci", "key"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": message })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_packages_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/maven/packages"))
        .and(basic_auth("ci", "key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "name": "sdk", "linked": false }, { "name": "ui" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let packages = client(&server).list_packages().await.unwrap();
    let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["sdk", "ui"]);
}

#[tokio::test]
async fn test_create_package_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/packages/org/maven"))
        .and(basic_auth("ci", "key"))
        .and(body_json(json!({
            "name": "sdk",
            "desc": "Android SDK",
            "licenses": ["MIT"],
            "website_url": "https://example.com",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).create_package(&descriptor()).await.unwrap();
}

#[tokio::test]
async fn test_get_version_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VERSION_PATH))
        .and(basic_auth("ci", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "2.3.1" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).get_version("sdk", "2.3.1").await.unwrap();
}

#[tokio::test]
async fn test_create_version_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/packages/org/maven/sdk/versions"))
        .and(basic_auth("ci", "key"))
        .and(body_json(json!({ "name": "2.3.1", "vcs_tag": "2.3.1" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .create_version("sdk", &NewVersion::tagged("2.3.1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_content_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(
            "/content/org/maven/sdk/2.3.1/com/clarabridge/core/2.3.1/core-2.3.1.aar",
        ))
        .and(query_param("override", "1"))
        .and(basic_auth("ci", "key"))
        .and(header("content-length", "8"))
        .and(body_string("artifact"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("core-release.aar");
    std::fs::write(&local, b"artifact").unwrap();

    client(&server)
        .upload_content(
            "sdk",
            "2.3.1",
            &local,
            "com/clarabridge/core/2.3.1/core-2.3.1.aar",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_publish_version_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/content/org/maven/sdk/2.3.1/publish"))
        .and(basic_auth("ci", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).publish_version("sdk", "2.3.1").await.unwrap();
}

#[tokio::test]
async fn test_missing_version_is_created_over_http() {
    let server = MockServer::start().await;
    mount_version_missing(&server, "Version '2.3.1' was not found").await;
    Mock::given(method("POST"))
        .and(path("/packages/org/maven/sdk/versions"))
        .and(body_json(json!({ "name": "2.3.1", "vcs_tag": "2.3.1" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let descriptor = descriptor();
    let publisher = ReleasePublisher::new(&client, &descriptor, "2.3.1");

    assert!(publisher.ensure_version().await.unwrap());
}

#[tokio::test]
async fn test_differently_worded_not_found_is_not_created() {
    let server = MockServer::start().await;
    mount_version_missing(&server, "Package 'sdk' was not found").await;
    Mock::given(method("POST"))
        .and(path("/packages/org/maven/sdk/versions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let descriptor = descriptor();
    let publisher = ReleasePublisher::new(&client, &descriptor, "2.3.1");

    match publisher.ensure_version().await.unwrap_err() {
        ReleaseError::Remote(remote) => {
            assert_eq!(remote.kind, RemoteErrorKind::Other);
            assert_eq!(remote.status, 404);
            assert_eq!(remote.message, "Package 'sdk' was not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_full_release_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/maven/packages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "sdk" }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/packages/org/maven"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    mount_version_missing(&server, "Version '2.3.1' was not found").await;
    Mock::given(method("POST"))
        .and(path("/packages/org/maven/sdk/versions"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(
            r"^/content/org/maven/sdk/2\.3\.1/com/clarabridge/(core|ui)/2\.3\.1/[^/]+$",
        ))
        .and(query_param("override", "1"))
        .and(basic_auth("ci", "key"))
        .respond_with(ResponseTemplate::new(201))
        .expect(7)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/content/org/maven/sdk/2.3.1/publish"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let artifacts = artifacts_on_disk(dir.path(), "2.3.1");
    let client = client(&server);
    let descriptor = descriptor();
    let publisher = ReleasePublisher::new(&client, &descriptor, "2.3.1");

    let report = publisher.run(&artifacts, |_| {}).await.unwrap();
    assert!(!report.package_created);
    assert!(report.version_created);
    assert_eq!(report.uploaded.len(), 7);

    let requests = server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert_eq!(last.url.path(), "/content/org/maven/sdk/2.3.1/publish");
    assert_eq!(requests.len(), 11);
}

#[tokio::test]
async fn test_rejected_credentials_surface_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/org/maven/packages"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "This resource requires authentication" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).list_packages().await.unwrap_err();
    match &err {
        ReleaseError::Remote(remote) => {
            assert_eq!(remote.status, 401);
            assert_eq!(remote.message, "This resource requires authentication");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!err.recovery_suggestions().is_empty());
}

#[tokio::test]
async fn test_scan_upload_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_init"))
        .and(header("authorization", "APIKey K"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "upload_url": format!("{}/upload", server.uri()) })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains(r#"name="file"; filename="a.apk""#))
        .and(body_string_contains(r#"name="comments""#))
        .and(body_string_contains("APK with SDK v5.0.0"))
        .and(body_string_contains("apk-bytes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let apk = dir.path().join("a.apk");
    std::fs::write(&apk, b"apk-bytes").unwrap();

    let client = ScanUploadClient::new(&format!("{}/upload_init", server.uri())).unwrap();
    let config = ScanConfig {
        api_key: "K".to_string(),
    };
    client
        .upload(&config, &apk, &upload_comment("5.0.0"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_scan_init_rejection_uses_json_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_init"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Invalid API key" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ScanUploadClient::new(&format!("{}/upload_init", server.uri())).unwrap();
    match client.init_upload("wrong").await.unwrap_err() {
        ReleaseError::Remote(remote) => {
            assert_eq!(remote.operation, "upload init");
            assert_eq!(remote.status, 403);
            assert_eq!(remote.message, "Invalid API key");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
