//! Integration tests for the mirror
//!
//! These tests stand up a wiremock platform (login endpoint, dashboard,
//! tenant/activity pages, file content) and run the full mirror cycle
//! end-to-end into a temporary output directory.

use atelier_mirror::config::Config;
use atelier_mirror::crawler::run_mirror;
use atelier_mirror::{MirrorError, SessionError};
use std::path::Path;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_COOKIE: &str = "atelier_session=abc123";

fn test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        login: "user@example.com".to_string(),
        password: "secret".to_string(),
        base_url: base_url.to_string(),
        output_dir: output_dir.to_path_buf(),
        concurrency: 2,
        headless: true,
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "atelier_session=abc123; Path=/"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_mirror_cycle() {
    let server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_login(&server).await;

    // Dashboard lists one tenant; the cookie matcher doubles as proof that
    // worker sessions carry the captured credential
    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(html_page(
            r#"<ul class="activity-list">
                <li data-activity><a href="/tenant/1">Studio Créatif</a></li>
            </ul>"#,
        ))
        .mount(&server)
        .await;

    // The tenant exposes two top-level activities; the second one is never
    // mocked, so its navigation 404s and must not take the run down
    Mock::given(method("GET"))
        .and(path("/tenant/1"))
        .respond_with(html_page(
            r#"<ul class="activity-list">
                <li data-activity><a href="/activity/a1">Projet Alpha</a></li>
                <li data-activity><a href="/activity/broken">Projet Beta</a></li>
            </ul>"#,
        ))
        .mount(&server)
        .await;

    // Root activity renders as a graph; two nodes point at the same child
    // URL to exercise dedup, plus one distinct sibling
    Mock::given(method("GET"))
        .and(path("/activity/a1"))
        .respond_with(html_page(
            r#"<div class="progress-map">
                <a class="map-node" href="/activity/tp1">TP 1</a>
                <a class="map-node" href="/activity/tp1">TP 1 bis</a>
                <a class="map-node" href="/activity/final">Projet Final</a>
            </div>"#,
        ))
        .mount(&server)
        .await;

    // Leaf page with one real file and one excluded-by-name file
    Mock::given(method("GET"))
        .and(path("/activity/tp1"))
        .respond_with(html_page(
            r#"<ul class="activity-list">
                <li><a href="/files/notes.pdf">notes.pdf</a></li>
                <li><a href="/files/guide.pdf">Guide dyslexic.pdf</a></li>
            </ul>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    // Graph child that is itself a list page of sub-activities
    Mock::given(method("GET"))
        .and(path("/activity/final"))
        .respond_with(html_page(
            r#"<ul class="activity-list">
                <li data-activity><a href="/activity/ef">Épreuve Finale</a></li>
            </ul>"#,
        ))
        .mount(&server)
        .await;

    // Sub-activity page: one downloadable file, one that will 404
    Mock::given(method("GET"))
        .and(path("/activity/ef"))
        .respond_with(html_page(
            r#"<ul class="activity-list">
                <li><a href="/files/data.csv">data.csv</a></li>
                <li><a href="/files/missing.bin">missing.bin</a></li>
            </ul>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/notes.pdf"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pdf bytes".to_vec()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/files/data.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"a,b\n1,2\n".to_vec()))
        .mount(&server)
        .await;

    // The excluded file must never be requested
    Mock::given(method("GET"))
        .and(path("/files/guide.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"never".to_vec()))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), output.path());
    run_mirror(config).await.unwrap();

    // Mirrored tree follows normalized labels
    let alpha = output.path().join("studio-creatif").join("projet-alpha");
    assert_eq!(
        std::fs::read(alpha.join("tp-1").join("notes.pdf")).unwrap(),
        b"pdf bytes"
    );
    assert_eq!(
        std::fs::read(
            alpha
                .join("projet-final")
                .join("epreuve-finale")
                .join("data.csv")
        )
        .unwrap(),
        b"a,b\n1,2\n"
    );
    assert!(!alpha.join("tp-1").join("Guide dyslexic.pdf").exists());
    assert!(!alpha
        .join("projet-final")
        .join("epreuve-finale")
        .join("missing.bin")
        .exists());

    // Report reflects what actually succeeded
    let report = std::fs::read_to_string(output.path().join("report.txt")).unwrap();
    assert!(report.starts_with("=== Scraping Report ===\n"));
    assert!(report.contains("Tenants: 1\n"));
    assert!(report.contains("Activities: 1\n"));
    assert!(report.contains("Files: 2\n"));
    assert!(report.contains("By extension:\n  .csv: 1\n  .pdf: 1\n"));
}

#[tokio::test]
async fn test_rejected_login_fails_the_run() {
    let server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), output.path());
    let result = run_mirror(config).await;

    assert!(matches!(
        result,
        Err(MirrorError::Session(SessionError::Auth(_)))
    ));
}

#[tokio::test]
async fn test_login_without_cookie_fails_the_run() {
    let server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), output.path());
    let result = run_mirror(config).await;

    assert!(matches!(
        result,
        Err(MirrorError::Session(SessionError::Auth(_)))
    ));
}

#[tokio::test]
async fn test_empty_dashboard_produces_empty_report() {
    let server = MockServer::start().await;
    let output = tempfile::tempdir().unwrap();

    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dashboard"))
        .respond_with(html_page(r#"<ul class="activity-list"></ul>"#))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), output.path());
    run_mirror(config).await.unwrap();

    let report = std::fs::read_to_string(output.path().join("report.txt")).unwrap();
    assert!(report.contains("Tenants: 0\n"));
    assert!(report.contains("Activities: 0\n"));
    assert!(report.contains("Files: 0\n"));
}
