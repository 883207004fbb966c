use std::path::Path;

use dept_share::ServerConfig;
use dept_share::auth::{CredentialStore, authenticate};
use dept_share::controller::Controller;
use dept_share::error::{AuthError, ShareError, StorageError};
use dept_share::server::Server;
use dept_share::session::Session;
use dept_share::storage::{Scope, Storage};
use tokio::io::AsyncReadExt;

const SECRETS: &str = r#"
[[credentials]]
username = "alice"
password = "alice123"
department = "AI"

[[credentials]]
username = "bob"
password = "bob123"
department = "Dev"

[[credentials]]
username = "carol"
password = "carol123"
department = "Marketing"
"#;

// Helper to build a config rooted in a temporary directory
fn test_config(root: &Path) -> ServerConfig {
    let secrets = root.join("secrets.toml");
    std::fs::write(&secrets, SECRETS).unwrap();

    let mut config = ServerConfig::default();
    config.server.port = 0;
    config.storage.upload_root = root.join("uploads").to_string_lossy().into_owned();
    config.storage.buffer_size = 1024;
    config.auth.credentials_file = secrets.to_string_lossy().into_owned();
    config
}

async fn test_controller(root: &Path) -> Controller {
    let config = test_config(root);
    let controller = Controller::from_config(&config).unwrap();
    controller.storage().ensure_layout().await.unwrap();
    controller
}

async fn logged_in(controller: &Controller, username: &str, password: &str) -> Session {
    let mut session = Session::default();
    controller.login(&mut session, username, password).unwrap();
    session
}

async fn read_all(controller: &Controller, session: &Session, scope: Scope, name: &str) -> Vec<u8> {
    let mut retrieved = controller.download(session, scope, name).await.unwrap();
    let mut bytes = Vec::new();
    retrieved.file.read_to_end(&mut bytes).await.unwrap();
    bytes
}

#[test]
fn test_authenticate_from_secrets_file() {
    let temp = tempfile::tempdir().unwrap();
    let config = test_config(temp.path());
    let store = CredentialStore::load(&config.auth.credentials_file, 64).unwrap();

    assert_eq!(authenticate(&store, "alice", "alice123").unwrap(), "AI");
    assert_eq!(authenticate(&store, "bob", "bob123").unwrap(), "Dev");

    let wrong_password = authenticate(&store, "alice", "bob123").unwrap_err();
    let unknown_user = authenticate(&store, "mallory", "alice123").unwrap_err();
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_unknown_department_cannot_log_in() {
    let temp = tempfile::tempdir().unwrap();
    let controller = test_controller(temp.path()).await;
    let mut session = Session::default();

    let result = controller.login(&mut session, "carol", "carol123");

    assert!(matches!(
        result,
        Err(ShareError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn test_department_isolation_scenario() {
    let temp = tempfile::tempdir().unwrap();
    let controller = test_controller(temp.path()).await;

    let alice = logged_in(&controller, "alice", "alice123").await;
    controller
        .upload(&alice, &b"0123456789"[..], "report.pdf", Scope::Department, Some(10))
        .await
        .unwrap();

    let ai_files = controller.list(&alice, Scope::Department).await.unwrap();
    assert_eq!(ai_files.len(), 1);
    assert!(ai_files[0].ends_with("_report.pdf"));
    assert!(controller.list(&alice, Scope::Global).await.unwrap().is_empty());

    let bob = logged_in(&controller, "bob", "bob123").await;
    assert!(controller.list(&bob, Scope::Department).await.unwrap().is_empty());
    assert!(controller.list(&bob, Scope::Global).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_upload_download_roundtrip_is_byte_identical() {
    let temp = tempfile::tempdir().unwrap();
    let controller = test_controller(temp.path()).await;
    let alice = logged_in(&controller, "alice", "alice123").await;

    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    let saved = controller
        .upload(&alice, &data[..], "blob.bin", Scope::Global, None)
        .await
        .unwrap();

    assert_eq!(saved.size, data.len() as u64);
    assert_eq!(
        read_all(&controller, &alice, Scope::Global, &saved.stored_name).await,
        data
    );

    // Global files are visible from other departments
    let bob = logged_in(&controller, "bob", "bob123").await;
    assert_eq!(
        controller.list(&bob, Scope::Global).await.unwrap(),
        vec![saved.stored_name]
    );
}

#[tokio::test]
async fn test_delete_removes_and_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let controller = test_controller(temp.path()).await;
    let bob = logged_in(&controller, "bob", "bob123").await;

    let saved = controller
        .upload(&bob, &b"notes"[..], "notes.txt", Scope::Department, Some(5))
        .await
        .unwrap();

    let first = controller
        .delete(&bob, Scope::Department, &saved.stored_name)
        .await
        .unwrap();
    let second = controller
        .delete(&bob, Scope::Department, &saved.stored_name)
        .await
        .unwrap();

    assert!(first.deleted);
    assert!(!second.deleted);
    assert!(controller.list(&bob, Scope::Department).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_upload_leaves_no_file() {
    let temp = tempfile::tempdir().unwrap();
    let controller = test_controller(temp.path()).await;
    let alice = logged_in(&controller, "alice", "alice123").await;

    let declared = 1025 * 1024 * 1024;
    let result = controller
        .upload(&alice, &b"tiny"[..], "huge.iso", Scope::Department, Some(declared))
        .await;

    assert!(matches!(
        result,
        Err(ShareError::Storage(StorageError::FileTooLarge { .. }))
    ));
    assert!(controller.list(&alice, Scope::Department).await.unwrap().is_empty());
    assert!(controller.list(&alice, Scope::Global).await.unwrap().is_empty());

    let staging = controller.storage().layout().staging_dir();
    assert_eq!(std::fs::read_dir(staging).unwrap().count(), 0);
}

#[tokio::test]
async fn test_same_name_uploads_are_independent() {
    let temp = tempfile::tempdir().unwrap();
    let controller = test_controller(temp.path()).await;
    let alice = logged_in(&controller, "alice", "alice123").await;

    let first = controller
        .upload(&alice, &b"first"[..], "same.txt", Scope::Department, None)
        .await
        .unwrap();
    let second = controller
        .upload(&alice, &b"second"[..], "same.txt", Scope::Department, None)
        .await
        .unwrap();
    assert_ne!(first.stored_name, second.stored_name);

    assert_eq!(
        read_all(&controller, &alice, Scope::Department, &first.stored_name).await,
        b"first"
    );
    assert_eq!(
        read_all(&controller, &alice, Scope::Department, &second.stored_name).await,
        b"second"
    );

    controller
        .delete(&alice, Scope::Department, &first.stored_name)
        .await
        .unwrap();
    assert_eq!(
        controller.list(&alice, Scope::Department).await.unwrap(),
        vec![second.stored_name]
    );
}

#[tokio::test]
async fn test_storage_from_config_creates_every_folder() {
    let temp = tempfile::tempdir().unwrap();
    let config = test_config(temp.path());
    let storage = Storage::from_config(&config);
    storage.ensure_layout().await.unwrap();

    for folder in ["global", "ai", "dev", "testing", ".staging"] {
        assert!(temp.path().join("uploads").join(folder).is_dir(), "{}", folder);
    }
}

fn session_cookie(response: &reqwest::Response) -> String {
    let header = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .expect("login sets a cookie")
        .to_str()
        .unwrap();
    header.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_http_login_upload_download_delete() {
    let temp = tempfile::tempdir().unwrap();
    let config = test_config(temp.path());
    let server = Server::new(&config).await.unwrap();
    let base = format!("http://{}", server.local_addr().unwrap());
    tokio::spawn(server.start());

    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/login"))
        .json(&serde_json::json!({ "username": "alice", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid credentials!");

    let response = client
        .post(format!("{base}/api/login"))
        .json(&serde_json::json!({ "username": "alice", "password": "alice123" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let cookie = session_cookie(&response);
    let view: serde_json::Value = response.json().await.unwrap();
    assert_eq!(view["state"], "logged_in");
    assert_eq!(view["department"], "AI");

    let response = client
        .put(format!("{base}/api/files/department/report.pdf"))
        .header(reqwest::header::COOKIE, &cookie)
        .body("0123456789")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let view: serde_json::Value = response.json().await.unwrap();
    let stored = view["department_files"][0].as_str().unwrap().to_string();
    assert!(stored.ends_with("_report.pdf"));
    assert_eq!(
        view["notice"],
        "File uploaded successfully to Department Folder: report.pdf"
    );

    let response = client
        .get(format!("{base}/api/files/department/{stored}"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"0123456789");

    let response = client
        .delete(format!("{base}/api/files/department/{stored}"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .get(format!("{base}/api/files/department"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    let listing: serde_json::Value = response.json().await.unwrap();
    assert_eq!(listing["files"], serde_json::json!([]));

    let response = client
        .post(format!("{base}/api/logout"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .get(format!("{base}/api/files/global"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_http_rejects_traversal_and_bad_scope() {
    let temp = tempfile::tempdir().unwrap();
    let config = test_config(temp.path());
    let server = Server::new(&config).await.unwrap();
    let base = format!("http://{}", server.local_addr().unwrap());
    tokio::spawn(server.start());

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/api/login"))
        .json(&serde_json::json!({ "username": "bob", "password": "bob123" }))
        .send()
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = client
        .put(format!("{base}/api/files/global/..%2Fescape.txt"))
        .header(reqwest::header::COOKIE, &cookie)
        .body("x")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(!temp.path().join("uploads").join("escape.txt").exists());

    let response = client
        .get(format!("{base}/api/files/secret"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid request.");
}

#[tokio::test]
async fn test_http_malformed_requests_get_json_errors() {
    let temp = tempfile::tempdir().unwrap();
    let config = test_config(temp.path());
    let server = Server::new(&config).await.unwrap();
    let base = format!("http://{}", server.local_addr().unwrap());
    tokio::spawn(server.start());

    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/login"))
        .json(&serde_json::json!({ "username": "bob" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Invalid request.");

    let response = client
        .post(format!("{base}/api/login"))
        .json(&serde_json::json!({ "username": "bob", "password": "bob123" }))
        .send()
        .await
        .unwrap();
    let cookie = session_cookie(&response);

    let response = client
        .get(format!("{base}/api/files/secret"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "bad_request");

    let response = client
        .delete(format!("{base}/api/files/archive/notes.txt"))
        .header(reqwest::header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "bad_request");
}
