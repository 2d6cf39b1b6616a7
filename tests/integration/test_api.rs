//! End-to-end integration tests for the roster server.
//!
//! Each test binds a real server to an ephemeral port, backed by a
//! fresh temp data file, and drives it over HTTP with reqwest.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use roster_server::{create_router, AppState, Config};
use roster_store::StudentStore;
use tokio::net::TcpListener;

/// Returns a unique path under the system temp directory.
fn temp_data_path(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    std::env::temp_dir().join(format!("roster-e2e-{tag}-{nanos:x}.json"))
}

/// Starts a server for the given data file and returns its address.
async fn spawn_server(data_file: &Path) -> SocketAddr {
    let config = Config {
        data_file: data_file.display().to_string(),
        port: 0,
    };
    let store = StudentStore::load(data_file).await;
    let state = AppState::new(config, store);
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    addr
}

fn cleanup(path: &Path) {
    let _ = std::fs::remove_file(path);
}

/// Drives the full CRUD scenario over HTTP: create, duplicate-reject,
/// partial update, delete, and delete-again.
#[tokio::test]
async fn test_full_crud_scenario() {
    let path = temp_data_path("scenario");
    let addr = spawn_server(&path).await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}/api/students");

    // Create Alice.
    let response = client
        .post(&base)
        .json(&serde_json::json!({"name": "Alice", "id": "S1", "grade": "9th"}))
        .send()
        .await
        .expect("POST failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    // List has exactly one record.
    let body: serde_json::Value = client
        .get(&base)
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);

    // A second record with the same ID is rejected.
    let response = client
        .post(&base)
        .json(&serde_json::json!({"name": "Bob", "id": "S1", "grade": "10th"}))
        .send()
        .await
        .expect("POST failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["success"], false);

    let body: serde_json::Value = client
        .get(&base)
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(body["count"], 1);

    // Partial update changes the grade only.
    let response = client
        .put(format!("{base}/S1"))
        .json(&serde_json::json!({"grade": "10th"}))
        .send()
        .await
        .expect("PUT failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = client
        .get(format!("{base}/S1"))
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(body["student"]["name"], "Alice");
    assert_eq!(body["student"]["grade"], "10th");

    // Delete, then confirm it is gone.
    let response = client
        .delete(format!("{base}/S1"))
        .send()
        .await
        .expect("DELETE failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = client
        .get(&base)
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(body["count"], 0);

    // Deleting again reports not-found.
    let response = client
        .delete(format!("{base}/S1"))
        .send()
        .await
        .expect("DELETE failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup(&path);
}

/// POST and PUT without a JSON body are client errors, not faults.
#[tokio::test]
async fn test_missing_payload_rejected() {
    let path = temp_data_path("no-payload");
    let addr = spawn_server(&path).await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}/api/students");

    let response = client.post(&base).send().await.expect("POST failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["message"], "No data provided");

    let response = client
        .put(format!("{base}/S1"))
        .send()
        .await
        .expect("PUT failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    cleanup(&path);
}

/// Mutations land in the backing file as a pretty-printed JSON array
/// of name/id/grade objects.
#[tokio::test]
async fn test_mutations_are_mirrored_to_data_file() {
    let path = temp_data_path("mirror");
    let addr = spawn_server(&path).await;
    let client = reqwest::Client::new();
    let base = format!("http://{addr}/api/students");

    for (name, id, grade) in [("Alice", "S1", "9th"), ("Bob", "S2", "10th")] {
        let response = client
            .post(&base)
            .json(&serde_json::json!({"name": name, "id": id, "grade": grade}))
            .send()
            .await
            .expect("POST failed");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let contents = std::fs::read_to_string(&path).expect("Data file not written");
    let records: serde_json::Value = serde_json::from_str(&contents).expect("Invalid data file");

    let records = records.as_array().expect("Data file is not an array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[1]["id"], "S2");
    // Human-readable indentation.
    assert!(contents.contains("\n  {"));

    cleanup(&path);
}

/// Records written by one server instance are served by the next one
/// pointed at the same data file.
#[tokio::test]
async fn test_records_survive_restart() {
    let path = temp_data_path("restart");

    let addr = spawn_server(&path).await;
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/api/students"))
        .json(&serde_json::json!({"name": "Alice", "id": "S1", "grade": "9th"}))
        .send()
        .await
        .expect("POST failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    // A fresh server loads the same backing file.
    let addr = spawn_server(&path).await;
    let body: serde_json::Value = client
        .get(format!("http://{addr}/api/students/S1"))
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["student"]["name"], "Alice");

    cleanup(&path);
}

/// A corrupt backing file degrades to an empty collection instead of
/// failing startup.
#[tokio::test]
async fn test_corrupt_data_file_starts_empty() {
    let path = temp_data_path("corrupt");
    std::fs::write(&path, "{ definitely not an array").expect("Failed to seed file");

    let addr = spawn_server(&path).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("http://{addr}/api/students"))
        .send()
        .await
        .expect("GET failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);

    cleanup(&path);
}
