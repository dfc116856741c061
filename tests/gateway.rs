//! End-to-end route tests against an in-memory artifact store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::Value;

use mapp_gateway::config::Config;
use mapp_gateway::error::StorageError;
use mapp_gateway::routes;
use mapp_gateway::state::AppState;
use mapp_gateway::storage::ArtifactStore;

/// In-memory store with a switchable failure mode, standing in for the
/// backend bucket.
#[derive(Default)]
struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    failing: AtomicBool,
}

impl MemoryStore {
    fn with_objects(objects: &[(&str, &[u8])]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.objects.lock().unwrap();
            for (key, bytes) in objects {
                map.insert(key.to_string(), bytes.to_vec());
            }
        }
        Arc::new(store)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::ConnectionFailed("backend offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ArtifactStore for MemoryStore {
    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        Ok(self.keys())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        self.check()?;
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound(key.to_string()))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.check()?;
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.check()?;
        Ok(self.objects.lock().unwrap().contains_key(key))
    }

    async fn probe(&self) -> Result<(), StorageError> {
        self.check()
    }
}

fn server_for(store: Arc<MemoryStore>) -> TestServer {
    let state = AppState::new(Config::default(), store as Arc<dyn ArtifactStore>);
    TestServer::new(routes::router(state)).unwrap()
}

fn mapp_upload(filename: &str, payload: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(payload.to_vec())
            .file_name(filename)
            .mime_type("application/octet-stream"),
    )
}

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let store = MemoryStore::with_objects(&[]);
    let server = server_for(store.clone());

    let payload = b"\x00\x01binary payload\xff";
    let response = server
        .post("/upload")
        .multipart(mapp_upload("demo.mapp", payload))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["filename"], "demo.mapp");
    // No rename happened, so the rename fields stay absent.
    assert!(body.get("original_filename").is_none());
    assert!(body.get("renamed").is_none());

    let download = server.get("/apps/demo.mapp").await;
    assert_eq!(download.status_code(), 200);
    assert_eq!(download.as_bytes().as_ref(), payload);
    assert_eq!(
        download.header("content-type").to_str().unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        download.header("content-disposition").to_str().unwrap(),
        "attachment; filename=\"demo.mapp\""
    );
}

#[tokio::test]
async fn test_list_filters_suffix_and_sorts() {
    let store = MemoryStore::with_objects(&[
        ("b.mapp", b"b".as_ref()),
        ("a.mapp", b"a".as_ref()),
        ("notes.txt", b"n".as_ref()),
    ]);
    let server = server_for(store);

    let response = server.get("/apps").await;

    assert_eq!(response.status_code(), 200);
    let names: Vec<String> = response.json();
    assert_eq!(names, vec!["a.mapp", "b.mapp"]);
}

#[tokio::test]
async fn test_debug_files_is_unfiltered() {
    let store = MemoryStore::with_objects(&[
        ("a.mapp", b"a".as_ref()),
        ("notes.txt", b"n".as_ref()),
    ]);
    let server = server_for(store);

    let response = server.get("/debug-files").await;

    assert_eq!(response.status_code(), 200);
    let names: Vec<String> = response.json();
    assert!(names.contains(&"a.mapp".to_string()));
    assert!(names.contains(&"notes.txt".to_string()));
}

#[tokio::test]
async fn test_download_missing_returns_404() {
    let server = server_for(MemoryStore::with_objects(&[]));

    let response = server.get("/apps/never-uploaded.mapp").await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "App not found");
}

#[tokio::test]
async fn test_upload_wrong_suffix_is_rejected_without_write() {
    let store = MemoryStore::with_objects(&[]);
    let server = server_for(store.clone());

    let response = server
        .post("/upload")
        .multipart(mapp_upload("evil.exe", b"payload"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Only .mapp files allowed");
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn test_upload_missing_file_field_is_rejected() {
    let store = MemoryStore::with_objects(&[]);
    let server = server_for(store.clone());

    let form = MultipartForm::new().add_part(
        "attachment",
        Part::bytes(b"payload".to_vec()).file_name("demo.mapp"),
    );
    let response = server.post("/upload").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file provided");
    assert!(store.keys().is_empty());
}

#[tokio::test]
async fn test_upload_collision_renames() {
    let store = MemoryStore::with_objects(&[("test.mapp", b"old".as_ref())]);
    let server = server_for(store.clone());

    let response = server
        .post("/upload")
        .multipart(mapp_upload("test.mapp", b"new payload"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["renamed"], true);
    assert_eq!(body["original_filename"], "test.mapp");

    let final_name = body["filename"].as_str().unwrap().to_string();
    assert_ne!(final_name, "test.mapp");
    assert!(final_name.starts_with("test-"));
    assert!(final_name.ends_with(".mapp"));
    let middle = &final_name["test-".len()..final_name.len() - ".mapp".len()];
    assert!(!middle.is_empty());
    assert!(middle
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    // Original artifact untouched, new one retrievable at the final name.
    let original = server.get("/apps/test.mapp").await;
    assert_eq!(original.as_bytes().as_ref(), b"old");

    let renamed = server.get(&format!("/apps/{final_name}")).await;
    assert_eq!(renamed.status_code(), 200);
    assert_eq!(renamed.as_bytes().as_ref(), b"new payload");
}

#[tokio::test]
async fn test_list_reports_backend_failure() {
    let store = MemoryStore::with_objects(&[]);
    let server = server_for(store.clone());
    store.set_failing(true);

    let response = server.get("/apps").await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Could not list apps");

    let debug = server.get("/debug-files").await;
    assert_eq!(debug.status_code(), 500);
    let body: Value = debug.json();
    assert_eq!(body["error"], "Could not list files");
}

#[tokio::test]
async fn test_upload_reports_backend_failure() {
    let store = MemoryStore::with_objects(&[]);
    let server = server_for(store.clone());
    store.set_failing(true);

    let response = server
        .post("/upload")
        .multipart(mapp_upload("demo.mapp", b"payload"))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Upload failed");
}

#[tokio::test]
async fn test_ping_reports_connected_backend() {
    let server = server_for(MemoryStore::with_objects(&[]));

    let response = server.post("/ping").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "online");
    assert_eq!(body["b2_status"], "connected");
    assert!(body["latency_ms"].is_number());
    assert!(body["uptime"].is_string());
    assert!(body["server"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ping_reports_disconnected_backend_with_200() {
    let store = MemoryStore::with_objects(&[]);
    let server = server_for(store.clone());
    store.set_failing(true);

    let response = server.post("/ping").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "online");
    assert_eq!(body["b2_status"], "disconnected");
}
