#![allow(dead_code)]

use docchat_api::config::DocumentConfig;
use docchat_api::startup::Application;
use reqwest::multipart;
use std::path::PathBuf;
use uuid::Uuid;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TXT_MIME: &str = "text/plain";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawns the service on a random port with its own upload directory.
    pub async fn spawn_with(configure: impl FnOnce(&mut DocumentConfig)) -> Self {
        let mut config = DocumentConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.storage.upload_dir = format!("target/test-uploads-{}", Uuid::new_v4());
        configure(&mut config);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let upload_dir = app.upload_dir();

        // The listener is already bound, so requests queue until the server polls it.
        tokio::spawn(app.run_until_stopped());

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            upload_dir,
            client: reqwest::Client::new(),
        }
    }

    pub async fn upload(
        &self,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> reqwest::Response {
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(data)
                .file_name(filename.to_string())
                .mime_str(mime_type)
                .unwrap(),
        );

        self.client
            .post(format!("{}/api/v1/documents/upload", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Uploads and returns the JSON record, asserting success.
    pub async fn upload_ok(
        &self,
        filename: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> serde_json::Value {
        let response = self.upload(filename, mime_type, data).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn get_document(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/api/v1/documents/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_document(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/api/v1/documents/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_documents(&self) -> Vec<serde_json::Value> {
        let body: serde_json::Value = self
            .client
            .get(format!("{}/api/v1/documents/", self.address))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON");

        body["documents"]
            .as_array()
            .cloned()
            .expect("documents should be an array")
    }

    /// Sorted names of the files currently in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.upload_dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.upload_dir).await;
    }
}
