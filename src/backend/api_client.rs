//! Blocking HTTP client for the optimization backend.
//!
//! Requests run on background threads and report back through the app's
//! response channel, so the UI thread never blocks on the network.

use chrono::{DateTime, Utc};
use reqwest::blocking::{multipart, Client};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;
use thiserror::Error;
use tracing::info;

use crate::messages::ResponseMessage;
use crate::wizard::ProjectConfig;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed summary of an uploaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetPreview {
    pub field_names: Vec<String>,
    pub record_count: usize,
    #[serde(default)]
    pub sample_records: Vec<serde_json::Value>,
}

/// Descriptor of a project the backend created for us.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl ProjectDescriptor {
    /// WebSocket endpoint streaming this project's optimization progress.
    pub fn stream_url(&self, ws_base_url: &str) -> String {
        format!(
            "{}/projects/{}/stream",
            ws_base_url.trim_end_matches('/'),
            self.id
        )
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upload a dataset file; the parsed preview arrives as a
    /// [`ResponseMessage::DatasetUploaded`].
    pub fn upload_dataset(&self, path: PathBuf, sender: Sender<ResponseMessage>) {
        let base_url = self.base_url.clone();
        thread::spawn(move || {
            let result = Self::blocking_upload_dataset(&base_url, &path);
            let _ = sender.send(ResponseMessage::DatasetUploaded(
                result.map_err(|e| e.to_string()),
            ));
        });
    }

    /// Create a project from the submitted wizard configuration; the created
    /// descriptor arrives as a [`ResponseMessage::ProjectCreated`].
    pub fn create_project(&self, config: ProjectConfig, sender: Sender<ResponseMessage>) {
        let base_url = self.base_url.clone();
        thread::spawn(move || {
            let result = Self::blocking_create_project(&base_url, &config);
            let _ = sender.send(ResponseMessage::ProjectCreated(
                result.map_err(|e| e.to_string()),
            ));
        });
    }

    fn blocking_upload_dataset(base_url: &str, path: &PathBuf) -> Result<DatasetPreview, ApiError> {
        let client = Client::new();
        let form = multipart::Form::new().file("file", path)?;

        let response = client
            .post(format!("{}/datasets", base_url))
            .multipart(form)
            .send()?;

        let response = Self::check_status(response)?;
        let preview: DatasetPreview = response.json()?;
        info!(
            records = preview.record_count,
            fields = preview.field_names.len(),
            "dataset uploaded"
        );
        Ok(preview)
    }

    fn blocking_create_project(
        base_url: &str,
        config: &ProjectConfig,
    ) -> Result<ProjectDescriptor, ApiError> {
        let client = Client::new();

        let response = client
            .post(format!("{}/projects", base_url))
            .json(config)
            .send()?;

        let response = Self::check_status(response)?;
        let descriptor: ProjectDescriptor = response.json()?;
        info!(project = %descriptor.id, "project created");
        Ok(descriptor)
    }

    fn check_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response
            .text()
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(ApiError::Status { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn stream_url_targets_the_project() {
        let descriptor = ProjectDescriptor {
            id: "p-42".to_string(),
            name: "demo".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(
            descriptor.stream_url("ws://localhost:8000/"),
            "ws://localhost:8000/projects/p-42/stream"
        );
    }

    #[test]
    fn dataset_preview_decodes_without_samples() {
        let preview: DatasetPreview = serde_json::from_str(
            r#"{"field_names": ["article", "highlights"], "record_count": 120}"#,
        )
        .unwrap();
        assert_eq!(preview.field_names.len(), 2);
        assert_eq!(preview.record_count, 120);
        assert!(preview.sample_records.is_empty());
    }
}
