// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Gist publishing
//!
//! The chart lives in a single-file gist. Publishing renames that file to the
//! chronotype title and replaces its content, so the gist card pinned on a
//! profile shows both.

use async_trait::async_trait;
use productive_core::Report;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::github::{GithubClient, GithubError};

/// File name used when the gist has no files yet
pub const DEFAULT_GIST_FILENAME: &str = "productive-box.md";

/// Description used when none is configured
pub const DEFAULT_GIST_DESCRIPTION: &str =
    "powered by https://github.com/junhoyeo/productive-box-with-cron";

/// A single-file gist edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistUpdate {
    /// Gist to edit
    pub gist_id: String,
    /// Current name of the file being replaced
    pub filename: String,
    /// Name the file is renamed to
    pub new_filename: String,
    /// New file content
    pub content: String,
    /// New gist description
    pub description: String,
}

impl GistUpdate {
    /// Build the update that publishes `report` into `filename`
    #[must_use]
    pub fn for_report(gist_id: &str, filename: &str, report: &Report, description: &str) -> Self {
        Self {
            gist_id: gist_id.to_string(),
            filename: filename.to_string(),
            new_filename: report.title().to_string(),
            content: report.text(),
            description: description.to_string(),
        }
    }

    /// JSON body for `PATCH /gists/{gist_id}`
    #[must_use]
    pub fn body(&self) -> Value {
        let mut files = Map::new();
        files.insert(
            self.filename.clone(),
            json!({ "filename": self.new_filename, "content": self.content }),
        );
        json!({ "description": self.description, "files": files })
    }
}

/// Destination for the rendered chart
#[async_trait]
pub trait GistPublisher: Send + Sync {
    /// Name of the first file in the gist, or `None` if it has no files
    async fn first_filename(&self, gist_id: &str) -> Result<Option<String>, GithubError>;

    /// Apply a single-file edit
    async fn update_file(&self, update: &GistUpdate) -> Result<(), GithubError>;
}

#[derive(Debug, Deserialize)]
struct GistResponse {
    #[serde(default)]
    files: Map<String, Value>,
}

#[async_trait]
impl GistPublisher for GithubClient {
    async fn first_filename(&self, gist_id: &str) -> Result<Option<String>, GithubError> {
        let url = self.rest_url(&format!("/gists/{gist_id}"));
        let request = self.request(reqwest::Method::GET, &url);
        let gist: GistResponse = self.send_json(request).await?;
        Ok(gist.files.keys().next().cloned())
    }

    async fn update_file(&self, update: &GistUpdate) -> Result<(), GithubError> {
        let url = self.rest_url(&format!("/gists/{}", update.gist_id));
        let request = self
            .request(reqwest::Method::PATCH, &url)
            .json(&update.body());
        let _: Value = self.send_json(request).await?;
        Ok(())
    }
}

/// Publish `report` into the first file of `gist_id`
///
/// Returns the update that was applied.
///
/// # Errors
///
/// Returns an error if the gist cannot be read or updated.
pub async fn publish(
    publisher: &dyn GistPublisher,
    gist_id: &str,
    report: &Report,
    description: &str,
) -> Result<GistUpdate, GithubError> {
    let filename = match publisher.first_filename(gist_id).await? {
        Some(name) => name,
        None => {
            debug!(gist_id, "Gist has no files, using default file name");
            DEFAULT_GIST_FILENAME.to_string()
        }
    };

    let update = GistUpdate::for_report(gist_id, &filename, report, description);
    publisher.update_file(&update).await?;
    info!(
        gist_id,
        from = %update.filename,
        to = %update.new_filename,
        "Updated gist"
    );
    Ok(update)
}
