// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Concurrent commit-hour collection
//!
//! One task per repository fetches commit timestamps. All tasks are joined
//! before any hour is returned, and a failing repository only costs its own
//! commits: the failure is logged and recorded, the rest carry on.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::FixedOffset;
use productive_core::{CoreError, commit_hour};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::github::{GithubApi, GithubError, Repo, Viewer};

/// Why a repository contributed no commits
#[derive(Debug, Error)]
pub enum CollectError {
    /// The commit query failed
    #[error("Unable to get the commit info: {0}")]
    Fetch(#[from] GithubError),

    /// The fetch task panicked or was cancelled
    #[error("Fetch task did not complete: {0}")]
    Task(String),
}

/// A repository whose commits could not be fetched
#[derive(Debug)]
pub struct RepoFailure {
    /// The repository
    pub repo: Repo,
    /// What went wrong
    pub error: CollectError,
}

/// Result of fetching commit hours across repositories
#[derive(Debug, Default)]
pub struct CollectedHours {
    /// Hour of day (0-23) of every parsed commit, in no particular order
    pub hours: Vec<u32>,
    /// Repositories whose fetch failed
    pub failures: Vec<RepoFailure>,
    /// Timestamps that could not be parsed
    pub invalid_timestamps: Vec<CoreError>,
}

impl CollectedHours {
    /// Number of commits successfully converted to hours
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.hours.len()
    }
}

/// Fetch commit hours for every repository concurrently
///
/// Hours are taken after converting each timestamp to `offset`.
pub async fn collect_commit_hours(
    api: Arc<dyn GithubApi>,
    viewer: &Viewer,
    repos: Vec<Repo>,
    branch: &str,
    offset: FixedOffset,
) -> CollectedHours {
    let mut tasks = JoinSet::new();
    let mut pending = HashMap::new();

    for repo in repos {
        let api = Arc::clone(&api);
        let actor_id = viewer.id.clone();
        let branch = branch.to_string();
        let task_repo = repo.clone();
        let handle = tasks.spawn(async move {
            api.commit_dates(&actor_id, &task_repo, &branch).await
        });
        pending.insert(handle.id(), repo);
    }

    let mut collected = CollectedHours::default();
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, Ok(dates))) => {
                let repo = pending.remove(&id);
                debug!(repo = ?repo, commits = dates.len(), "Collected commit dates");
                for date in dates {
                    match commit_hour(&date, &offset) {
                        Ok(hour) => collected.hours.push(hour),
                        Err(error) => {
                            warn!(%error, "Skipping commit with unparseable timestamp");
                            collected.invalid_timestamps.push(error);
                        }
                    }
                }
            }
            Ok((id, Err(error))) => {
                if let Some(repo) = pending.remove(&id) {
                    warn!(repo = %repo, %error, "Unable to get the commit info");
                    collected.failures.push(RepoFailure {
                        repo,
                        error: error.into(),
                    });
                }
            }
            Err(join_error) => {
                if let Some(repo) = pending.remove(&join_error.id()) {
                    warn!(repo = %repo, error = %join_error, "Commit fetch task failed");
                    collected.failures.push(RepoFailure {
                        repo,
                        error: CollectError::Task(join_error.to_string()),
                    });
                }
            }
        }
    }

    collected
}
