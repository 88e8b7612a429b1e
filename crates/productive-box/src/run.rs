// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! One productive-box run
//!
//! identity → contributed repositories → concurrent commit collection →
//! report → publish. Identity and discovery failures end the run with an
//! error. Per-repository and publish failures are logged and the run
//! carries on.

use std::sync::Arc;

use productive_core::{CoreError, Report};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::collect::{CollectedHours, collect_commit_hours};
use crate::config::{Config, ConfigError};
use crate::gist::{GistPublisher, GistUpdate, publish};
use crate::github::{GithubApi, GithubError};

/// Errors that end a run early
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration is incomplete or malformed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The token owner could not be looked up
    #[error("Unable to get username and id: {0}")]
    Identity(#[source] GithubError),

    /// The contributed repositories could not be listed
    #[error("Unable to get the contributed repos: {0}")]
    Discovery(#[source] GithubError),

    /// Collected hours could not be tallied
    #[error("Unable to build the report: {0}")]
    Report(#[from] CoreError),
}

/// How a run ended
#[derive(Debug)]
pub enum RunOutcome {
    /// No commits were found, nothing was published
    NothingToReport,
    /// The report was built but not published (`--dry-run`)
    DryRun(Report),
    /// The gist was updated
    Published {
        /// The edit that was applied
        update: GistUpdate,
        /// The published report
        report: Report,
    },
    /// Publishing failed; the failure has been logged
    PublishFailed {
        /// Why publishing failed
        error: GithubError,
        /// The report that could not be published
        report: Report,
    },
}

/// Run the whole pipeline once
///
/// # Errors
///
/// Returns an error if the configuration is invalid, or if the identity or
/// repository lookup fails.
pub async fn run(
    config: &Config,
    api: Arc<dyn GithubApi>,
    publisher: &dyn GistPublisher,
) -> Result<RunOutcome, RunError> {
    config.validate()?;
    let offset = config.utc_offset()?;

    let viewer = api.viewer().await.map_err(RunError::Identity)?;
    info!(username = %viewer.username, "Authenticated");

    let repos = api
        .contributed_repos(&viewer.username)
        .await
        .map_err(RunError::Discovery)?;
    info!(repos = repos.len(), "Found contributed repositories");

    let collected = collect_commit_hours(api, &viewer, repos, config.branch(), offset).await;
    log_collection(&collected);

    let Some(report) = Report::build(collected.hours)? else {
        info!("No commits found, nothing to publish");
        return Ok(RunOutcome::NothingToReport);
    };

    if config.dry_run {
        return Ok(RunOutcome::DryRun(report));
    }

    let gist_id = config.gist_id()?;
    match publish(publisher, gist_id, &report, config.gist_description()).await {
        Ok(update) => Ok(RunOutcome::Published { update, report }),
        Err(error) => {
            error!(%error, "Unable to update gist");
            Ok(RunOutcome::PublishFailed { error, report })
        }
    }
}

fn log_collection(collected: &CollectedHours) {
    info!(
        commits = collected.commit_count(),
        failed_repos = collected.failures.len(),
        "Collected commit hours"
    );
    if !collected.invalid_timestamps.is_empty() {
        warn!(
            count = collected.invalid_timestamps.len(),
            "Some commit timestamps could not be parsed"
        );
    }
}
