//! productive-box: Are you an early 🐤 or a night 🦉?
//!
//! This binary fetches the times of your commits across every repository you
//! contributed to, charts them by time of day, and publishes the chart to a
//! gist.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use productive_box::config::{Config, load_env_file};
use productive_box::github::GithubClient;
use productive_box::run::{RunOutcome, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so .env values act as env fallbacks for the flags
    let env_file = load_env_file();
    let config = Config::parse();

    // Logs go to stderr so --dry-run output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    if let Some(path) = env_file.context("Invalid .env file")? {
        debug!(path = %path.display(), "Loaded env file");
    }
    config.validate().context("Invalid configuration")?;

    let mut client = GithubClient::new(config.token()?, config.api_url())
        .context("Failed to create GitHub client")?;
    if let Some(graphql_url) = config.graphql_url() {
        client = client.with_graphql_url(graphql_url);
    }
    let client = Arc::new(client);

    match run(&config, client.clone(), client.as_ref()).await? {
        RunOutcome::DryRun(report) => {
            if config.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}\n\n{}", report.title(), report.text());
            }
        }
        RunOutcome::Published { update, .. } => {
            info!(gist_id = %update.gist_id, title = %update.new_filename, "Done");
        }
        RunOutcome::NothingToReport | RunOutcome::PublishFailed { .. } => {}
    }

    Ok(())
}
