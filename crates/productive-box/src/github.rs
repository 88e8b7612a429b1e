// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! GitHub GraphQL client
//!
//! This module wraps the three GraphQL queries productive-box needs: who the
//! token belongs to, which repositories they contributed to, and when their
//! commits on a branch were made. User-supplied values travel as GraphQL
//! variables, never spliced into the query text.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Public GitHub API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("productive-box/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const VIEWER_QUERY: &str = r"
query {
  viewer {
    login
    id
  }
}
";

const CONTRIBUTED_REPOS_QUERY: &str = r"
query($login: String!) {
  user(login: $login) {
    repositoriesContributedTo(last: 100) {
      nodes {
        name
        owner {
          login
        }
      }
    }
  }
}
";

const COMMITTED_DATES_QUERY: &str = r"
query($owner: String!, $name: String!, $branch: String!, $authorId: ID!) {
  repository(owner: $owner, name: $name) {
    ref(qualifiedName: $branch) {
      target {
        ... on Commit {
          history(first: 100, author: { id: $authorId }) {
            edges {
              node {
                committedDate
              }
            }
          }
        }
      }
    }
  }
}
";

// ============================================================================
// Error Types
// ============================================================================

/// Errors from GitHub API calls
#[derive(Debug, Error)]
pub enum GithubError {
    /// Transport failure, timeout, or undecodable body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status
    #[error("GitHub returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The GraphQL endpoint reported errors
    #[error("GraphQL query failed: {}", messages.join("; "))]
    GraphQl {
        /// Messages from the `errors` array
        messages: Vec<String>,
    },

    /// A field required to continue was null or absent
    #[error("Response is missing {what}")]
    MissingData {
        /// Which part of the response was missing
        what: &'static str,
    },
}

// ============================================================================
// Domain Types
// ============================================================================

/// The account that owns the access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Login name
    pub username: String,
    /// GraphQL node id, used to filter commit history by author
    pub id: String,
}

/// A repository the viewer contributed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo {
    /// Repository name
    pub name: String,
    /// Owner login
    pub owner: String,
}

impl Repo {
    /// Create a repository reference
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Queries productive-box runs against GitHub
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Look up the login and node id of the token's owner
    async fn viewer(&self) -> Result<Viewer, GithubError>;

    /// List up to 100 repositories `username` contributed to
    async fn contributed_repos(&self, username: &str) -> Result<Vec<Repo>, GithubError>;

    /// Commit timestamps (RFC 3339) of up to 100 commits by `actor_id` on `branch`
    ///
    /// A missing branch or a branch without matching commits yields an
    /// empty list rather than an error.
    async fn commit_dates(
        &self,
        actor_id: &str,
        repo: &Repo,
        branch: &str,
    ) -> Result<Vec<String>, GithubError>;
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// Take the data, failing if GitHub reported any error
    pub(crate) fn into_data(self) -> Result<T, GithubError> {
        if !self.errors.is_empty() {
            return Err(GithubError::GraphQl {
                messages: self.errors.into_iter().map(|e| e.message).collect(),
            });
        }
        self.data.ok_or(GithubError::MissingData { what: "data" })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerData {
    viewer: Option<ViewerNode>,
}

#[derive(Debug, Deserialize)]
struct ViewerNode {
    login: String,
    id: String,
}

impl ViewerData {
    pub(crate) fn into_viewer(self) -> Result<Viewer, GithubError> {
        let node = self.viewer.ok_or(GithubError::MissingData { what: "viewer" })?;
        Ok(Viewer {
            username: node.login,
            id: node.id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContributedData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    repositories_contributed_to: Connection<RepoNode>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
struct RepoNode {
    name: String,
    owner: OwnerNode,
}

#[derive(Debug, Deserialize)]
struct OwnerNode {
    login: String,
}

impl ContributedData {
    pub(crate) fn into_repos(self) -> Result<Vec<Repo>, GithubError> {
        let user = self.user.ok_or(GithubError::MissingData { what: "user" })?;
        Ok(user
            .repositories_contributed_to
            .nodes
            .into_iter()
            .flatten()
            .map(|node| Repo {
                name: node.name,
                owner: node.owner.login,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommittedDatesData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    #[serde(rename = "ref")]
    git_ref: Option<RefNode>,
}

#[derive(Debug, Deserialize)]
struct RefNode {
    target: Option<TargetNode>,
}

/// Non-commit targets (tags, trees) come back without `history`
#[derive(Debug, Deserialize)]
struct TargetNode {
    history: Option<HistoryNode>,
}

#[derive(Debug, Deserialize)]
struct HistoryNode {
    #[serde(default = "Vec::new")]
    edges: Vec<Option<EdgeNode>>,
}

#[derive(Debug, Deserialize)]
struct EdgeNode {
    node: Option<CommitNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitNode {
    committed_date: String,
}

impl CommittedDatesData {
    pub(crate) fn into_dates(self) -> Result<Vec<String>, GithubError> {
        let repository = self
            .repository
            .ok_or(GithubError::MissingData { what: "repository" })?;
        let edges = repository
            .git_ref
            .and_then(|r| r.target)
            .and_then(|t| t.history)
            .map(|h| h.edges)
            .unwrap_or_default();
        Ok(edges
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node)
            .map(|node| node.committed_date)
            .collect())
    }
}

// ============================================================================
// Client
// ============================================================================

/// HTTP client for the GitHub GraphQL and REST APIs
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    graphql_url: String,
    token: String,
}

impl GithubClient {
    /// Create a client authenticating with `token` against `api_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(token: impl Into<String>, api_url: impl Into<String>) -> Result<Self, GithubError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            graphql_url: format!("{api_url}/graphql"),
            api_url,
            token: token.into(),
        })
    }

    /// Send GraphQL queries to `graphql_url` instead of `{api_url}/graphql`
    ///
    /// GitHub Enterprise Server serves REST under `/api/v3` but GraphQL at
    /// `/api/graphql`, so the two need separate URLs there.
    #[must_use]
    pub fn with_graphql_url(mut self, graphql_url: impl Into<String>) -> Self {
        self.graphql_url = graphql_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Base URL REST requests are sent to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Endpoint GraphQL queries are posted to
    #[must_use]
    pub fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    /// Full URL of the REST resource at `path`
    pub(crate) fn rest_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Start an authenticated request to `url`
    pub(crate) fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
    }

    /// Send a request and decode a JSON body, mapping error statuses
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GithubError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, GithubError> {
        let request = self
            .request(reqwest::Method::POST, &self.graphql_url)
            .json(&json!({ "query": query, "variables": variables }));
        self.send_json::<GraphQlResponse<T>>(request)
            .await?
            .into_data()
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn viewer(&self) -> Result<Viewer, GithubError> {
        self.graphql::<ViewerData>(VIEWER_QUERY, json!({}))
            .await?
            .into_viewer()
    }

    async fn contributed_repos(&self, username: &str) -> Result<Vec<Repo>, GithubError> {
        self.graphql::<ContributedData>(CONTRIBUTED_REPOS_QUERY, json!({ "login": username }))
            .await?
            .into_repos()
    }

    async fn commit_dates(
        &self,
        actor_id: &str,
        repo: &Repo,
        branch: &str,
    ) -> Result<Vec<String>, GithubError> {
        let variables = json!({
            "owner": repo.owner,
            "name": repo.name,
            "branch": branch,
            "authorId": actor_id,
        });
        let dates = self
            .graphql::<CommittedDatesData>(COMMITTED_DATES_QUERY, variables)
            .await?
            .into_dates()?;
        debug!(repo = %repo, commits = dates.len(), "Fetched commit dates");
        Ok(dates)
    }
}
