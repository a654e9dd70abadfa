use crate::github::issues::{Issue, IssueQuery};
use crate::github::repository::RepositoryMetadata;
use anyhow::{Context, Result};
use std::future::Future;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "repoview-cli";

/// Source of repository metadata and issue pages.
///
/// The controller only ever talks to this trait, so tests can swap the HTTP
/// client for an in-memory implementation.
pub trait DataFetcher {
    /// `GET /repos/{repository}`
    fn fetch_repository(&self, repository: &str)
    -> impl Future<Output = Result<RepositoryMetadata>>;

    /// `GET /repos/{repository}/issues?state=..&page=..&per_page=..`
    fn fetch_issues(
        &self,
        repository: &str,
        query: &IssueQuery,
    ) -> impl Future<Output = Result<Vec<Issue>>>;
}

/// `DataFetcher` backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, timeout: std::time::Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(GitHubClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn repository_url(&self, repository: &str) -> String {
        format!("{}/repos/{}", self.base_url, repository)
    }

    pub fn issues_url(&self, repository: &str) -> String {
        format!("{}/repos/{}/issues", self.base_url, repository)
    }

    async fn get(
        &self,
        url: &str,
        query: Option<&[(&'static str, String)]>,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        Ok(response)
    }
}

impl DataFetcher for GitHubClient {
    async fn fetch_repository(&self, repository: &str) -> Result<RepositoryMetadata> {
        let response = self.get(&self.repository_url(repository), None).await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow::anyhow!("Repository not found: {repository}"));
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!("API request error: {}", response.status()));
        }

        response
            .json::<RepositoryMetadata>()
            .await
            .context("Failed to parse repository response")
    }

    async fn fetch_issues(&self, repository: &str, query: &IssueQuery) -> Result<Vec<Issue>> {
        let pairs = query.to_query();
        let response = self
            .get(&self.issues_url(repository), Some(pairs.as_slice()))
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow::anyhow!("Repository not found: {repository}"));
        }
        if !response.status().is_success() {
            return Err(anyhow::anyhow!("API request error: {}", response.status()));
        }

        response
            .json::<Vec<Issue>>()
            .await
            .context("Failed to parse issues response")
    }
}
