use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use super::{GitHubRepo, Release};

/// GitHub caps the releases listing at 1000 results (10 pages at 100 per page).
const MAX_PAGES: u32 = 10;
const PER_PAGE: usize = 100;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchReleases: Send + Sync {
    async fn fetch_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>>;
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(client, api_url))]
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| "https://api.github.com".to_string());
        Self { client, api_url }
    }
}

#[async_trait]
impl FetchReleases for GitHub {
    #[tracing::instrument(skip(self, repo))]
    async fn fetch_releases(&self, repo: &GitHubRepo) -> Result<Vec<Release>> {
        GitHub::fetch_all_pages(repo, &self.client, &self.api_url).await
    }
}

impl GitHub {
    /// Pages through the releases listing until an empty page, the page
    /// ceiling, or HTTP 422 (the result window is exhausted; everything
    /// fetched so far is kept). Any other non-success status aborts.
    #[tracing::instrument(skip(client, api_url))]
    pub async fn fetch_all_pages(
        repo: &GitHubRepo,
        client: &Client,
        api_url: &str,
    ) -> Result<Vec<Release>> {
        let mut releases = Vec::new();
        let mut page: u32 = 1;

        while page <= MAX_PAGES {
            let url = format!("{}/repos/{}/{}/releases", api_url, repo.owner, repo.repo);

            debug!("Fetching releases page {} from {}...", page, url);

            let response = client
                .get(&url)
                .query(&[("per_page", &PER_PAGE.to_string()), ("page", &page.to_string())])
                .send()
                .await
                .context("Failed to send request to GitHub API")?;

            if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
                debug!(
                    "Result window exhausted at page {}, keeping {} releases fetched so far",
                    page,
                    releases.len()
                );
                break;
            }

            let parsed: Vec<Release> = response
                .error_for_status()
                .context("GitHub API request failed")?
                .json()
                .await
                .context("Failed to parse JSON response from GitHub API")?;

            if parsed.is_empty() {
                break;
            }

            releases.extend(parsed);
            page += 1;
        }

        Ok(releases)
    }
}
