use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::env;
use std::path::PathBuf;

use crate::github::GitHubRepo;

/// Configuration for one tracking run.
///
/// The GITHUB_TOKEN environment variable is the only ambient input; everything
/// else is passed in explicitly.
pub struct Config {
    pub client: Client,
    pub repo: GitHubRepo,
    pub api_url: String,
    pub tag_prefix: Option<String>,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(
        repo: GitHubRepo,
        tag_prefix: Option<String>,
        data_dir: Option<PathBuf>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication");
        }

        let client = Client::builder()
            .user_agent("relstat-cli")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            repo,
            api_url: api_url.unwrap_or_else(|| "https://api.github.com".to_string()),
            tag_prefix,
            data_dir: data_dir.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::env;
    use std::str::FromStr;

    // when GITHUB_TOKEN is set, Config::new should use it for authentication
    #[tokio::test]
    async fn test_config_new_with_github_token() {
        let token = "test_token";
        unsafe {
            env::set_var("GITHUB_TOKEN", token);
        }

        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", format!("Bearer {}", token).as_str())
            .create();

        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        let config = Config::new(repo, None, None, None).unwrap();
        let client = &config.client;
        let _ = client.get(server.url()).send().await;

        mock.assert();
        unsafe {
            env::remove_var("GITHUB_TOKEN");
        }
    }

    #[test]
    fn test_config_defaults() {
        let repo = GitHubRepo::from_str("owner/repo").unwrap();
        let config = Config::new(repo, Some("v1.0.0".to_string()), None, None).unwrap();
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.tag_prefix.as_deref(), Some("v1.0.0"));
    }
}
