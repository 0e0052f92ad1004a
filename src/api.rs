// GitHub API module: a small blocking HTTP client for the two calls the
// uploader needs (fetch a repository, create one), plus the startup
// connectivity probe.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client holding a reqwest blocking client, the API base URL and the
/// access token for authenticated calls.
pub struct GithubClient {
    client: Client,
    base_url: String,
    token: String,
}

/// The subset of the repository response the uploader cares about.
#[derive(Deserialize, Debug)]
pub struct Repository {
    pub name: String,
    pub private: bool,
    pub html_url: String,
}

#[derive(Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    private: bool,
}

impl GithubClient {
    /// Create a client configured from the environment variable
    /// `GITHUB_API_URL` or fallback to the public API endpoint.
    pub fn new(token: &str) -> Result<Self> {
        let base_url = std::env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".into());
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(GithubClient {
            client,
            base_url,
            token: token.to_string(),
        })
    }

    /// The GitHub API rejects requests without a User-Agent.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let val = format!("token {}", self.token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&val).context("Token is not a valid header value")?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("gitup-cli"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        Ok(headers)
    }

    /// Fetch a repository by name under the account.
    pub fn get_repo(&self, username: &str, repo_name: &str) -> Result<Repository> {
        let url = format!("{}/repos/{}/{}", self.base_url, username, repo_name);
        let res = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .context("Failed to send repository lookup")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Repository lookup failed: {} - {}", status, txt);
        }
        let repo: Repository = res.json().context("Parsing repository json")?;
        Ok(repo)
    }

    /// Create a repository under the authenticated account.
    pub fn create_repo(&self, name: &str, private: bool) -> Result<Repository> {
        let url = format!("{}/user/repos", self.base_url);
        let res = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(&CreateRepoRequest { name, private })
            .send()
            .context("Failed to send repository creation request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Repository creation failed: {} - {}", status, txt);
        }
        let repo: Repository = res.json().context("Parsing repository json")?;
        Ok(repo)
    }

    /// Fetch-or-create. Any lookup failure (not-found, auth, rate limit
    /// alike) falls through to a create attempt, which surfaces the real
    /// error if it also fails. An existing repository keeps its current
    /// visibility, whatever was requested. The bool is true when the
    /// repository was created by this call.
    pub fn ensure_repo(
        &self,
        username: &str,
        repo_name: &str,
        private: bool,
    ) -> Result<(Repository, bool)> {
        match self.get_repo(username, repo_name) {
            Ok(repo) => Ok((repo, false)),
            Err(err) => {
                log::debug!(
                    "Lookup for {}/{} failed ({}), attempting create",
                    username,
                    repo_name,
                    err
                );
                let repo = self.create_repo(repo_name, private)?;
                Ok((repo, true))
            }
        }
    }
}

/// One outbound probe before anything else; offline runs abort at startup.
/// The only operation in the program with a timeout.
pub fn check_connectivity() -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .context("Failed to build HTTP client")?;
    client
        .get("https://github.com")
        .send()
        .context("Could not reach github.com")?;
    Ok(())
}

/// Remote URL with the token embedded in-line for push authentication.
pub fn remote_url(token: &str, username: &str, repo_name: &str) -> String {
    format!("https://{}@github.com/{}/{}.git", token, username, repo_name)
}
