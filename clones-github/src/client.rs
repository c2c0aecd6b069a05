use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info};

use clones_core::{CloneEvent, PluginError, RepoSnapshot};

use crate::errors::ApiFailure;
use crate::response::{ClonesResponse, RepositoryResponse};
use crate::settings::GitHubSettings;

/// GitHub reports repository size in kilobytes.
pub const KILOBYTES_PER_GIGABYTE: f64 = 1_000_000.0;

const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// GitHub REST client. Each instance owns its HTTP client and credentials.
#[derive(Clone, Debug)]
pub struct GitHubApi {
    http: reqwest::Client,
    base_url: Url,
    has_token: bool,
}

impl GitHubApi {
    pub fn new(settings: GitHubSettings) -> Result<Self, PluginError> {
        let token = settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty());

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from_static(API_VERSION),
        );

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
                PluginError::AuthorizationInvalid(
                    "Provided token contains characters that cannot be sent in a header."
                        .to_owned(),
                )
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| PluginError::ApiRequestFailed(format!("Request error: {}", e)))?;

        let mut base_url = settings.base_url.trim().to_owned();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url).map_err(|e| {
            PluginError::ApiRequestFailed(format!(
                "Request error: invalid GitHub API URL `{}`: {}",
                settings.base_url, e
            ))
        })?;

        Ok(Self {
            http,
            base_url,
            has_token: token.is_some(),
        })
    }

    /// Fetch clone events and size (in GB) for `owner/repo`.
    ///
    /// Steps run in order and the first failure aborts: token presence,
    /// token validity, owner existence, clone events, size. Without a token
    /// no request is sent.
    pub async fn get_repo_clones_and_size(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepoSnapshot, PluginError> {
        if !self.has_token {
            return Err(PluginError::AuthorizationMissing(
                "Token does not persist in the environment variables.".to_owned(),
            ));
        }

        self.check_token_validity().await?;
        self.check_owner_validity(owner).await?;

        let clones = self.get_repo_clones(owner, repo).await?;
        let size = self.get_repo_size_in_gb(owner, repo).await?;

        info!(
            owner = %owner,
            repo = %repo,
            clone_events = clones.len(),
            size_gb = size,
            "Fetched repository snapshot from GitHub."
        );

        Ok(RepoSnapshot { clones, size })
    }

    async fn check_token_validity(&self) -> Result<(), PluginError> {
        self.get_json::<IgnoredAny>(&["user"])
            .await
            .map(|_| ())
            .map_err(|failure| {
                PluginError::AuthorizationInvalid(format!("Provided token is invalid. {}", failure))
            })
    }

    /// `users/{owner}` resolves both user and organisation accounts.
    async fn check_owner_validity(&self, owner: &str) -> Result<(), PluginError> {
        match self.get_json::<IgnoredAny>(&["users", owner]).await {
            Ok(_) => Ok(()),
            Err(failure) if failure.is_not_found() => Err(PluginError::OwnerNotFound(format!(
                "Owner: {} was not found on GitHub. {}",
                owner, failure
            ))),
            Err(failure) => Err(PluginError::ApiRequestFailed(format!(
                "Error fetching owner: {} from GitHub API. {}",
                owner, failure
            ))),
        }
    }

    async fn get_repo_clones(&self, owner: &str, repo: &str) -> Result<Vec<CloneEvent>, PluginError> {
        self.get_json::<ClonesResponse>(&["repos", owner, repo, "traffic", "clones"])
            .await
            .map(|response| response.clones)
            .map_err(|failure| {
                PluginError::ApiRequestFailed(format!(
                    "Error fetching clones from GitHub API for owner: {} and repo: {}. {}",
                    owner, repo, failure
                ))
            })
    }

    async fn get_repo_size_in_gb(&self, owner: &str, repo: &str) -> Result<f64, PluginError> {
        self.get_json::<RepositoryResponse>(&["repos", owner, repo])
            .await
            .map(|response| response.size / KILOBYTES_PER_GIGABYTE)
            .map_err(|failure| {
                PluginError::ApiRequestFailed(format!(
                    "Error fetching size from GitHub API for owner: {} and repo: {}. {}",
                    owner, repo, failure
                ))
            })
    }

    async fn get_json<T>(&self, segments: &[&str]) -> Result<T, ApiFailure>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!(%url, "GitHub API request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ApiFailure::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiFailure::Status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiFailure::Request(e.to_string()))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiFailure::Request(format!("`{}` cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}
