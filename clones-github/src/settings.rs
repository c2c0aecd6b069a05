use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("clones-github/", env!("CARGO_PKG_VERSION"));

/// Connection settings for one [`crate::GitHubApi`] instance.
#[derive(Clone)]
pub struct GitHubSettings {
    pub token: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_API_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl GitHubSettings {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read `GITHUB_TOKEN`, `GITHUB_API_URL` and `GITHUB_REQUEST_TIMEOUT_SECONDS`.
    pub fn from_env() -> Self {
        let token = env::var("GITHUB_TOKEN")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());
        let base_url = env::var("GITHUB_API_URL")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let request_timeout = env::var("GITHUB_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self {
            token,
            base_url,
            request_timeout,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DEFAULT_API_URL, GitHubSettings};

    #[test]
    fn builder_overrides_defaults() {
        let settings = GitHubSettings::with_token("abc")
            .base_url("http://127.0.0.1:8080/")
            .request_timeout(Duration::from_secs(5));

        assert_eq!(settings.token.as_deref(), Some("abc"));
        assert_eq!(settings.base_url, "http://127.0.0.1:8080/");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(GitHubSettings::default().base_url, DEFAULT_API_URL);
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let rendered = format!("{:?}", GitHubSettings::with_token("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
