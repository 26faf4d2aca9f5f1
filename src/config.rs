use std::time::Duration;

use crate::error::{Result, TodoistError};

/// Root of the Todoist REST API, v2.
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "TODOIST_API_TOKEN";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "TODOIST_BASE_URL";

const DEFAULT_USER_AGENT: &str = concat!("todoist-rest/", env!("CARGO_PKG_VERSION"));

/// Settings fixed at client construction.
///
/// ```
/// use std::time::Duration;
/// use todoist_rest::ClientConfig;
///
/// let config = ClientConfig::new("0123456789abcdef")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url, todoist_rest::DEFAULT_BASE_URL);
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    pub token: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Build a config from `TODOIST_API_TOKEN` and, if set, `TODOIST_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                TodoistError::InvalidConfig(format!("{TOKEN_ENV} is not set"))
            })?;

        let mut config = Self::new(token);
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Deadline applied to every request made with this config.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = ClientConfig::new("tok");
        assert_eq!(config.token, "tok");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("todoist-rest/"));
    }

    #[test]
    fn builders_override_fields() {
        let config = ClientConfig::new("tok")
            .with_base_url("http://localhost:8080")
            .with_timeout(Duration::from_millis(250))
            .with_user_agent("my-app/1.0");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.user_agent, "my-app/1.0");
    }

    // The only test touching these variables, so no other test races it.
    #[test]
    fn from_env_requires_token_and_trims_values() {
        std::env::remove_var(TOKEN_ENV);
        std::env::remove_var(BASE_URL_ENV);
        assert!(matches!(
            ClientConfig::from_env(),
            Err(TodoistError::InvalidConfig(_))
        ));

        std::env::set_var(TOKEN_ENV, "   ");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(TodoistError::InvalidConfig(_))
        ));

        std::env::set_var(TOKEN_ENV, "  tok\n");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.token, "tok");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        std::env::set_var(BASE_URL_ENV, "  ");
        assert_eq!(ClientConfig::from_env().unwrap().base_url, DEFAULT_BASE_URL);

        std::env::set_var(BASE_URL_ENV, " http://localhost:8080 ");
        assert_eq!(
            ClientConfig::from_env().unwrap().base_url,
            "http://localhost:8080"
        );

        std::env::remove_var(TOKEN_ENV);
        std::env::remove_var(BASE_URL_ENV);
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
