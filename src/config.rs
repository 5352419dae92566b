use std::fmt;
use std::time::Duration;

/// Timeout applied to every outbound catalog request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Usage: neodb-mcp <api_base_url> <access_token>")]
    Usage,
}

/// Connection settings for the NeoDB instance, fixed for the process lifetime.
#[derive(Clone)]
pub struct Config {
    pub api_base: String,
    pub access_token: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();

        Self {
            api_base,
            access_token: access_token.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Build configuration from the positional arguments following the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        match args.as_slice() {
            [api_base, access_token] => Ok(Self::new(api_base.as_str(), access_token.as_str())),
            _ => Err(ConfigError::Usage),
        }
    }

    /// Both the base URL and the token must be present before any tool may run.
    pub fn is_complete(&self) -> bool {
        !self.api_base.is_empty() && !self.access_token.is_empty()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base", &self.api_base)
            .field("access_token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_from_args_two_positionals() {
        let config = Config::from_args(args(&["https://neodb.social", "tok"])).unwrap();
        assert_eq!(config.api_base, "https://neodb.social");
        assert_eq!(config.access_token, "tok");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.is_complete());
    }

    #[test]
    fn test_from_args_wrong_count() {
        assert!(matches!(Config::from_args(args(&[])), Err(ConfigError::Usage)));
        assert!(matches!(
            Config::from_args(args(&["https://neodb.social"])),
            Err(ConfigError::Usage)
        ));
        assert!(matches!(
            Config::from_args(args(&["a", "b", "c"])),
            Err(ConfigError::Usage)
        ));
    }

    #[test]
    fn test_usage_message() {
        assert_eq!(
            ConfigError::Usage.to_string(),
            "Usage: neodb-mcp <api_base_url> <access_token>"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("https://neodb.social//", "tok");
        assert_eq!(config.api_base, "https://neodb.social");
    }

    #[test]
    fn test_incomplete_config() {
        assert!(!Config::new("", "tok").is_complete());
        assert!(!Config::new("https://neodb.social", "").is_complete());
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Config::new("https://neodb.social", "secret-token"));
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
