use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// How many times to call the analysis service and how long to wait in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    attempt_timeout: Duration,
    backoff_unit: Duration,
}

impl RetryPolicy {
    /// `max_attempts` is raised to 1 when zero is given.
    #[must_use]
    pub fn new(max_attempts: u32, attempt_timeout: Duration, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            attempt_timeout,
            backoff_unit,
        }
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// Delay after the failed attempt number `attempt` (1-based), growing linearly.
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_BACKOFF_UNIT)
    }
}

/// Settings for the analysis service client, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub base_url: Url,
    pub retry: RetryPolicy,
    /// Surface offline readings to the user instead of hiding them.
    pub strict: bool,
}

impl ClassifierConfig {
    /// Configuration pointing at `base_url` with default retry behavior.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the url does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            retry: RetryPolicy::default(),
            strict: false,
        })
    }

    /// Read `FORTUNE_API_URL`, `FORTUNE_ATTEMPTS`, `FORTUNE_TIMEOUT_SECS` and
    /// `FORTUNE_STRICT_MODE`, falling back to defaults for unset values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for values that are set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`ClassifierConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for values that are set but invalid.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("FORTUNE_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let attempts = match lookup("FORTUNE_ATTEMPTS") {
            Some(raw) => parse_positive("FORTUNE_ATTEMPTS", &raw)?,
            None => DEFAULT_MAX_ATTEMPTS,
        };
        let timeout = match lookup("FORTUNE_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(u64::from(parse_positive("FORTUNE_TIMEOUT_SECS", &raw)?)),
            None => DEFAULT_ATTEMPT_TIMEOUT,
        };
        let strict = lookup("FORTUNE_STRICT_MODE").is_some_and(|raw| parse_flag(&raw));

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            retry: RetryPolicy::new(attempts, timeout, DEFAULT_BACKOFF_UNIT),
            strict,
        })
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Absolute url for an api path such as `api/analyze`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Parse and check a base url for the analysis service.
///
/// # Errors
///
/// Returns `ConfigError` when the url does not parse or is not http(s).
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
        raw: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            name,
            raw: raw.to_string(),
        }),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
