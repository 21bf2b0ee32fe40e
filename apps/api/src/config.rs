use anyhow::{Context, Result};

const DEFAULT_HEADER_MAX_LEN: usize = 50;
const DEFAULT_MAX_CONCURRENT_ANALYSES: usize = 4;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Without a key the service runs with no language model: analysis
    /// endpoints refuse and tailoring returns the original text.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Lines at or above this many characters are never treated as section headers.
    pub header_max_len: usize,
    /// Upper bound on job analyses in flight for one batch request.
    pub max_concurrent_analyses: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            header_max_len: parse_env("HEADER_MAX_LEN", DEFAULT_HEADER_MAX_LEN)
                .context("HEADER_MAX_LEN must be a positive integer")?,
            max_concurrent_analyses: parse_env(
                "MAX_CONCURRENT_ANALYSES",
                DEFAULT_MAX_CONCURRENT_ANALYSES,
            )
            .context("MAX_CONCURRENT_ANALYSES must be a positive integer")?
            .max(1),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("RESUME_TAILOR_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_TAILOR_TEST_BAD_VAR", "not-a-number");
        let result: Result<u16> = parse_env("RESUME_TAILOR_TEST_BAD_VAR", 1);
        assert!(result.is_err());
        std::env::remove_var("RESUME_TAILOR_TEST_BAD_VAR");
    }
}
