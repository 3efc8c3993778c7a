use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the Gemini API key is required; tuning values fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Path of the serialized document store on disk.
    pub store_path: String,
    /// Max attempts per LLM/embedding call (including the first).
    pub max_retries: u32,
    /// Per-request timeout for the Gemini API.
    pub timeout_secs: u64,
    /// Prompts longer than this are truncated before sending.
    pub max_input_chars: usize,
    /// Uploads larger than this are rejected before extraction.
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            store_path: std::env::var("STORE_PATH")
                .unwrap_or_else(|_| "docsift_store.json".to_string()),
            max_retries: parse_env("MAX_RETRIES", 3)?,
            timeout_secs: parse_env("TIMEOUT_SECS", 45)?,
            max_input_chars: parse_env("MAX_INPUT_CHARS", 30_000)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' must be a valid number")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_returns_default_when_unset() {
        let value: u16 = parse_env("DOCSIFT_TEST_UNSET_KEY", 4242).unwrap();
        assert_eq!(value, 4242);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("DOCSIFT_TEST_GARBAGE_PORT", "not-a-number");
        let result: Result<u16> = parse_env("DOCSIFT_TEST_GARBAGE_PORT", 1);
        assert!(result.is_err());
        std::env::remove_var("DOCSIFT_TEST_GARBAGE_PORT");
    }

    #[test]
    fn test_require_env_missing_is_error() {
        assert!(require_env("DOCSIFT_TEST_MISSING_REQUIRED").is_err());
    }
}
