//! Configuration validation logic.

use crate::config::loader::{Config, RetryConfig};
use crate::error::{Error, Result};
use regex::Regex;

/// Minimum length for the API key.
const MIN_API_KEY_LENGTH: usize = 10;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_key(&config.account.api_key)?;
    validate_handles(&config.targets.blogs)?;
    validate_queue_depth(config.options.queue_depth)?;
    validate_retry(&config.retry)?;

    Ok(())
}

/// Validate the API key.
pub fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.is_empty() {
        return Err(Error::MissingConfig("api_key".to_string()));
    }

    if api_key.len() < MIN_API_KEY_LENGTH {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: format!(
                "API key must be at least {} characters (got {})",
                MIN_API_KEY_LENGTH,
                api_key.len()
            ),
        });
    }

    let key_lower = api_key.to_lowercase();
    if key_lower.contains("replaceme") || key_lower.contains("your_api_key") {
        return Err(Error::ConfigValidation {
            field: "api_key".to_string(),
            message: "API key appears to be a placeholder. Please provide your actual key."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate blog handles.
pub fn validate_handles<S: AsRef<str>, I: IntoIterator<Item = S>>(handles: I) -> Result<()> {
    let handles: Vec<_> = handles.into_iter().collect();

    if handles.is_empty() {
        return Err(Error::MissingConfig(
            "blogs (at least one blog handle required)".to_string(),
        ));
    }

    let handle_pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,31}$")
        .map_err(|e| Error::Config(format!("Invalid handle pattern: {}", e)))?;

    for handle in handles {
        let handle = handle.as_ref();
        let clean = normalize_handle(handle);

        if !handle_pattern.is_match(clean) {
            return Err(Error::ConfigValidation {
                field: "blogs".to_string(),
                message: format!(
                    "Blog handle '{}' is invalid. Use 1-32 letters, digits or hyphens.",
                    handle
                ),
            });
        }
    }

    Ok(())
}

/// Strip a leading `@` from a handle.
pub fn normalize_handle(handle: &str) -> &str {
    handle.trim().trim_start_matches('@')
}

/// Validate the queue depth.
pub fn validate_queue_depth(depth: usize) -> Result<()> {
    if depth == 0 {
        return Err(Error::ConfigValidation {
            field: "queue_depth".to_string(),
            message: "Queue depth must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Validate the backoff policy.
pub fn validate_retry(retry: &RetryConfig) -> Result<()> {
    if !retry.multiplier.is_finite() || retry.multiplier < 1.0 {
        return Err(Error::ConfigValidation {
            field: "retry.multiplier".to_string(),
            message: format!("Multiplier must be at least 1.0 (got {})", retry.multiplier),
        });
    }

    if !(0.0..=1.0).contains(&retry.randomization_factor) {
        return Err(Error::ConfigValidation {
            field: "retry.randomization_factor".to_string(),
            message: format!(
                "Randomization factor must be between 0 and 1 (got {})",
                retry.randomization_factor
            ),
        });
    }

    if retry.initial_interval_ms == 0 {
        return Err(Error::ConfigValidation {
            field: "retry.initial_interval_ms".to_string(),
            message: "Initial interval must be positive".to_string(),
        });
    }

    if retry.max_elapsed_ms == 0 {
        return Err(Error::ConfigValidation {
            field: "retry.max_elapsed_ms".to_string(),
            message: "Max elapsed time must be positive".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_handles() {
        assert!(validate_handles(["staff"]).is_ok());
        assert!(validate_handles(["@my-blog", "x"]).is_ok());
    }

    #[test]
    fn test_invalid_handles() {
        assert!(validate_handles(Vec::<String>::new()).is_err());
        assert!(validate_handles(["../etc"]).is_err());
        assert!(validate_handles(["-leading"]).is_err());
        assert!(validate_handles(["has space"]).is_err());
    }

    #[test]
    fn test_api_key() {
        assert!(matches!(
            validate_api_key(""),
            Err(Error::MissingConfig(_))
        ));
        assert!(validate_api_key("short").is_err());
        assert!(validate_api_key("REPLACEME_REPLACEME").is_err());
        assert!(validate_api_key("0123456789abcdef").is_ok());
    }

    #[test]
    fn test_retry_bounds() {
        let mut retry = RetryConfig::default();
        assert!(validate_retry(&retry).is_ok());

        retry.multiplier = 0.5;
        assert!(validate_retry(&retry).is_err());

        retry.multiplier = 2.0;
        retry.randomization_factor = 1.5;
        assert!(validate_retry(&retry).is_err());
    }

    #[test]
    fn test_retry_rejects_non_finite_multiplier() {
        let config: Config = toml::from_str(
            r#"
            [retry]
            multiplier = nan
            "#,
        )
        .unwrap();
        assert!(validate_retry(&config.retry).is_err());

        let mut retry = RetryConfig::default();
        retry.multiplier = f64::INFINITY;
        assert!(validate_retry(&retry).is_err());
    }

    #[test]
    fn test_retry_rejects_zero_max_elapsed() {
        let mut retry = RetryConfig::default();
        retry.max_elapsed_ms = 0;
        assert!(matches!(
            validate_retry(&retry),
            Err(Error::ConfigValidation { field, .. }) if field == "retry.max_elapsed_ms"
        ));
    }

    #[test]
    fn test_queue_depth() {
        assert!(validate_queue_depth(0).is_err());
        assert!(validate_queue_depth(1).is_ok());
    }
}
