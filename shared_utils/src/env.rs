use thiserror::Error;

/// Errors related to process configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable required by the caller is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Reads a required environment variable.
///
/// Unlike bare `std::env::var`, the error names the variable, so a missing
/// setting surfaces as actionable configuration feedback.
pub fn get_env_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads an optional environment variable, `None` when unset.
pub fn get_env_var_opt(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_var_is_a_structured_error() {
        let err = get_env_var("SHARED_UTILS_TEST_SURELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("SHARED_UTILS_TEST_SURELY_UNSET"));
    }
}
