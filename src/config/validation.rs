use crate::config::types::{CategoryEntry, ClassifierConfig, Config, OutputConfig, RendererConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_renderer_config(&config.renderer)?;
    validate_classifier_config(&config.classifier)?;
    validate_output_config(&config.output)?;
    validate_categories(&config.categories)?;
    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> Result<(), ConfigError> {
    if config.scroll_count > 50 {
        return Err(ConfigError::Validation(format!(
            "scroll_count must be <= 50, got {}",
            config.scroll_count
        )));
    }

    if config.max_sessions < 1 || config.max_sessions > 16 {
        return Err(ConfigError::Validation(format!(
            "max_sessions must be between 1 and 16, got {}",
            config.max_sessions
        )));
    }

    if config.page_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "page_timeout_ms must be >= 1000ms, got {}ms",
            config.page_timeout_ms
        )));
    }

    Ok(())
}

/// Validates classifier configuration
fn validate_classifier_config(config: &ClassifierConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.api_base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api_base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "api_base_url must be http(s), got scheme '{}'",
            base.scheme()
        )));
    }

    if config.model.is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if config.batch_size < 1 || config.batch_size > 50 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be between 1 and 50, got {}",
            config.batch_size
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_path.is_empty() {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the category URL list
fn validate_categories(categories: &[CategoryEntry]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[category]] entry is required".to_string(),
        ));
    }

    for entry in categories {
        let url = Url::parse(&entry.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid category URL '{}': {}", entry.url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Category URL '{}' must be http(s)",
                entry.url
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "Category URL '{}' has no host",
                entry.url
            )));
        }
    }

    Ok(())
}
