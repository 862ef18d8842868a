//! OpenAI-compatible client configuration.

use crate::config::LlmSettings;
use crate::error::{Result, TubechatError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create a client for the configured endpoint, reading the API key from the environment.
pub fn create_client(settings: &LlmSettings) -> Result<Client<OpenAIConfig>> {
    let api_key = settings.api_key().ok_or_else(|| {
        TubechatError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            settings.api_key_env, settings.api_key_env
        ))
    })?;

    create_client_with_key(
        &settings.endpoint,
        &api_key,
        Duration::from_secs(settings.timeout_seconds),
    )
}

/// Create a client with an explicit key and request timeout.
pub fn create_client_with_key(
    endpoint: &str,
    api_key: &str,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let config = OpenAIConfig::new()
        .with_api_base(endpoint.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}
