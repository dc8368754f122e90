//! CLI command handlers.

use anyhow::{Context, Result, bail};
use prodmanage_core::api::ApiClient;
use prodmanage_core::auth::AuthContext;
use prodmanage_core::config::Config;
use prodmanage_core::storage::LocalStorage;
use prodmanage_core::validation::FieldErrors;

pub mod auth;
pub mod config;
pub mod pages;
pub mod products;
pub mod users;

const LOGIN_HINT: &str = "Your session is missing or expired. Run `prodmanage login` and try again.";

pub fn api_client(config: &Config, api_url: Option<&str>) -> Result<ApiClient> {
    let base_url = match api_url {
        Some(url) => url.trim().to_string(),
        None => config.effective_base_url()?,
    };
    ApiClient::new(&base_url)
}

/// Client plus the session restored from `storage.json`.
pub fn auth_context(config: &Config, api_url: Option<&str>) -> Result<AuthContext> {
    let api = api_client(config, api_url)?;
    let storage = LocalStorage::open_default().context("open session storage")?;
    Ok(AuthContext::restore(api, storage))
}

/// Prints each field error to stderr and fails if there are any.
fn ensure_valid(errors: &FieldErrors) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    for (field, message) in errors {
        eprintln!("  {field}: {message}");
    }
    bail!("Validation failed")
}
