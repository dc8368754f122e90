//! Registration and user listing.

use anyhow::{Result, bail};
use prodmanage_core::api::{ApiClient, ApiError};
use prodmanage_core::validation;
use prodmanage_types::RegistrationForm;
use tracing::warn;

use super::ensure_valid;

const REGISTER_FALLBACK: &str = "Please check your input and try again.";

pub async fn register(api: &ApiClient, form: RegistrationForm) -> Result<()> {
    let form = validation::normalize_registration(form);
    ensure_valid(&validation::validate_registration(&form))?;

    match api.register(&form).await {
        Ok(user) => {
            println!("Registration Successful! Your account has been created successfully.");
            if let Some(user) = user {
                println!("{} <{}>", user.full_name, user.email);
            }
            Ok(())
        }
        Err(err @ ApiError::Rejected { .. }) => {
            if let Some(fields) = err.field_errors() {
                for (field, message) in fields {
                    eprintln!("  {field}: {message}");
                }
            }
            bail!("Registration Failed: {}", err.failure_message(REGISTER_FALLBACK))
        }
        Err(err) => {
            warn!(error = %err, "registration request failed");
            bail!("Network Error: Please check your connection and try again.")
        }
    }
}

pub async fn list(api: &ApiClient) -> Result<()> {
    let users = match api.list_users().await {
        Ok(users) => users,
        Err(err) => bail!("{}", err.failure_message("Failed to fetch users")),
    };

    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }
    for user in users {
        println!("{}  {}  {}", user.id, user.full_name, user.email);
    }
    Ok(())
}
