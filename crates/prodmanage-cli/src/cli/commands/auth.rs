//! Login/logout command handlers.

use anyhow::{Result, bail};
use prodmanage_core::auth::AuthContext;
use prodmanage_core::validation;
use prodmanage_types::LoginForm;

use super::{LOGIN_HINT, ensure_valid};

pub async fn login(auth: &mut AuthContext, email: String, password: String) -> Result<()> {
    let form = validation::normalize_login(LoginForm { email, password });
    ensure_valid(&validation::validate_login(&form))?;

    if !auth.login(&form.email, &form.password).await {
        bail!("Login Failed: Invalid email or password.");
    }

    let name = auth.user().map_or(form.email.as_str(), |user| user.name.as_str());
    println!("Login Successful! Signed in as {name}.");
    if !auth.is_session_saved() {
        eprintln!(
            "Warning: the session could not be saved; the next command will start logged out."
        );
    }
    Ok(())
}

pub fn logout(auth: &mut AuthContext) {
    auth.logout();
    println!("Logged Out: You have been successfully logged out.");
}

pub async fn whoami(auth: &mut AuthContext, verify: bool) -> Result<()> {
    if verify {
        return match auth.verify().await {
            Ok(user) => {
                println!("{} <{}> (verified)", user.name, user.email);
                Ok(())
            }
            Err(err) => {
                if err.is_unauthorized() {
                    eprintln!("{LOGIN_HINT}");
                }
                bail!("{}", err.failure_message("Could not verify session"))
            }
        };
    }

    match auth.user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in."),
    }
    Ok(())
}
