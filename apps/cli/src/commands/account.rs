//! Account commands: password reset and change.

use anyhow::{Context, Result};

use crate::state::AppState;

pub async fn reset_password(state: &AppState, email: &str) -> Result<()> {
    state
        .services
        .auth()
        .request_password_reset(email)
        .await
        .context("Failed to request a password reset")?;
    println!("Password reset email sent to {}.", email.trim());
    Ok(())
}

pub async fn set_password(state: &AppState, new_password: &str) -> Result<()> {
    state.sign_in().await?;
    let auth = state.services.auth();
    auth.update_password(new_password)
        .await
        .context("Failed to update the password")?;
    auth.sign_out().await.context("Failed to sign out")?;
    println!("Password updated. Sign in again with the new password.");
    Ok(())
}
