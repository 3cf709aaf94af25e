//! Commands that inspect or reset the remember-me preference.

use crate::{platform::AppContext, CommandResult};

pub(crate) async fn status(context: &AppContext) -> CommandResult {
    let store = context.remember_store()?;

    Ok(match store.try_load().await? {
        Some(credential) => format!("Remembered email: {}", credential.email),
        None => "No email is remembered.".to_string(),
    })
}

pub(crate) async fn forget(context: &AppContext) -> CommandResult {
    context.remember_store()?.try_clear().await?;

    Ok("Forgot the remembered email.".to_string())
}
