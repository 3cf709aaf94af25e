use color_eyre::eyre::bail;
use grocery_auth::login::PasswordResetStep;
use inquire::{Confirm, Text};

use crate::{platform::AppContext, CommandResult};

pub(crate) async fn forgot_password(
    context: &AppContext,
    email: Option<String>,
    yes: bool,
) -> CommandResult {
    let controller = context.login_controller()?;
    let prefilled = controller.initialize().await;

    let email = match email {
        Some(email) => email,
        None => Text::new("Email")
            .with_initial_value(&prefilled.email)
            .prompt()?,
    };

    let step = controller.forgot_password(&email);
    let PasswordResetStep::ConfirmationRequired { email } = &step else {
        bail!("{}", step.message());
    };

    let confirmed = yes || Confirm::new(&step.message()).with_default(false).prompt()?;

    match controller.confirm_password_reset(email, confirmed).await {
        failed @ (PasswordResetStep::Failed(_) | PasswordResetStep::EmailRequired) => {
            bail!("{}", failed.message())
        }
        step => Ok(step.message()),
    }
}
