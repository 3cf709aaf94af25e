use clap::Args;

use crate::{platform::AppContext, CommandResult};

mod forgot_password;
mod login;

pub(crate) mod remembered;

#[derive(Args, Clone)]
pub struct LoginArgs {
    #[arg(short = 'e', long, help = "Email address. Prompted for when missing.")]
    pub email: Option<String>,

    #[arg(
        long,
        env = "GROCERY_PASSWORD",
        hide_env_values = true,
        help = "Password. Prompted for when missing."
    )]
    pub password: Option<String>,

    #[arg(
        short = 'r',
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Remember the email for the next login. Defaults to the saved choice."
    )]
    pub remember: Option<bool>,
}

impl LoginArgs {
    pub async fn run(self, context: &AppContext) -> CommandResult {
        login::login(context, self.email, self.password, self.remember).await
    }
}

#[derive(Args, Clone)]
pub struct ForgotPasswordArgs {
    #[arg(short = 'e', long, help = "Email address. Defaults to the remembered one.")]
    pub email: Option<String>,

    #[arg(short = 'y', long, help = "Send the reset link without asking")]
    pub yes: bool,
}

impl ForgotPasswordArgs {
    pub async fn run(self, context: &AppContext) -> CommandResult {
        forgot_password::forgot_password(context, self.email, self.yes).await
    }
}
