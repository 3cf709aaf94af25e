use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::auth::{ForgotPasswordArgs, LoginArgs};

pub const STATE_DIR_ENV: &str = "GROCERY_STATE_DIR";
pub const USERS_ENV: &str = "GROCERY_USERS";

#[derive(Parser, Clone)]
#[command(name = "grocery", version, about = "Grocery app login", long_about = None)]
pub struct Cli {
    // Optional so running without a subcommand prints help instead of an error
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        long,
        global = true,
        env = STATE_DIR_ENV,
        help = "Directory holding the preferences database. Defaults to ~/.config/grocery."
    )]
    pub state_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = USERS_ENV,
        help = "JSON file listing the accounts accepted by the local auth service."
    )]
    pub users: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Skip the pauses before authenticating and after a successful login."
    )]
    pub no_delay: bool,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(long_about = "Log in with an email address and password.")]
    Login(LoginArgs),

    #[command(long_about = "Show the remembered email address.")]
    Status,

    #[command(long_about = "Forget the remembered email address.")]
    Forget,

    #[command(long_about = "Request a password reset link.")]
    ForgotPassword(ForgotPasswordArgs),

    #[command(long_about = "Register a new account.")]
    Register,
}
