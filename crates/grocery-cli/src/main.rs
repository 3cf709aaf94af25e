#![doc = include_str!("../README.md")]

use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};

use crate::{command::*, platform::AppContext};

mod auth;
mod command;
mod directory;
mod platform;

pub(crate) type CommandResult = Result<String>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - if RUST_LOG is provided at compile time
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(
            option_env!("RUST_LOG")
                .unwrap_or("info")
                .parse()
                .expect("should provide valid log level at compile time."),
        )
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    color_eyre::install()?;

    let cli = Cli::parse();

    let Some(command) = cli.command.clone() else {
        let mut cmd = Cli::command();
        cmd.print_help()?;
        return Ok(());
    };

    let context = AppContext::from_cli(&cli);
    let output = process_commands(command, &context).await?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

async fn process_commands(command: Commands, context: &AppContext) -> CommandResult {
    match command {
        Commands::Login(args) => args.run(context).await,
        Commands::Status => auth::remembered::status(context).await,
        Commands::Forget => auth::remembered::forget(context).await,
        Commands::ForgotPassword(args) => args.run(context).await,
        Commands::Register => Ok(context.login_controller()?.register().notice().to_string()),
    }
}
