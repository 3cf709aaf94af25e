use color_eyre::eyre::bail;
use grocery_auth::login::{LoginAttemptState, LoginEvent};
use inquire::{Password, Text};
use tracing::debug;

use crate::{platform::AppContext, CommandResult};

pub(crate) async fn login(
    context: &AppContext,
    email: Option<String>,
    password: Option<String>,
    remember: Option<bool>,
) -> CommandResult {
    let controller = context.login_controller()?;
    let prefilled = controller.initialize().await;

    let email = match email {
        Some(email) => email,
        None => Text::new("Email")
            .with_initial_value(&prefilled.email)
            .prompt()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new("Password").without_confirmation().prompt()?,
    };
    let remember = remember.unwrap_or(prefilled.remember);

    let mut events = controller.subscribe();
    let submit = controller.submit(email, password, remember);
    tokio::pin!(submit);

    let state = loop {
        tokio::select! {
            biased;
            Ok(event) = events.recv() => render(&event),
            result = &mut submit => break result?,
        }
    };
    while let Ok(event) = events.try_recv() {
        render(&event);
    }

    match state {
        LoginAttemptState::Succeeded(_) => Ok(controller
            .view_state()
            .message
            .map(|message| message.text)
            .unwrap_or_default()),
        LoginAttemptState::Failed(failure) => bail!("{}", failure.user_message()),
        other => bail!("Login ended unexpectedly in {other:?}"),
    }
}

fn render(event: &LoginEvent) {
    match event {
        LoginEvent::LoadingChanged(true) => eprintln!("Logging in..."),
        LoginEvent::NavigateToMain => debug!("Opening the main screen"),
        LoginEvent::StateChanged(state) => debug!(?state, "Login state changed"),
        LoginEvent::LoadingChanged(false) => {}
    }
}
