mod state;

use std::{path::PathBuf, sync::Arc};

use grocery_auth::{login::LoginSettings, CredentialRememberStore, LoginController};
pub(crate) use state::StateError;

use crate::{command::Cli, directory::LocalAuthService};

/// Everything a command needs to build the login flow.
pub(crate) struct AppContext {
    state_dir: Option<PathBuf>,
    users: Option<PathBuf>,
    settings: LoginSettings,
}

impl AppContext {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        let settings = if cli.no_delay {
            LoginSettings::without_delays()
        } else {
            LoginSettings::default()
        };

        Self {
            state_dir: cli.state_dir.clone(),
            users: cli.users.clone(),
            settings,
        }
    }

    /// Opens the preferences database and wraps it in a remember-me store.
    pub(crate) fn remember_store(&self) -> Result<CredentialRememberStore, StateError> {
        let database = state::open_preferences(self.state_dir.clone())?;
        Ok(CredentialRememberStore::new(database.get_repository()))
    }

    pub(crate) fn login_controller(&self) -> Result<LoginController, StateError> {
        let auth_service = match &self.users {
            Some(path) => LocalAuthService::from_file(path)?,
            None => LocalAuthService::default(),
        };

        Ok(LoginController::new(
            Arc::new(auth_service),
            self.remember_store()?,
            self.settings.clone(),
        ))
    }
}
