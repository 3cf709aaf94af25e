use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{
    loading::LoadingGuard, validation::validate_credentials, Credentials, LoginAttemptState,
    LoginEvent, LoginFailure, LoginMessage, LoginSettings, LoginViewState, PrefilledCredentials,
};
use crate::{
    AuthService, AuthServiceError, AuthenticatedIdentity, CredentialRememberStore,
    RememberedCredential,
};

/// Returned when [`LoginController::submit`] can't start an attempt.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Another attempt is still validating or waiting for the auth service.
    #[error("A login attempt is already in progress")]
    AttemptInProgress,
}

/// Drives the login screen.
///
/// Owns the form state (email, remember-me, loading flag and message) and runs at most one
/// login attempt at a time. Every change is published as a [`LoginEvent`]; the presentation
/// layer renders from those events or from [`LoginController::view_state`], and switches to
/// the main screen on [`LoginEvent::NavigateToMain`].
pub struct LoginController {
    pub(super) auth_service: Arc<dyn AuthService>,
    remember_store: CredentialRememberStore,
    settings: LoginSettings,
    form: Mutex<FormState>,
    loading: AtomicBool,
    events: broadcast::Sender<LoginEvent>,
}

#[derive(Debug, Default)]
struct FormState {
    /// Set from the start of an attempt until its navigation event has been published.
    claimed: bool,
    email: String,
    remember: bool,
    attempt: LoginAttemptState,
    message: Option<LoginMessage>,
}

impl FormState {
    fn apply(&mut self, next: &LoginAttemptState) {
        match next {
            LoginAttemptState::InFlight => self.message = None,
            LoginAttemptState::Succeeded(name) => {
                self.message = Some(LoginMessage::success(format!("Welcome back, {name}!")));
            }
            LoginAttemptState::Failed(failure) => {
                self.message = Some(LoginMessage::error(failure.user_message()));
            }
            LoginAttemptState::Idle | LoginAttemptState::Validating => {}
        }
        self.attempt = next.clone();
    }
}

impl LoginController {
    /// Creates a controller in the `Idle` state with an empty form.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        remember_store: CredentialRememberStore,
        settings: LoginSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));

        Self {
            auth_service,
            remember_store,
            settings,
            form: Mutex::new(FormState::default()),
            loading: AtomicBool::new(false),
            events,
        }
    }

    /// Subscribes to state changes, starting with the next event.
    pub fn subscribe(&self) -> broadcast::Receiver<LoginEvent> {
        self.events.subscribe()
    }

    /// Current state of the login attempt.
    pub fn state(&self) -> LoginAttemptState {
        self.form().attempt.clone()
    }

    /// Whether the auth service is currently being called.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Snapshot of everything the login screen shows.
    pub fn view_state(&self) -> LoginViewState {
        let form = self.form();
        LoginViewState {
            email: form.email.clone(),
            remember: form.remember,
            is_loading: self.is_loading(),
            attempt: form.attempt.clone(),
            message: form.message.clone(),
        }
    }

    /// Restores the remembered email into the form.
    ///
    /// Never fails: a storage error is logged and the form starts empty.
    pub async fn initialize(&self) -> PrefilledCredentials {
        let prefilled = match self.remember_store.load().await {
            Some(credential) => PrefilledCredentials {
                email: credential.email,
                remember: true,
            },
            None => PrefilledCredentials::default(),
        };

        let mut form = self.form();
        form.email.clone_from(&prefilled.email);
        form.remember = prefilled.remember;

        prefilled
    }

    /// Runs one login attempt and returns its terminal state.
    ///
    /// Blank fields and malformed emails fail without calling the auth service. On success the
    /// email is remembered when `remember` is set, otherwise any remembered email is cleared.
    /// Failures never escape as errors, they end the attempt in [`LoginAttemptState::Failed`].
    ///
    /// # Errors
    ///
    /// [`SubmitError::AttemptInProgress`] if another attempt hasn't finished yet, counting a
    /// successful attempt's wait before [`LoginEvent::NavigateToMain`]. The running attempt is
    /// not affected.
    ///
    /// Dropping the returned future part way puts the controller back in `Idle`.
    pub async fn submit(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        remember: bool,
    ) -> Result<LoginAttemptState, SubmitError> {
        let credentials = Credentials {
            email: email.into(),
            password: password.into(),
        };
        let _claim = self.begin_attempt(&credentials.email, remember)?;

        if let Err(failure) = validate_credentials(&credentials) {
            debug!(%failure, "Login input rejected");
            return Ok(self.transition(LoginAttemptState::Failed(failure)));
        }

        let next = match self.authenticate(&credentials).await {
            Ok(Some(identity)) => {
                self.remember_store
                    .save(&RememberedCredential {
                        email: credentials.email,
                        remember,
                    })
                    .await;
                info!("Login succeeded");
                LoginAttemptState::Succeeded(identity.display_name)
            }
            Ok(None) => {
                info!("Login rejected by the auth service");
                LoginAttemptState::Failed(LoginFailure::InvalidCredentials)
            }
            Err(e) => {
                warn!(error = %e, "Login failed");
                LoginAttemptState::Failed(LoginFailure::UnexpectedError(e.to_string()))
            }
        };

        let state = self.transition(next);
        if matches!(state, LoginAttemptState::Succeeded(_)) {
            self.navigate_to_main().await;
        }

        Ok(state)
    }

    fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: LoginEvent) {
        // Sending only fails when nobody is subscribed
        let _ = self.events.send(event);
    }

    /// Claims the controller for a new attempt, or rejects it if one is running.
    fn begin_attempt(
        &self,
        email: &str,
        remember: bool,
    ) -> Result<AttemptClaim<'_>, SubmitError> {
        {
            let mut form = self.form();
            if form.claimed {
                debug!("Rejecting submit, an attempt is already in progress");
                return Err(SubmitError::AttemptInProgress);
            }

            form.claimed = true;
            form.email = email.to_owned();
            form.remember = remember;
            form.apply(&LoginAttemptState::Validating);
        }

        self.publish(LoginEvent::StateChanged(LoginAttemptState::Validating));
        Ok(AttemptClaim { controller: self })
    }

    fn transition(&self, next: LoginAttemptState) -> LoginAttemptState {
        {
            let mut form = self.form();
            debug!(from = ?form.attempt, to = ?next, "Login state transition");
            form.apply(&next);
        }

        self.publish(LoginEvent::StateChanged(next.clone()));
        next
    }

    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<AuthenticatedIdentity>, AuthServiceError> {
        let _loading = LoadingGuard::acquire(&self.loading, &self.events);
        self.transition(LoginAttemptState::InFlight);

        if !self.settings.ux_delay.is_zero() {
            tokio::time::sleep(self.settings.ux_delay).await;
        }

        self.auth_service
            .authenticate(&credentials.email, &credentials.password)
            .await
    }

    async fn navigate_to_main(&self) {
        if !self.settings.success_delay.is_zero() {
            tokio::time::sleep(self.settings.success_delay).await;
        }

        self.publish(LoginEvent::NavigateToMain);
    }
}

/// Keeps other submits out while an attempt runs.
///
/// Dropping the claim frees the controller. If the attempt was abandoned before reaching a
/// terminal state (the `submit` future was dropped), the state goes back to `Idle`.
struct AttemptClaim<'a> {
    controller: &'a LoginController,
}

impl Drop for AttemptClaim<'_> {
    fn drop(&mut self) {
        let abandoned = {
            let mut form = self.controller.form();
            form.claimed = false;
            if form.attempt.is_in_progress() {
                form.apply(&LoginAttemptState::Idle);
                true
            } else {
                false
            }
        };

        if abandoned {
            debug!("Login attempt abandoned before finishing");
            self.controller
                .publish(LoginEvent::StateChanged(LoginAttemptState::Idle));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use grocery_test::FailingRepository;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        login::MessageSeverity,
        test_support::{controller, drain, memory_store, Script, ScriptedAuthService},
    };

    #[tokio::test]
    async fn test_initialize_without_remembered_credential() {
        let (store, _) = memory_store();
        let controller = controller(ScriptedAuthService::new(Script::Reject), store);

        assert_eq!(controller.initialize().await, PrefilledCredentials::default());
        assert_eq!(controller.state(), LoginAttemptState::Idle);
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_initialize_prefills_remembered_email() {
        let (store, _) = memory_store();
        store
            .save(&RememberedCredential::remembered("user3@mail.com"))
            .await;
        let controller = controller(ScriptedAuthService::new(Script::Reject), store);

        let prefilled = controller.initialize().await;

        assert_eq!(
            prefilled,
            PrefilledCredentials {
                email: "user3@mail.com".to_string(),
                remember: true,
            }
        );
        let view = controller.view_state();
        assert_eq!(view.email, "user3@mail.com");
        assert!(view.remember);
    }

    #[tokio::test]
    async fn test_initialize_with_broken_storage_starts_empty() {
        let store = CredentialRememberStore::new(Arc::new(FailingRepository::default()));
        let controller = controller(ScriptedAuthService::new(Script::Reject), store);

        assert_eq!(controller.initialize().await, PrefilledCredentials::default());
    }

    #[tokio::test]
    async fn test_successful_login_remembers_email() {
        let (store, _) = memory_store();
        let auth = ScriptedAuthService::new(Script::Accept("Jane"));
        let controller = controller(auth.clone(), store.clone());
        let mut events = controller.subscribe();

        assert!(!controller.is_loading());
        let state = controller
            .submit("user3@mail.com", "user3", true)
            .await
            .unwrap();

        assert_eq!(state, LoginAttemptState::Succeeded("Jane".to_string()));
        assert!(!controller.is_loading());
        assert_eq!(auth.calls(), 1);
        assert_eq!(
            drain(&mut events),
            vec![
                LoginEvent::StateChanged(LoginAttemptState::Validating),
                LoginEvent::LoadingChanged(true),
                LoginEvent::StateChanged(LoginAttemptState::InFlight),
                LoginEvent::LoadingChanged(false),
                LoginEvent::StateChanged(LoginAttemptState::Succeeded("Jane".to_string())),
                LoginEvent::NavigateToMain,
            ]
        );
        assert_eq!(
            store.load().await,
            Some(RememberedCredential::remembered("user3@mail.com"))
        );

        let view = controller.view_state();
        assert!(view.has_message());
        assert_eq!(
            view.message,
            Some(LoginMessage {
                text: "Welcome back, Jane!".to_string(),
                severity: MessageSeverity::Success,
            })
        );
    }

    #[tokio::test]
    async fn test_successful_login_without_remember_clears_previous_record() {
        let (store, repository) = memory_store();
        store
            .save(&RememberedCredential::remembered("old@mail.com"))
            .await;
        let controller = controller(ScriptedAuthService::new(Script::Accept("Jane")), store.clone());

        let state = controller
            .submit("user3@mail.com", "user3", false)
            .await
            .unwrap();

        assert_eq!(state, LoginAttemptState::Succeeded("Jane".to_string()));
        assert_eq!(store.load().await, None);
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_blank_fields_fail_without_calling_service() {
        let (store, _) = memory_store();
        let auth = ScriptedAuthService::new(Script::Accept("Jane"));
        let controller = controller(auth.clone(), store);
        let mut events = controller.subscribe();

        for (email, password) in [("", "user3"), ("user3@mail.com", "  "), (" ", "\t")] {
            let state = controller.submit(email, password, true).await.unwrap();
            assert_eq!(state, LoginAttemptState::Failed(LoginFailure::MissingFields));
            assert!(!controller.is_loading());
        }

        assert_eq!(auth.calls(), 0);
        assert!(!drain(&mut events)
            .iter()
            .any(|event| matches!(event, LoginEvent::LoadingChanged(_))));
    }

    #[tokio::test]
    async fn test_invalid_email_fails_without_calling_service() {
        let (store, _) = memory_store();
        let auth = ScriptedAuthService::new(Script::Accept("Jane"));
        let controller = controller(auth.clone(), store);

        for email in ["not-an-email", "Jane <jane@mail.com>", " jane@mail.com"] {
            let state = controller.submit(email, "x", true).await.unwrap();
            assert_eq!(
                state,
                LoginAttemptState::Failed(LoginFailure::InvalidEmailFormat),
                "{email:?}"
            );
        }

        assert_eq!(auth.calls(), 0);
        let view = controller.view_state();
        assert_eq!(
            view.message.map(|message| message.severity),
            Some(MessageSeverity::Error)
        );
    }

    #[tokio::test]
    async fn test_rejected_credentials_keep_remembered_email() {
        let (store, _) = memory_store();
        store
            .save(&RememberedCredential::remembered("user3@mail.com"))
            .await;
        let controller = controller(ScriptedAuthService::new(Script::Reject), store.clone());

        let state = controller
            .submit("user3@mail.com", "wrong", false)
            .await
            .unwrap();

        assert_eq!(
            state,
            LoginAttemptState::Failed(LoginFailure::InvalidCredentials)
        );
        assert!(!controller.is_loading());
        assert_eq!(
            store.load().await,
            Some(RememberedCredential::remembered("user3@mail.com"))
        );
    }

    #[tokio::test]
    async fn test_service_error_becomes_unexpected_failure() {
        let (store, _) = memory_store();
        let controller = controller(
            ScriptedAuthService::new(Script::Fail("connection refused")),
            store,
        );
        let mut events = controller.subscribe();

        let state = controller
            .submit("user3@mail.com", "user3", true)
            .await
            .unwrap();

        let failure = match state {
            LoginAttemptState::Failed(failure) => failure,
            other => panic!("Expected a failed attempt, got {other:?}"),
        };
        assert_eq!(
            failure,
            LoginFailure::UnexpectedError("connection refused".to_string())
        );
        assert_eq!(failure.to_string(), "unexpected error: connection refused");
        assert!(!controller.is_loading());

        let events = drain(&mut events);
        assert_eq!(
            events.last(),
            Some(&LoginEvent::StateChanged(LoginAttemptState::Failed(failure)))
        );
        assert!(!events.contains(&LoginEvent::NavigateToMain));
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_fail_login() {
        let store = CredentialRememberStore::new(Arc::new(FailingRepository::default()));
        let controller = controller(ScriptedAuthService::new(Script::Accept("Jane")), store);

        let state = controller
            .submit("user3@mail.com", "user3", true)
            .await
            .unwrap();

        assert_eq!(state, LoginAttemptState::Succeeded("Jane".to_string()));
    }

    #[tokio::test]
    async fn test_new_attempt_allowed_after_failure() {
        let (store, _) = memory_store();
        let controller = controller(ScriptedAuthService::new(Script::Accept("Jane")), store);

        let first = controller.submit("", "", false).await.unwrap();
        assert!(first.is_terminal());

        let second = controller
            .submit("user3@mail.com", "user3", false)
            .await
            .unwrap();
        assert_eq!(second, LoginAttemptState::Succeeded("Jane".to_string()));
    }

    #[tokio::test]
    async fn test_concurrent_submit_is_rejected() {
        let (store, _) = memory_store();
        let gate = Arc::new(Notify::new());
        let auth = ScriptedAuthService::gated(Script::Accept("Jane"), gate.clone());
        let controller = controller(auth.clone(), store);
        let mut events = controller.subscribe();

        let first = controller.submit("user3@mail.com", "user3", false);
        let second = async {
            while let Ok(event) = events.recv().await {
                if event == LoginEvent::StateChanged(LoginAttemptState::InFlight) {
                    break;
                }
            }
            assert!(controller.is_loading());

            let rejected = controller.submit("other@mail.com", "other", true).await;
            gate.notify_one();
            rejected
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(second, Err(SubmitError::AttemptInProgress));
        assert_eq!(first, Ok(LoginAttemptState::Succeeded("Jane".to_string())));
        assert_eq!(auth.calls(), 1);
        assert_eq!(controller.view_state().email, "user3@mail.com");
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_submit_rejected_until_navigation() {
        let (store, _) = memory_store();
        let auth = ScriptedAuthService::new(Script::Accept("Jane"));
        let controller = LoginController::new(
            auth.clone(),
            store,
            LoginSettings {
                success_delay: Duration::from_millis(200),
                ..LoginSettings::without_delays()
            },
        );
        let mut events = controller.subscribe();
        let mut observer = controller.subscribe();

        let first = controller.submit("user3@mail.com", "user3", false);
        let second = async {
            while let Ok(event) = events.recv().await {
                if matches!(event, LoginEvent::StateChanged(LoginAttemptState::Succeeded(_))) {
                    break;
                }
            }
            controller.submit("", "", false).await
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(second, Err(SubmitError::AttemptInProgress));
        assert_eq!(first, Ok(LoginAttemptState::Succeeded("Jane".to_string())));
        assert_eq!(
            controller.state(),
            LoginAttemptState::Succeeded("Jane".to_string())
        );
        assert_eq!(drain(&mut observer).last(), Some(&LoginEvent::NavigateToMain));

        // Free again once the navigation event is out
        let third = controller.submit("", "", false).await;
        assert_eq!(third, Ok(LoginAttemptState::Failed(LoginFailure::MissingFields)));
    }

    #[tokio::test]
    async fn test_dropped_submit_releases_controller() {
        let (store, _) = memory_store();
        let gate = Arc::new(Notify::new());
        let auth = ScriptedAuthService::gated(Script::Accept("Jane"), gate.clone());
        let controller = controller(auth.clone(), store);
        let mut events = controller.subscribe();

        let timed_out = tokio::time::timeout(
            Duration::from_millis(50),
            controller.submit("user3@mail.com", "user3", false),
        )
        .await;

        assert!(timed_out.is_err());
        assert_eq!(controller.state(), LoginAttemptState::Idle);
        assert!(!controller.is_loading());
        let events = drain(&mut events);
        assert!(events.contains(&LoginEvent::LoadingChanged(false)));
        assert!(events.contains(&LoginEvent::StateChanged(LoginAttemptState::Idle)));

        // Let the retry through the gate
        gate.notify_one();
        let retry = controller
            .submit("user3@mail.com", "user3", false)
            .await
            .unwrap();
        assert_eq!(retry, LoginAttemptState::Succeeded("Jane".to_string()));
        assert_eq!(auth.calls(), 2);
    }
}
