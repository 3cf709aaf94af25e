use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use grocery_state::SettingItem;
use grocery_test::MemoryRepository;
use tokio::sync::{broadcast, Notify};

use crate::{
    login::{LoginEvent, LoginSettings},
    AuthService, AuthServiceError, AuthenticatedIdentity, CredentialRememberStore,
    LoginController,
};

/// What a [`ScriptedAuthService`] answers.
pub(crate) enum Script {
    Accept(&'static str),
    Reject,
    Fail(&'static str),
}

/// Auth service with a fixed answer that counts how often it was called.
pub(crate) struct ScriptedAuthService {
    script: Script,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedAuthService {
    pub(crate) fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            gate: None,
        })
    }

    /// Waits for `gate` to be notified before answering.
    pub(crate) fn gated(script: Script, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            gate: Some(gate),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuthService for ScriptedAuthService {
    async fn authenticate(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<Option<AuthenticatedIdentity>, AuthServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.script {
            Script::Accept(name) => Ok(Some(AuthenticatedIdentity::new(name))),
            Script::Reject => Ok(None),
            Script::Fail(message) => Err(AuthServiceError::Transport(message.to_string())),
        }
    }

    async fn request_password_reset(&self, _email: &str) -> Result<(), AuthServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Fail(message) => Err(AuthServiceError::Transport(message.to_string())),
            _ => Ok(()),
        }
    }
}

pub(crate) fn memory_store() -> (CredentialRememberStore, Arc<MemoryRepository<SettingItem>>) {
    let repository = Arc::new(MemoryRepository::<SettingItem>::default());
    (CredentialRememberStore::new(repository.clone()), repository)
}

pub(crate) fn controller(
    auth_service: Arc<ScriptedAuthService>,
    remember_store: CredentialRememberStore,
) -> LoginController {
    LoginController::new(auth_service, remember_store, LoginSettings::without_delays())
}

/// Collects every event published so far.
pub(crate) fn drain(receiver: &mut broadcast::Receiver<LoginEvent>) -> Vec<LoginEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
