use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

use super::LoginEvent;

/// Holds the loading flag up for as long as it's alive.
///
/// Dropping the guard clears the flag, whichever way the owning scope is left.
pub(crate) struct LoadingGuard<'a> {
    loading: &'a AtomicBool,
    events: &'a broadcast::Sender<LoginEvent>,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn acquire(
        loading: &'a AtomicBool,
        events: &'a broadcast::Sender<LoginEvent>,
    ) -> Self {
        set_loading(loading, events, true);
        Self { loading, events }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        set_loading(self.loading, self.events, false);
    }
}

fn set_loading(loading: &AtomicBool, events: &broadcast::Sender<LoginEvent>, value: bool) {
    loading.store(value, Ordering::SeqCst);
    // Sending only fails when nobody is subscribed
    let _ = events.send(LoginEvent::LoadingChanged(value));
}
