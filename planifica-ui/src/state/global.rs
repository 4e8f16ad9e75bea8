//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use super::session::{clear_session, load_session, save_session, StoredSession};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Signed-in session, if any
    pub session: RwSignal<Option<StoredSession>>,
    /// Sidebar collapsed state
    pub sidebar_collapsed: RwSignal<bool>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(load_session()),
        sidebar_collapsed: create_rw_signal(false),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Current user id, if signed in
    pub fn user_id(&self) -> Option<String> {
        self.session.get().map(|s| s.user.id)
    }

    /// Current access token, if signed in
    pub fn access_token(&self) -> Option<String> {
        self.session.get().map(|s| s.access_token)
    }

    /// Record a fresh session and persist it
    pub fn set_session(&self, session: StoredSession) {
        save_session(&session);
        self.session.set(Some(session));
    }

    /// Sign out: drop the session everywhere
    pub fn sign_out(&self) {
        clear_session();
        self.session.set(None);
    }

    /// Flip the sidebar
    pub fn toggle_sidebar(&self) {
        self.sidebar_collapsed.update(|c| *c = !*c);
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
