//! UI capabilities the dispatcher reports to
//!
//! The dispatcher never reaches for global state. Whoever builds it hands in
//! a [`Notifier`] for toasts and, optionally, a [`StoreDispatch`] for state
//! changes such as opening the login dialog.

use serde::{Deserialize, Serialize};

/// Non-blocking user notifications
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Dialogs the store knows how to toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalMode {
    Login,
    Register,
    ResetPassword,
}

/// Actions dispatched to the shared application store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiAction {
    ChangeModalStatus { mode: ModalMode, visible: bool },
}

impl UiAction {
    /// Ask the UI to show the login dialog
    pub fn show_login() -> Self {
        UiAction::ChangeModalStatus {
            mode: ModalMode::Login,
            visible: true,
        }
    }
}

/// Application store dispatch
#[cfg_attr(test, mockall::automock)]
pub trait StoreDispatch: Send + Sync {
    fn dispatch(&self, action: UiAction);
}

/// Notifier that writes to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "ojfront::notify", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "ojfront::notify", "{}", message);
    }
}

/// Store that only logs the actions it receives
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStore;

impl StoreDispatch for TracingStore {
    fn dispatch(&self, action: UiAction) {
        tracing::info!(target: "ojfront::store", ?action, "store action");
    }
}
