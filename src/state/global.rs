//! Global Application State
//!
//! Reactive state management using Leptos signals. Each page owns its own
//! view state; only the notification signals are shared.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
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

/// Guards a reload path against superseded responses. Each load takes a
/// token from [`begin`](LoadGeneration::begin); a response is applied only
/// while its token is still current, so a stale response that resolves after
/// a fresher request cannot overwrite displayed state.
#[derive(Clone, Debug, Default)]
pub struct LoadGeneration(Rc<Cell<u64>>);

impl LoadGeneration {
    /// Start a new load, invalidating all earlier tokens.
    pub fn begin(&self) -> u64 {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0.get() == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_starts_current() {
        let generation = LoadGeneration::default();
        let token = generation.begin();
        assert!(generation.is_current(token));
    }

    #[test]
    fn test_newer_load_invalidates_older_token() {
        let generation = LoadGeneration::default();
        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_clones_share_the_counter() {
        let generation = LoadGeneration::default();
        let clone = generation.clone();

        let token = generation.begin();
        assert!(clone.is_current(token));

        clone.begin();
        assert!(!generation.is_current(token));
    }
}
