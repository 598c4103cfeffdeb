//! Application state wiring.
//!
//! The whole interface state is one [`UiState`] record kept in a Leptos
//! signal; the controller replaces it through [`SignalStore`] and every
//! component reads from the same signal.

use cutout::{Controller, Event, StateStore, UiState};
use leptos::*;

use crate::services::{AnchorDownload, XhrTransport};

/// [`StateStore`] backed by a Leptos signal.
#[derive(Clone, Copy)]
pub struct SignalStore(RwSignal<UiState>);

impl SignalStore {
    pub fn new(state: RwSignal<UiState>) -> Self {
        Self(state)
    }

    pub fn signal(&self) -> RwSignal<UiState> {
        self.0
    }
}

impl StateStore for SignalStore {
    fn snapshot(&self) -> UiState {
        self.0.get_untracked()
    }

    fn apply(&self, event: Event) {
        self.0.update(|state| *state = state.apply(event));
    }
}

/// The controller as wired in the browser.
pub type AppController = Controller<XhrTransport, AnchorDownload, SignalStore>;
