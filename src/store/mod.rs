//! Client-side state.
//!
//! Three independent slices (auth, records, sharing), each mutated only by
//! its own reducer in response to a single dispatched action. The store
//! also tracks a generation counter per request kind: a new request of the
//! same kind supersedes tracking of the previous one, and outcomes from a
//! superseded request are dropped instead of applied ("take latest" without
//! cancelling the in-flight call).

pub mod auth;
pub mod records;
pub mod sharing;

use std::collections::HashMap;

pub use auth::{AuthAction, AuthState};
pub use records::{RecordsAction, RecordsState};
pub use sharing::{SharingAction, SharingState};

/// Every kind of request the effect layer can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Login,
    Register,
    Logout,
    UpdateProfile,
    DeleteAccount,
    FetchRecords,
    FetchRecord,
    CreateRecord,
    UpdateRecord,
    DeleteRecord,
    FetchSharedWithMe,
    FetchSharedByMe,
    CreateShare,
    DeleteShare,
}

/// An action routed to one of the slices.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Records(RecordsAction),
    Sharing(SharingAction),
}

#[derive(Debug, Default)]
pub struct Store {
    pub auth: AuthState,
    pub records: RecordsState,
    pub sharing: SharingState,
    generations: HashMap<RequestKind, u64>,
}

impl Store {
    /// Creates the initial state, hydrating the session from the presence
    /// of a persisted token.
    pub fn new(has_token: bool) -> Self {
        Self {
            auth: AuthState::hydrated(has_token),
            ..Self::default()
        }
    }

    /// Routes an action to its slice reducer.
    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch: {:?}", action);
        match action {
            Action::Auth(action) => self.auth.reduce(action),
            Action::Records(action) => self.records.reduce(action),
            Action::Sharing(action) => self.sharing.reduce(action),
        }
    }

    /// Starts tracking a request: bumps the kind's generation, applies the
    /// request action, and returns the generation the outcome must present
    /// to be applied.
    pub fn begin(&mut self, kind: RequestKind, request_action: Action) -> u64 {
        let generation = self.generations.entry(kind).or_insert(0);
        *generation += 1;
        let generation = *generation;
        self.dispatch(request_action);
        generation
    }

    /// Applies an outcome action unless a newer request of the same kind
    /// has started since. Returns whether the action was applied.
    pub fn complete(&mut self, kind: RequestKind, generation: u64, action: Action) -> bool {
        if self.generation(kind) != generation {
            log::debug!(
                "dropping stale {:?} outcome (generation {} superseded)",
                kind,
                generation
            );
            return false;
        }
        self.dispatch(action);
        true
    }

    /// The latest generation started for a request kind.
    pub fn generation(&self, kind: RequestKind) -> u64 {
        self.generations.get(&kind).copied().unwrap_or(0)
    }
}
