//! Data slot of one dashboard card: only the answer to the latest request is kept.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::ApiError;
use crate::system::auth::context::{sign_out, AuthState};

/// Request counter; a response is applied only if its ticket is still current
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    current: u64,
}

impl Generation {
    /// Start a new request, invalidating all earlier tickets
    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current == ticket
    }
}

pub struct ChartSlot<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    generation: StoredValue<Generation>,
}

impl<T: Send + Sync + 'static> Clone for ChartSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ChartSlot<T> {}

impl<T: Send + Sync + 'static> ChartSlot<T> {
    pub fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            loading: RwSignal::new(false),
            generation: StoredValue::new(Generation::default()),
        }
    }

    /// Run `fetch` and store its result unless a newer load started meanwhile.
    /// A 401 ends the session; other failures leave the slot empty.
    pub fn load<Fut>(self, what: &'static str, set_auth_state: WriteSignal<AuthState>, fetch: Fut)
    where
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let mut ticket = 0;
        self.generation.update_value(|g| ticket = g.next());
        self.loading.set(true);

        spawn_local(async move {
            let result = fetch.await;
            // A disposed slot (page left) counts as stale
            let current = self
                .generation
                .try_with_value(|g| g.is_current(ticket))
                .unwrap_or(false);
            if !current {
                log::debug!("Dropping stale {} response", what);
                return;
            }
            match result {
                Ok(value) => self.data.set(Some(value)),
                Err(ApiError::Unauthorized) => {
                    log::warn!("Session rejected while loading {}", what);
                    sign_out(set_auth_state);
                    return;
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", what, e);
                    self.data.set(None);
                }
            }
            self.loading.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut generation = Generation::default();
        let first = generation.next();
        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(!Generation::default().is_current(first));
    }
}
