//! Change notification for the expense store.

use crate::store::StoreState;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener = Arc<dyn Fn(&StoreState) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, Listener>,
}

/// The set of callbacks to invoke after each committed state change.
#[derive(Default)]
pub(super) struct Listeners {
    registry: Arc<Mutex<Registry>>,
}

impl Listeners {
    pub(super) fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&StoreState) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        let _ = registry.listeners.insert(id, Arc::new(listener));
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Calls every registered listener with `state`, in registration order. The registry lock is
    /// released before any listener runs, so a listener may subscribe or unsubscribe.
    pub(super) fn notify(&self, state: &StoreState) {
        let listeners: Vec<Listener> = lock(&self.registry).listeners.values().cloned().collect();
        for listener in listeners {
            listener(state);
        }
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

/// A registered listener. Dropping it unregisters the listener, so tying a `Subscription` to the
/// lifetime of a UI component guarantees the component stops hearing about changes once it is
/// torn down.
#[must_use = "the listener is removed as soon as the Subscription is dropped"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unregister now rather than at the end of scope.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let _ = lock(&registry).listeners.remove(&self.id);
        }
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}
