//! Keyed debouncing of side-effecting operations.
//!
//! Each key owns at most one pending operation. Scheduling again for the same
//! key aborts the previous task, whether it is still waiting out its delay or
//! already running, so invocations for a key never overlap.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Slots<K> {
    next_generation: u64,
    pending: HashMap<K, Pending>,
}

pub struct InputDebouncer<K> {
    slots: Arc<Mutex<Slots<K>>>,
    cancel: CancellationToken,
}

impl<K> InputDebouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_generation: 0,
                pending: HashMap::new(),
            })),
            cancel: CancellationToken::new(),
        }
    }

    /// Run `operation` once `delay` passes without another call for `key`
    pub fn schedule<F, Fut>(&self, key: K, delay: Duration, operation: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.cancel.is_cancelled() {
            tracing::debug!("debouncer shut down, dropping operation");
            return;
        }

        // Held across spawn so the task cannot clear its slot before it exists
        let mut slots = lock(&self.slots);
        slots.next_generation += 1;
        let generation = slots.next_generation;

        if let Some(previous) = slots.pending.remove(&key) {
            previous.handle.abort();
            tracing::trace!(generation = previous.generation, "superseded pending operation");
        }

        let cancel = self.cancel.child_token();
        let task_slots = Arc::clone(&self.slots);
        let task_key = key.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }

            operation().await;

            let mut slots = lock(&task_slots);
            if slots
                .pending
                .get(&task_key)
                .is_some_and(|p| p.generation == generation)
            {
                slots.pending.remove(&task_key);
            }
        });

        slots.pending.insert(key, Pending { generation, handle });
    }

    /// Drop the pending operation for `key` without running it
    pub fn cancel(&self, key: &K) -> bool {
        match lock(&self.slots).pending.remove(key) {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        lock(&self.slots).pending.contains_key(key)
    }

    /// Teardown: abort everything and refuse further scheduling
    pub fn shutdown(&self) {
        self.cancel.cancel();
        abort_all(&mut lock(&self.slots));
    }
}

impl<K> Default for InputDebouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for InputDebouncer<K> {
    fn drop(&mut self) {
        self.cancel.cancel();
        abort_all(&mut lock(&self.slots));
    }
}

fn lock<K>(slots: &Mutex<Slots<K>>) -> MutexGuard<'_, Slots<K>> {
    slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn abort_all<K>(slots: &mut Slots<K>) {
    for (_, pending) in slots.pending.drain() {
        pending.handle.abort();
    }
}
