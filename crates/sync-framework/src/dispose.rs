//! # Dispose Bag
//!
//! The set of background tasks a controller has in flight. Tasks are spawned
//! into the bag and tied to it: clearing, disposing or dropping the bag aborts
//! everything still running. A controller owns exactly one bag, so tearing
//! down the screen cancels all of its outstanding work together.

use std::future::Future;
use tokio::task::JoinSet;
use tracing::debug;

/// Outstanding background work of a single owner.
#[derive(Default)]
pub struct DisposeBag {
    tasks: JoinSet<()>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `task` on the runtime and tracks it.
    ///
    /// Finished tasks are reaped first so the bag does not grow with the
    /// number of completed operations.
    pub fn add<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        while self.tasks.try_join_next().is_some() {}
        self.tasks.spawn(task);
    }

    /// Number of tracked tasks, including finished ones not yet reaped.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Aborts every tracked task. The bag stays usable.
    pub fn clear(&mut self) {
        let pending = self.tasks.len();
        if pending > 0 {
            debug!(pending, "Aborting outstanding tasks");
        }
        // Dropping a JoinSet aborts all of its tasks
        drop(std::mem::take(&mut self.tasks));
    }

    /// Aborts every tracked task and releases the bag.
    pub fn dispose(mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposeBag")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
