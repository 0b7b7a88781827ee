//! Cancellable background task for one session.

use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Owns the spawned driver of one session.
///
/// Dropping the handle aborts the task, so a session's timers can never
/// outlive the `SessionTask` that represents them.
#[derive(Debug)]
pub struct SessionTask {
    session_id: u64,
    handle: JoinHandle<()>,
}

impl SessionTask {
    /// Spawn `future` on the current tokio runtime.
    ///
    /// Returns `None` when called outside a runtime.
    pub fn spawn<F>(session_id: u64, future: F) -> Option<Self>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = Handle::try_current().ok()?;
        Some(Self {
            session_id,
            handle: runtime.spawn(future),
        })
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task. Any pending sleep is dropped without firing.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for SessionTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
