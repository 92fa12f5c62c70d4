//! Request cancellation tied to a view's lifetime.
//!
//! A view creates one [`ViewScope`] on mount, wraps every request future in
//! [`ViewScope::run`], and calls [`ViewScope::close`] when it is disposed.
//! Futures still pending at that point resolve to `None`, so a late response
//! never writes into torn-down view state.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortHandle, Abortable};

#[derive(Debug, Default)]
struct Inner {
    closed: AtomicBool,
    handles: Mutex<Vec<AbortHandle>>,
}

/// Cheap to clone; all clones share the same set of in-flight futures.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    inner: Arc<Inner>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fut` unless the scope is closed first. Returns `None` when the
    /// scope was closed before or while the future was pending.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_closed() {
            return None;
        }

        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut handles = self.inner.handles.lock().unwrap_or_else(PoisonError::into_inner);
            handles.retain(|h| !h.is_aborted());
            handles.push(handle);
        }

        Abortable::new(fut, registration).await.ok()
    }

    /// Abort every pending future and refuse new ones.
    pub fn close(&self) {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let handles = {
            let mut guard = self.inner.handles.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        if !handles.is_empty() {
            log::debug!("Aborting {} in-flight request(s) on unmount", handles.len());
        }
        for handle in handles {
            handle.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;

    #[tokio::test]
    async fn completes_while_open() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 42 }).await, Some(42));
    }

    #[tokio::test]
    async fn closed_scope_skips_new_work() {
        let scope = ViewScope::new();
        scope.close();
        assert_eq!(scope.run(async { 1 }).await, None);
    }

    #[tokio::test]
    async fn close_aborts_pending_future() {
        let scope = ViewScope::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let closer = async {
            // Let `run` register its handle first.
            tokio::task::yield_now().await;
            scope.close();
            let _ = tx.send(7);
        };

        let (result, ()) = futures::join!(scope.run(rx), closer);
        assert_eq!(result, None);
    }

    #[test]
    fn close_is_idempotent() {
        let scope = ViewScope::new();
        scope.close();
        scope.close();
        assert!(scope.is_closed());
    }
}
