//! In-flight request registry.
//!
//! Every network call the app starts is spawned through [`Tasks`] so it can
//! be aborted when its owner goes away. Completion handlers check
//! [`Tasks::finish`] before touching state: an id that is no longer tracked
//! belongs to an aborted or superseded request.

use std::collections::HashMap;
use std::future::Future;

use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

#[derive(Default)]
pub struct Tasks {
    next_id: u64,
    handles: HashMap<RequestId, JoinHandle<()>>,
}

impl Tasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a request on the current tokio runtime. The closure receives
    /// the id so the future can tag its completion event.
    pub fn spawn<F, Fut>(&mut self, make: F) -> RequestId
    where
        F: FnOnce(RequestId) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        let handle = tokio::spawn(make(id));
        self.handles.insert(id, handle);
        id
    }

    /// Stop tracking a completed request. Returns false when the request was
    /// aborted or superseded, in which case its result must be dropped.
    pub fn finish(&mut self, id: RequestId) -> bool {
        self.handles.remove(&id).is_some()
    }

    pub fn abort(&mut self, id: RequestId) {
        if let Some(handle) = self.handles.remove(&id) {
            handle.abort();
            tracing::debug!(?id, "Aborted request");
        }
    }

    pub fn abort_all(&mut self) {
        if !self.handles.is_empty() {
            tracing::debug!(count = self.handles.len(), "Aborting in-flight requests");
        }
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_tracked(&self, id: RequestId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn in_flight(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for Tasks {
    fn drop(&mut self) {
        self.abort_all();
    }
}
