//! # Copy-on-write receiver collection.
//!
//! [`ReceiverSet`] stores the registered receivers as an immutable `Vec`
//! published through [`ArcSwap`].
//!
//! ## Rules
//! - Readers take a snapshot (`load_full`) and never block writers.
//! - Writers build the next `Vec` and publish it with `rcu` (CAS retry loop),
//!   so concurrent register/unregister calls never lose updates.
//! - A publish keeps working on the snapshot it took, even if receivers are
//!   added or removed meanwhile.
//! - Insertion order is preserved.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::wrappers::WrappedReceiver;

/// Immutable view of the registered receivers.
pub(crate) type Snapshot = Arc<Vec<Arc<dyn WrappedReceiver>>>;

pub(crate) struct ReceiverSet {
    receivers: ArcSwap<Vec<Arc<dyn WrappedReceiver>>>,
}

impl ReceiverSet {
    pub(crate) fn new() -> Self {
        Self {
            receivers: ArcSwap::from_pointee(Vec::new()),
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.receivers.load_full()
    }

    pub(crate) fn len(&self) -> usize {
        self.receivers.load().len()
    }

    /// Appends `added` in order, as one atomic publication.
    pub(crate) fn extend(&self, added: &[Arc<dyn WrappedReceiver>]) {
        if added.is_empty() {
            return;
        }
        self.receivers.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + added.len());
            next.extend(current.iter().cloned());
            next.extend(added.iter().cloned());
            next
        });
    }

    /// Removes every receiver matching `pred`; returns how many were removed.
    pub(crate) fn remove_where<P>(&self, pred: P) -> usize
    where
        P: Fn(&dyn WrappedReceiver) -> bool,
    {
        if !self.receivers.load().iter().any(|r| pred(r.as_ref())) {
            return 0;
        }

        let mut removed = 0;
        self.receivers.rcu(|current| {
            let next: Vec<_> = current
                .iter()
                .filter(|r| !pred(r.as_ref()))
                .cloned()
                .collect();
            removed = current.len() - next.len();
            next
        });
        removed
    }
}
