//! # Strong and weak subscriber handles.
//!
//! Liveness of a weak handle is a snapshot: the subscriber may be dropped right
//! after `is_alive` returned `true`. Callers must treat a failed `target`
//! as "nothing to deliver to".

use std::sync::{Arc, Weak};

use crate::receivers::{Erased, SubscriberId, SubscriberRef};

pub(crate) enum Hold {
    Strong(Arc<Erased>),
    Weak(Weak<Erased>),
}

impl Hold {
    pub(crate) fn strong(subscriber: &SubscriberRef) -> Self {
        Hold::Strong(Arc::clone(subscriber.object()))
    }

    pub(crate) fn weak(subscriber: &SubscriberRef) -> Self {
        Hold::Weak(Arc::downgrade(subscriber.object()))
    }

    /// Strong reference to the subscriber, if it still exists.
    pub(crate) fn target(&self) -> Option<Arc<Erased>> {
        match self {
            Hold::Strong(arc) => Some(Arc::clone(arc)),
            Hold::Weak(weak) => weak.upgrade(),
        }
    }

    /// Does not upgrade.
    pub(crate) fn is_alive(&self) -> bool {
        match self {
            Hold::Strong(_) => true,
            Hold::Weak(weak) => weak.strong_count() > 0,
        }
    }

    pub(crate) fn id(&self) -> Option<SubscriberId> {
        match self {
            Hold::Strong(arc) => Some(SubscriberId::of(arc)),
            Hold::Weak(weak) if weak.strong_count() > 0 => {
                Some(SubscriberId::from_ptr(weak.as_ptr() as *const ()))
            }
            Hold::Weak(_) => None,
        }
    }
}
