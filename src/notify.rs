//! Fan-out of host-side parameter changes to the UI thread.
//!
//! The host reports raw-value changes from whatever execution context automation runs on. Binding
//! state is only ever touched from the UI's single logical thread, so changes are queued here and
//! drained by each binding's [`poll_host_updates()`][crate::binding::ParamBinding::poll_host_updates()]
//! on that thread. Enqueueing never blocks.

use crossbeam::channel;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

use crate::param::OriginatorToken;

// This needs to be pretty high to make sure parameter changes don't get dropped when there's lots
// of automation going on between two UI frames
pub(crate) const CHANGE_QUEUE_CAPACITY: usize = 4096;

/// A raw-value change reported by the host for a single parameter address.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamChange {
    pub address: u64,
    pub raw_value: f32,
}

struct Subscriber {
    address: u64,
    token: OriginatorToken,
    sender: channel::Sender<ParamChange>,
}

/// Routes host parameter changes to subscribed bindings.
///
/// [`broadcast()`][Self::broadcast()] may be called from any thread; it only pushes into bounded
/// per-subscriber queues. A subscriber whose token matches the change's originator is skipped, so
/// a binding never sees the echo of its own write.
#[derive(Default)]
pub struct NotificationBus {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

/// A single binding's registration with a [`NotificationBus`]. Dropping the subscription
/// unregisters it; there is no separate cancellation step.
pub struct Subscription {
    receiver: channel::Receiver<ParamChange>,
    token: OriginatorToken,
    // Weak so an outliving subscription doesn't keep the bus's subscriber table alive
    subscribers: Weak<Mutex<Vec<Subscriber>>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in changes to `address`. Changes broadcast with an originator equal to
    /// `token` are not delivered to the returned subscription.
    pub fn subscribe(&self, address: u64, token: OriginatorToken) -> Subscription {
        let (sender, receiver) = channel::bounded(CHANGE_QUEUE_CAPACITY);
        self.subscribers.lock().push(Subscriber {
            address,
            token,
            sender,
        });

        Subscription {
            receiver,
            token,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Report a raw-value change for `address` to every subscriber except the originator. Never
    /// blocks; if a subscriber's queue is full the change is dropped for that subscriber and a
    /// warning is logged.
    pub fn broadcast(&self, address: u64, raw_value: f32, originator: Option<OriginatorToken>) {
        let subscribers = self.subscribers.lock();
        for subscriber in subscribers.iter() {
            if subscriber.address != address || originator == Some(subscriber.token) {
                continue;
            }

            if subscriber
                .sender
                .try_send(ParamChange { address, raw_value })
                .is_err()
            {
                pl_warn!(
                    "Change queue for parameter {} is full, dropping a host update",
                    address
                );
            }
        }
    }
}

impl Subscription {
    /// Take the oldest change queued since the last call, if any. Called from the UI thread.
    pub fn try_recv(&self) -> Option<ParamChange> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.lock().retain(|s| s.token != self.token);
        }
    }
}
