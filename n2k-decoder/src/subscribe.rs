//! Typed delivery of decoded messages
//!
//! The registry maps subscription ids to callbacks. Delivery is synchronous
//! in the pipeline's calling context and follows frame-arrival order;
//! callbacks must not block indefinitely. Cancelling removes the callback
//! before `cancel` returns, so no further deliveries occur afterwards.

use crate::pgns::{FromPgnMessage, PgnMessage};

type Callback = Box<dyn FnMut(&PgnMessage)>;

/// Cancellation handle returned by the subscribe operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Registry of message consumers
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every decoded value, [`crate::pgns::UnknownPgn`]
    /// included
    pub fn subscribe_to_all(
        &mut self,
        callback: impl FnMut(&PgnMessage) + 'static,
    ) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        Subscription(id)
    }

    /// Register a callback for values of one message type
    pub fn subscribe_to<T>(&mut self, mut callback: impl FnMut(&T) + 'static) -> Subscription
    where
        T: FromPgnMessage + 'static,
    {
        self.subscribe_to_all(move |msg| {
            if let Some(value) = T::from_message(msg) {
                callback(value);
            }
        })
    }

    /// Remove a subscription; no deliveries happen after this returns
    pub fn cancel(&mut self, subscription: Subscription) {
        self.subscribers.retain(|(id, _)| *id != subscription.0);
    }

    /// Deliver a message to every registered consumer, in registration order
    pub fn serve(&mut self, message: &PgnMessage) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(message);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
