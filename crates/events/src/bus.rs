//! Single-subscriber dispatch bus.
//!
//! This module provides the **dispatch bus** — a routing table from event
//! kind to a single subscriber, with synchronous delivery on the caller's
//! own stack.
//!
//! ## Design Philosophy
//!
//! The bus is intentionally minimal and makes its delivery model explicit:
//!
//! - **At-most-one delivery**: each kind routes to a single subscriber;
//!   there is no fan-out. An event published for a kind with no subscriber
//!   is dropped, not queued, and dropping is not an error.
//! - **First-registration-wins**: `subscribe` never replaces an existing
//!   subscriber. Re-subscribing a kind is a no-op.
//! - **Synchronous**: `publish` runs the subscriber to completion before
//!   returning. There is no queue and no background worker, so subscriber
//!   invocation order equals publish call order.
//! - **Re-entrant**: a subscriber may call `publish` again from inside
//!   `handle`. Nested calls are ordinary recursive stack frames, bounded
//!   only by the event-kind cycles in the wiring — the bus itself places no
//!   limit, so wirings must not form unbounded cycles.
//!
//! ## State
//!
//! The registration table is an explicit field owned by each bus instance.
//! Independent buses never share subscribers, and tests get fresh state per
//! case by constructing a new bus.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::event::Event;

/// Consumes events of the kind it is registered for.
///
/// Subscribers that mutate shared state or re-publish hold their own
/// references to that state; the bus only ever hands them the event.
pub trait Subscriber<E: Event>: Send + Sync {
    fn handle(&self, event: &E);
}

impl<E, S> Subscriber<E> for Arc<S>
where
    E: Event,
    S: Subscriber<E> + ?Sized,
{
    fn handle(&self, event: &E) {
        (**self).handle(event)
    }
}

/// Dispatch bus: maps an event kind to at most one subscriber.
pub struct EventBus<E: Event> {
    subscribers: Mutex<HashMap<E::Kind, Arc<dyn Subscriber<E>>>>,
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }
}

impl<E: Event> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `subscriber` for `kind` unless one is already registered.
    ///
    /// First registration wins: a later `subscribe` for the same kind is a
    /// no-op, never an overwrite.
    pub fn subscribe(&self, kind: E::Kind, subscriber: Arc<dyn Subscriber<E>>) {
        if let Ok(mut table) = self.subscribers.lock() {
            table.entry(kind).or_insert(subscriber);
        }
    }

    /// Removes the subscriber registered for `kind`, if any.
    ///
    /// `_subscriber` is accepted for interface symmetry with `subscribe`;
    /// the stored entry is removed on kind alone, without comparing it.
    pub fn unsubscribe(&self, kind: E::Kind, _subscriber: &Arc<dyn Subscriber<E>>) {
        if let Ok(mut table) = self.subscribers.lock() {
            table.remove(&kind);
        }
    }

    /// Routes `event` to the subscriber registered for its kind.
    ///
    /// Delivery is synchronous: the subscriber runs to completion on the
    /// calling stack before `publish` returns. Without a subscriber the
    /// event is silently dropped (fire-and-forget, no error).
    ///
    /// The table lock is released before `handle` runs, so the subscriber
    /// may publish follow-up events from inside `handle`.
    pub fn publish(&self, event: E) {
        let subscriber = match self.subscribers.lock() {
            Ok(table) => table.get(&event.kind()).cloned(),
            // A poisoned table means a panic is already unwinding; deliver nothing.
            Err(_) => None,
        };

        match subscriber {
            Some(subscriber) => {
                tracing::debug!(event_type = event.event_type(), "dispatching event");
                subscriber.handle(&event);
            }
            None => {
                tracing::debug!(event_type = event.event_type(), "no subscriber, event dropped");
            }
        }
    }
}
