//! Preview slot: the newest request wins
//!
//! Interactive callers fire a render for every input change. Renders can
//! finish out of order, so each request takes a ticket up front and a
//! result is only published if no newer ticket has been published since.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Identifies one render request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Published<T> {
    ticket: Ticket,
    value: T,
}

/// Holds the latest completed preview
#[derive(Debug)]
pub struct PreviewSlot<T> {
    next: AtomicU64,
    current: Mutex<Option<Published<T>>>,
}

impl<T> Default for PreviewSlot<T> {
    fn default() -> Self {
        Self {
            next: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }
}

impl<T: Clone> PreviewSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a render that is about to start
    pub fn begin(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Publish a finished render; returns `false` if a newer request
    /// already published and this result was discarded
    pub fn publish(&self, ticket: Ticket, value: T) -> bool {
        let mut current = self.current.lock();
        if let Some(existing) = current.as_ref() {
            if existing.ticket > ticket {
                log::debug!("preview: dropping stale result {ticket:?}");
                return false;
            }
        }
        *current = Some(Published { ticket, value });
        true
    }

    /// The most recent published preview
    pub fn latest(&self) -> Option<T> {
        self.current.lock().as_ref().map(|p| p.value.clone())
    }
}
