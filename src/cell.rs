//! Shared observed state cells.
//!
//! A cell is one atomic machine word plus an ordered subscriber list.
//! Writes are single-value atomic assignments; after a write that
//! changed the value, subscribers are notified in registration order
//! with the stored value. This is the hand-off between the animation
//! clock and main-logic reactions (lazy mounting, commit side effects):
//! readers react to notifications, they never poll mid-write state.
//!
//! Discipline: exactly one component writes a given cell at a time, and
//! subscribers must not write back into the cell they observe.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Identifies a registered subscriber for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct RawCell {
    bits: AtomicU64,
    subscribers: Mutex<Vec<(u64, Box<dyn Fn(u64) + Send + Sync>)>>,
    next_subscriber_id: AtomicU64,
}

impl RawCell {
    fn new(bits: u64) -> Arc<Self> {
        Arc::new(Self {
            bits: AtomicU64::new(bits),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber_id: AtomicU64::new(0),
        })
    }

    fn load(&self) -> u64 {
        self.bits.load(Ordering::Acquire)
    }

    /// Stores `bits` and notifies subscribers in order, skipping both
    /// when the value is unchanged.
    fn store(&self, bits: u64) {
        let prev = self.bits.swap(bits, Ordering::AcqRel);
        if prev == bits {
            return;
        }
        let subscribers = self.subscribers.lock();
        for (_, callback) in subscribers.iter() {
            callback(bits);
        }
    }

    fn subscribe(&self, callback: Box<dyn Fn(u64) + Send + Sync>) -> SubscriptionId {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().push((id, callback));
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().retain(|(sid, _)| *sid != id.0);
    }
}

/// Observed `f64` cell (animated position, header translate-y).
#[derive(Clone)]
pub struct ObservedValue {
    raw: Arc<RawCell>,
}

impl ObservedValue {
    pub fn new(value: f64) -> Self {
        Self {
            raw: RawCell::new(value.to_bits()),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.raw.load())
    }

    pub fn set(&self, value: f64) {
        self.raw.store(value.to_bits());
    }

    pub fn subscribe(&self, callback: impl Fn(f64) + Send + Sync + 'static) -> SubscriptionId {
        self.raw
            .subscribe(Box::new(move |bits| callback(f64::from_bits(bits))))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.raw.unsubscribe(id);
    }

    /// Read-only handle for consumers that must not write.
    pub fn reader(&self) -> ObservedValueReader {
        ObservedValueReader {
            raw: Arc::clone(&self.raw),
        }
    }
}

/// Read-only view of an [`ObservedValue`].
#[derive(Clone)]
pub struct ObservedValueReader {
    raw: Arc<RawCell>,
}

impl ObservedValueReader {
    pub fn get(&self) -> f64 {
        f64::from_bits(self.raw.load())
    }

    pub fn subscribe(&self, callback: impl Fn(f64) + Send + Sync + 'static) -> SubscriptionId {
        self.raw
            .subscribe(Box::new(move |bits| callback(f64::from_bits(bits))))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.raw.unsubscribe(id);
    }
}

/// Observed `usize` cell (committed route index).
#[derive(Clone)]
pub struct ObservedIndex {
    raw: Arc<RawCell>,
}

impl ObservedIndex {
    pub fn new(value: usize) -> Self {
        Self {
            raw: RawCell::new(value as u64),
        }
    }

    pub fn get(&self) -> usize {
        self.raw.load() as usize
    }

    pub fn set(&self, value: usize) {
        self.raw.store(value as u64);
    }

    pub fn subscribe(&self, callback: impl Fn(usize) + Send + Sync + 'static) -> SubscriptionId {
        self.raw
            .subscribe(Box::new(move |bits| callback(bits as usize)))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.raw.unsubscribe(id);
    }
}

#[cfg(test)]
#[path = "../tests/unit/cell.rs"]
mod tests;
