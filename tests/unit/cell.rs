use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::{ObservedIndex, ObservedValue};

#[test]
fn value_round_trips() {
    let cell = ObservedValue::new(1.5);
    assert_eq!(cell.get(), 1.5);
    cell.set(-0.25);
    assert_eq!(cell.get(), -0.25);
}

#[test]
fn set_notifies_with_stored_value() {
    let cell = ObservedValue::new(0.0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    cell.subscribe(move |value| sink.lock().push(value));

    cell.set(2.0);
    cell.set(3.5);
    assert_eq!(*seen.lock(), vec![2.0, 3.5]);
}

#[test]
fn unchanged_write_does_not_notify() {
    let cell = ObservedValue::new(1.0);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    cell.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    cell.set(1.0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn subscribers_fire_in_registration_order() {
    let cell = ObservedValue::new(0.0);
    let order = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let sink = Arc::clone(&order);
        cell.subscribe(move |_| sink.lock().push(tag));
    }

    cell.set(1.0);
    assert_eq!(*order.lock(), vec!["first", "second", "third"]);
}

#[test]
fn unsubscribed_observer_never_fires() {
    let cell = ObservedValue::new(0.0);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let id = cell.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    cell.unsubscribe(id);
    cell.set(9.0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn reader_observes_writer_updates() {
    let cell = ObservedValue::new(0.0);
    let reader = cell.reader();
    cell.set(4.0);
    assert_eq!(reader.get(), 4.0);
}

#[test]
fn index_cell_round_trips_and_notifies() {
    let cell = ObservedIndex::new(0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    cell.subscribe(move |index| sink.lock().push(index));

    cell.set(3);
    cell.set(3);
    cell.set(1);
    assert_eq!(cell.get(), 1);
    assert_eq!(*seen.lock(), vec![3, 1]);
}
