use std::time::{Duration, Instant};

use super::{CarouselController, JumpOutcome, SettleEvent};
use crate::cell::{ObservedIndex, ObservedValue};
use crate::config::JumpMode;

const TRACK: f64 = 300.0;
const FRAME: Duration = Duration::from_millis(16);

fn controller(route_count: usize) -> (CarouselController, ObservedValue, ObservedIndex) {
    let position = ObservedValue::new(0.0);
    let committed = ObservedIndex::new(0);
    let carousel = CarouselController::new(position.clone(), committed.clone(), route_count);
    (carousel, position, committed)
}

fn run_to_settle(carousel: &mut CarouselController, mut now: Instant) -> Option<SettleEvent> {
    for _ in 0..500 {
        now += FRAME;
        let event = carousel.advance(now);
        if event.is_some() {
            return event;
        }
        if !carousel.is_animating() {
            return None;
        }
    }
    panic!("motion did not settle");
}

#[test]
fn swipe_positions_match_reference_deltas() {
    let (mut carousel, position, _) = controller(4);
    carousel.begin_swipe();

    carousel.update_swipe(0.0, TRACK);
    assert_eq!(position.get(), 0.0);
    carousel.update_swipe(-50.0, TRACK);
    assert!((position.get() - 50.0 / 300.0).abs() < 1e-9);
    carousel.update_swipe(-150.0, TRACK);
    assert!((position.get() - 0.5).abs() < 1e-9);
    carousel.update_swipe(-300.0, TRACK);
    assert!((position.get() - 1.0).abs() < 1e-9);
}

#[test]
fn swipe_clamps_hard_at_both_ends() {
    let (mut carousel, position, _) = controller(4);
    carousel.begin_swipe();

    carousel.update_swipe(500.0, TRACK);
    assert_eq!(position.get(), 0.0);
    carousel.update_swipe(-3000.0, TRACK);
    assert_eq!(position.get(), 3.0);
}

#[test]
fn update_without_begin_is_ignored() {
    let (mut carousel, position, _) = controller(4);
    carousel.update_swipe(-150.0, TRACK);
    assert_eq!(position.get(), 0.0);
}

#[test]
fn slow_release_settles_to_nearest_index() {
    let (mut carousel, position, _) = controller(4);
    carousel.begin_swipe();
    carousel.update_swipe(-100.0, TRACK); // position 1/3
    let now = Instant::now();
    carousel.end_swipe(0.0, TRACK, now);

    let event = run_to_settle(&mut carousel, now);
    assert_eq!(event, Some(SettleEvent::Swipe { index: 0 }));
    assert_eq!(position.get(), 0.0);
}

#[test]
fn fling_settles_in_velocity_direction() {
    let (mut carousel, position, _) = controller(4);
    carousel.begin_swipe();
    carousel.update_swipe(-100.0, TRACK); // position 1/3
    let now = Instant::now();
    // Finger moving left at 200 px/s pushes the position upward.
    carousel.end_swipe(-200.0, TRACK, now);

    let event = run_to_settle(&mut carousel, now);
    assert_eq!(event, Some(SettleEvent::Swipe { index: 1 }));
    assert_eq!(position.get(), 1.0);
}

#[test]
fn jump_to_committed_index_is_noop() {
    let (mut carousel, position, _) = controller(4);
    let outcome = carousel.jump_to(0, JumpMode::Smooth, Instant::now());
    assert_eq!(outcome, JumpOutcome::Ignored);
    assert_eq!(position.get(), 0.0);
    assert!(!carousel.is_animating());
}

#[test]
fn jump_to_out_of_range_index_is_noop() {
    let (mut carousel, _, _) = controller(4);
    assert_eq!(
        carousel.jump_to(9, JumpMode::Smooth, Instant::now()),
        JumpOutcome::Ignored
    );
}

#[test]
fn immediate_jump_snaps_position() {
    let (mut carousel, position, _) = controller(4);
    let outcome = carousel.jump_to(2, JumpMode::Immediate, Instant::now());
    assert_eq!(outcome, JumpOutcome::Committed(2));
    assert_eq!(position.get(), 2.0);
    assert!(carousel.jump_state().is_none());
}

#[test]
fn smooth_jump_records_jump_state() {
    let (mut carousel, _, _) = controller(4);
    let outcome = carousel.jump_to(3, JumpMode::Smooth, Instant::now());
    assert_eq!(outcome, JumpOutcome::Animating);
    let jump = carousel.jump_state().expect("jump in flight");
    assert_eq!(jump.start_index, 0);
    assert_eq!(jump.end_index, 3);
}

#[test]
fn smooth_jump_settles_and_clears_state() {
    let (mut carousel, position, _) = controller(4);
    let now = Instant::now();
    carousel.jump_to(3, JumpMode::Smooth, now);

    let event = run_to_settle(&mut carousel, now);
    assert_eq!(event, Some(SettleEvent::Jump { index: 3 }));
    assert!(carousel.jump_state().is_none());
    assert_eq!(position.get(), 3.0);
}

#[test]
fn new_swipe_cancels_jump_and_its_settle() {
    let (mut carousel, _, _) = controller(4);
    let now = Instant::now();
    carousel.jump_to(3, JumpMode::Smooth, now);
    carousel.begin_swipe();

    assert!(carousel.jump_state().is_none());
    assert_eq!(run_to_settle(&mut carousel, now), None);
}

#[test]
fn new_jump_takes_over_from_current_position() {
    let (mut carousel, position, _) = controller(4);
    let now = Instant::now();
    carousel.jump_to(3, JumpMode::Smooth, now);
    carousel.advance(now + FRAME);
    let mid_flight = position.get();
    assert!(mid_flight > 0.0);

    carousel.jump_to(1, JumpMode::Smooth, now + FRAME);
    let event = run_to_settle(&mut carousel, now + FRAME);
    assert_eq!(event, Some(SettleEvent::Jump { index: 1 }));
    assert_eq!(position.get(), 1.0);
}
