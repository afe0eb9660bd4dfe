use super::*;

fn fps60() -> Fps {
    Fps::new(60, 1).unwrap()
}

#[test]
fn start_is_captured_on_first_tick() {
    let mut clock = FrameClock::new(fps60(), 100);
    // First tick at an arbitrary late timestamp is still frame 0.
    let t = clock.tick(5000.0).unwrap();
    assert_eq!(t.frame, 0);
    assert!(!t.completed);

    // One second after the first tick, not after time zero.
    let t = clock.tick(6000.0).unwrap();
    assert_eq!(t.frame, 60);
}

#[test]
fn frames_derive_from_elapsed_time_not_callback_count() {
    let mut clock = FrameClock::new(fps60(), 100);
    clock.tick(0.0).unwrap();
    // A single late callback after ~500ms of dropped frames lands on frame 30.
    let t = clock.tick(500.0).unwrap();
    assert_eq!(t.frame, 30);
}

#[test]
fn completion_emits_duration_exactly_once() {
    let mut clock = FrameClock::new(fps60(), 10);
    clock.tick(0.0).unwrap();
    // Way past the 10-frame duration.
    let t = clock.tick(10_000.0).unwrap();
    assert_eq!(t.frame, 10, "final value is exactly the duration");
    assert!(t.completed);
    // Every callback after completion is silent.
    assert_eq!(clock.tick(10_016.0), None);
    assert_eq!(clock.tick(10_032.0), None);
}

#[test]
fn zero_duration_completes_on_first_tick_with_frame_zero() {
    let mut clock = FrameClock::new(fps60(), 0);
    let t = clock.tick(123.0).unwrap();
    assert_eq!(t.frame, 0);
    assert!(t.completed);
    assert_eq!(clock.tick(140.0), None);
}

#[test]
fn frames_are_monotonically_non_decreasing() {
    let mut clock = FrameClock::new(fps60(), 1000);
    let mut prev = 0;
    for i in 0..120 {
        // Jittery callback cadence.
        let now = i as f64 * 16.7 + if i % 3 == 0 { 4.0 } else { 0.0 };
        let t = clock.tick(now).unwrap();
        assert!(t.frame >= prev);
        prev = t.frame;
    }
}

#[test]
fn cancel_stops_ticks_and_suppresses_completion() {
    let mut clock = FrameClock::new(fps60(), 10);
    clock.tick(0.0).unwrap();
    clock.cancel();
    assert!(clock.is_done());
    assert_eq!(clock.tick(10_000.0), None);
}

#[test]
fn fresh_clock_resets_the_start_reference() {
    let mut first = FrameClock::new(fps60(), 100);
    first.tick(0.0).unwrap();
    assert_eq!(first.tick(1000.0).unwrap().frame, 60);

    // Re-entering a phase builds a new clock; elapsed time starts over.
    let mut second = FrameClock::new(fps60(), 100);
    assert_eq!(second.tick(1000.0).unwrap().frame, 0);
}

#[test]
fn intro_sequencer_completes_once_and_holds_state() {
    let mut intro = IntroSequencer::new(fps60(), 30);
    assert!(!intro.tick(0.0));
    assert!(!intro.is_complete());
    assert!(intro.tick(600.0), "completion tick reports true");
    assert!(intro.is_complete());
    assert_eq!(intro.frame(), 30);
    // Further callbacks never re-fire completion.
    assert!(!intro.tick(700.0));
    assert!(intro.is_complete());
}
