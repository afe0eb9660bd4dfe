use super::*;
use crate::section::registry::SectionRegistry;

fn registry() -> SectionRegistry {
    SectionRegistry::default_portfolio()
}

fn idle_at(index: usize) -> TransitionContext {
    TransitionContext {
        phase: Phase::Idle,
        current: index,
        ..TransitionContext::new()
    }
}

#[test]
fn intro_complete_reaches_idle() {
    let reg = registry();
    let mut ctx = TransitionContext::new();
    assert_eq!(ctx.phase, Phase::Intro);
    ctx.apply(&reg, Event::IntroComplete).unwrap();
    assert_eq!(ctx.phase, Phase::Idle);
    assert_eq!(ctx.sequence_frame, 0);
}

#[test]
fn forward_transition_from_hero_lands_in_content_scroll() {
    let reg = registry();
    let mut ctx = idle_at(0);

    let effect = ctx
        .apply(&reg, Event::BeginTransition(Direction::Forward))
        .unwrap();
    assert_eq!(ctx.phase, Phase::Transitioning);
    assert_eq!(ctx.previous, Some(0));
    assert_eq!(ctx.current, 1);
    assert_eq!(ctx.direction, Direction::Forward);
    assert_eq!(ctx.sequence_frame, 0);
    let enter = reg.get(1).unwrap().enter_frames;
    assert_eq!(effect, Effect::StartSequence { duration: enter });

    // Mid-sequence ticks just advance the frame counter.
    ctx.apply(&reg, Event::Tick(enter / 2)).unwrap();
    assert_eq!(ctx.phase, Phase::Transitioning);
    assert_eq!(ctx.sequence_frame, enter / 2);

    // Summary declares overflow, so completion enters content scroll.
    let effect = ctx.apply(&reg, Event::Tick(enter)).unwrap();
    assert_eq!(ctx.phase, Phase::ContentScroll);
    assert_eq!(ctx.content_offset, 0.0);
    assert_eq!(effect, Effect::None);
}

#[test]
fn completion_without_overflow_buffers_and_retains_frame() {
    let reg = registry();
    // Skills (index 4) -> Contact (index 5), which has no overflow.
    let mut ctx = idle_at(4);
    ctx.apply(&reg, Event::BeginTransition(Direction::Forward))
        .unwrap();
    let enter = reg.get(5).unwrap().enter_frames;
    let effect = ctx.apply(&reg, Event::Tick(enter + 7)).unwrap();
    assert_eq!(ctx.phase, Phase::Buffering);
    assert_eq!(effect, Effect::ArmBuffer);
    assert_eq!(
        ctx.sequence_frame, enter,
        "final frame retained so the settled pose keeps rendering"
    );

    ctx.apply(&reg, Event::BufferElapsed).unwrap();
    assert_eq!(ctx.phase, Phase::Idle);
}

#[test]
fn boundary_transitions_are_noops() {
    let reg = registry();

    let mut at_first = idle_at(0);
    let snapshot = at_first;
    at_first
        .apply(&reg, Event::BeginTransition(Direction::Backward))
        .unwrap();
    assert_eq!(at_first, snapshot);

    let mut at_last = idle_at(reg.last_index());
    let snapshot = at_last;
    at_last
        .apply(&reg, Event::BeginTransition(Direction::Forward))
        .unwrap();
    assert_eq!(at_last, snapshot);
}

#[test]
fn locked_phase_drops_foreign_events() {
    let reg = registry();
    let mut ctx = idle_at(0);
    ctx.apply(&reg, Event::BeginTransition(Direction::Forward))
        .unwrap();
    let mid = ctx;

    for event in [
        Event::BeginTransition(Direction::Forward),
        Event::BeginTransition(Direction::Backward),
        Event::BeginExit(Direction::Forward),
        Event::ContentScrollUpdate(120.0),
        Event::IntroComplete,
        Event::BufferElapsed,
    ] {
        ctx.apply(&reg, event).unwrap();
        assert_eq!(ctx.phase, mid.phase, "{event:?} must not change phase");
        assert_eq!(ctx.current, mid.current);
        assert_eq!(ctx.previous, mid.previous);
    }
}

#[test]
fn content_scroll_update_is_clamped() {
    let reg = registry();
    let mut ctx = idle_at(1);
    ctx.phase = Phase::ContentScroll;
    ctx.apply(&reg, Event::SetMaxScroll(500.0)).unwrap();

    ctx.apply(&reg, Event::ContentScrollUpdate(600.0)).unwrap();
    assert_eq!(ctx.content_offset, 500.0);

    ctx.apply(&reg, Event::ContentScrollUpdate(-40.0)).unwrap();
    assert_eq!(ctx.content_offset, 0.0);

    ctx.apply(&reg, Event::ContentScrollUpdate(123.4)).unwrap();
    assert_eq!(ctx.content_offset, 123.4);
}

#[test]
fn offset_stays_bounded_for_any_event_interleaving() {
    let reg = registry();
    let mut ctx = idle_at(1);
    ctx.phase = Phase::ContentScroll;

    let events = [
        Event::SetMaxScroll(300.0),
        Event::ContentScrollUpdate(250.0),
        // Shrinking the bound re-clamps the live offset.
        Event::SetMaxScroll(100.0),
        Event::ContentScrollUpdate(90.0),
        Event::SetMaxScroll(0.0),
        Event::ContentScrollUpdate(55.0),
        Event::SetMaxScroll(40.0),
    ];
    for event in events {
        ctx.apply(&reg, event).unwrap();
        assert!(
            ctx.content_offset >= 0.0 && ctx.content_offset <= ctx.max_content_scroll,
            "offset {} escaped [0, {}] after {event:?}",
            ctx.content_offset,
            ctx.max_content_scroll
        );
    }
}

#[test]
fn set_max_scroll_is_idempotent() {
    let reg = registry();
    let mut ctx = idle_at(1);
    ctx.phase = Phase::ContentScroll;
    ctx.apply(&reg, Event::SetMaxScroll(420.0)).unwrap();
    let once = ctx;
    ctx.apply(&reg, Event::SetMaxScroll(420.0)).unwrap();
    assert_eq!(ctx, once);
}

#[test]
fn exit_from_content_scroll_chains_into_next_transition() {
    let reg = registry();
    let mut ctx = idle_at(1);
    ctx.phase = Phase::ContentScroll;
    ctx.apply(&reg, Event::SetMaxScroll(500.0)).unwrap();
    ctx.apply(&reg, Event::ContentScrollUpdate(500.0)).unwrap();

    let effect = ctx.apply(&reg, Event::BeginExit(Direction::Forward)).unwrap();
    // No separate exiting phase: one continuous counter drives the departing
    // exit and the arriving entrance.
    assert_eq!(ctx.phase, Phase::Transitioning);
    assert_eq!(ctx.previous, Some(1));
    assert_eq!(ctx.current, 2);
    assert_eq!(ctx.sequence_frame, 0);
    assert_eq!(ctx.content_offset, 0.0);
    let enter = reg.get(2).unwrap().enter_frames;
    assert_eq!(effect, Effect::StartSequence { duration: enter });
}

#[test]
fn backward_transition_uses_reverse_duration_when_declared() {
    let reg = registry();
    // Experience (2) -> Summary (1); summary declares reverse 90 vs enter 125.
    let mut ctx = idle_at(2);
    let effect = ctx
        .apply(&reg, Event::BeginTransition(Direction::Backward))
        .unwrap();
    assert_eq!(ctx.current, 1);
    assert_eq!(effect, Effect::StartSequence { duration: 90 });
    assert_eq!(ctx.active_duration(&reg).unwrap(), Some(90));

    // 90 is the completion threshold, not 125.
    ctx.apply(&reg, Event::Tick(89)).unwrap();
    assert_eq!(ctx.phase, Phase::Transitioning);
    ctx.apply(&reg, Event::Tick(90)).unwrap();
    assert_eq!(ctx.phase, Phase::ContentScroll);
}

#[test]
fn exiting_tick_completes_toward_neighbor_or_buffers() {
    let reg = registry();

    // Departing section with a forward neighbor chains into its transition.
    let mut ctx = idle_at(2);
    ctx.phase = Phase::Exiting;
    ctx.direction = Direction::Forward;
    let exit = reg.get(2).unwrap().exit_frames;
    ctx.apply(&reg, Event::Tick(exit - 1)).unwrap();
    assert_eq!(ctx.phase, Phase::Exiting);
    let effect = ctx.apply(&reg, Event::Tick(exit)).unwrap();
    assert_eq!(ctx.phase, Phase::Transitioning);
    assert_eq!(ctx.previous, Some(2));
    assert_eq!(ctx.current, 3);
    assert_eq!(ctx.sequence_frame, 0);
    let enter = reg.get(3).unwrap().enter_frames;
    assert_eq!(effect, Effect::StartSequence { duration: enter });

    // At the boundary there is nothing to chain into; settle instead.
    let mut ctx = idle_at(reg.last_index());
    ctx.phase = Phase::Exiting;
    ctx.direction = Direction::Forward;
    let exit = reg.get(reg.last_index()).unwrap().exit_frames;
    let effect = ctx.apply(&reg, Event::Tick(exit)).unwrap();
    assert_eq!(ctx.phase, Phase::Buffering);
    assert_eq!(effect, Effect::ArmBuffer);
}

#[test]
fn jump_to_section_resets_from_any_phase() {
    let reg = registry();
    let mut ctx = idle_at(1);
    ctx.phase = Phase::Transitioning;
    ctx.sequence_frame = 42;
    ctx.content_offset = 10.0;
    ctx.max_content_scroll = 100.0;

    let effect = ctx.apply(&reg, Event::JumpTo(4)).unwrap();
    assert_eq!(ctx.phase, Phase::Idle);
    assert_eq!(ctx.current, 4);
    assert_eq!(ctx.previous, Some(1));
    assert_eq!(ctx.sequence_frame, 0);
    assert_eq!(ctx.content_offset, 0.0);
    assert_eq!(effect, Effect::CancelSequence, "abandoned clock must be cancelled");

    // Out-of-range target clamps to the last index.
    let effect = ctx.apply(&reg, Event::JumpTo(99)).unwrap();
    assert_eq!(ctx.current, reg.last_index());
    assert_eq!(effect, Effect::None);
}

#[test]
fn sequence_frame_is_monotonic_within_a_phase() {
    let reg = registry();
    let mut ctx = idle_at(0);
    ctx.apply(&reg, Event::BeginTransition(Direction::Forward))
        .unwrap();
    let mut prev = 0;
    for frame in [0, 3, 3, 10, 40, 80] {
        ctx.apply(&reg, Event::Tick(frame)).unwrap();
        assert!(ctx.sequence_frame >= prev);
        prev = ctx.sequence_frame;
    }
}
