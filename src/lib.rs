//! Scrollstage is a scroll-driven section animation orchestration engine.
//!
//! A page is modeled as an ordered list of sections. The user's wheel or touch
//! gesture does not scroll the page directly: it is translated into discrete
//! intents that drive a finite state machine, which plays timed enter/exit
//! sequences per section and blocks raw input while a sequence runs.
//!
//! # Pipeline overview
//!
//! 1. **Translate**: raw wheel/touch deltas -> discrete [`Intent`]s
//!    (accumulation thresholds, content-scroll boundary detection)
//! 2. **Reduce**: intents and clock events -> [`Event`] -> new
//!    [`TransitionContext`] via an exhaustive reducer over the phase machine
//! 3. **Clock**: a wall-clock-based [`FrameClock`] ticks the active phase once
//!    per display refresh, emitting monotonic frame numbers and completing
//!    exactly once
//! 4. **Project**: per section, a pure projection derives a [`SectionFlags`]
//!    bundle plus normalized progress values consumed by the render layer
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single writer**: the [`TransitionContext`] is mutated only by the
//!   reducer in response to events; everything else reads or dispatches.
//! - **Linear index arithmetic**: section indices clamp at the ends; the
//!   "wrap" illusion lives entirely in derived presentation flags.
//! - **Drop, don't queue**: input during a locked phase is swallowed, never
//!   replayed later.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod engine;
mod foundation;
mod section;

pub use engine::clock::{ClockTick, FrameClock, IntroSequencer};
pub use engine::input::{
    Boundary, BoundaryEdge, InputConfig, InputDelta, InputSource, InputTranslator, Intent, Reaction,
};
pub use engine::machine::{Effect, Event, Phase, TransitionContext};
pub use engine::orchestrator::{EngineConfig, Orchestrator};
pub use engine::visibility::{SectionFlags, derive_flags};
pub use foundation::core::{Direction, Fps};
pub use foundation::error::{StageError, StageResult};
pub use foundation::math::{range_map, spring_progress};
pub use section::registry::{ExitSide, SectionId, SectionRegistry, SectionSpec};
