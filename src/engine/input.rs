//! Translation of continuous wheel/touch deltas into discrete intents.

use crate::engine::machine::{Direction, Phase};

/// Where a delta came from; touch gets a smaller content-scroll factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// Mouse wheel / trackpad wheel events.
    Wheel,
    /// Touch-move deltas.
    Touch,
}

/// One raw input delta in screen pixels (positive = scroll forward/down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputDelta {
    /// Origin of the delta.
    pub source: InputSource,
    /// Signed magnitude in pixels.
    pub delta: f64,
}

/// Content-scroll edge currently being pressed against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryEdge {
    /// Offset pinned at 0.
    Top,
    /// Offset pinned at the measured max.
    Bottom,
}

/// Boundary sub-state, active only while in content scroll.
///
/// Reaching an edge does not fire a section change by itself: the edge is
/// recorded here and further same-edge input must accumulate past a larger
/// threshold before an exit intent is emitted. A pause in input (tracked via
/// the armed deadline) clears the contact so a fresh gesture starts over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Boundary {
    /// Not touching an edge.
    Clear,
    /// Pressing against an edge.
    AtEdge {
        /// Which edge.
        edge: BoundaryEdge,
        /// Magnitude accumulated since first contact.
        accumulated: f64,
        /// Deadline after which the contact expires without further input.
        armed_until_ms: f64,
    },
}

/// Discrete intent produced by translation, dispatched as a machine event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    /// Leave the current section toward a neighbor.
    BeginTransition(Direction),
    /// Move the content-scroll offset to this value.
    ContentScroll(f64),
    /// Leave an overflowing section after boundary accumulation.
    BeginExit(Direction),
}

/// Result of translating one delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reaction {
    /// Intent to dispatch, if the delta crossed a threshold.
    pub intent: Option<Intent>,
    /// True when the host must prevent the native scroll for this gesture.
    pub consumed: bool,
}

impl Reaction {
    fn swallow() -> Self {
        Self {
            intent: None,
            consumed: true,
        }
    }

    fn emit(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            consumed: true,
        }
    }
}

/// Thresholds and factors for input translation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InputConfig {
    /// Accumulated pixels needed while idle to begin a transition.
    pub transition_threshold_px: f64,
    /// Accumulated pixels needed at a content edge to begin an exit.
    /// Deliberately larger than the transition threshold.
    pub boundary_exit_threshold_px: f64,
    /// Pause window; boundary contact expires if no input arrives in time.
    pub boundary_pause_ms: f64,
    /// Content-scroll multiplier for wheel deltas.
    pub wheel_scroll_factor: f64,
    /// Content-scroll multiplier for touch deltas (smaller than wheel).
    pub touch_scroll_factor: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            transition_threshold_px: 60.0,
            boundary_exit_threshold_px: 160.0,
            boundary_pause_ms: 400.0,
            wheel_scroll_factor: 1.0,
            touch_scroll_factor: 0.55,
        }
    }
}

/// Accumulating translator from raw deltas to [`Intent`]s.
///
/// Pure state machine: timers are modeled as deadlines checked against the
/// timestamps handed in with each delta (or via [`InputTranslator::expire`]),
/// so the whole thing is testable without a real clock.
#[derive(Clone, Copy, Debug)]
pub struct InputTranslator {
    config: InputConfig,
    accumulator: f64,
    boundary: Boundary,
}

impl InputTranslator {
    /// New translator with the given thresholds.
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            boundary: Boundary::Clear,
        }
    }

    /// Current boundary sub-state (diagnostics and tests).
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Clear all accumulation. Called on every phase change out of
    /// Idle/ContentScroll so a stale gesture never leaks across phases.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.boundary = Boundary::Clear;
    }

    /// Expire the boundary pause window: if the armed deadline has passed,
    /// the edge contact is dropped. Deadline expiry is just another input.
    pub fn expire(&mut self, now_ms: f64) {
        if let Boundary::AtEdge { armed_until_ms, .. } = self.boundary
            && now_ms >= armed_until_ms
        {
            self.boundary = Boundary::Clear;
        }
    }

    /// Translate one delta given the machine phase and content-scroll state.
    pub fn translate(
        &mut self,
        phase: Phase,
        content_offset: f64,
        max_content_scroll: f64,
        delta: InputDelta,
        now_ms: f64,
    ) -> Reaction {
        // Locked phases (and the intro) swallow the gesture entirely; it is
        // dropped, never queued for replay.
        if phase.is_locked() {
            return Reaction::swallow();
        }

        match phase {
            Phase::Idle => self.translate_idle(delta),
            Phase::ContentScroll => {
                self.translate_content(content_offset, max_content_scroll, delta, now_ms)
            }
            _ => Reaction::swallow(),
        }
    }

    fn translate_idle(&mut self, delta: InputDelta) -> Reaction {
        self.accumulator += delta.delta;
        if self.accumulator.abs() > self.config.transition_threshold_px {
            let dir = Direction::from_delta(self.accumulator);
            self.accumulator = 0.0;
            return Reaction::emit(Intent::BeginTransition(dir));
        }
        Reaction::swallow()
    }

    fn translate_content(
        &mut self,
        offset: f64,
        max: f64,
        delta: InputDelta,
        now_ms: f64,
    ) -> Reaction {
        self.expire(now_ms);

        let factor = match delta.source {
            InputSource::Wheel => self.config.wheel_scroll_factor,
            InputSource::Touch => self.config.touch_scroll_factor,
        };
        let candidate = offset + delta.delta * factor;

        let contact = if candidate > max && delta.delta > 0.0 {
            Some((BoundaryEdge::Bottom, Direction::Forward, max))
        } else if candidate < 0.0 && delta.delta < 0.0 {
            Some((BoundaryEdge::Top, Direction::Backward, 0.0))
        } else {
            None
        };

        let Some((edge, dir, clamped)) = contact else {
            // Back inside the bounds: any edge contact is over.
            self.boundary = Boundary::Clear;
            return Reaction::emit(Intent::ContentScroll(candidate));
        };

        let armed_until_ms = now_ms + self.config.boundary_pause_ms;
        match self.boundary {
            Boundary::AtEdge {
                edge: held_edge,
                accumulated,
                ..
            } if held_edge == edge => {
                let accumulated = accumulated + delta.delta.abs();
                if accumulated > self.config.boundary_exit_threshold_px {
                    self.reset();
                    return Reaction::emit(Intent::BeginExit(dir));
                }
                self.boundary = Boundary::AtEdge {
                    edge,
                    accumulated,
                    armed_until_ms,
                };
            }
            // First contact with this edge: record it, start accumulating
            // from zero, arm the pause window.
            _ => {
                self.boundary = Boundary::AtEdge {
                    edge,
                    accumulated: 0.0,
                    armed_until_ms,
                };
            }
        }

        Reaction::emit(Intent::ContentScroll(clamped))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/input.rs"]
mod tests;
