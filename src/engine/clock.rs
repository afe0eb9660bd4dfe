//! Wall-clock-driven frame counters for animation phases.

use crate::foundation::core::Fps;

/// One emission from a [`FrameClock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTick {
    /// Frame number, capped at the clock's duration.
    pub frame: u64,
    /// True on the single tick that reaches the duration.
    pub completed: bool,
}

/// A per-phase ticking source.
///
/// The clock computes `frame = floor((now - start) * rate / 1000)` from a
/// start timestamp captured lazily on the first tick, so missed refresh
/// callbacks never accumulate drift. While `frame < duration` it emits the
/// frame value; the tick that reaches the duration emits exactly `duration`
/// with `completed = true`, after which the clock goes silent. Completion
/// fires exactly once no matter how many further callbacks arrive.
///
/// A clock is single-use: re-entering a phase constructs a fresh clock so the
/// start timestamp can never be inherited from a prior run.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    fps: Fps,
    duration: u64,
    start_ms: Option<f64>,
    done: bool,
}

impl FrameClock {
    /// New idle clock; the start timestamp is captured on the first tick.
    pub fn new(fps: Fps, duration_frames: u64) -> Self {
        Self {
            fps,
            duration: duration_frames,
            start_ms: None,
            done: false,
        }
    }

    /// Advance from a display-refresh callback at wall-clock time `now_ms`.
    ///
    /// Returns `None` once the clock has completed or been cancelled; the
    /// owner must stop rescheduling at that point.
    pub fn tick(&mut self, now_ms: f64) -> Option<ClockTick> {
        if self.done {
            return None;
        }

        let start = *self.start_ms.get_or_insert(now_ms);
        let frame = self.fps.frame_at_elapsed_ms(now_ms - start);

        if frame >= self.duration {
            self.done = true;
            return Some(ClockTick {
                frame: self.duration,
                completed: true,
            });
        }

        Some(ClockTick {
            frame,
            completed: false,
        })
    }

    /// Stop the clock; subsequent ticks return `None` and completion never
    /// fires. Must be called when the owning phase ends for any reason.
    pub fn cancel(&mut self) {
        self.done = true;
    }

    /// True once completed or cancelled.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Declared duration in frames.
    pub fn duration(&self) -> u64 {
        self.duration
    }
}

/// One-shot entrance clock gating all input until the intro finishes.
///
/// Runs once at mount; the orchestrator polls it from the refresh callback
/// and releases control to the transition machine when it completes.
#[derive(Clone, Copy, Debug)]
pub struct IntroSequencer {
    clock: FrameClock,
    frame: u64,
    complete: bool,
}

impl IntroSequencer {
    /// New sequencer with a fixed duration in frames.
    pub fn new(fps: Fps, duration_frames: u64) -> Self {
        Self {
            clock: FrameClock::new(fps, duration_frames),
            frame: 0,
            complete: false,
        }
    }

    /// Advance from the refresh callback. Returns true on the single tick
    /// that completes the intro.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.clock.tick(now_ms) {
            Some(t) => {
                self.frame = t.frame;
                if t.completed {
                    self.complete = true;
                }
                t.completed
            }
            None => false,
        }
    }

    /// Current intro frame, for the entrance animation.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// True once the entrance animation has finished.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/clock.rs"]
mod tests;
