//! The transition state machine: phases, events and the reducer.

pub use crate::foundation::core::Direction;
use crate::foundation::error::StageResult;
use crate::section::registry::SectionRegistry;

/// The six phases of the orchestration machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    /// Entrance animation playing; all input gated.
    Intro,
    /// At rest on a section; input accumulates toward a transition.
    Idle,
    /// A section enter/exit sequence is playing; input dropped.
    Transitioning,
    /// Secondary scroll sub-mode inside an overflowing section.
    ContentScroll,
    /// A standalone exit sequence is playing; input dropped.
    Exiting,
    /// Short post-sequence settle delay before accepting input again.
    Buffering,
}

impl Phase {
    /// Phases during which raw input is swallowed rather than translated.
    pub fn is_locked(self) -> bool {
        matches!(self, Phase::Intro | Phase::Transitioning | Phase::Exiting | Phase::Buffering)
    }
}

/// Discrete events the reducer understands.
///
/// This is the complete vocabulary: every mutation of the context flows
/// through [`TransitionContext::apply`] with one of these, including the
/// externally measured max-scroll report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The intro sequencer finished.
    IntroComplete,
    /// Accumulated idle input crossed the transition threshold.
    BeginTransition(Direction),
    /// Boundary accumulation inside content scroll crossed the exit threshold.
    BeginExit(Direction),
    /// Frame clock emission for the active sequence.
    Tick(u64),
    /// New candidate content-scroll offset (clamped on apply).
    ContentScrollUpdate(f64),
    /// The active section reported its measured overflow height.
    SetMaxScroll(f64),
    /// The buffering settle delay elapsed.
    BufferElapsed,
    /// Debug jump straight to a section index.
    JumpTo(usize),
}

/// Side effect the orchestrator must perform after a reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Nothing beyond the context mutation.
    None,
    /// A new sequence phase began: start a fresh frame clock for `duration`.
    StartSequence {
        /// Sequence length in frames for the phase just entered.
        duration: u64,
    },
    /// Buffering began: arm the settle-delay timer.
    ArmBuffer,
    /// A sequence phase was abandoned early: cancel its frame clock.
    CancelSequence,
}

/// The single mutable state record of the engine.
///
/// Owned by the orchestrator; mutated only by [`TransitionContext::apply`].
/// Everything else reads it or dispatches events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionContext {
    /// Current machine phase.
    pub phase: Phase,
    /// Registry index of the active (or arriving) section.
    pub current: usize,
    /// Registry index of the section being vacated, when one is.
    pub previous: Option<usize>,
    /// Direction of the most recent navigation.
    pub direction: Direction,
    /// Frame counter local to the playing sequence phase.
    pub sequence_frame: u64,
    /// Content-scroll offset, always within `[0, max_content_scroll]`.
    pub content_offset: f64,
    /// Measured overflow height of the active section; 0 until reported.
    pub max_content_scroll: f64,
}

impl TransitionContext {
    /// Fresh context at mount: intro playing, first section current.
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            current: 0,
            previous: None,
            direction: Direction::Forward,
            sequence_frame: 0,
            content_offset: 0.0,
            max_content_scroll: 0.0,
        }
    }

    /// Duration of the sequence playing right now, if a sequence phase is
    /// active: the arriving section's enter (or reverse) duration while
    /// transitioning, the departing section's exit duration while exiting.
    pub fn active_duration(&self, registry: &SectionRegistry) -> StageResult<Option<u64>> {
        match self.phase {
            Phase::Transitioning => {
                let spec = registry.get(self.current)?;
                Ok(Some(spec.enter_duration(self.direction)))
            }
            Phase::Exiting => Ok(Some(registry.get(self.current)?.exit_frames)),
            _ => Ok(None),
        }
    }

    /// Apply one event, returning the side effect the owner must perform.
    ///
    /// Events whose guard fails leave the context untouched and return
    /// [`Effect::None`]; that is the drop-input-during-animation policy, not
    /// a fault. Registry misses are programmer errors and fail fast.
    #[tracing::instrument(level = "debug", skip(self, registry))]
    pub fn apply(&mut self, registry: &SectionRegistry, event: Event) -> StageResult<Effect> {
        match event {
            Event::IntroComplete => {
                if self.phase == Phase::Intro {
                    self.phase = Phase::Idle;
                    self.sequence_frame = 0;
                    tracing::debug!("intro complete, machine idle");
                }
                Ok(Effect::None)
            }

            Event::BeginTransition(dir) => {
                if self.phase == Phase::Idle {
                    return self.begin_sequence(registry, dir);
                }
                Ok(Effect::None)
            }

            // An exit out of content scroll goes straight into the next
            // section's transition: the departing exit and arriving entrance
            // share one continuous frame counter.
            Event::BeginExit(dir) => {
                if self.phase == Phase::ContentScroll {
                    return self.begin_sequence(registry, dir);
                }
                Ok(Effect::None)
            }

            Event::Tick(frame) => match self.phase {
                Phase::Transitioning => {
                    let duration = registry.get(self.current)?.enter_duration(self.direction);
                    if frame < duration {
                        self.sequence_frame = frame;
                        Ok(Effect::None)
                    } else {
                        self.sequence_frame = duration;
                        self.complete_transition(registry)
                    }
                }
                Phase::Exiting => {
                    let duration = registry.get(self.current)?.exit_frames;
                    if frame < duration {
                        self.sequence_frame = frame;
                        Ok(Effect::None)
                    } else {
                        self.sequence_frame = duration;
                        self.complete_exit(registry)
                    }
                }
                _ => Ok(Effect::None),
            },

            Event::ContentScrollUpdate(offset) => {
                if self.phase == Phase::ContentScroll {
                    self.content_offset = offset.clamp(0.0, self.max_content_scroll);
                }
                Ok(Effect::None)
            }

            Event::SetMaxScroll(n) => {
                self.max_content_scroll = n.max(0.0);
                // Keep the live offset inside the new bound.
                self.content_offset = self.content_offset.clamp(0.0, self.max_content_scroll);
                Ok(Effect::None)
            }

            Event::BufferElapsed => {
                if self.phase == Phase::Buffering {
                    self.phase = Phase::Idle;
                    tracing::debug!(section = self.current, "buffer elapsed, machine idle");
                }
                Ok(Effect::None)
            }

            Event::JumpTo(index) => {
                let was_sequencing =
                    matches!(self.phase, Phase::Transitioning | Phase::Exiting);
                self.previous = Some(self.current);
                self.current = index.min(registry.last_index());
                self.phase = Phase::Idle;
                self.sequence_frame = 0;
                self.content_offset = 0.0;
                self.max_content_scroll = 0.0;
                tracing::debug!(section = self.current, "jumped to section");
                if was_sequencing {
                    Ok(Effect::CancelSequence)
                } else {
                    Ok(Effect::None)
                }
            }
        }
    }

    fn begin_sequence(
        &mut self,
        registry: &SectionRegistry,
        dir: Direction,
    ) -> StageResult<Effect> {
        // Boundary no-op: the machine is linear, never wrapping.
        let Some(target) = registry.neighbor(self.current, dir) else {
            return Ok(Effect::None);
        };

        self.previous = Some(self.current);
        self.current = target;
        self.direction = dir;
        self.phase = Phase::Transitioning;
        self.sequence_frame = 0;
        self.content_offset = 0.0;
        self.max_content_scroll = 0.0;

        let duration = registry.get(target)?.enter_duration(dir);
        tracing::debug!(from = ?self.previous, to = target, ?dir, duration, "transition began");
        Ok(Effect::StartSequence { duration })
    }

    fn complete_transition(&mut self, registry: &SectionRegistry) -> StageResult<Effect> {
        if registry.get(self.current)?.overflow {
            self.phase = Phase::ContentScroll;
            self.content_offset = 0.0;
            tracing::debug!(section = self.current, "entered content scroll");
            Ok(Effect::None)
        } else {
            // sequence_frame is retained so the final frame keeps rendering.
            self.phase = Phase::Buffering;
            tracing::debug!(section = self.current, "sequence done, buffering");
            Ok(Effect::ArmBuffer)
        }
    }

    fn complete_exit(&mut self, registry: &SectionRegistry) -> StageResult<Effect> {
        match registry.neighbor(self.current, self.direction) {
            Some(next) => {
                self.previous = Some(self.current);
                self.current = next;
                self.phase = Phase::Transitioning;
                self.sequence_frame = 0;
                self.content_offset = 0.0;
                self.max_content_scroll = 0.0;
                let duration = registry.get(next)?.enter_duration(self.direction);
                Ok(Effect::StartSequence { duration })
            }
            None => {
                self.phase = Phase::Buffering;
                Ok(Effect::ArmBuffer)
            }
        }
    }
}

impl Default for TransitionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/machine.rs"]
mod tests;
