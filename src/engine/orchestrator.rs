//! The engine facade: owns the context, clocks and translator, and ties
//! frame-clock lifetime to state-machine phase lifetime.

use crate::engine::clock::{FrameClock, IntroSequencer};
use crate::engine::input::{InputConfig, InputDelta, InputSource, InputTranslator, Intent, Reaction};
use crate::engine::machine::{Direction, Effect, Event, Phase, TransitionContext};
use crate::engine::visibility::{SectionFlags, derive_flags};
use crate::foundation::core::Fps;
use crate::foundation::error::StageResult;
use crate::foundation::math::range_map;
use crate::section::registry::{SectionId, SectionRegistry};

/// Engine-wide configuration: clock rate, intro length, settle delay and the
/// input thresholds. Pure serde data with sane defaults, loadable from JSON.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Display frame rate the clocks run at.
    pub fps: Fps,
    /// Intro entrance length in frames.
    pub intro_frames: u64,
    /// Post-sequence settle delay before input is accepted again.
    pub buffer_delay_ms: f64,
    /// Input translation thresholds and factors.
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 60, den: 1 },
            intro_frames: 150,
            buffer_delay_ms: 300.0,
            input: InputConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON, validating the frame rate.
    pub fn from_json(json: &str) -> StageResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| crate::StageError::validation(format!("config parse: {e}")))?;
        Fps::new(config.fps.num, config.fps.den)?;
        Ok(config)
    }
}

/// The orchestration engine.
///
/// Single logical thread of control: the host calls [`Orchestrator::on_frame`]
/// from its display-refresh callback and routes raw input through the
/// `on_wheel`/`on_touch_*` methods. All state mutation flows through the
/// reducer; this type's job is wiring: starting and cancelling clocks
/// exactly on phase entry/exit, arming and firing the one-shot timers, and
/// exposing the read surface the render layer consumes.
#[derive(Clone, Debug)]
pub struct Orchestrator {
    registry: SectionRegistry,
    config: EngineConfig,
    ctx: TransitionContext,
    intro: IntroSequencer,
    sequence_clock: Option<FrameClock>,
    translator: InputTranslator,
    buffer_deadline_ms: Option<f64>,
    last_touch_y: Option<f64>,
}

impl Orchestrator {
    /// Build an engine over a validated registry.
    pub fn new(registry: SectionRegistry, config: EngineConfig) -> StageResult<Self> {
        registry.validate()?;
        Fps::new(config.fps.num, config.fps.den)?;
        Ok(Self {
            intro: IntroSequencer::new(config.fps, config.intro_frames),
            translator: InputTranslator::new(config.input),
            registry,
            config,
            ctx: TransitionContext::new(),
            sequence_clock: None,
            buffer_deadline_ms: None,
            last_touch_y: None,
        })
    }

    /// Engine with the canonical portfolio sections and default config.
    pub fn default_portfolio() -> StageResult<Self> {
        Self::new(SectionRegistry::default_portfolio(), EngineConfig::default())
    }

    /// Drive the engine from the display-refresh callback.
    ///
    /// Returns true when observable state changed and the host should render.
    pub fn on_frame(&mut self, now_ms: f64) -> StageResult<bool> {
        let mut changed = false;

        if !self.intro.is_complete() {
            let before = self.intro.frame();
            if self.intro.tick(now_ms) {
                self.dispatch(Event::IntroComplete)?;
                changed = true;
            } else if self.intro.frame() != before {
                changed = true;
            }
            return Ok(changed);
        }

        if let Some(clock) = self.sequence_clock.as_mut()
            && let Some(tick) = clock.tick(now_ms)
        {
            let before = self.ctx;
            let effect = self.ctx.apply(&self.registry, Event::Tick(tick.frame))?;
            self.run_effect(effect, now_ms)?;
            if tick.completed && self.sequence_clock.as_ref().is_some_and(FrameClock::is_done) {
                // Completed clock has no owner anymore unless a chained
                // sequence already replaced it.
                self.sequence_clock = None;
            }
            changed |= self.ctx != before;
        }

        if let Some(deadline) = self.buffer_deadline_ms
            && now_ms >= deadline
        {
            self.buffer_deadline_ms = None;
            self.dispatch(Event::BufferElapsed)?;
            changed = true;
        }

        // The boundary pause window expires on the frame callback too when no
        // further input arrives to carry the timestamp in.
        self.translator.expire(now_ms);

        Ok(changed)
    }

    /// Route a wheel delta (positive = scroll down).
    pub fn on_wheel(&mut self, delta: f64, now_ms: f64) -> StageResult<Reaction> {
        self.on_input(
            InputDelta {
                source: InputSource::Wheel,
                delta,
            },
            now_ms,
        )
    }

    /// Begin a touch gesture at screen y.
    pub fn on_touch_start(&mut self, y: f64) {
        self.last_touch_y = Some(y);
    }

    /// Continue a touch gesture; the delta is derived from the previous y
    /// (finger moving up scrolls forward).
    pub fn on_touch_move(&mut self, y: f64, now_ms: f64) -> StageResult<Reaction> {
        let Some(prev) = self.last_touch_y.replace(y) else {
            // Move without a start: treat as the gesture's first contact.
            return Ok(Reaction {
                intent: None,
                consumed: self.ctx.phase.is_locked(),
            });
        };
        self.on_input(
            InputDelta {
                source: InputSource::Touch,
                delta: prev - y,
            },
            now_ms,
        )
    }

    /// End a touch gesture.
    pub fn on_touch_end(&mut self) {
        self.last_touch_y = None;
    }

    fn on_input(&mut self, delta: InputDelta, now_ms: f64) -> StageResult<Reaction> {
        let reaction = self.translator.translate(
            self.ctx.phase,
            self.ctx.content_offset,
            self.ctx.max_content_scroll,
            delta,
            now_ms,
        );

        if let Some(intent) = reaction.intent {
            let event = match intent {
                Intent::BeginTransition(dir) => Event::BeginTransition(dir),
                Intent::ContentScroll(offset) => Event::ContentScrollUpdate(offset),
                Intent::BeginExit(dir) => Event::BeginExit(dir),
            };
            let effect = self.ctx.apply(&self.registry, event)?;
            self.run_effect(effect, now_ms)?;
        }

        Ok(reaction)
    }

    /// Dispatch one event and perform its effect. The two imperative setters
    /// and the debug jump go through here so the single-writer invariant
    /// holds for every mutation.
    #[tracing::instrument(level = "trace", skip(self))]
    fn dispatch(&mut self, event: Event) -> StageResult<()> {
        let effect = self.ctx.apply(&self.registry, event)?;
        // Events dispatched outside an input/frame callback carry no
        // timestamp; effects that need one (clock starts) only arise from
        // timed paths, so this is unreachable in practice but kept total.
        self.run_effect(effect, f64::NAN)?;
        Ok(())
    }

    fn run_effect(&mut self, effect: Effect, now_ms: f64) -> StageResult<()> {
        match effect {
            Effect::None => {}
            Effect::StartSequence { duration } => {
                // Phase entry: fresh clock, fresh start timestamp. Any prior
                // clock belongs to a phase that just ended.
                if let Some(old) = self.sequence_clock.as_mut() {
                    old.cancel();
                }
                let mut clock = FrameClock::new(self.config.fps, duration);
                // Anchor the sequence at the triggering event's timestamp.
                let anchor = if now_ms.is_finite() {
                    clock.tick(now_ms)
                } else {
                    None
                };
                self.sequence_clock = Some(clock);
                self.translator.reset();

                // A zero-length sequence completes on its anchoring tick;
                // that completion still has to reach the reducer, or the
                // machine would wait on a clock that has already gone silent.
                if let Some(tick) = anchor
                    && tick.completed
                {
                    self.sequence_clock = None;
                    let effect = self.ctx.apply(&self.registry, Event::Tick(tick.frame))?;
                    self.run_effect(effect, now_ms)?;
                }
            }
            Effect::ArmBuffer => {
                if now_ms.is_finite() {
                    self.buffer_deadline_ms = Some(now_ms + self.config.buffer_delay_ms);
                } else {
                    self.buffer_deadline_ms = Some(self.config.buffer_delay_ms);
                }
                self.translator.reset();
            }
            Effect::CancelSequence => {
                if let Some(clock) = self.sequence_clock.as_mut() {
                    clock.cancel();
                }
                self.sequence_clock = None;
                self.buffer_deadline_ms = None;
                self.translator.reset();
            }
        }
        Ok(())
    }

    /// Report the active section's measured overflow height.
    pub fn set_max_scroll(&mut self, max: f64) -> StageResult<()> {
        self.dispatch(Event::SetMaxScroll(max))
    }

    /// Force-set the content offset (clamped), for sections entered from the
    /// end, e.g. backward navigation landing on the last timeline item.
    pub fn set_content_offset(&mut self, offset: f64) -> StageResult<()> {
        self.dispatch(Event::ContentScrollUpdate(offset))
    }

    /// Debug jump straight to a section.
    pub fn jump_to(&mut self, id: SectionId) -> StageResult<()> {
        let index = self.registry.index_of(id)?;
        self.dispatch(Event::JumpTo(index))
    }

    /// Snapshot of the machine context.
    pub fn context(&self) -> &TransitionContext {
        &self.ctx
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.ctx.phase
    }

    /// Section registry backing this engine.
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Frame counter of the playing sequence.
    pub fn sequence_frame(&self) -> u64 {
        self.ctx.sequence_frame
    }

    /// Sequence progress normalized to `[0, 1]` against the active duration;
    /// 0 when no sequence is playing.
    pub fn sequence_progress(&self) -> StageResult<f64> {
        match self.ctx.active_duration(&self.registry)? {
            Some(duration) if duration > 0 => Ok(range_map(
                self.ctx.sequence_frame as f64,
                (0.0, duration as f64),
                (0.0, 1.0),
                true,
                true,
            )),
            Some(_) => Ok(1.0),
            None => Ok(0.0),
        }
    }

    /// Content-scroll progress normalized to `[0, 1]`; 0 with no overflow.
    pub fn content_progress(&self) -> f64 {
        if self.ctx.max_content_scroll <= 0.0 {
            return 0.0;
        }
        range_map(
            self.ctx.content_offset,
            (0.0, self.ctx.max_content_scroll),
            (0.0, 1.0),
            true,
            true,
        )
    }

    /// Intro frame counter for the entrance animation.
    pub fn intro_frame(&self) -> u64 {
        self.intro.frame()
    }

    /// True once the intro released control to the machine.
    pub fn intro_complete(&self) -> bool {
        self.intro.is_complete()
    }

    /// Visibility flag bundle for one section.
    pub fn flags(&self, id: SectionId) -> StageResult<SectionFlags> {
        derive_flags(&self.ctx, &self.registry, id)
    }

    /// Direction of the most recent navigation.
    pub fn direction(&self) -> Direction {
        self.ctx.direction
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/orchestrator.rs"]
mod tests;
