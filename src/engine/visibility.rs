//! Pure projection from machine state to per-section presentation flags.

use crate::engine::machine::{Direction, Phase, TransitionContext};
use crate::foundation::error::StageResult;
use crate::section::registry::{SectionId, SectionRegistry};

/// Presentation flag bundle for one section.
///
/// Derived fresh on every render; never stored. Each visual section combines
/// these with the sequence frame to pick its animation branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionFlags {
    /// This section is the machine's current section.
    pub is_current: bool,
    /// This section is the one being vacated.
    pub is_previous: bool,
    /// The section should render at all.
    pub is_visible: bool,
    /// Playing its entrance branch.
    pub is_entering: bool,
    /// Playing its exit branch (being replaced, or a standalone exit).
    pub is_exiting: bool,
    /// Being returned to backward: play the entrance in reverse rather than
    /// the exit (un-type text instead of sliding out).
    pub is_reversing: bool,
    /// At rest and owning input (idle or content scroll).
    pub is_active: bool,
    /// Entering while navigating backward (shorter start delay).
    pub is_entering_backward: bool,
    /// Cosmetic: entering as if wrapped around from the far end.
    pub is_entering_from_wrap: bool,
    /// Cosmetic: exiting as if wrapping around to the far end.
    pub is_exiting_to_wrap: bool,
}

/// Derive the flag bundle for `id` from a context snapshot.
///
/// The wrap flags fabricate a looping illusion for the first/last section;
/// the underlying index arithmetic stays linear and clamped, so they are
/// presentation only and never feed back into the machine.
pub fn derive_flags(
    ctx: &TransitionContext,
    registry: &SectionRegistry,
    id: SectionId,
) -> StageResult<SectionFlags> {
    let index = registry.index_of(id)?;
    let last = registry.last_index();

    let is_current = index == ctx.current;
    let is_previous = ctx.previous == Some(index);

    let is_entering = is_current && ctx.phase == Phase::Transitioning;
    let is_exiting = (is_previous && ctx.phase == Phase::Transitioning)
        || (is_current && ctx.phase == Phase::Exiting);
    let is_reversing =
        is_previous && ctx.phase == Phase::Transitioning && ctx.direction == Direction::Backward;
    let backward = ctx.direction == Direction::Backward;

    Ok(SectionFlags {
        is_current,
        is_previous,
        is_visible: is_current || (is_previous && ctx.phase == Phase::Transitioning),
        is_entering,
        is_exiting,
        is_reversing,
        is_active: is_current && matches!(ctx.phase, Phase::Idle | Phase::ContentScroll),
        is_entering_backward: is_entering && backward,
        // Only the ends can fake a loop: first section "arriving from" the
        // last while moving forward, last section "leaving toward" the first.
        is_entering_from_wrap: is_entering && !backward && index == 0,
        is_exiting_to_wrap: is_exiting && !backward && index == last,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/engine/visibility.rs"]
mod tests;
