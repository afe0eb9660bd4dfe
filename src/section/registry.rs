//! Static ordered list of page sections and their per-direction timing.

use crate::foundation::error::{StageError, StageResult};

/// Identifier for one of the six page sections, in narrative order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    /// Landing section.
    Hero,
    /// Short professional summary; long copy, scrolls internally.
    Summary,
    /// Work experience timeline.
    Experience,
    /// Impact/metrics highlights.
    Impact,
    /// Skills grid.
    Skills,
    /// Contact/outro section.
    Contact,
}

impl SectionId {
    /// All section ids in narrative order.
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Impact,
        SectionId::Skills,
        SectionId::Contact,
    ];
}

/// Which viewport edge a section leaves through when exiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitSide {
    /// Slides out through the top edge.
    Top,
    /// Slides out through the bottom edge.
    Bottom,
}

/// Timing and behavior parameters for one section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    /// Section identifier; must stay in lockstep with registry order.
    pub id: SectionId,
    /// Entrance sequence length in frames.
    pub enter_frames: u64,
    /// Entrance length when entered backward; falls back to `enter_frames`.
    #[serde(default)]
    pub reverse_frames: Option<u64>,
    /// Exit sequence length in frames.
    pub exit_frames: u64,
    /// Edge the section exits through.
    pub exit_side: ExitSide,
    /// Whether the section's content overflows the viewport and gets a
    /// content-scroll sub-mode after entering.
    pub overflow: bool,
}

impl SectionSpec {
    /// Sequence duration when entering in `direction`.
    pub fn enter_duration(&self, direction: crate::Direction) -> u64 {
        match direction {
            crate::Direction::Forward => self.enter_frames,
            crate::Direction::Backward => self.reverse_frames.unwrap_or(self.enter_frames),
        }
    }
}

/// Ordered, immutable section table.
///
/// Constructed once at startup and never mutated; every index stored in the
/// [`crate::TransitionContext`] points into this table. Lookups that miss are
/// programmer errors and fail fast.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SectionRegistry {
    sections: Vec<SectionSpec>,
}

impl SectionRegistry {
    /// Validated constructor from an explicit section table.
    pub fn new(sections: Vec<SectionSpec>) -> StageResult<Self> {
        let reg = Self { sections };
        reg.validate()?;
        Ok(reg)
    }

    /// The canonical six-section portfolio table.
    pub fn default_portfolio() -> Self {
        use ExitSide::{Bottom, Top};
        let spec = |id, enter, reverse, exit, side, overflow| SectionSpec {
            id,
            enter_frames: enter,
            reverse_frames: reverse,
            exit_frames: exit,
            exit_side: side,
            overflow,
        };
        Self {
            sections: vec![
                spec(SectionId::Hero, 140, None, 60, Top, false),
                spec(SectionId::Summary, 125, Some(90), 60, Top, true),
                spec(SectionId::Experience, 150, Some(100), 70, Top, true),
                spec(SectionId::Impact, 120, Some(80), 60, Top, true),
                spec(SectionId::Skills, 110, None, 50, Top, false),
                spec(SectionId::Contact, 130, None, 60, Bottom, false),
            ],
        }
    }

    /// Structural validation: non-empty, unique ids, nonzero enter durations.
    pub fn validate(&self) -> StageResult<()> {
        if self.sections.is_empty() {
            return Err(StageError::validation("registry must not be empty"));
        }
        for (i, s) in self.sections.iter().enumerate() {
            if s.enter_frames == 0 {
                return Err(StageError::validation(format!(
                    "section {:?} enter_frames must be > 0",
                    s.id
                )));
            }
            if self.sections[..i].iter().any(|prev| prev.id == s.id) {
                return Err(StageError::validation(format!(
                    "duplicate section id {:?}",
                    s.id
                )));
            }
        }
        Ok(())
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when the registry holds no sections (never, once validated).
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Index of the last section.
    pub fn last_index(&self) -> usize {
        self.sections.len().saturating_sub(1)
    }

    /// Section at `index`, failing fast on out-of-bounds indices.
    pub fn get(&self, index: usize) -> StageResult<&SectionSpec> {
        self.sections
            .get(index)
            .ok_or_else(|| StageError::registry(format!("section index {index} out of bounds")))
    }

    /// Registry index of `id`, failing fast when the id is not configured.
    pub fn index_of(&self, id: SectionId) -> StageResult<usize> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StageError::registry(format!("section id {id:?} not in registry")))
    }

    /// The neighbor index one step in `direction`, if not at a boundary.
    pub fn neighbor(&self, index: usize, direction: crate::Direction) -> Option<usize> {
        match direction {
            crate::Direction::Forward => {
                let next = index + 1;
                (next < self.sections.len()).then_some(next)
            }
            crate::Direction::Backward => index.checked_sub(1),
        }
    }

    /// Iterate sections in narrative order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionSpec> {
        self.sections.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/registry.rs"]
mod tests;
