use crate::foundation::error::{StageError, StageResult};

/// Rational frame rate (frames per second as `num/den`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator, must be > 0.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validated constructor.
    pub fn new(num: u32, den: u32) -> StageResult<Self> {
        if num == 0 {
            return Err(StageError::validation("Fps num must be > 0"));
        }
        if den == 0 {
            return Err(StageError::validation("Fps den must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in milliseconds.
    pub fn frame_duration_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Frame number reached after `elapsed_ms` of wall-clock time.
    ///
    /// This is the clock arithmetic the whole engine runs on:
    /// `floor(elapsed * rate / 1000)`, computed from elapsed time rather than
    /// counted per callback, so dropped refresh callbacks do not accumulate
    /// drift.
    pub fn frame_at_elapsed_ms(self, elapsed_ms: f64) -> u64 {
        (elapsed_ms * self.as_f64() / 1000.0).floor().max(0.0) as u64
    }
}

/// Navigation direction through the section list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// Toward higher section indices (scrolling down).
    Forward,
    /// Toward lower section indices (scrolling up).
    Backward,
}

impl Direction {
    /// The direction implied by a signed scroll delta (positive = forward).
    pub fn from_delta(delta: f64) -> Self {
        if delta >= 0.0 {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}
