//! Pure numeric primitives shared by the engine and the render layer.

/// Linearly map `value` from `input` range to `output` range.
///
/// `clamp_left` / `clamp_right` independently clamp the *input* to its range
/// edge before mapping; with both off the map extrapolates linearly beyond
/// the range. A degenerate input range maps everything to `output.0`.
pub fn range_map(
    value: f64,
    input: (f64, f64),
    output: (f64, f64),
    clamp_left: bool,
    clamp_right: bool,
) -> f64 {
    let (in_min, in_max) = input;
    let (out_min, out_max) = output;

    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }

    let mut v = value;
    if clamp_left && v < in_min {
        v = in_min;
    }
    if clamp_right && v > in_max {
        v = in_max;
    }

    out_min + (v - in_min) / span * (out_max - out_min)
}

/// Step response of a damped harmonic oscillator as a 0 -> 1 progress value.
///
/// `frame` is elapsed frames since the animation started; negative frames
/// (not yet started) return exactly 0. The damping ratio selects among the
/// under-damped, critically damped and over-damped closed forms. The result
/// is clamped to `[0, 1]`: the under-damped branch mathematically overshoots,
/// but callers use this as an easing curve and rely on the clamp to keep the
/// settled value from bouncing.
pub fn spring_progress(frame: i64, fps: f64, damping: f64, stiffness: f64, mass: f64) -> f64 {
    if frame < 0 {
        return 0.0;
    }
    if fps <= 0.0 || stiffness <= 0.0 || mass <= 0.0 {
        return 0.0;
    }

    let t = frame as f64 / fps;
    let omega0 = (stiffness / mass).sqrt();
    let zeta = damping / (2.0 * (stiffness * mass).sqrt());

    let x = if zeta < 1.0 {
        // Under-damped: oscillating approach.
        let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega0 / omega_d) * (omega_d * t).sin())
    } else if zeta > 1.0 {
        // Over-damped: slow non-oscillating approach.
        let omega_b = omega0 * (zeta * zeta - 1.0).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        1.0 - envelope * ((omega_b * t).cosh() + (zeta * omega0 / omega_b) * (omega_b * t).sinh())
    } else {
        // Critically damped: fastest approach without oscillation.
        1.0 - (-omega0 * t).exp() * (1.0 + omega0 * t)
    };

    x.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
