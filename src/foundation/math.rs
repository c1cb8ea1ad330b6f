/// Round a channel value computed in floating point back into `0..=255`.
///
/// NaN collapses to 0 so a degenerate factor can never panic a conversion.
pub(crate) fn round_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0).round() as u8
}

/// `round(clamp(a + t * (b - a)))`. `t` outside `[0, 1]` is accepted.
pub(crate) fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    round_channel(a + t * (f64::from(b) - a))
}

pub(crate) fn add_scaled(a: u8, b: u8, t: f64) -> u8 {
    round_channel(f64::from(a) + t * f64::from(b))
}

pub(crate) fn sub_scaled(a: u8, b: u8, t: f64) -> u8 {
    round_channel(f64::from(a) - t * f64::from(b))
}

pub(crate) fn scale_channel(a: u8, t: f64) -> u8 {
    round_channel(f64::from(a) * t)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
