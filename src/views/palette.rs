use crate::core::Condition;
use crate::render::Color;

/// Opacity of a landmark marker for each emphasis state.
pub const LANDMARK_NEUTRAL_OPACITY: f64 = 0.8;
pub const LANDMARK_SELECTED_OPACITY: f64 = 1.0;
pub const LANDMARK_DIMMED_OPACITY: f64 = 0.4;

/// Opacity of unselected profile curves without and with an active selection.
pub const CURVE_IDLE_OPACITY: f64 = 0.25;
pub const CURVE_BACKGROUND_OPACITY: f64 = 0.1;
pub const CURVE_SELECTED_OPACITY: f64 = 0.9;

const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

#[must_use]
pub const fn white() -> Color {
    WHITE
}

#[must_use]
pub const fn black() -> Color {
    BLACK
}

const fn rgb8(red: u8, green: u8, blue: u8) -> Color {
    Color::rgb(
        red as f64 / 255.0,
        green as f64 / 255.0,
        blue as f64 / 255.0,
    )
}

/// Categorical color of a condition.
#[must_use]
pub const fn condition_color(condition: Condition) -> Color {
    match condition {
        Condition::Standard => rgb8(0xd9, 0x5f, 0x02),
        Condition::Hypoxia => rgb8(0x75, 0x70, 0xb3),
        Condition::Cold => rgb8(0x1b, 0x9e, 0x77),
    }
}

/// Endpoints of the upper third of each condition's sequential ramp
/// (orange-red, blue-purple and blue-green).
const fn gradient_endpoints(condition: Condition) -> (Color, Color) {
    match condition {
        Condition::Standard => (rgb8(0xef, 0x65, 0x48), rgb8(0x7f, 0x00, 0x00)),
        Condition::Hypoxia => (rgb8(0x8c, 0x6b, 0xb1), rgb8(0x4d, 0x00, 0x4b)),
        Condition::Cold => (rgb8(0x41, 0xae, 0x76), rgb8(0x00, 0x44, 0x1b)),
    }
}

/// Size-encoded color, blended from the light to the dark ramp endpoint.
/// Non-finite input maps to the middle of the ramp.
#[must_use]
pub fn gradient_color(condition: Condition, normalized: f64) -> Color {
    let (light, dark) = gradient_endpoints(condition);
    let normalized = if normalized.is_finite() {
        normalized.clamp(0.0, 1.0)
    } else {
        0.5
    };
    light.mix(dark, normalized)
}

#[cfg(test)]
mod tests {
    use super::{condition_color, gradient_color};
    use crate::core::Condition;
    use crate::render::Color;

    #[test]
    fn condition_colors_match_hex_palette() {
        assert_eq!(
            condition_color(Condition::Standard),
            Color::from_hex("#d95f02").expect("hex")
        );
        assert_eq!(
            condition_color(Condition::Cold),
            Color::from_hex("#1b9e77").expect("hex")
        );
    }

    #[test]
    fn gradient_darkens_with_size() {
        let small = gradient_color(Condition::Hypoxia, 0.0);
        let large = gradient_color(Condition::Hypoxia, 1.0);
        assert!(large.red < small.red);
        assert!(gradient_color(Condition::Cold, f64::NAN).validate().is_ok());
    }
}
