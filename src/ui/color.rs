// src/ui/color.rs
use crate::game::judgment::Quality;

/// 8-bit RGBA color as the host canvas expects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline(always)]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    #[inline(always)]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Replaces alpha with an opacity in `[0, 1]`.
    #[inline(always)]
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { a: opacity_to_alpha(opacity), ..self }
    }
}

#[inline(always)]
pub fn opacity_to_alpha(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0) as u8
}

// --- Palette ---
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const MARKING_GREY: Color = Color::rgb(200, 200, 200);
pub const WARNING_RED: Color = Color::rgb(255, 10, 10);
pub const CALLOUT_YELLOW: Color = Color::rgb(255, 255, 50);

// Zone fills are drawn at 0.7 opacity over the white meter background.
pub const ZONE_GREEN: Color = Color::rgba(50, 255, 50, 178);
pub const ZONE_YELLOW: Color = Color::rgba(255, 255, 50, 178);
pub const ZONE_RED: Color = Color::rgba(255, 50, 50, 178);

// Live value indicator on every meter
pub const CURRENT_VALUE_MARK: Color = Color::rgba(10, 10, 10, 204);

// Car axes
pub const AXIS_RIGHT: Color = Color::rgb(255, 0, 0);
pub const AXIS_FORWARD: Color = Color::rgb(0, 255, 0);
pub const AXIS_UP: Color = Color::rgb(0, 0, 255);
pub const AXIS_FRONT_LEFT: Color = Color::rgb(255, 165, 0);
pub const AXIS_FRONT_RIGHT: Color = Color::rgb(128, 0, 128);

/// Opaque text color for a judged quality.
#[inline(always)]
pub fn quality_text_color(quality: Quality) -> Color {
    match quality {
        Quality::Good => Color::rgb(50, 255, 50),
        Quality::Close => Color::rgb(255, 255, 50),
        Quality::Off => Color::rgb(255, 50, 50),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_maps_to_alpha_byte() {
        assert_eq!(WHITE.with_opacity(0.7).a, ZONE_GREEN.a);
        assert_eq!(WHITE.with_opacity(2.0).a, 255);
        assert_eq!(WHITE.with_opacity(-1.0).a, 0);
    }
}
