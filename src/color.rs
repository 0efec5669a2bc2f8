use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::records::ClubSide;

// ---------------------------------------------------------------------------
// Side colours: home green, away red
// ---------------------------------------------------------------------------

fn hue(side: ClubSide) -> f32 {
    match side {
        ClubSide::Home => 104.0,
        ClubSide::Away => 12.0,
    }
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Accent colour used for a club's values and bars.
pub fn side_color(side: ClubSide) -> Color32 {
    hsl_to_color32(Hsl::new(hue(side), 0.82, 0.45))
}

/// Accent for section headers.
pub fn accent() -> Color32 {
    Color32::from_rgb(0xFF, 0x4B, 0x44)
}
