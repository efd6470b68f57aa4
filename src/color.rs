use eframe::egui::Color32;
use palette::{named, Srgb};

// ---------------------------------------------------------------------------
// Marker colour categories
// ---------------------------------------------------------------------------

/// Colour category of a map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerColor {
    /// Open WiFi network.
    Green,
    /// BLE device.
    Blue,
    /// Secured WiFi or unknown device type.
    Red,
}

impl MarkerColor {
    pub const ALL: [MarkerColor; 3] = [MarkerColor::Green, MarkerColor::Blue, MarkerColor::Red];

    pub fn legend_label(self) -> &'static str {
        match self {
            MarkerColor::Green => "Open WiFi",
            MarkerColor::Blue => "BLE",
            MarkerColor::Red => "Secured / other",
        }
    }

    /// CSS named colour of the category.
    fn srgb(self) -> Srgb<u8> {
        match self {
            MarkerColor::Green => named::GREEN,
            MarkerColor::Blue => named::BLUE,
            MarkerColor::Red => named::RED,
        }
    }

    /// Solid colour for marker outlines and legend swatches.
    pub fn stroke(self) -> Color32 {
        let rgb = self.srgb();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Translucent fill with the given opacity in `0.0..=1.0`.
    pub fn fill(self, opacity: f32) -> Color32 {
        let rgb = self.srgb();
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(rgb.red, rgb.green, rgb.blue, alpha)
    }
}

/// Legend entries (label → colour) for the UI.
pub fn legend_entries() -> Vec<(&'static str, Color32)> {
    MarkerColor::ALL
        .iter()
        .map(|c| (c.legend_label(), c.stroke()))
        .collect()
}
