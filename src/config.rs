// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Presentation settings for the window and map.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Opacity of the marker fill (outline is always opaque).
    pub marker_fill_opacity: f32,
    /// Slippy-map zoom level used when the map is (re)centred.
    pub initial_zoom: f64,
    /// Extra pixels around a marker that still count as hovering it.
    pub hit_slack_px: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: "Wardriver Viewer".to_string(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            marker_fill_opacity: 0.6,
            initial_zoom: 15.0,
            hit_slack_px: 3.0,
        }
    }
}
