use eframe::egui::{self, Pos2, Response, Shape, Stroke, Ui};
use walkers::sources::OpenStreetMap;
use walkers::{lat_lon, HttpTiles, Map, MapMemory, Plugin, Projector};

use crate::data::markers::{GeoPoint, MapView, Marker, PopupText};
use crate::state::AppState;

const MARKER_STROKE_WIDTH: f32 = 1.5;

// ---------------------------------------------------------------------------
// Basemap – tiles and camera
// ---------------------------------------------------------------------------

/// Tile cache and camera of the slippy map. Lives as long as the window.
pub struct Basemap {
    tiles: HttpTiles,
    memory: MapMemory,
}

impl Basemap {
    pub fn new(egui_ctx: &egui::Context, zoom: f64) -> Self {
        let mut memory = MapMemory::default();
        if let Err(e) = memory.set_zoom(zoom) {
            log::warn!("Invalid initial map zoom {zoom}: {e:?}");
        }
        Self {
            tiles: HttpTiles::new(OpenStreetMap, egui_ctx.clone()),
            memory,
        }
    }

    fn center_on(&mut self, center: GeoPoint, zoom: f64) {
        self.memory.center_at(lat_lon(center.lat, center.lon));
        if let Err(e) = self.memory.set_zoom(zoom) {
            log::warn!("Invalid map zoom {zoom}: {e:?}");
        }
    }
}

// ---------------------------------------------------------------------------
// Fullscreen
// ---------------------------------------------------------------------------

/// Switch between the normal layout and a fullscreen map-only window.
pub fn set_fullscreen(ctx: &egui::Context, state: &mut AppState, on: bool) {
    state.map_fullscreen = on;
    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(on));
}

// ---------------------------------------------------------------------------
// Marker layer
// ---------------------------------------------------------------------------

/// Circle shapes for all markers, fill then outline, in marker order so
/// later records overlap earlier ones.
fn marker_shapes(markers: &[Marker], project: impl Fn(GeoPoint) -> Pos2, opacity: f32) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(markers.len() * 2);
    for m in markers {
        let pos = project(m.position);
        let radius = m.radius as f32;
        shapes.push(Shape::circle_filled(pos, radius, m.color.fill(opacity)));
        shapes.push(Shape::circle_stroke(
            pos,
            radius,
            Stroke::new(MARKER_STROKE_WIDTH, m.color.stroke()),
        ));
    }
    shapes
}

/// Topmost marker whose drawn circle (plus `slack` pixels) contains `pos`.
fn marker_at(markers: &[Marker], project: impl Fn(GeoPoint) -> Pos2, pos: Pos2, slack: f32) -> Option<usize> {
    markers
        .iter()
        .enumerate()
        .rev()
        .find(|(_, m)| project(m.position).distance(pos) <= m.radius as f32 + slack)
        .map(|(i, _)| i)
}

/// Draws markers on top of the tiles and records which one is hovered.
struct MarkerLayer<'a> {
    markers: &'a [Marker],
    opacity: f32,
    slack: f32,
    hovered: Option<usize>,
}

impl Plugin for &mut MarkerLayer<'_> {
    fn run(self: Box<Self>, ui: &mut Ui, response: &Response, projector: &Projector) {
        let layer = *self;
        let project = |p: GeoPoint| {
            let screen = projector.project(lat_lon(p.lat, p.lon));
            egui::pos2(screen.x, screen.y)
        };

        ui.painter_at(response.rect)
            .extend(marker_shapes(layer.markers, project, layer.opacity));

        layer.hovered = response
            .hover_pos()
            .and_then(|pos| marker_at(layer.markers, project, pos, layer.slack));
    }
}

// ---------------------------------------------------------------------------
// Map view (central panel, "Map" tab)
// ---------------------------------------------------------------------------

/// Render the map toolbar and the markers over the OpenStreetMap basemap.
pub fn scan_map(ui: &mut Ui, state: &mut AppState, basemap: &mut Basemap) {
    ui.horizontal(|ui: &mut Ui| {
        let mut scaled = state.radius_from_rssi;
        if ui.checkbox(&mut scaled, "Radius scaled by RSSI").changed() {
            state.set_radius_from_rssi(scaled);
        }
        if ui.button("Recenter").clicked() {
            state.recenter_map = true;
        }
        let fullscreen = state.map_fullscreen;
        let label = if fullscreen { "Exit fullscreen" } else { "⛶" };
        if ui.button(label).on_hover_text("Toggle fullscreen map").clicked() {
            set_fullscreen(ui.ctx(), state, !fullscreen);
        }
        ui.hyperlink_to(
            "© OpenStreetMap contributors",
            "https://www.openstreetmap.org/copyright",
        );
    });

    let (center, markers) = match &state.map_view {
        MapView::Ready { center, markers } => (*center, markers),
        MapView::NoGpsData => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("No GPS data available");
            });
            return;
        }
    };

    if state.recenter_map {
        basemap.center_on(center, state.config.initial_zoom);
        state.recenter_map = false;
    }

    let mut layer = MarkerLayer {
        markers,
        opacity: state.config.marker_fill_opacity,
        slack: state.config.hit_slack_px,
        hovered: None,
    };

    let response = ui.add(
        Map::new(
            Some(&mut basemap.tiles),
            &mut basemap.memory,
            lat_lon(center.lat, center.lon),
        )
        .with_plugin(&mut layer),
    );
    let hovered = layer.hovered;

    if response.clicked() {
        state.pinned_marker = hovered;
    }

    if let Some(idx) = hovered {
        let popup = &markers[idx].popup;
        response.on_hover_ui_at_pointer(|ui: &mut Ui| {
            popup_grid(ui, popup, "hover_popup");
        });
    }

    if let Some(idx) = state.pinned_marker {
        let Some(marker) = markers.get(idx) else {
            state.pinned_marker = None;
            return;
        };
        let mut open = true;
        egui::Window::new("Marker")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ui.ctx(), |ui: &mut Ui| {
                popup_grid(ui, &marker.popup, "pinned_popup");
            });
        if !open {
            state.pinned_marker = None;
        }
    }
}

/// Label / value rows of a marker popup. Values are plain text.
fn popup_grid(ui: &mut Ui, popup: &PopupText, id: &str) {
    egui::Grid::new(id).num_columns(2).show(ui, |ui: &mut Ui| {
        for (label, value) in &popup.rows {
            ui.strong(format!("{label}:"));
            ui.label(value);
            ui.end_row();
        }
    });
}
