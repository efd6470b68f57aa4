use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::{AppState, Tab};
use crate::ui::map::{self, Basemap};
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WardriverApp {
    pub state: AppState,
    basemap: Basemap,
}

impl WardriverApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let basemap = Basemap::new(&cc.egui_ctx, config.initial_zoom);
        Self {
            state: AppState::new(config),
            basemap,
        }
    }
}

impl eframe::App for WardriverApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.map_fullscreen && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            map::set_fullscreen(ctx, &mut self.state, false);
        }

        // ---- Fullscreen: map only ----
        if self.state.map_fullscreen {
            egui::CentralPanel::default().show(ctx, |ui| {
                map::scan_map(ui, &mut self.state, &mut self.basemap);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table / map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.session.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a scan log to get started  (File → Open…)");
                });
                return;
            }

            panels::tab_strip(ui, &mut self.state);
            match self.state.active_tab {
                Tab::Table => table::record_table(ui, &self.state),
                Tab::Map => map::scan_map(ui, &mut self.state, &mut self.basemap),
            }
        });
    }
}
