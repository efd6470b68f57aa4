use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::color;
use crate::data::filter::{AuthFilter, TypeFilter};
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.session.is_none() {
        ui.label("No scan log loaded.");
        return;
    }

    ui.strong("Device type filter");
    let mut type_filter = state.selection.type_filter();
    egui::ComboBox::from_id_salt("type_filter")
        .selected_text(type_filter.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for option in TypeFilter::OPTIONS {
                ui.selectable_value(&mut type_filter, option, option.as_str());
            }
        });
    if type_filter != state.selection.type_filter() {
        state.set_type_filter(type_filter);
    }

    // Authentication has no meaning for BLE, so the selector disappears.
    if state.selection.auth_applicable() {
        ui.add_space(4.0);
        ui.strong("WiFi Authentication filter");
        let mut auth_filter = state.selection.auth_filter();
        egui::ComboBox::from_id_salt("auth_filter")
            .selected_text(auth_filter.as_str())
            .show_ui(ui, |ui: &mut Ui| {
                for option in AuthFilter::OPTIONS {
                    ui.selectable_value(&mut auth_filter, option, option.as_str());
                }
            });
        if auth_filter != state.selection.auth_filter() {
            state.set_auth_filter(auth_filter);
        }
    }

    ui.separator();
    ui.strong("Legend");
    for (label, color) in color::legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("●").color(color));
            ui.label(label);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_session = state.session.is_some();
            if ui.add_enabled(has_session, egui::Button::new("Close")).clicked() {
                state.close_session();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}: {} records loaded, {} visible",
                session.source,
                session.records.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(note) = &state.load_notice {
            ui.separator();
            ui.label(note);
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Table / Map selector above the central view.
pub fn tab_strip(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.active_tab, Tab::Table, "📋 Table");
        ui.selectable_value(&mut state.active_tab, Tab::Map, "🗺 Map");
    });
    ui.separator();
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open scan log")
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    let loaded = crate::data::loader::load_file(&path)
        .with_context(|| format!("opening {}", path.display()));

    match loaded {
        Ok(records) => {
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            log::info!(
                "Loaded {} records from {source} ({} rows skipped)",
                records.len(),
                records.skipped_rows
            );
            state.open_session(source, records);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
