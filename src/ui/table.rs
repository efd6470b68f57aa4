use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::Record;
use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "MAC",
    "SSID",
    "AuthMode",
    "FirstSeen",
    "RSSI",
    "CurrentLatitude",
    "CurrentLongitude",
    "Type",
];

fn coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn cells(record: &Record) -> [String; 8] {
    [
        record.mac.clone(),
        record.ssid_or_empty().to_string(),
        record.auth_mode.clone(),
        record.first_seen.clone(),
        record.rssi.to_string(),
        coordinate(record.lat()),
        coordinate(record.lon()),
        record.device_type.to_string(),
    ]
}

// ---------------------------------------------------------------------------
// Record table (central panel, "Table" tab)
// ---------------------------------------------------------------------------

/// Render the filtered records with a record count.
pub fn record_table(ui: &mut Ui, state: &AppState) {
    let records = state.visible_records();

    ui.label(format!("Found {} records.", records.len()));
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::initial(140.0))
        .column(Column::initial(160.0).clip(true))
        .column(Column::initial(160.0).clip(true))
        .column(Column::initial(140.0))
        .column(Column::initial(50.0))
        .columns(Column::initial(110.0), 2)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let record = records[row.index()];
                for cell in cells(record) {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
