use std::fmt;

use crate::color::MarkerColor;

use super::model::{DeviceType, Record};

/// Marker radius when RSSI scaling is off.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Auth mode string WiGLE writes for open networks.
pub const OPEN_AUTH_MODE: &str = "[OPEN]";

// ---------------------------------------------------------------------------
// Marker types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusMode {
    #[default]
    Constant,
    /// Radius grows with signal strength.
    Rssi,
}

impl From<bool> for RadiusMode {
    fn from(scaled_by_rssi: bool) -> Self {
        if scaled_by_rssi {
            RadiusMode::Rssi
        } else {
            RadiusMode::Constant
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Label shown when a marker is hovered or clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupText {
    pub rows: Vec<(&'static str, String)>,
}

impl PopupText {
    fn for_record(record: &Record, lat: f64, lon: f64) -> Self {
        let rows = vec![
            ("Type", sanitize(&record.device_type.to_string())),
            ("Auth", sanitize(&record.auth_mode)),
            ("SSID", sanitize(record.ssid_or_empty())),
            ("MAC", sanitize(&record.mac)),
            ("RSSI", record.rssi.to_string()),
            ("GPS", format!("{lat}, {lon}")),
            ("First Seen", sanitize(&record.first_seen)),
        ];
        PopupText { rows }
    }
}

impl fmt::Display for PopupText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, value)) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

/// Field values come straight from the capture file; keep each on one line.
fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: GeoPoint,
    pub color: MarkerColor,
    pub radius: f64,
    pub popup: PopupText,
}

/// Result of mapping a record set.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MapView {
    /// No record carries a usable GPS fix.
    #[default]
    NoGpsData,
    Ready {
        center: GeoPoint,
        markers: Vec<Marker>,
    },
}

// ---------------------------------------------------------------------------
// Marker policies
// ---------------------------------------------------------------------------

pub fn marker_color(record: &Record) -> MarkerColor {
    match record.device_type {
        DeviceType::Wifi if record.auth_mode == OPEN_AUTH_MODE => MarkerColor::Green,
        DeviceType::Ble => MarkerColor::Blue,
        _ => MarkerColor::Red,
    }
}

/// `max(1, 100 + rssi)` in RSSI mode, so weak signals stay visible.
pub fn marker_radius(rssi: i32, mode: RadiusMode) -> f64 {
    match mode {
        RadiusMode::Constant => DEFAULT_RADIUS,
        RadiusMode::Rssi => (100 + i64::from(rssi)).max(1) as f64,
    }
}

// ---------------------------------------------------------------------------
// Marker mapper
// ---------------------------------------------------------------------------

/// Map records to markers centred on the mean of their GPS fixes.
///
/// Records without both coordinates are skipped. Returns
/// [`MapView::NoGpsData`] when no latitude or no longitude is present in the
/// whole set, or no single record has both.
pub fn build_markers<'a, I>(records: I, radius_mode: RadiusMode) -> MapView
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();

    let any_lat = records.iter().any(|r| r.lat().is_some());
    let any_lon = records.iter().any(|r| r.lon().is_some());
    if !any_lat || !any_lon {
        return MapView::NoGpsData;
    }

    let markers: Vec<Marker> = records
        .iter()
        .filter_map(|r| {
            let (lat, lon) = r.coordinates()?;
            Some(Marker {
                position: GeoPoint { lat, lon },
                color: marker_color(r),
                radius: marker_radius(r.rssi, radius_mode),
                popup: PopupText::for_record(r, lat, lon),
            })
        })
        .collect();

    if markers.is_empty() {
        return MapView::NoGpsData;
    }

    let n = markers.len() as f64;
    let center = GeoPoint {
        lat: markers.iter().map(|m| m.position.lat).sum::<f64>() / n,
        lon: markers.iter().map(|m| m.position.lon).sum::<f64>() / n,
    };

    MapView::Ready { center, markers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_records, AuthFilter, TypeFilter};

    fn rec(device_type: &str, auth: &str, lat: Option<f64>, lon: Option<f64>, rssi: i32) -> Record {
        Record {
            device_type: DeviceType::from(device_type),
            auth_mode: auth.into(),
            ssid: Some("Cafe".into()),
            mac: "00:11:22:33:44:55".into(),
            rssi,
            latitude: lat,
            longitude: lon,
            first_seen: "2024-05-01 10:00:00".into(),
        }
    }

    fn ready(view: MapView) -> (GeoPoint, Vec<Marker>) {
        match view {
            MapView::Ready { center, markers } => (center, markers),
            MapView::NoGpsData => panic!("expected markers"),
        }
    }

    #[test]
    fn color_policy() {
        assert_eq!(marker_color(&rec("WIFI", "[OPEN]", None, None, 0)), MarkerColor::Green);
        assert_eq!(marker_color(&rec("BLE", "[OPEN]", None, None, 0)), MarkerColor::Blue);
        assert_eq!(marker_color(&rec("BLE", "", None, None, 0)), MarkerColor::Blue);
        assert_eq!(marker_color(&rec("WIFI", "WPA2", None, None, 0)), MarkerColor::Red);
        assert_eq!(marker_color(&rec("WIFI", "OPEN", None, None, 0)), MarkerColor::Red);
        assert_eq!(marker_color(&rec("GSM", "[OPEN]", None, None, 0)), MarkerColor::Red);
    }

    #[test]
    fn radius_policy() {
        assert_eq!(marker_radius(-40, RadiusMode::Constant), 2.0);
        assert_eq!(marker_radius(-150, RadiusMode::Constant), 2.0);
        assert_eq!(marker_radius(-40, RadiusMode::Rssi), 60.0);
        assert_eq!(marker_radius(-99, RadiusMode::Rssi), 1.0);
        assert_eq!(marker_radius(-100, RadiusMode::Rssi), 1.0);
        assert_eq!(marker_radius(-150, RadiusMode::Rssi), 1.0);
        assert_eq!(marker_radius(i32::MIN, RadiusMode::Rssi), 1.0);
        assert_eq!(RadiusMode::from(true), RadiusMode::Rssi);
    }

    #[test]
    fn end_to_end_example() {
        let records = vec![
            rec("WIFI", "[OPEN]", Some(1.0), Some(2.0), -40),
            rec("BLE", "", Some(1.1), Some(2.1), -80),
        ];
        let filtered = filter_records(&records, AuthFilter::All, TypeFilter::All);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0], &records[0]);
        assert_eq!(filtered[1], &records[1]);

        let (center, markers) = ready(build_markers(filtered, RadiusMode::Constant));
        assert!((center.lat - 1.05).abs() < 1e-9);
        assert!((center.lon - 2.05).abs() < 1e-9);
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.radius == 2.0));
        assert_eq!(markers[0].color, MarkerColor::Green);
        assert_eq!(markers[1].color, MarkerColor::Blue);
    }

    #[test]
    fn missing_coordinates_are_skipped() {
        let records = vec![
            rec("WIFI", "WPA2", Some(1.0), Some(2.0), -40),
            rec("WIFI", "WPA2", Some(f64::NAN), Some(50.0), -40),
            rec("WIFI", "WPA2", Some(50.0), Some(f64::NAN), -40),
            rec("WIFI", "WPA2", None, Some(50.0), -40),
            rec("WIFI", "WPA2", Some(3.0), Some(4.0), -40),
        ];
        let (center, markers) = ready(build_markers(&records, RadiusMode::Constant));
        assert_eq!(markers.len(), 2);
        assert_eq!(center, GeoPoint { lat: 2.0, lon: 3.0 });
    }

    #[test]
    fn all_missing_falls_back_to_no_data() {
        let no_lat = vec![
            rec("WIFI", "WPA2", None, Some(2.0), -40),
            rec("BLE", "", Some(f64::NAN), Some(2.0), -40),
        ];
        assert_eq!(build_markers(&no_lat, RadiusMode::Rssi), MapView::NoGpsData);

        let no_lon = vec![rec("WIFI", "WPA2", Some(1.0), None, -40)];
        assert_eq!(build_markers(&no_lon, RadiusMode::Constant), MapView::NoGpsData);

        // Both columns have values, but never on the same row.
        let disjoint = vec![
            rec("WIFI", "WPA2", Some(1.0), None, -40),
            rec("WIFI", "WPA2", None, Some(2.0), -40),
        ];
        assert_eq!(build_markers(&disjoint, RadiusMode::Constant), MapView::NoGpsData);

        let empty: Vec<Record> = Vec::new();
        assert_eq!(build_markers(&empty, RadiusMode::Constant), MapView::NoGpsData);
    }

    #[test]
    fn popup_lists_record_fields() {
        let records = vec![rec("WIFI", "[OPEN]", Some(1.5), Some(-2.25), -40)];
        let (_, markers) = ready(build_markers(&records, RadiusMode::Rssi));
        assert_eq!(markers[0].radius, 60.0);
        assert_eq!(
            markers[0].popup.to_string(),
            "Type: WIFI\nAuth: [OPEN]\nSSID: Cafe\nMAC: 00:11:22:33:44:55\nRSSI: -40\n\
             GPS: 1.5, -2.25\nFirst Seen: 2024-05-01 10:00:00"
        );
    }

    #[test]
    fn popup_neutralises_control_characters() {
        let mut record = rec("WIFI", "WPA2", Some(1.0), Some(2.0), -40);
        record.ssid = Some("evil\nRSSI: 0\r\t<b>".into());
        let (_, markers) = ready(build_markers([&record], RadiusMode::Constant));
        let ssid = &markers[0].popup.rows[2];
        assert_eq!(ssid.0, "SSID");
        assert_eq!(ssid.1, "evil RSSI: 0  <b>");
        assert_eq!(markers[0].popup.to_string().lines().count(), 7);
    }
}
