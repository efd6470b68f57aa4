use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DeviceType – value of the `Type` column
// ---------------------------------------------------------------------------

/// Radio technology of a sighting.
///
/// Anything other than `WIFI` / `BLE` is kept verbatim so it can still be
/// shown in the table (and is drawn as a "secured / other" marker).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum DeviceType {
    Wifi,
    Ble,
    Other(String),
}

impl From<String> for DeviceType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "WIFI" => DeviceType::Wifi,
            "BLE" => DeviceType::Ble,
            _ => DeviceType::Other(raw),
        }
    }
}

impl From<&str> for DeviceType {
    fn from(raw: &str) -> Self {
        DeviceType::from(raw.to_string())
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceType::Wifi => write!(f, "WIFI"),
            DeviceType::Ble => write!(f, "BLE"),
            DeviceType::Other(raw) => write!(f, "{raw}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the scan log
// ---------------------------------------------------------------------------

/// A single device sighting. Field names follow the WiGLE CSV header.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Type")]
    pub device_type: DeviceType,
    #[serde(rename = "AuthMode", default)]
    pub auth_mode: String,
    #[serde(rename = "SSID", default)]
    pub ssid: Option<String>,
    #[serde(rename = "MAC")]
    pub mac: String,
    #[serde(rename = "RSSI")]
    pub rssi: i32,
    #[serde(rename = "CurrentLatitude", deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(rename = "CurrentLongitude", deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
    #[serde(rename = "FirstSeen", default)]
    pub first_seen: String,
}

impl Record {
    /// Latitude, treating NaN the same as an empty cell.
    pub fn lat(&self) -> Option<f64> {
        self.latitude.filter(|v| !v.is_nan())
    }

    /// Longitude, treating NaN the same as an empty cell.
    pub fn lon(&self) -> Option<f64> {
        self.longitude.filter(|v| !v.is_nan())
    }

    /// Both coordinates, if the sighting has a usable GPS fix.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat()?, self.lon()?))
    }

    pub fn ssid_or_empty(&self) -> &str {
        self.ssid.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// RecordSet – the complete loaded scan log
// ---------------------------------------------------------------------------

/// All parsed sightings in file order.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub records: Vec<Record>,
    /// Rows dropped during parsing (wrong column count, bad RSSI, …).
    pub skipped_rows: usize,
}

impl RecordSet {
    pub fn new(records: Vec<Record>, skipped_rows: usize) -> Self {
        RecordSet {
            records,
            skipped_rows,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
