use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;

use super::model::{Record, RecordSet};

/// Columns the viewer reads; any others in the file are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "CurrentLatitude",
    "CurrentLongitude",
    "SSID",
    "Type",
    "MAC",
    "AuthMode",
    "FirstSeen",
    "RSSI",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading scan log: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing CSV header: {0}")]
    Csv(#[from] csv::Error),
    #[error("file is empty")]
    Empty,
    #[error("CSV missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a scan log from a file. Only `.csv` exports are accepted.
pub fn load_file(path: &Path) -> Result<RecordSet, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_reader(File::open(path)?),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout (WiGLE export):
///
/// ```text
/// WigleWifi-1.4,appRelease=...,model=...     <- title line, skipped
/// MAC,SSID,AuthMode,FirstSeen,...,Type       <- real header
/// 00:11:22:33:44:55,Cafe,[OPEN],...
/// ```
///
/// Rows with the wrong number of fields or an unparseable `RSSI` are
/// skipped and counted in [`RecordSet::skipped_rows`]. Empty or invalid
/// coordinates load as missing.
pub fn load_reader<R: Read>(reader: R) -> Result<RecordSet, LoadError> {
    let mut buf = BufReader::new(reader);

    let mut title = String::new();
    if buf.read_line(&mut title)? == 0 {
        return Err(LoadError::Empty);
    }
    log::debug!("Skipping title line: {}", title.trim_end());

    let mut reader = csv::ReaderBuilder::new().from_reader(buf);
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    let mut skipped = 0;

    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                log::debug!("Skipping CSV row {row_no}: {e}");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed rows");
    }

    Ok(RecordSet::new(records, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DeviceType;

    const TITLE: &str = "WigleWifi-1.4,appRelease=2.26,model=Pixel,release=11,device=x,display=y,board=z,brand=w\n";
    const HEADER: &str = "MAC,SSID,AuthMode,FirstSeen,Channel,RSSI,CurrentLatitude,CurrentLongitude,AltitudeMeters,AccuracyMeters,Type\n";

    fn load(body: &str) -> Result<RecordSet, LoadError> {
        let text = format!("{TITLE}{HEADER}{body}");
        load_reader(text.as_bytes())
    }

    #[test]
    fn skips_title_line_and_reads_rows() {
        let set = load(
            "00:11:22:33:44:55,Cafe,[OPEN],2024-05-01 10:00:00,6,-40,1.0,2.0,10,5,WIFI\n\
             66:77:88:99:aa:bb,,Misc [LE],2024-05-01 10:00:02,0,-80,1.1,2.1,10,5,BLE\n",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped_rows, 0);

        let wifi = &set.records[0];
        assert_eq!(wifi.device_type, DeviceType::Wifi);
        assert_eq!(wifi.ssid.as_deref(), Some("Cafe"));
        assert_eq!(wifi.auth_mode, "[OPEN]");
        assert_eq!(wifi.rssi, -40);
        assert_eq!(wifi.coordinates(), Some((1.0, 2.0)));
        assert_eq!(wifi.first_seen, "2024-05-01 10:00:00");

        let ble = &set.records[1];
        assert_eq!(ble.device_type, DeviceType::Ble);
        assert_eq!(ble.ssid, None);
    }

    #[test]
    fn skips_rows_with_wrong_field_count() {
        let set = load(
            "00:11:22:33:44:55,Cafe,[OPEN],2024-05-01 10:00:00,6,-40,1.0,2.0,10,5,WIFI\n\
             broken,row\n\
             66:77:88:99:aa:bb,Home,[WPA2-PSK-CCMP][ESS],2024-05-01 10:00:02,11,-70,1.1,2.1,10,5,WIFI,extra\n\
             66:77:88:99:aa:cc,Home,WPA2,2024-05-01 10:00:03,11,-71,1.2,2.2,10,5,WIFI\n",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.skipped_rows, 2);
        assert_eq!(set.records[1].mac, "66:77:88:99:aa:cc");
    }

    #[test]
    fn missing_coordinates_load_as_none() {
        let set = load(
            "00:11:22:33:44:55,Cafe,[OPEN],2024-05-01 10:00:00,6,-40,,,10,5,WIFI\n\
             00:11:22:33:44:56,Cafe,[OPEN],2024-05-01 10:00:00,6,-40,abc,2.0,10,5,WIFI\n",
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.records[0].latitude, None);
        assert_eq!(set.records[0].longitude, None);
        assert_eq!(set.records[1].latitude, None);
        assert_eq!(set.records[1].longitude, Some(2.0));
    }

    #[test]
    fn unparseable_rssi_is_skipped() {
        let set = load("00:11:22:33:44:55,Cafe,[OPEN],2024-05-01 10:00:00,6,loud,1.0,2.0,10,5,WIFI\n").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.skipped_rows, 1);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let text = format!("{TITLE}MAC,SSID,AuthMode,FirstSeen,RSSI,CurrentLatitude,CurrentLongitude\n");
        let err = load_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Type")));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(load_reader(&b""[..]), Err(LoadError::Empty)));
    }

    #[test]
    fn rejects_other_extensions() {
        let err = load_file(Path::new("scan.json")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "json"));
    }
}
