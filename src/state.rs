use crate::config::ViewerConfig;
use crate::data::filter::{filter_records, filtered_indices, AuthFilter, FilterSelection, TypeFilter};
use crate::data::markers::{build_markers, MapView, RadiusMode};
use crate::data::model::{Record, RecordSet};

// ---------------------------------------------------------------------------
// Session – one opened scan log
// ---------------------------------------------------------------------------

/// The scan log currently being viewed. Replaced on every successful open.
#[derive(Debug, Clone)]
pub struct ScanSession {
    /// File name shown in the top bar.
    pub source: String,
    pub records: RecordSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Table,
    Map,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Opened scan log (None until the user opens a file).
    pub session: Option<ScanSession>,

    /// Device type / auth mode pick.
    pub selection: FilterSelection,

    /// "Radius scaled by RSSI" checkbox.
    pub radius_from_rssi: bool,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Markers for the visible records (cached).
    pub map_view: MapView,

    pub active_tab: Tab,

    /// Move the map back to the marker centre on the next frame.
    pub recenter_map: bool,

    /// Map-only layout with the window in fullscreen.
    pub map_fullscreen: bool,

    /// Index into the map markers whose popup is pinned open.
    pub pinned_marker: Option<usize>,

    /// Load error shown in red in the top bar.
    pub status_message: Option<String>,

    /// Informational note about the last load (skipped rows).
    pub load_notice: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            session: None,
            selection: FilterSelection::default(),
            radius_from_rssi: false,
            visible_indices: Vec::new(),
            map_view: MapView::NoGpsData,
            active_tab: Tab::default(),
            recenter_map: false,
            map_fullscreen: false,
            pinned_marker: None,
            status_message: None,
            load_notice: None,
        }
    }

    /// Start a session for a newly loaded file, replacing any previous one.
    pub fn open_session(&mut self, source: impl Into<String>, records: RecordSet) {
        let source = source.into();
        if let Some(old) = &self.session {
            log::info!("Replacing session for {}", old.source);
        }
        self.status_message = None;
        self.load_notice = (records.skipped_rows > 0)
            .then(|| format!("Skipped {} malformed rows", records.skipped_rows));
        self.session = Some(ScanSession { source, records });
        self.refilter();
    }

    /// Drop the current session and everything derived from it.
    pub fn close_session(&mut self) {
        if let Some(old) = self.session.take() {
            log::info!("Closed session for {}", old.source);
        }
        self.visible_indices.clear();
        self.map_view = MapView::NoGpsData;
        self.pinned_marker = None;
        self.map_fullscreen = false;
        self.status_message = None;
        self.load_notice = None;
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.selection.set_type_filter(type_filter);
        self.refilter();
    }

    pub fn set_auth_filter(&mut self, auth_filter: AuthFilter) {
        self.selection.set_auth_filter(auth_filter);
        self.refilter();
    }

    pub fn set_radius_from_rssi(&mut self, enabled: bool) {
        self.radius_from_rssi = enabled;
        self.rebuild_map();
    }

    /// Recompute `visible_indices` and the map after a filter or data change.
    pub fn refilter(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        self.visible_indices = filtered_indices(
            &session.records,
            self.selection.auth_filter(),
            self.selection.type_filter(),
        );
        log::debug!(
            "Filter {}/{}: {} of {} records visible",
            self.selection.type_filter(),
            self.selection.auth_filter(),
            self.visible_indices.len(),
            session.records.len()
        );
        self.rebuild_map();
    }

    /// Rebuild markers from the visible records and recentre the map.
    pub fn rebuild_map(&mut self) {
        // Filtering again is a no-op on already filtered records.
        let map_view = build_markers(
            filter_records(
                self.visible_records(),
                self.selection.auth_filter(),
                self.selection.type_filter(),
            ),
            RadiusMode::from(self.radius_from_rssi),
        );
        self.map_view = map_view;
        self.pinned_marker = None;
        self.recenter_map = true;
    }

    /// Records passing the current filters, in file order.
    pub fn visible_records(&self) -> Vec<&Record> {
        match &self.session {
            Some(session) => self
                .visible_indices
                .iter()
                .map(|&i| &session.records.records[i])
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DeviceType;

    fn rec(device_type: &str, auth: &str, rssi: i32) -> Record {
        Record {
            device_type: DeviceType::from(device_type),
            auth_mode: auth.into(),
            ssid: None,
            mac: format!("{device_type}-{auth}"),
            rssi,
            latitude: Some(1.0),
            longitude: Some(2.0),
            first_seen: "2024-05-01 10:00:00".into(),
        }
    }

    fn records() -> RecordSet {
        RecordSet::new(
            vec![rec("WIFI", "[OPEN]", -40), rec("WIFI", "WPA2", -60), rec("BLE", "", -80)],
            1,
        )
    }

    fn radii(state: &AppState) -> Vec<f64> {
        match &state.map_view {
            MapView::Ready { markers, .. } => markers.iter().map(|m| m.radius).collect(),
            MapView::NoGpsData => Vec::new(),
        }
    }

    #[test]
    fn open_session_shows_all_records() {
        let mut state = AppState::default();
        assert!(state.visible_records().is_empty());

        state.open_session("scan.csv", records());
        assert_eq!(state.visible_indices, [0, 1, 2]);
        assert_eq!(radii(&state), [2.0, 2.0, 2.0]);
        assert_eq!(state.load_notice.as_deref(), Some("Skipped 1 malformed rows"));
        assert_eq!(state.status_message, None);
        assert!(state.recenter_map);
    }

    #[test]
    fn filters_and_radius_update_cached_views() {
        let mut state = AppState::default();
        state.open_session("scan.csv", records());

        state.set_auth_filter(AuthFilter::Wpa2);
        assert_eq!(state.visible_indices, [1]);

        state.set_type_filter(TypeFilter::Ble);
        assert_eq!(state.selection.auth_filter(), AuthFilter::All);
        assert_eq!(state.visible_indices, [2]);

        state.set_radius_from_rssi(true);
        assert_eq!(radii(&state), [20.0]);
    }

    #[test]
    fn replacing_and_closing_sessions() {
        let mut state = AppState::default();
        state.open_session("first.csv", records());
        state.pinned_marker = Some(0);

        let second = RecordSet::new(vec![rec("BLE", "", -70)], 0);
        state.open_session("second.csv", second);
        assert_eq!(state.session.as_ref().map(|s| s.source.as_str()), Some("second.csv"));
        assert_eq!(state.visible_indices, [0]);
        assert_eq!(state.pinned_marker, None);
        assert_eq!(state.load_notice, None);

        state.map_fullscreen = true;
        state.close_session();
        assert!(state.session.is_none());
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.map_view, MapView::NoGpsData);
        assert!(!state.map_fullscreen);
    }

    #[test]
    fn skipped_rows_are_a_notice_not_an_error() {
        let mut state = AppState::default();
        state.status_message = Some("Error: opening broken.csv".into());

        state.open_session("scan.csv", records());
        assert_eq!(state.status_message, None);
        assert_eq!(state.load_notice.as_deref(), Some("Skipped 1 malformed rows"));

        state.close_session();
        assert_eq!(state.load_notice, None);
    }
}
