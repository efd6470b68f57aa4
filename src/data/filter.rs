use std::fmt;

use super::model::{DeviceType, Record, RecordSet};

// ---------------------------------------------------------------------------
// Filter values offered by the UI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Wifi,
    Ble,
}

impl TypeFilter {
    pub const OPTIONS: [TypeFilter; 3] = [TypeFilter::All, TypeFilter::Wifi, TypeFilter::Ble];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "ALL",
            TypeFilter::Wifi => "WIFI",
            TypeFilter::Ble => "BLE",
        }
    }

    fn matches(self, device_type: &DeviceType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Wifi => *device_type == DeviceType::Wifi,
            TypeFilter::Ble => *device_type == DeviceType::Ble,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication mode filter. Compared verbatim against the `AuthMode`
/// column, so `Open` only matches rows whose auth mode is literally `OPEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthFilter {
    #[default]
    All,
    Open,
    Wpa,
    Wpa2,
    Wep,
}

impl AuthFilter {
    pub const OPTIONS: [AuthFilter; 5] = [
        AuthFilter::All,
        AuthFilter::Open,
        AuthFilter::Wpa,
        AuthFilter::Wpa2,
        AuthFilter::Wep,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AuthFilter::All => "ALL",
            AuthFilter::Open => "OPEN",
            AuthFilter::Wpa => "WPA",
            AuthFilter::Wpa2 => "WPA2",
            AuthFilter::Wep => "WEP",
        }
    }
}

impl fmt::Display for AuthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FilterSelection – what the user picked
// ---------------------------------------------------------------------------

/// The current `(type, auth)` pick.
///
/// Authentication is meaningless for BLE, so selecting `Ble` resets the
/// auth filter to `All` and auth changes are ignored while it is active.
/// The filter functions below do not rely on this; they take both values
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSelection {
    type_filter: TypeFilter,
    auth_filter: AuthFilter,
}

impl FilterSelection {
    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn auth_filter(&self) -> AuthFilter {
        self.auth_filter
    }

    /// Whether the auth selector should be shown at all.
    pub fn auth_applicable(&self) -> bool {
        self.type_filter != TypeFilter::Ble
    }

    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.type_filter = type_filter;
        if !self.auth_applicable() {
            self.auth_filter = AuthFilter::All;
        }
    }

    pub fn set_auth_filter(&mut self, auth_filter: AuthFilter) {
        if self.auth_applicable() {
            self.auth_filter = auth_filter;
        }
    }
}

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// Whether a single record passes the selection.
///
/// The auth-mode check is skipped for `TypeFilter::Ble` only. With
/// `TypeFilter::All` a non-`All` auth filter still applies, which also hides
/// every BLE record.
pub fn matches(record: &Record, auth_filter: AuthFilter, type_filter: TypeFilter) -> bool {
    if auth_filter != AuthFilter::All
        && type_filter != TypeFilter::Ble
        && record.auth_mode != auth_filter.as_str()
    {
        return false;
    }
    type_filter.matches(&record.device_type)
}

/// Records passing the selection, in input order.
pub fn filter_records<'a, I>(records: I, auth_filter: AuthFilter, type_filter: TypeFilter) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| matches(r, auth_filter, type_filter))
        .collect()
}

/// Indices into `set.records` of the records passing the selection.
pub fn filtered_indices(set: &RecordSet, auth_filter: AuthFilter, type_filter: TypeFilter) -> Vec<usize> {
    set.records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, auth_filter, type_filter))
        .map(|(i, _)| i)
        .collect()
}
