/// Data layer: core types, loading, filtering and marker mapping.
///
/// Architecture:
/// ```text
///   scan log .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  skip title line, parse rows → RecordSet
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ RecordSet │  Vec<Record> in file order
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  device type + auth mode → visible records
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ markers  │  visible records → MapView (center + markers)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod markers;
pub mod model;
