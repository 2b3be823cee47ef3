/// Data layer: record store, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → RecordStore
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ RecordStore │  Vec<LaunchRecord>, sites, payload bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌───────────┐
///   │  filter  │ ──▶ │ aggregate │  category → count
///   └──────────┘     └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
