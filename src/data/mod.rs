/// Data layer: core types, loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawEmployee>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  IQR capping, age groups → CleanedTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection (AND of three memberships) → FilteredTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  histogram, box-plot summaries, counts → DashboardSummary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
