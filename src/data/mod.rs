/// Data layer: table model, loading, validation, selection, series.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .xls / .ods
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse upload → SalesTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  required columns present?
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  distinct products / branches → Selection
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  selected rows → SalesSeries (month, quantity)
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod series;
