/// Data layer: core types, loading, caching and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, rename columns, decode mode/key → TrackTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  one Arc<TrackTable> per path for the whole session
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  genre set + popularity range → filtered indices
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
