/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///   times.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (raw headers)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────────────┐
///   │ Dataset::normalize_headers    │  trimmed names, "Size" is the key
///   └──────────────────────────────┘
/// ```

pub mod loader;
pub mod model;
