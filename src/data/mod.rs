/// Data layer: series parsing, file grouping and legend labels.
///
/// Architecture:
/// ```text
///  input directory (sorted listing)
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  basename contains token → files of one data type
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Series (or UnreadableSeries)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  Series { x, y }, optional rescale
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
