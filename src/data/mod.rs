/// Data layer: the labelled dataset and its bundled loader.
///
/// Architecture:
/// ```text
///   assets/iris.csv (compiled in)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse csv → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  features, labels, label names
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
