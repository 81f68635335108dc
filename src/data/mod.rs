//! Data layer: facility records, table loading, filtering and ranking.
//!
//! Architecture:
//! ```text
//!  remote JSON table / .json / .csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  schema   │  header row → column positions
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  data rows → Vec<Facility>, bad rows skipped
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  attribute predicates (baby change, accessible)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   rank    │  haversine distance → nearest K
//!   └──────────┘
//! ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod rank;
pub mod schema;
