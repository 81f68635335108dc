pub mod config;
pub mod data;
pub mod fetch;
pub mod state;

pub use config::FinderConfig;
pub use data::filter::{requires_baby_change, FacilityFilter};
pub use data::loader::{load, load_table, LoadReport};
pub use data::model::{Coordinate, Facility, RawTable};
pub use data::rank::{rank, rank_with_distance, RankedFacility};
pub use fetch::{DatasetClient, FetchError};
pub use state::{CycleOutcome, FinderState};
