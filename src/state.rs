use crate::data::filter::FacilityFilter;
use crate::data::loader::load_table;
use crate::data::model::{Coordinate, Facility, RawTable};
use crate::data::rank::{rank_with_distance, RankedFacility, DEFAULT_LIMIT};
use crate::fetch::FetchError;

// ---------------------------------------------------------------------------
// Refresh cycles
// ---------------------------------------------------------------------------

/// Handed out when a fetch starts; identifies the cycle its result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CycleTicket(u64);

/// What applying one cycle's result did to the state.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// New nearest facilities replaced the previous ones.
    Updated { shown: usize, loaded: usize, skipped: usize },
    /// A newer cycle was already applied; this result was dropped.
    Stale,
    /// Transport or decode failure; previous results kept.
    FetchFailed(String),
    /// Header lacked required columns; previous results kept.
    SchemaRejected(String),
}

// ---------------------------------------------------------------------------
// Finder state
// ---------------------------------------------------------------------------

/// State behind the presentation layer, independent of rendering.
pub struct FinderState {
    /// Which attributes a shown facility must have.
    pub filter: FacilityFilter,

    /// Maximum number of facilities shown.
    pub limit: usize,

    /// Every facility from the last applied dataset (used for lookups).
    pub facilities: Vec<Facility>,

    /// Nearest matching facilities, closest first.
    pub nearest: Vec<RankedFacility>,

    /// Status / error message for the user.
    pub status_message: Option<String>,

    issued: u64,
    applied: Option<CycleTicket>,
}

impl Default for FinderState {
    fn default() -> Self {
        Self::new(FacilityFilter::default(), DEFAULT_LIMIT)
    }
}

impl FinderState {
    pub fn new(filter: FacilityFilter, limit: usize) -> Self {
        Self {
            filter,
            limit,
            facilities: Vec::new(),
            nearest: Vec::new(),
            status_message: None,
            issued: 0,
            applied: None,
        }
    }

    /// Start a new cycle. Tickets increase monotonically.
    pub fn begin_cycle(&mut self) -> CycleTicket {
        self.issued += 1;
        CycleTicket(self.issued)
    }

    /// Apply the fetch result of cycle `ticket` for a user at `reference`.
    ///
    /// Results older than the last applied cycle are dropped. Failures keep
    /// whatever was shown before.
    pub fn apply(
        &mut self,
        ticket: CycleTicket,
        reference: Coordinate,
        fetched: Result<RawTable, FetchError>,
    ) -> CycleOutcome {
        if self.applied.is_some_and(|last| ticket < last) {
            log::debug!("Dropping stale result of cycle {}", ticket.0);
            return CycleOutcome::Stale;
        }

        let table = match fetched {
            Ok(table) => table,
            Err(err) => {
                log::warn!("Fetch failed: {err}");
                self.status_message = Some(err.to_string());
                return CycleOutcome::FetchFailed(err.to_string());
            }
        };

        let report = match load_table(&table) {
            Ok(report) => report,
            Err(err) => {
                log::warn!("Dataset rejected: {err}");
                self.status_message = Some(err.to_string());
                return CycleOutcome::SchemaRejected(err.to_string());
            }
        };

        let filter = self.filter;
        self.nearest = rank_with_distance(
            &report.facilities,
            |f| filter.matches(f),
            reference,
            self.limit,
        );
        self.facilities = report.facilities;
        self.applied = Some(ticket);
        self.status_message = None;

        log::info!(
            "Showing {} of {} facilities near {}",
            self.nearest.len(),
            self.facilities.len(),
            reference
        );
        CycleOutcome::Updated {
            shown: self.nearest.len(),
            loaded: self.facilities.len(),
            skipped: report.skipped_rows,
        }
    }

    /// First loaded facility with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.name == name)
    }
}
