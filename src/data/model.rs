use std::fmt;

use geo::Point;
use serde::Serialize;

// ---------------------------------------------------------------------------
// RawTable – undecoded rows straight from the data source
// ---------------------------------------------------------------------------

/// A tabular dataset as delivered by the source: row 0 is the header, every
/// cell is still text.
pub type RawTable = Vec<Vec<String>>;

// ---------------------------------------------------------------------------
// Coordinate – a WGS84 position in degrees
// ---------------------------------------------------------------------------

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `geo` points are (x = longitude, y = latitude).
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Facility – one public toilet
// ---------------------------------------------------------------------------

/// A single point of interest loaded from the dataset.
///
/// Only built when both coordinates parsed as finite numbers; every text
/// field is copied verbatim from its column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facility {
    /// Display name, not necessarily unique.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-form, may be empty.
    pub opening_hours: String,
    pub accessibility_info: String,
    /// Usually "Yes"/"No" in any casing; not enforced.
    pub baby_change_available: String,
    /// Empty when the source has no charge column.
    pub charge_amount: String,
}

impl Facility {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Multi-line summary shown when a facility is selected.
    pub fn detail_text(&self) -> String {
        format!(
            "Opening Hours: {}\nDisabled Access: {}\nBaby Change: {}\nCharge Amount: {}",
            self.opening_hours,
            self.accessibility_info,
            self.baby_change_available,
            self.charge_amount
        )
    }
}

// ---------------------------------------------------------------------------
// DirectionsRequest – hand-off to an external navigation app
// ---------------------------------------------------------------------------

/// Label given to every destination handed to a navigation app.
pub const DIRECTIONS_LABEL: &str = "Public Toilet";

/// Everything a presentation layer needs to launch walking directions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    pub destination: Coordinate,
    pub label: String,
}

impl DirectionsRequest {
    /// Walking directions to `facility`, labelled generically.
    pub fn walking_to(facility: &Facility) -> Self {
        Self {
            destination: facility.coordinate(),
            label: DIRECTIONS_LABEL.to_string(),
        }
    }
}
