use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names expected in the header row
// ---------------------------------------------------------------------------

pub const COL_LOCATION: &str = "Location";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_OPENING_HOURS: &str = "Opening hours";
pub const COL_ACCESSIBLE: &str = "Accessible";
pub const COL_BABY_CHANGE: &str = "Baby change";
pub const COL_CHARGE_AMOUNT: &str = "Charge amount";

const REQUIRED_COLUMNS: [&str; 6] = [
    COL_LOCATION,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_OPENING_HOURS,
    COL_ACCESSIBLE,
    COL_BABY_CHANGE,
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Table has no header row")]
    EmptyTable,

    #[error("Header is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

// ---------------------------------------------------------------------------
// DatasetSchema – column positions resolved from one header row
// ---------------------------------------------------------------------------

/// Positions of the facility columns inside each data row.
///
/// Rebuilt for every table; the optional charge column is `None` when the
/// header does not carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSchema {
    pub location: usize,
    pub latitude: usize,
    pub longitude: usize,
    pub opening_hours: usize,
    pub accessible: usize,
    pub baby_change: usize,
    pub charge_amount: Option<usize>,
}

impl DatasetSchema {
    /// Resolve column positions by exact, case-sensitive name. The first
    /// matching header cell wins.
    pub fn resolve<S: AsRef<str>>(header: &[S]) -> Result<Self, SchemaError> {
        let position = |name: &str| header.iter().position(|h| h.as_ref() == name);

        let positions: [Option<usize>; 6] = REQUIRED_COLUMNS.map(|name| position(name));

        let [
            Some(location),
            Some(latitude),
            Some(longitude),
            Some(opening_hours),
            Some(accessible),
            Some(baby_change),
        ] = positions
        else {
            let missing = REQUIRED_COLUMNS
                .iter()
                .zip(positions)
                .filter_map(|(name, pos)| pos.is_none().then_some(*name))
                .collect();
            return Err(SchemaError::MissingColumns(missing));
        };

        Ok(Self {
            location,
            latitude,
            longitude,
            opening_hours,
            accessible,
            baby_change,
            charge_amount: position(COL_CHARGE_AMOUNT),
        })
    }

    /// Resolve from the first row of a table.
    pub fn from_table<S: AsRef<str>>(table: &[Vec<S>]) -> Result<Self, SchemaError> {
        let header = table.first().ok_or(SchemaError::EmptyTable)?;
        Self::resolve(header)
    }

    /// A data row needs at least this many fields to reach every required column.
    pub fn min_row_len(&self) -> usize {
        let highest = [
            self.location,
            self.latitude,
            self.longitude,
            self.opening_hours,
            self.accessible,
            self.baby_change,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);
        highest + 1
    }
}
