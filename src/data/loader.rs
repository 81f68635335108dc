use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Facility, RawTable};
use super::schema::{DatasetSchema, SchemaError};
use crate::fetch::decode_table;

// ---------------------------------------------------------------------------
// Table → facilities
// ---------------------------------------------------------------------------

/// Result of one parse pass over a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Facilities in input row order.
    pub facilities: Vec<Facility>,
    /// Data rows dropped for being short, blank, or carrying bad coordinates.
    pub skipped_rows: usize,
}

/// Parse a table whose first row is the header into facilities.
///
/// Any schema problem is swallowed and yields an empty sequence; use
/// [`load_table`] to tell the two apart.
pub fn load<S: AsRef<str>>(table: &[Vec<S>]) -> Vec<Facility> {
    match load_table(table) {
        Ok(report) => report.facilities,
        Err(err) => {
            log::warn!("Discarding dataset: {err}");
            Vec::new()
        }
    }
}

/// Parse a table, reporting schema failures and the number of skipped rows.
pub fn load_table<S: AsRef<str>>(table: &[Vec<S>]) -> Result<LoadReport, SchemaError> {
    let schema = DatasetSchema::from_table(table)?;
    let min_len = schema.min_row_len();

    let mut report = LoadReport::default();
    for (row_no, row) in table.iter().enumerate().skip(1) {
        match parse_row(&schema, min_len, row) {
            Some(facility) => report.facilities.push(facility),
            None => {
                log::debug!("Skipping row {row_no}");
                report.skipped_rows += 1;
            }
        }
    }

    if report.skipped_rows > 0 {
        log::info!(
            "Loaded {} facilities, skipped {} row(s)",
            report.facilities.len(),
            report.skipped_rows
        );
    }
    Ok(report)
}

fn parse_row<S: AsRef<str>>(schema: &DatasetSchema, min_len: usize, row: &[S]) -> Option<Facility> {
    if row.len() < min_len || row.iter().all(|f| f.as_ref().trim().is_empty()) {
        return None;
    }

    let latitude = parse_coordinate(row[schema.latitude].as_ref())?;
    let longitude = parse_coordinate(row[schema.longitude].as_ref())?;
    let text = |idx: usize| row[idx].as_ref().to_string();

    Some(Facility {
        name: text(schema.location),
        latitude,
        longitude,
        opening_hours: text(schema.opening_hours),
        accessibility_info: text(schema.accessible),
        baby_change_available: text(schema.baby_change),
        charge_amount: schema
            .charge_amount
            .and_then(|idx| row.get(idx))
            .map(|s| s.as_ref().to_string())
            .unwrap_or_default(),
    })
}

fn parse_coordinate(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Local files → RawTable
// ---------------------------------------------------------------------------

/// Read a table from disk. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – array of arrays of strings, header first
/// * `.csv`  – header row followed by data rows
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => {
            let bytes = std::fs::read(path).context("reading JSON file")?;
            decode_table(&bytes).with_context(|| format!("decoding {}", path.display()))
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv_table(file)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Read CSV into a table, keeping the header as row 0. Ragged rows are kept
/// as-is so the loader can apply its own row-length rule.
pub fn read_csv_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = RawTable::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        table.push(record.iter().map(|f| f.to_string()).collect());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    const HEADER: &[&str] = &[
        "Location",
        "Latitude",
        "Longitude",
        "Opening hours",
        "Accessible",
        "Baby change",
        "Charge amount",
    ];

    #[test]
    fn copies_fields_verbatim() {
        let t = table(&[
            HEADER,
            &["Bull Green", "53.7205", "-1.8640", "08:00-18:00", "Yes", "No", "20p"],
            &["Hebden Bridge", "53.7418", "-2.0140", "", "No", "yes", ""],
        ]);
        let facilities = load(&t);
        assert_eq!(facilities.len(), 2);

        let first = &facilities[0];
        assert_eq!(first.name, "Bull Green");
        assert_eq!(first.latitude, 53.7205);
        assert_eq!(first.longitude, -1.8640);
        assert_eq!(first.opening_hours, "08:00-18:00");
        assert_eq!(first.accessibility_info, "Yes");
        assert_eq!(first.baby_change_available, "No");
        assert_eq!(first.charge_amount, "20p");

        assert_eq!(facilities[1].name, "Hebden Bridge");
        assert_eq!(facilities[1].baby_change_available, "yes");
    }

    #[test]
    fn missing_any_required_column_yields_nothing() {
        let row = ["Bull Green", "53.7205", "-1.8640", "24h", "Yes", "Yes", "Free"];
        for dropped in 0..6 {
            let header: Vec<&str> = HEADER
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != dropped)
                .map(|(_, h)| *h)
                .collect();
            let data: Vec<&str> = row
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != dropped)
                .map(|(_, c)| *c)
                .collect();
            let t = table(&[&header, &data]);

            assert!(load(&t).is_empty(), "without {}", HEADER[dropped]);
            assert_eq!(
                load_table(&t),
                Err(SchemaError::MissingColumns(vec![HEADER[dropped]]))
            );
        }
    }

    #[test]
    fn bad_coordinates_skip_only_that_row() {
        let t = table(&[
            HEADER,
            &["A", "53.70", "-1.86", "", "", "", ""],
            &["B", "north", "-1.86", "", "", "", ""],
            &["C", "53.71", "", "", "", "", ""],
            &["D", "NaN", "-1.86", "", "", "", ""],
            &["E", "53.72", "-1.87", "", "", "", ""],
        ]);
        let report = load_table(&t).unwrap();
        let names: Vec<&str> = report.facilities.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["A", "E"]);
        assert_eq!(report.skipped_rows, 3);
    }

    #[test]
    fn blank_and_short_rows_are_skipped() {
        let t = table(&[
            HEADER,
            &["", "", "", "", "", "", ""],
            &["  ", "", " ", "", "", "", ""],
            &["Short", "53.70", "-1.86"],
            &["Kept", "53.70", "-1.86", "", "", ""],
        ]);
        let report = load_table(&t).unwrap();
        assert_eq!(report.facilities.len(), 1);
        assert_eq!(report.facilities[0].name, "Kept");
        assert_eq!(report.facilities[0].charge_amount, "");
        assert_eq!(report.skipped_rows, 3);
    }

    #[test]
    fn absent_charge_column_gives_empty_charge() {
        let t = table(&[
            &HEADER[..6],
            &["A", "53.70", "-1.86", "24h", "Yes", "Yes"],
        ]);
        let facilities = load(&t);
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].charge_amount, "");
    }

    #[test]
    fn header_only_and_empty_tables() {
        assert!(load_table(&table(&[HEADER])).unwrap().facilities.is_empty());
        let empty: Vec<Vec<String>> = Vec::new();
        assert_eq!(load_table(&empty), Err(SchemaError::EmptyTable));
        assert!(load(&empty).is_empty());
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("loo-finder-{}-{name}", std::process::id()))
    }

    #[test]
    fn json_file_round_trips_through_loader() {
        let path = temp_path("toilets.json");
        std::fs::write(
            &path,
            r#"[["Location","Latitude","Longitude","Opening hours","Accessible","Baby change"],
                ["Bull Green","53.7205","-1.8640","24h","Yes","Yes"],
                ["Broken","n/a","-1.8640","","",""]]"#,
        )
        .unwrap();

        let t = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(t.len(), 3);
        let facilities = load(&t);
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].name, "Bull Green");
        assert_eq!(facilities[0].charge_amount, "");
    }

    #[test]
    fn csv_file_round_trips_through_loader() {
        let path = temp_path("toilets.csv");
        std::fs::write(
            &path,
            "Location,Latitude,Longitude,Opening hours,Accessible,Baby change,Charge amount\n\
             \"Bull Green, Halifax\",53.7205,-1.8640,08:00-18:00,Yes,No,20p\n\
             ,,,,,,\n",
        )
        .unwrap();

        let t = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let report = load_table(&t).unwrap();
        assert_eq!(report.facilities.len(), 1);
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.facilities[0].name, "Bull Green, Halifax");
        assert_eq!(report.facilities[0].charge_amount, "20p");
    }

    #[test]
    fn json_file_with_non_string_cell_is_a_shape_error() {
        let path = temp_path("numbers.json");
        std::fs::write(&path, r#"[["Location","Latitude"],["A",53.7]]"#).unwrap();

        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Shape(_))
        ));
    }

    #[test]
    fn csv_table_keeps_header_and_ragged_rows() {
        let data = "Location,Latitude,Longitude\n\"Bull Green, Halifax\",53.72,-1.86\nShort\n";
        let t = read_csv_table(data.as_bytes()).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t[0][0], "Location");
        assert_eq!(t[1][0], "Bull Green, Halifax");
        assert_eq!(t[2], vec!["Short".to_string()]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("toilets.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
