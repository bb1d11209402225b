// 💾 Persistence Adapter - CSV round-trip for owners and measurements
//
// Load: header row skipped, one record per row, a missing file is an empty
// collection (first run starts from nothing).
// Save: the file is overwritten with a fresh header plus every record in
// insertion order. No temp file, no backup.

use crate::entities::{Measurement, Owner, OWNER_HEADER};
use crate::error::StoreError;
use crate::store::RecordStore;
use anyhow::{Context, Result};
use csv::StringRecord;
use log::{info, warn};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// ============================================================================
// LAYOUT
// ============================================================================

/// Column names of a measurement file
///
/// The first three columns are always `id`, the owner key and `value`;
/// the group and session columns follow when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub owner_key: String,
    pub group_column: Option<String>,
    pub session_column: Option<String>,
}

impl Layout {
    pub fn new(owner_key: impl Into<String>) -> Self {
        Layout {
            owner_key: owner_key.into(),
            group_column: None,
            session_column: None,
        }
    }

    pub fn with_group(mut self, column: impl Into<String>) -> Self {
        self.group_column = Some(column.into());
        self
    }

    pub fn with_session(mut self, column: impl Into<String>) -> Self {
        self.session_column = Some(column.into());
        self
    }

    /// `id,player_id,value,metric,session_id`
    pub fn squad() -> Self {
        Layout::new("player_id")
            .with_group("metric")
            .with_session("session_id")
    }

    /// `id,athlete_id,value`
    pub fn athletes() -> Self {
        Layout::new("athlete_id")
    }

    /// `id,product_id,value`
    pub fn stock() -> Self {
        Layout::new("product_id")
    }

    pub fn measurement_header(&self) -> Vec<&str> {
        let mut header = vec!["id", self.owner_key.as_str(), "value"];
        header.extend(self.group_column.as_deref());
        header.extend(self.session_column.as_deref());
        header
    }
}

// ============================================================================
// LOW-LEVEL READ / WRITE
// ============================================================================

/// Open `path` for reading; `None` when the file does not exist
fn open_existing(path: &Path) -> Result<Option<csv::Reader<File>>> {
    match File::open(path) {
        Ok(file) => Ok(Some(
            csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_reader(file),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("{} not found, starting empty", path.display());
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to open CSV file: {}", path.display())),
    }
}

/// Read every data row and convert it with `parse`
fn read_rows<T, F>(path: &Path, mut parse: F) -> Result<Vec<T>>
where
    F: FnMut(&StringRecord) -> std::result::Result<T, crate::error::RecordError>,
{
    let Some(mut rdr) = open_existing(path)? else {
        return Ok(Vec::new());
    };

    let mut rows = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        // header is line 1
        let line = index + 2;
        let record = result
            .with_context(|| format!("Failed to read {} at line {}", path.display(), line))?;
        let row = parse(&record)
            .with_context(|| format!("Invalid row in {} at line {}", path.display(), line))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Overwrite `path` with `header` followed by `rows`
fn write_rows<I>(path: &Path, header: &[&str], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = StringRecord>,
{
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    wtr.write_record(header)
        .with_context(|| format!("Failed to write header to {}", path.display()))?;

    let mut written = 0;
    for row in rows {
        wtr.write_record(&row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
        written += 1;
    }

    wtr.flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(written)
}

// ============================================================================
// PUBLIC API
// ============================================================================

pub fn load_owners(path: &Path) -> Result<Vec<Owner>> {
    let owners = read_rows(path, Owner::from_record)?;
    info!("loaded {} owners from {}", owners.len(), path.display());
    Ok(owners)
}

pub fn load_measurements(path: &Path, layout: &Layout) -> Result<Vec<Measurement>> {
    let measurements = read_rows(path, |record| Measurement::from_record(layout, record))?;
    info!("loaded {} measurements from {}", measurements.len(), path.display());
    Ok(measurements)
}

pub fn save_owners(path: &Path, owners: &[Owner]) -> Result<()> {
    let written = write_rows(path, &OWNER_HEADER, owners.iter().map(Owner::to_record))?;
    info!("saved {} owners to {}", written, path.display());
    Ok(())
}

pub fn save_measurements(path: &Path, layout: &Layout, measurements: &[Measurement]) -> Result<()> {
    let written = write_rows(
        path,
        &layout.measurement_header(),
        measurements.iter().map(|m| m.to_record(layout)),
    )?;
    info!("saved {} measurements to {}", written, path.display());
    Ok(())
}

// ============================================================================
// LEDGER (both files together)
// ============================================================================

/// The pair of files backing one record store
#[derive(Debug, Clone)]
pub struct Ledger {
    pub owners_path: PathBuf,
    pub measurements_path: PathBuf,
    pub layout: Layout,
}

impl Ledger {
    pub fn new(owners_path: impl Into<PathBuf>, measurements_path: impl Into<PathBuf>, layout: Layout) -> Self {
        Ledger {
            owners_path: owners_path.into(),
            measurements_path: measurements_path.into(),
            layout,
        }
    }

    /// Load both collections into a fresh store
    pub fn load(&self) -> Result<RecordStore> {
        let owners = load_owners(&self.owners_path)?;
        let measurements = load_measurements(&self.measurements_path, &self.layout)?;
        let store = RecordStore::from_parts(owners, measurements).map_err(|err| {
            let (path, index) = match err {
                StoreError::DuplicateMeasurementId { index, .. } => (&self.measurements_path, index),
                StoreError::DuplicateOwnerId { index, .. }
                | StoreError::DuplicateOwnerName { index, .. } => (&self.owners_path, index),
                _ => return anyhow::Error::new(err),
            };
            anyhow::Error::new(err).context(format!(
                "Repeated key in {} at line {}",
                path.display(),
                index + 2
            ))
        })?;

        let dangling = store.dangling_measurements();
        if !dangling.is_empty() {
            warn!(
                "{} measurements in {} reference unknown owners",
                dangling.len(),
                self.measurements_path.display()
            );
        }

        Ok(store)
    }

    /// Overwrite both files with the store contents
    pub fn save(&self, store: &RecordStore) -> Result<()> {
        save_owners(&self.owners_path, store.owners())?;
        save_measurements(&self.measurements_path, &self.layout, store.measurements())?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Tags;
    use std::fs;

    fn sample_store(n: usize) -> RecordStore {
        let mut store = RecordStore::new();
        for i in 0..n {
            let owner = store.add_owner(&format!("Player {}", i + 1)).unwrap();
            store
                .add_measurement(
                    owner.id,
                    1.5 * i as f64 + 0.25,
                    Tags::group("goals").session(i as u32 + 1),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        let owners = load_owners(&dir.path().join("nope.csv")).unwrap();
        let measurements = load_measurements(&dir.path().join("nope.csv"), &Layout::stock()).unwrap();

        assert!(owners.is_empty());
        assert!(measurements.is_empty());
    }

    #[test]
    fn test_round_trip_empty_and_five() {
        for n in [0, 5] {
            let dir = tempfile::tempdir().unwrap();
            let ledger = Ledger::new(
                dir.path().join("players.csv"),
                dir.path().join("measures.csv"),
                Layout::squad(),
            );
            let store = sample_store(n);

            ledger.save(&store).unwrap();
            let reloaded = ledger.load().unwrap();

            assert_eq!(reloaded, store);
            assert_eq!(reloaded.owner_count(), n);
        }
    }

    #[test]
    fn test_saved_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(
            dir.path().join("products.csv"),
            dir.path().join("prices.csv"),
            Layout::stock(),
        );
        let mut store = RecordStore::new();
        store.add_owner("apple").unwrap();
        store.add_measurement(1, 2.5, Tags::none()).unwrap();
        store.add_measurement(1, 3.0, Tags::none()).unwrap();

        ledger.save(&store).unwrap();

        let owners = fs::read_to_string(&ledger.owners_path).unwrap();
        let prices = fs::read_to_string(&ledger.measurements_path).unwrap();
        assert_eq!(owners, "id,name\n1,apple\n");
        assert_eq!(prices, "id,product_id,value\n1,1,2.5\n2,1,3\n");
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("athletes.csv");
        fs::write(&path, "id,name\n1,Old\n2,Older\n3,Oldest\n").unwrap();

        save_owners(&path, &[Owner::new(1, "New").unwrap()]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "id,name\n1,New\n");
    }

    #[test]
    fn test_names_with_delimiter_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("athletes.csv");
        let owners = vec![Owner::new(1, "Silva, Ana").unwrap()];

        save_owners(&path, &owners).unwrap();

        assert_eq!(load_owners(&path).unwrap(), owners);
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluations.csv");
        fs::write(&path, "id,athlete_id,value\n1,1,9.5\n2,x,3\n").unwrap();

        let err = load_measurements(&path, &Layout::athletes()).unwrap_err();

        assert!(format!("{:#}", err).contains("line 3"));
    }

    #[test]
    fn test_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        fs::write(&path, "id,name\n").unwrap();

        assert!(load_owners(&path).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_keys_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(
            dir.path().join("products.csv"),
            dir.path().join("prices.csv"),
            Layout::stock(),
        );

        fs::write(dir.path().join("products.csv"), "id,name\n1,apple\n1,pear\n2,apple\n").unwrap();
        let err = format!("{:#}", ledger.load().unwrap_err());
        assert!(err.contains("products.csv at line 3"));
        assert!(err.contains("owner id 1 is used more than once"));

        fs::write(dir.path().join("products.csv"), "id,name\n1,apple\n2,pear\n3,apple\n").unwrap();
        let err = format!("{:#}", ledger.load().unwrap_err());
        assert!(err.contains("products.csv at line 4"));

        fs::write(dir.path().join("products.csv"), "id,name\n1,apple\n").unwrap();
        fs::write(dir.path().join("prices.csv"), "id,product_id,value\n7,1,2\n7,1,3\n").unwrap();
        let err = format!("{:#}", ledger.load().unwrap_err());
        assert!(err.contains("prices.csv at line 3"));
    }
}
