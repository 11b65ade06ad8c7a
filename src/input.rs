use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::hash::Hash;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::{COMPANIES_FILE, EVENTS_FILE, PEOPLE_FILE};
use crate::error::{LoaderError, Result};
use crate::types::{RawCompanyRow, RawEventRow, RawPersonRow};

/// Rows of one input file after exact-duplicate removal
#[derive(Debug, Clone)]
pub struct InputTable<T> {
    pub rows: Vec<T>,
    pub read: usize,
    pub duplicates_dropped: usize,
}

/// The three input files of a load run
#[derive(Debug, Clone)]
pub struct InputSet {
    pub events: InputTable<RawEventRow>,
    pub companies: InputTable<RawCompanyRow>,
    pub people: InputTable<RawPersonRow>,
}

impl InputSet {
    /// Read `events_info.csv`, `company_info.csv` and `people_info.csv` from `data_dir`
    pub fn read_dir(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            events: read_table(&data_dir.join(EVENTS_FILE))?,
            companies: read_table(&data_dir.join(COMPANIES_FILE))?,
            people: read_table(&data_dir.join(PEOPLE_FILE))?,
        })
    }
}

/// Read a CSV file into typed rows and drop exact duplicates.
pub fn read_table<T>(path: &Path) -> Result<InputTable<T>>
where
    T: DeserializeOwned + Eq + Hash + Clone,
{
    let file = std::fs::File::open(path).map_err(|e| {
        LoaderError::Config(format!("Failed to open input file '{}': {}", path.display(), e))
    })?;
    let table = read_rows(file)?;
    info!(
        file = %path.display(),
        read = table.read,
        duplicates = table.duplicates_dropped,
        "Loaded input table"
    );
    Ok(table)
}

/// Deserialize rows from any CSV reader with a header line.
pub fn read_rows<T, R>(reader: R) -> Result<InputTable<T>>
where
    T: DeserializeOwned + Eq + Hash + Clone,
    R: Read,
{
    // Short rows are accepted; their missing trailing columns read as `None`.
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut rows: Vec<T> = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }

    let read = rows.len();
    let rows = dedup_rows(rows);
    let duplicates_dropped = read - rows.len();
    if duplicates_dropped > 0 {
        debug!(duplicates_dropped, "Dropped duplicate rows");
    }

    Ok(InputTable {
        rows,
        read,
        duplicates_dropped,
    })
}

/// Keep the first occurrence of each distinct row, preserving input order.
pub fn dedup_rows<T: Eq + Hash + Clone>(rows: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|row| seen.insert(row.clone())).collect()
}
