//! Dataset Loader - CSV parsing and validation
//!
//! Every cell must be present. Symptom cells must be 0 or 1 (`1.0` style
//! values written by spreadsheet exports are accepted).

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::{Dataset, DatasetRecord};
use crate::constants::{LABEL_COLUMN, SPECIES_COLUMN};
use crate::error::{DiagnosisError, Result};

impl Dataset {
    /// Load and validate a dataset file, recording its SHA-256 digest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading dataset from: {}", path.display());

        let bytes = std::fs::read(path)?;
        let digest = hex::encode(Sha256::digest(&bytes));
        let dataset = parse(bytes.as_slice(), Some(digest))?;

        log::info!(
            "Dataset loaded: {} rows, {} symptom columns",
            dataset.len(),
            dataset.symptom_columns().len()
        );
        Ok(dataset)
    }

    /// Parse a dataset from any CSV reader (no digest).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        parse(reader, None)
    }
}

fn parse<R: Read>(reader: R, digest: Option<String>) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let mut seen = HashSet::new();
    if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(DiagnosisError::InvalidLayout(format!("duplicate column '{}'", dup)));
    }

    let species_pos = headers
        .iter()
        .position(|h| h == SPECIES_COLUMN)
        .ok_or_else(|| DiagnosisError::MissingColumn(SPECIES_COLUMN.to_string()))?;
    let label_pos = headers
        .iter()
        .position(|h| h == LABEL_COLUMN)
        .ok_or_else(|| DiagnosisError::MissingColumn(LABEL_COLUMN.to_string()))?;

    // Non-label columns keep header order
    let feature_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_pos)
        .map(|(_, h)| h.clone())
        .collect();

    if feature_columns.len() < 2 {
        return Err(DiagnosisError::InvalidLayout("no symptom columns".to_string()));
    }

    let mut records = Vec::new();

    for (idx, result) in csv_reader.records().enumerate() {
        let row = idx + 1;
        let record = result?;

        let pet_type = cell(&record, &headers, species_pos, row)?.to_string();
        let disease = cell(&record, &headers, label_pos, row)?.to_string();

        let mut symptoms = Vec::with_capacity(feature_columns.len() - 1);
        for pos in 0..headers.len() {
            if pos == species_pos || pos == label_pos {
                continue;
            }
            let raw = cell(&record, &headers, pos, row)?;
            let flag = parse_flag(raw).ok_or_else(|| DiagnosisError::InvalidRow {
                row,
                reason: format!("column '{}' must be 0 or 1, got '{}'", headers[pos], raw),
            })?;
            symptoms.push(flag);
        }

        records.push(DatasetRecord {
            pet_type,
            symptoms,
            disease,
        });
    }

    if records.is_empty() {
        return Err(DiagnosisError::EmptyDataset);
    }

    Ok(Dataset::new(feature_columns, records, digest))
}

fn cell<'a>(
    record: &'a csv::StringRecord,
    headers: &[String],
    pos: usize,
    row: usize,
) -> Result<&'a str> {
    match record.get(pos) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DiagnosisError::InvalidRow {
            row,
            reason: format!("empty value in column '{}'", headers[pos]),
        }),
    }
}

fn parse_flag(raw: &str) -> Option<u8> {
    match raw.parse::<f64>().ok()? {
        v if v == 0.0 => Some(0),
        v if v == 1.0 => Some(1),
        _ => None,
    }
}
