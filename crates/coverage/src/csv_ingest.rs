//! Coverage table ingest.
//!
//! Reads the CSV coverage table into a [`CoverageStore`]. Each row names a
//! region (usually a full or partial postcode) and carries one flag column
//! per service. Rows are reduced to their postcode area and flags are OR-ed
//! into the area's record: a `"1"` switches the service on, anything else
//! leaves the current value alone. Broken rows produce a [`ParseWarning`]
//! and are dropped; ingestion always continues with the next row.

use std::fmt;

use bevy::prelude::*;

use crate::area_code::AreaCode;
use crate::config::{FLAG_TRUE, REGION_COLUMN};
use crate::record::ServiceKind;
use crate::store::CoverageStore;

// =============================================================================
// Diagnostics
// =============================================================================

/// A non-fatal problem found while reading the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line in the source text, when the reader knows it.
    pub line: Option<u64>,
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Summary of one ingest pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Data rows seen, including dropped ones.
    pub rows_read: usize,
    /// Rows whose flags were merged into the store.
    pub rows_ingested: usize,
    /// Rows with no usable region prefix. Not reported as warnings.
    pub rows_skipped: usize,
    pub warnings: Vec<ParseWarning>,
}

impl IngestReport {
    pub fn log(&self) {
        for warning in &self.warnings {
            warn!("Coverage CSV: {warning}");
        }
        info!(
            "Coverage CSV ingested: {} rows read, {} merged, {} without area prefix, {} warnings",
            self.rows_read,
            self.rows_ingested,
            self.rows_skipped,
            self.warnings.len()
        );
    }
}

// =============================================================================
// Ingest
// =============================================================================

/// Merges the raw CSV bytes into `store` and reports what happened.
///
/// Input is taken as bytes so that invalid UTF-8 is reported per row by the
/// reader instead of rejecting the whole file.
pub fn ingest_csv(data: &[u8], store: &mut CoverageStore) -> IngestReport {
    let mut report = IngestReport::default();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            report.warnings.push(ParseWarning {
                line: e.position().map(|p| p.line()),
                message: format!("unreadable header row: {e}"),
            });
            return report;
        }
    };

    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let Some(region_idx) = column(REGION_COLUMN) else {
        report.warnings.push(ParseWarning {
            line: Some(1),
            message: format!("missing '{REGION_COLUMN}' column; no rows ingested"),
        });
        return report;
    };
    let flag_columns: Vec<(ServiceKind, Option<usize>)> = ServiceKind::PRIORITY
        .into_iter()
        .map(|service| (service, column(service.column())))
        .collect();

    for result in reader.records() {
        report.rows_read += 1;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                report.warnings.push(ParseWarning {
                    line: e.position().map(|p| p.line()),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let Some(code) = row.get(region_idx).and_then(AreaCode::from_region) else {
            report.rows_skipped += 1;
            continue;
        };

        let record = store.entry_or_default(&code);
        for &(service, idx) in &flag_columns {
            let is_set = idx.and_then(|i| row.get(i)) == Some(FLAG_TRUE);
            if is_set {
                record.set(service, true);
            }
        }
        report.rows_ingested += 1;
    }

    report
}
