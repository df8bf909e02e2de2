//! Coverage table export.
//!
//! Serializes the [`CoverageStore`] as `Area,Solar Panels,Heat Pumps,Ev Chargers`
//! with one row per area that has at least one service. Areas whose record is
//! all-false are left out even though ingest creates them: an exported table
//! only lists areas with a positive signal.

use coverage::config::{EXPORT_AREA_COLUMN, FLAG_FALSE, FLAG_TRUE};
use coverage::{CoverageStore, ServiceKind};

use crate::export_error::ExportError;

/// The exported header row.
pub fn export_header() -> [&'static str; 4] {
    [
        EXPORT_AREA_COLUMN,
        ServiceKind::Solar.column(),
        ServiceKind::HeatPump.column(),
        ServiceKind::Ev.column(),
    ]
}

fn flag(value: bool) -> &'static str {
    if value {
        FLAG_TRUE
    } else {
        FLAG_FALSE
    }
}

/// Renders the export CSV. Rows follow area-code order.
pub fn export_csv(store: &CoverageStore) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(export_header())?;

    for (code, record) in store.iter().filter(|(_, r)| r.any()) {
        writer.write_record([
            code.as_str(),
            flag(record.has_solar),
            flag(record.has_heat_pump),
            flag(record.has_ev),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))
}

/// Number of rows [`export_csv`] will write, header excluded.
pub fn exported_row_count(store: &CoverageStore) -> usize {
    store.iter().filter(|(_, r)| r.any()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverage::csv_ingest::ingest_csv;
    use coverage::AreaCode;

    fn store_with(entries: &[(&str, bool, bool, bool)]) -> CoverageStore {
        let mut store = CoverageStore::new();
        for &(name, solar, heat_pump, ev) in entries {
            let record = store.entry_or_default(&AreaCode::parse(name).unwrap());
            record.has_solar = solar;
            record.has_heat_pump = heat_pump;
            record.has_ev = ev;
        }
        store
    }

    #[test]
    fn test_empty_store_exports_header_only() {
        let text = export_csv(&CoverageStore::new()).unwrap();
        assert_eq!(text, "Area,Solar Panels,Heat Pumps,Ev Chargers\n");
    }

    #[test]
    fn test_ev_only_row() {
        let text = export_csv(&store_with(&[("SW", false, false, true)])).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[1], "SW,0,0,1");
    }

    #[test]
    fn test_all_false_records_are_omitted() {
        let store = store_with(&[
            ("AB", true, false, false),
            ("EH", false, false, false),
            ("ZE", false, true, true),
        ]);
        let text = export_csv(&store).unwrap();
        assert_eq!(
            text,
            "Area,Solar Panels,Heat Pumps,Ev Chargers\nAB,1,0,0\nZE,0,1,1\n"
        );
        assert_eq!(exported_row_count(&store), 2);
    }

    #[test]
    fn test_rows_are_sorted_by_area() {
        let store = store_with(&[
            ("YO", true, false, false),
            ("B", true, false, false),
            ("AL", true, false, false),
        ]);
        let text = export_csv(&store).unwrap();
        let areas: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        assert_eq!(areas, vec!["AL", "B", "YO"]);
    }

    #[test]
    fn test_import_export_suppresses_no_signal_rows() {
        let mut store = CoverageStore::new();
        ingest_csv(
            b"Region,Solar Panels,Heat Pumps,Ev Chargers\nAB1,1,0,0\nEH1,0,0,0\n",
            &mut store,
        );
        assert_eq!(store.len(), 2);
        let text = export_csv(&store).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("EH"));
    }
}
