use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::area_code::AreaCode;
use crate::record::CoverageRecord;

/// Per-area service flags for the whole session.
///
/// Entries are created lazily, either by CSV ingest or by opening the edit
/// panel on an area the table never mentioned, and are never removed. Lookups
/// of unknown areas are not errors: they read as an all-false record.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageStore {
    records: BTreeMap<AreaCode, CoverageRecord>,
}

impl CoverageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored record, if any. Absence is distinct from an all-false record.
    pub fn get(&self, code: &AreaCode) -> Option<&CoverageRecord> {
        self.records.get(code)
    }

    /// The stored record, or the all-false default when the area is unknown.
    pub fn get_or_default(&self, code: &AreaCode) -> CoverageRecord {
        self.records.get(code).copied().unwrap_or_default()
    }

    /// The stored record, inserting an all-false one first if needed.
    pub fn entry_or_default(&mut self, code: &AreaCode) -> &mut CoverageRecord {
        self.records.entry(code.clone()).or_default()
    }

    pub fn contains(&self, code: &AreaCode) -> bool {
        self.records.contains_key(code)
    }

    /// Iterates in area-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&AreaCode, &CoverageRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ServiceKind;

    fn code(s: &str) -> AreaCode {
        AreaCode::parse(s).unwrap()
    }

    #[test]
    fn test_lookup_miss_reads_as_default() {
        let store = CoverageStore::new();
        assert!(store.get(&code("ZE")).is_none());
        assert_eq!(store.get_or_default(&code("ZE")), CoverageRecord::default());
        // Reading never inserts.
        assert!(store.is_empty());
    }

    #[test]
    fn test_entry_or_default_creates_once() {
        let mut store = CoverageStore::new();
        store.entry_or_default(&code("AB")).set(ServiceKind::Ev, true);
        let again = store.entry_or_default(&code("AB"));
        assert!(again.has_ev);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut store = CoverageStore::new();
        for name in ["YO", "AB", "M"] {
            store.entry_or_default(&code(name));
        }
        let names: Vec<&str> = store.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names, vec!["AB", "M", "YO"]);
    }
}
