//! Keyed table of prediction records.

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Local table of prediction records, keyed by remote prediction id.
///
/// Stored as a JSON array of objects. Upserts replace the matching row and
/// rewrite the file immediately, so records committed before an interruption
/// stay committed. The column set grows additively: whatever fields a payload
/// carries are stored as-is.
#[derive(Debug)]
pub struct PredictionTable {
    path: PathBuf,
    records: Vec<Map<String, Value>>,
}

impl PredictionTable {
    /// Opens the table at `path`, loading any existing records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text)?
        } else {
            Vec::new()
        };
        Ok(Self { path, records })
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks up a record by prediction id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Map<String, Value>> {
        self.records
            .iter()
            .find(|record| record.get("id").and_then(Value::as_str) == Some(id))
    }

    /// Inserts `record`, replacing any prior row with the same `id`, and
    /// persists the table.
    pub fn upsert(&mut self, record: Map<String, Value>) -> Result<(), StoreError> {
        let id = record.get("id").and_then(Value::as_str).map(str::to_string);
        match self
            .records
            .iter_mut()
            .find(|existing| existing.get("id").and_then(Value::as_str) == id.as_deref())
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        let text = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn upsert_then_get() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("predictions.json");
        let mut table = PredictionTable::open(&path).expect("open");

        table
            .upsert(record(&[("id", json!("p1")), ("status", json!("starting"))]))
            .expect("upsert");

        let row = table.get("p1").expect("row");
        assert_eq!(row["status"], "starting");
        assert!(table.get("p2").is_none());
    }

    #[test]
    fn upsert_replaces_row_and_grows_schema() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("predictions.json");
        let mut table = PredictionTable::open(&path).expect("open");

        table
            .upsert(record(&[("id", json!("p1")), ("status", json!("processing"))]))
            .expect("first upsert");
        table
            .upsert(record(&[
                ("id", json!("p1")),
                ("status", json!("succeeded")),
                ("metrics", json!({"predict_time": 1.5})),
            ]))
            .expect("second upsert");

        assert_eq!(table.len(), 1);
        let row = table.get("p1").expect("row");
        assert_eq!(row["status"], "succeeded");
        assert_eq!(row["metrics"]["predict_time"], 1.5);
    }

    #[test]
    fn each_upsert_is_committed_to_disk() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("predictions.json");

        {
            let mut table = PredictionTable::open(&path).expect("open");
            table
                .upsert(record(&[("id", json!("p1")), ("completed_at", json!(null))]))
                .expect("upsert p1");
            table
                .upsert(record(&[("id", json!("p2")), ("completed_at", json!("t"))]))
                .expect("upsert p2");
            // Dropped without any explicit flush, as an interrupt would.
        }

        let reopened = PredictionTable::open(&path).expect("reopen");
        assert_eq!(reopened.len(), 2);
        assert!(reopened.get("p1").is_some());
        assert_eq!(reopened.get("p2").expect("p2")["completed_at"], "t");
    }
}
