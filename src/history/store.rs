//! CSV-backed, append-only history of cleanup sessions

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::confirm::{ClearOutcome, ClearToken};
use super::error::{HistoryError, HistoryResult};
use super::record::HistoryRecord;

/// Durable list of [`HistoryRecord`]s in insertion order.
///
/// Appends rewrite the whole file through a temporary file and an atomic
/// rename, holding the writer lock from read to rename so no concurrent
/// append in this process can lose a row.
pub struct HistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// All records in insertion order; empty when no store exists yet.
    pub fn load(&self) -> HistoryResult<Vec<HistoryRecord>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let records = reader
            .deserialize::<HistoryRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| HistoryError::corrupt(&self.path, e))?;

        debug!("Loaded {} memory history records", records.len());
        Ok(records)
    }

    /// Append one record, keeping every record already stored.
    ///
    /// Returns the number of records after the append. An unreadable
    /// existing file is reported, never overwritten.
    pub fn append(&self, record: HistoryRecord) -> HistoryResult<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| HistoryError::Lock(e.to_string()))?;

        let mut records = self.load()?;
        let timestamp = record.timestamp_text();
        records.push(record);
        self.write_all(&records)?;

        info!("Saved memory record for {}", timestamp);
        Ok(records.len())
    }

    /// Remove every record. Returns `false` when there was nothing to remove.
    pub fn clear(&self) -> HistoryResult<bool> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| HistoryError::Lock(e.to_string()))?;
        self.remove_file()
    }

    /// First phase of deletion: describe what would be removed.
    pub fn request_clear(&self) -> ClearToken {
        let count = match self.load() {
            Ok(records) => Some(records.len()),
            Err(e) => {
                warn!("Requesting deletion of unreadable history: {}", e);
                None
            }
        };
        ClearToken::issue(&self.path, count)
    }

    /// Second phase of deletion: consume the token and clear the store.
    ///
    /// Refused when the record count no longer matches the one the token
    /// was issued for.
    pub fn confirm_clear(&self, token: ClearToken) -> HistoryResult<ClearOutcome> {
        if token.store_path() != self.path {
            return Err(HistoryError::TokenMismatch {
                issued_for: token.store_path().to_path_buf(),
                store: self.path.clone(),
            });
        }

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| HistoryError::Lock(e.to_string()))?;

        // Rows appended after the request were never shown to the caller.
        let current = self.load().ok().map(|records| records.len());
        if current != token.record_count() {
            warn!(
                "History changed since deletion was requested ({:?} -> {:?} records)",
                token.record_count(),
                current
            );
            return Err(HistoryError::StaleToken {
                requested: token.record_count(),
                current,
            });
        }

        debug!("Clear confirmed (requested at {})", token.issued_at());
        if self.remove_file()? {
            Ok(ClearOutcome::Cleared)
        } else {
            Ok(ClearOutcome::NothingToClear)
        }
    }

    fn remove_file(&self) -> HistoryResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Memory history deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No memory history to delete");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, records: &[HistoryRecord]) -> HistoryResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::Writer::from_writer(temp.as_file_mut());
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| HistoryError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::GbAmount;
    use chrono::{Local, NaiveDate};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn record(minute: u32, before: &str, after: &str, freed: &str) -> HistoryRecord {
        HistoryRecord::new(
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, minute, 0)
                .unwrap(),
            before.parse().unwrap(),
            after.parse().unwrap(),
            freed.parse().unwrap(),
        )
    }

    fn store(dir: &TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("data").join("memory_usage.csv"))
    }

    #[test]
    fn test_load_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        for minute in 0..5 {
            let count = store.append(record(minute, "4.00", "6.50", "2.50")).unwrap();
            assert_eq!(count, minute as usize + 1);
        }

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 5);
        let minutes: Vec<String> = loaded.iter().map(|r| r.timestamp_text()).collect();
        assert_eq!(minutes[0], "2024-05-01 12:00:00");
        assert_eq!(minutes[4], "2024-05-01 12:04:00");
    }

    #[test]
    fn test_file_layout_has_single_header() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.append(record(1, "4.00", "6.50", "2.50")).unwrap();
        store.append(record(2, "1234.565", "1234.57", "0.005")).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Timestamp,Free Memory Before,Free Memory After,Freed Memory",
                "2024-05-01 12:01:00,4.00,6.50,2.50",
                "2024-05-01 12:02:00,1234.57,1234.57,0.01",
            ]
        );
    }

    #[test]
    fn test_amounts_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let freed = GbAmount::from_gb(1234.565);
        store
            .append(HistoryRecord::new(
                record(0, "0", "0", "0").timestamp,
                GbAmount::ZERO,
                GbAmount::ZERO,
                freed,
            ))
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].freed, freed);
        assert_eq!(loaded[0].freed.to_string(), "1234.57");
    }

    #[test]
    fn test_corrupt_store_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "Timestamp,Free Memory Before,Free Memory After,Freed Memory\nyesterday,a,b,c\n").unwrap();

        assert!(matches!(store.load(), Err(HistoryError::Corrupt { .. })));
        assert!(store.append(record(0, "1.00", "2.00", "1.00")).is_err());
        assert!(fs::read_to_string(store.path()).unwrap().contains("yesterday"));
    }

    #[test]
    fn test_clear_on_missing_store_is_noop() {
        let dir = TempDir::new().unwrap();
        assert!(!store(&dir).clear().unwrap());
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.append(record(0, "1.00", "2.00", "1.00")).unwrap();

        assert!(store.clear().unwrap());
        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_two_phase_clear() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.append(record(0, "1.00", "2.00", "1.00")).unwrap();
        store.append(record(1, "1.00", "2.00", "1.00")).unwrap();

        let token = store.request_clear();
        assert_eq!(token.record_count(), Some(2));
        assert!(store.exists());

        assert_eq!(store.confirm_clear(token).unwrap(), ClearOutcome::Cleared);
        assert!(!store.exists());

        let token = store.request_clear();
        assert_eq!(token.record_count(), Some(0));
        assert_eq!(
            store.confirm_clear(token).unwrap(),
            ClearOutcome::NothingToClear
        );
    }

    #[test]
    fn test_clear_refused_after_new_rows() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.append(record(0, "1.00", "2.00", "1.00")).unwrap();

        let token = store.request_clear();
        store.append(record(1, "3.00", "4.00", "1.00")).unwrap();

        assert!(matches!(
            store.confirm_clear(token),
            Err(HistoryError::StaleToken {
                requested: Some(1),
                current: Some(2)
            })
        ));
        assert_eq!(store.load().unwrap().len(), 2);

        let token = store.request_clear();
        assert_eq!(store.confirm_clear(token).unwrap(), ClearOutcome::Cleared);
    }

    #[test]
    fn test_record_stamped_now_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let record = HistoryRecord::new(
            Local::now().naive_local(),
            "4.00".parse().unwrap(),
            "6.50".parse().unwrap(),
            "2.50".parse().unwrap(),
        );

        store.append(record.clone()).unwrap();
        assert_eq!(store.load().unwrap(), vec![record]);
    }

    #[test]
    fn test_clear_token_bound_to_store() {
        let dir = TempDir::new().unwrap();
        let first = HistoryStore::new(dir.path().join("a.csv"));
        let second = HistoryStore::new(dir.path().join("b.csv"));
        second.append(record(0, "1.00", "2.00", "1.00")).unwrap();

        let token = first.request_clear();
        assert!(matches!(
            second.confirm_clear(token),
            Err(HistoryError::TokenMismatch { .. })
        ));
        assert!(second.exists());
    }

    #[test]
    fn test_concurrent_appends_do_not_lose_records() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.append(record(i, "1.00", "2.00", "1.00")).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.load().unwrap().len(), 8);
    }
}
