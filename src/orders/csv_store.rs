use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use super::domain::{NewOrder, OrderId, OrderRecord};
use super::repository::{OrderRepository, RepositoryError};

/// Order log backed by an append-only CSV file.
///
/// Existing rows are loaded once at open; each insert appends a single row and flushes it
/// before the in-memory copy is updated. Writes are serialized by the internal mutex.
pub struct CsvOrderRepository {
    path: PathBuf,
    records: Mutex<Vec<OrderRecord>>,
}

impl CsvOrderRepository {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();

        let records = if path.exists() {
            let mut reader = csv::Reader::from_path(&path)?;
            reader
                .deserialize()
                .collect::<Result<Vec<OrderRecord>, csv::Error>>()?
        } else {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            Vec::new()
        };

        info!(path = %path.display(), orders = records.len(), "order log opened");

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &OrderRecord) -> Result<(), RepositoryError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let write_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

impl OrderRepository for CsvOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<OrderRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("order log lock poisoned".to_string()))?;

        let next_id = guard.iter().map(|record| record.id.0).max().unwrap_or(0) + 1;
        let record = order.into_record(OrderId(next_id));

        self.append(&record)?;
        guard.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("order log lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}
