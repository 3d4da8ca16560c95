//! Durable event storage: one JSON row per event under the data directory.
//!
//! Rows carry an integer id, a display name, created/updated timestamps and
//! the full record payload. Dates round-trip through ISO-8601 text via the
//! chrono serde impls. Save failures are logged with the offending record's
//! context and propagated; a missed lookup is not an error.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::record::EventRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("event store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One persisted event
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EventRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    payload: EventRecord,
}

/// Listing entry for stored events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Row store over `<data_dir>/events.json`
pub struct EventStore {
    path: PathBuf,
    rows: Vec<EventRow>,
}

impl EventStore {
    /// Open (or create) the store under the given data directory
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join("events.json");

        let rows = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Vec::new()
        };

        Ok(Self { path, rows })
    }

    /// Upsert a record. A record without an id gets the next free one and
    /// has it written back; a record with an id updates its row in place
    /// and refreshes the updated-timestamp.
    pub fn save(&mut self, record: &mut EventRecord) -> Result<i64, StoreError> {
        let now = Utc::now();
        let name = record.display_name().to_string();

        let id = match record.id {
            Some(id) => {
                if let Some(row) = self.rows.iter_mut().find(|r| r.id == id) {
                    row.name = name.clone();
                    row.updated_at = now;
                    row.payload = record.clone();
                } else {
                    // Carried an id the store has never seen; keep it
                    self.rows.push(EventRow {
                        id,
                        name: name.clone(),
                        created_at: now,
                        updated_at: now,
                        payload: record.clone(),
                    });
                }
                id
            }
            None => {
                let id = self.rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
                record.id = Some(id);
                self.rows.push(EventRow {
                    id,
                    name: name.clone(),
                    created_at: now,
                    updated_at: now,
                    payload: record.clone(),
                });
                id
            }
        };

        if let Err(err) = self.flush() {
            tracing::error!(id, event = %name, error = %err, "failed to save event");
            return Err(err);
        }

        tracing::debug!(id, event = %name, "event saved");
        Ok(id)
    }

    /// Fetch a record by id. A miss yields an empty record, never an error.
    pub fn load(&self, id: i64) -> EventRecord {
        match self.rows.iter().find(|r| r.id == id) {
            Some(row) => row.payload.clone(),
            None => {
                tracing::debug!(id, "event not found, returning empty record");
                EventRecord::default()
            }
        }
    }

    /// All stored events, newest first
    pub fn list_all(&self) -> Vec<EventSummary> {
        let mut summaries: Vec<EventSummary> = self
            .rows
            .iter()
            .map(|r| EventSummary {
                id: r.id,
                name: r.name.clone(),
                created_at: r.created_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        summaries
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the rows through a temp file then rename, so a failed write
    /// never truncates the existing store.
    fn flush(&self) -> Result<(), StoreError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(parent)?;
        let contents = serde_json::to_string_pretty(&self.rows)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
