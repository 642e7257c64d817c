//! File-based event store — persistent JSONL storage.
//!
//! One JSON-encoded event per line. Events are loaded into memory on
//! creation and the whole file is rewritten on every mutation: fast reads,
//! last write wins.
//!
//! Storage location: `~/.kabeuchi/calendar/events.jsonl`

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use kabeuchi_core::calendar::{CalendarEvent, EventStore};
use kabeuchi_core::error::StoreError;

/// A JSONL-backed event store.
pub struct FileStore {
    path: PathBuf,
    events: Arc<RwLock<Vec<CalendarEvent>>>,
}

impl FileStore {
    /// Open a store at the given path. A missing file starts empty; the
    /// file is created on the first write.
    pub fn new(path: PathBuf) -> Self {
        let events = Self::load_from_disk(&path);
        debug!(path = %path.display(), count = events.len(), "calendar store loaded");
        Self {
            path,
            events: Arc::new(RwLock::new(events)),
        }
    }

    /// Default path: `~/.kabeuchi/calendar/events.jsonl`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".kabeuchi")
            .join("calendar")
            .join("events.jsonl")
    }

    fn load_from_disk(path: &PathBuf) -> Vec<CalendarEvent> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // File doesn't exist yet — start empty
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<CalendarEvent>(line) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(error = %e, "skipping corrupted calendar entry");
                    None
                }
            })
            .collect()
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let events = self.events.read().await;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("failed to create calendar dir: {e}")))?;
        }

        let mut content = String::new();
        for event in events.iter() {
            let line = serde_json::to_string(event)
                .map_err(|e| StoreError::Serialize(format!("failed to serialize event: {e}")))?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content)
            .map_err(|e| StoreError::Io(format!("failed to write calendar file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl EventStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn list_all(&self) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(self.events.read().await.clone())
    }

    async fn upsert(&self, event: CalendarEvent) -> Result<(), StoreError> {
        event.validate()?;
        {
            let mut events = self.events.write().await;
            match events.iter_mut().find(|e| e.id == event.id) {
                Some(existing) => *existing = event,
                None => events.push(event),
            }
        }
        self.flush().await
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = {
            let mut events = self.events.write().await;
            let len_before = events.len();
            events.retain(|e| e.id != id);
            events.len() < len_before
        };
        if deleted {
            self.flush().await?;
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabeuchi_core::EventStatus;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn event(title: &str) -> CalendarEvent {
        CalendarEvent::new("2026-08-07", title, "候補者A", EventStatus::Draft)
    }

    #[tokio::test]
    async fn upsert_persists_across_reopen() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let store = FileStore::new(path.clone());
        let e = event("一次面談");
        store.upsert(e.clone()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("一次面談"));

        let reopened = FileStore::new(path);
        let all = reopened.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, e.id);
    }

    #[tokio::test]
    async fn replacing_by_id_keeps_one_entry() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let store = FileStore::new(path.clone());
        let mut e = event("面談");
        store.upsert(e.clone()).await.unwrap();
        e.status = EventStatus::Confirmed;
        store.upsert(e).await.unwrap();

        let reopened = FileStore::new(path);
        let all = reopened.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, EventStatus::Confirmed);
    }

    #[tokio::test]
    async fn delete_persists() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_path_buf();
        drop(tmp);

        let store = FileStore::new(path.clone());
        let e = event("消える予定");
        store.upsert(e.clone()).await.unwrap();
        assert!(store.delete(&e.id).await.unwrap());

        let reopened = FileStore::new(path);
        assert!(reopened.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let path = PathBuf::from("/tmp/kabeuchi_test_nonexistent_events.jsonl");
        let _ = std::fs::remove_file(&path);
        let store = FileStore::new(path);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupted_lines_are_skipped() {
        let mut tmp = NamedTempFile::new().unwrap();
        let good = serde_json::to_string(&event("残る予定")).unwrap();
        writeln!(tmp, "{good}").unwrap();
        writeln!(tmp, "this is not json").unwrap();
        let path = tmp.path().to_path_buf();

        let store = FileStore::new(path);
        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "残る予定");
    }
}
