//! In-memory event store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use kabeuchi_core::calendar::{CalendarEvent, EventStore};
use kabeuchi_core::error::StoreError;

/// An event store backed by a plain Vec.
pub struct InMemoryStore {
    events: Arc<RwLock<Vec<CalendarEvent>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn list_all(&self) -> Result<Vec<CalendarEvent>, StoreError> {
        Ok(self.events.read().await.clone())
    }

    async fn upsert(&self, event: CalendarEvent) -> Result<(), StoreError> {
        event.validate()?;
        let mut events = self.events.write().await;
        match events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => events.push(event),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut events = self.events.write().await;
        let len_before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() < len_before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kabeuchi_core::EventStatus;

    fn event(title: &str) -> CalendarEvent {
        CalendarEvent::new("2026-08-07", title, "", EventStatus::Draft)
    }

    #[tokio::test]
    async fn upsert_inserts_then_replaces() {
        let store = InMemoryStore::new();
        let mut e = event("一次面談");
        store.upsert(e.clone()).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        e.status = EventStatus::Confirmed;
        e.title = "一次面談（確定）".into();
        store.upsert(e.clone()).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, EventStatus::Confirmed);
        assert_eq!(all[0].title, "一次面談（確定）");
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryStore::new();
        let e = event("消える予定");
        store.upsert(e.clone()).await.unwrap();

        assert!(store.delete(&e.id).await.unwrap());
        assert!(!store.delete(&e.id).await.unwrap());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_event_rejected_at_the_store() {
        let store = InMemoryStore::new();
        let bad = CalendarEvent::new("someday", "面談", "", EventStatus::Draft);
        assert!(matches!(
            store.upsert(bad).await,
            Err(StoreError::InvalidEvent(_))
        ));
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
