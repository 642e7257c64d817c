//! Calendar event types and the event-store trait.
//!
//! The planner is a simple CRUD subsystem, separate from the conversation
//! core: events keyed by id, grouped for display by exact date-string
//! equality. Implementations (in-memory, file-backed) live in the
//! `kabeuchi-calendar` crate.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StoreError, ValidationError};

/// Maximum title length, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Whether an event is tentative or settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Confirmed,
}

impl EventStatus {
    /// Display label for the planner legend.
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Draft => "下書き",
            EventStatus::Confirmed => "確定",
        }
    }
}

/// A single planner entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique event id.
    pub id: String,

    /// Day the event falls on, `YYYY-MM-DD`.
    pub date: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: EventStatus,

    pub created_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Create a new event with a fresh id and creation timestamp.
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        status: EventStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: date.into(),
            title: title.into(),
            description: description.into(),
            status,
            created_at: Utc::now(),
        }
    }

    /// Check the field constraints of the store contract: date shape,
    /// title and description ceilings.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(ValidationError::BadDate {
                date: self.date.clone(),
            });
        }
        if self.title.chars().count() > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong {
                max: MAX_TITLE_CHARS,
            });
        }
        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_CHARS,
            });
        }
        Ok(())
    }
}

/// The calendar store boundary: list-all, upsert-by-id, delete-by-id.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// The backend name (e.g. "file", "in_memory").
    fn name(&self) -> &str;

    /// All events, in insertion order.
    async fn list_all(&self) -> std::result::Result<Vec<CalendarEvent>, StoreError>;

    /// Insert the event, or replace the existing event with the same id.
    /// Field constraints are enforced here as well as at the UI boundary.
    async fn upsert(&self, event: CalendarEvent) -> std::result::Result<(), StoreError>;

    /// Remove the event with the given id. Returns whether anything was
    /// removed.
    async fn delete(&self, id: &str) -> std::result::Result<bool, StoreError>;
}
