//! # Kabeuchi Core
//!
//! Domain types, traits, and error definitions for the kabeuchi assistant.
//! This crate has **zero framework dependencies** — it defines the domain
//! model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The mode table is a closed enum: every per-mode policy (system prompt,
//! history window, token ceiling, request template) hangs off a `match` on
//! [`Mode`], so adding or removing a mode is a localized change. External
//! collaborators (the completion service, the calendar store) are defined as
//! traits here; implementations live in their respective crates.

pub mod calendar;
pub mod error;
pub mod message;
pub mod mode;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use calendar::{CalendarEvent, EventStatus, EventStore};
pub use error::{CompletionError, Error, Result, SessionError, StoreError, ValidationError};
pub use message::{OutboundMessage, Role, Turn};
pub use mode::{Mode, ModeSpec};
pub use provider::{CompletionClient, CompletionRequest, TEMPERATURE};
