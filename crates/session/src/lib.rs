//! The mode-driven conversation assembly engine.
//!
//! One request flows through this crate as:
//!
//! 1. **Validate** the raw input (length bounds, key present)
//! 2. **Resolve** the effective system prompt (override or default)
//! 3. **Window** the history ledger per the active mode's policy
//! 4. **Assemble** the outbound message sequence
//! 5. **Send** via the completion client, then record both turns
//!
//! The [`ChatSession`] owns the mutable session state (active mode, ledger,
//! in-flight guard) explicitly, so the engine is testable without a UI or a
//! live settings file.

pub mod assembler;
pub mod ledger;
pub mod resolver;
pub mod session;

pub use assembler::{assemble, build_request};
pub use ledger::HistoryLedger;
pub use resolver::resolve;
pub use session::ChatSession;
