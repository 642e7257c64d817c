//! The chat session — explicit owner of the mutable conversation state.
//!
//! Owns the active mode, the history ledger, the settings store, and the
//! single-slot request guard. The send pipeline is
//! validate → assemble → record user turn → complete → record assistant
//! turn, with the guard released on every exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use kabeuchi_config::SettingsStore;
use kabeuchi_core::{CompletionClient, Mode, SessionError, Turn};
use kabeuchi_security::{validate_api_key, validate_model, validate_prompt};

use crate::assembler::build_request;
use crate::ledger::HistoryLedger;

/// Single-slot guard: exactly one completion request may be in flight.
///
/// Acquire fails with `Busy`; the slot frees itself when the guard drops,
/// success or failure, so the session always returns to an idle state.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestSlot(Arc<AtomicBool>);

impl RequestSlot {
    pub(crate) fn acquire(&self) -> Result<SlotGuard, SessionError> {
        if self.0.swap(true, Ordering::SeqCst) {
            return Err(SessionError::Busy);
        }
        Ok(SlotGuard(Arc::clone(&self.0)))
    }

    #[cfg(test)]
    pub(crate) fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub(crate) struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// One interactive assistant session.
pub struct ChatSession<C> {
    store: SettingsStore,
    client: C,
    ledger: HistoryLedger,
    slot: RequestSlot,
}

impl<C: CompletionClient> ChatSession<C> {
    /// Start a session in the mode the settings remember, falling back to
    /// Normal. The opening message (if the mode has one) is seeded as the
    /// first assistant turn.
    pub fn new(store: SettingsStore, client: C) -> Self {
        let mode = store.settings().mode.unwrap_or(Mode::Normal);
        let mut session = Self {
            store,
            client,
            ledger: HistoryLedger::new(mode),
            slot: RequestSlot::default(),
        };
        session.seed_opening();
        session
    }

    /// The active mode.
    pub fn mode(&self) -> Mode {
        self.ledger.mode()
    }

    /// The current session's turns.
    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    /// Read access to the settings store.
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Switch the active mode: persist the choice, then clear the ledger
    /// unconditionally — re-entering the current mode also starts a fresh
    /// session. The clear completes before this returns, so no queued send
    /// can observe the old session's turns.
    pub fn switch_mode(&mut self, mode: Mode) -> Result<(), SessionError> {
        self.store.set_mode(mode)?;
        self.ledger.reset(mode);
        self.seed_opening();
        info!(mode = %mode, "mode switched, session reset");
        Ok(())
    }

    /// Send one user input through the active mode's pipeline and return
    /// the assistant's reply.
    ///
    /// The user turn is recorded after assembly (the assembled window never
    /// contains the input being sent) and stays recorded if the request
    /// fails. The assistant turn is recorded only on success.
    pub async fn send(&mut self, input: &str) -> Result<String, SessionError> {
        let mode = self.mode();
        if !mode.is_conversational() {
            return Err(SessionError::NotAConversation(mode));
        }

        let _guard = self.slot.acquire()?;

        let settings = self.store.settings();
        let api_key = settings.api_key.as_deref().ok_or(SessionError::NotConfigured)?;
        validate_api_key(api_key)?;
        validate_model(settings.model_or_default())?;
        validate_prompt(input)?;

        let request = build_request(mode, input, &self.ledger, settings);
        debug!(mode = %mode, messages = request.messages.len(), "request assembled");

        self.ledger.append(Turn::user(input));

        let reply = self.client.complete(request).await?;
        self.ledger.append(Turn::assistant(reply.clone()));
        Ok(reply)
    }

    fn seed_opening(&mut self) {
        if let Some(opening) = self.mode().spec().opening_message {
            // No-op for modes that keep no history.
            self.ledger.append(Turn::assistant(opening));
        }
    }
}
