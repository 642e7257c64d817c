pub mod calendar_cmd;
pub mod chat;
pub mod prompt;
pub mod settings_cmd;

use kabeuchi_core::Mode;

/// Parse a mode id from CLI input, with a helpful failure.
pub fn parse_mode(id: &str) -> Result<Mode, String> {
    Mode::from_id(id).ok_or_else(|| {
        let ids: Vec<&str> = Mode::ALL.iter().map(|m| m.id()).collect();
        format!("unknown mode '{id}' (expected one of: {})", ids.join(", "))
    })
}
