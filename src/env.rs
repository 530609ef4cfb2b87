use crate::error::SnippetError;
use std::env;

/// Variable that would point the datastore client at a local emulator.
pub const EMULATOR_HOST_VAR: &str = "DATASTORE_EMULATOR_HOST";

/// Make sure no emulator redirect is in effect for this process.
pub fn clear_emulator_host() -> Result<(), SnippetError> {
    if let Some(previous) = env::var_os(EMULATOR_HOST_VAR) {
        tracing::debug!(previous = ?previous, "clearing {}", EMULATOR_HOST_VAR);
    }
    env::remove_var(EMULATOR_HOST_VAR);

    match env::var_os(EMULATOR_HOST_VAR) {
        None => Ok(()),
        Some(value) => Err(SnippetError::EmulatorHost(format!(
            "still set to {:?}",
            value
        ))),
    }
}
