//! Classify a provider callback status.

use payform_gateway::classify;

use super::write_json;
use crate::error::CliError;

/// Log the outcome for a provider status and print it as JSON.
///
/// # Errors
///
/// Returns an error only if stdout cannot be written.
pub fn run(status: &str, detail: &str, order_id: &str) -> Result<(), CliError> {
    let outcome = classify(status, detail, order_id);
    outcome.emit();
    write_json(&outcome)
}
