//! Classification of payment provider failure responses.
//!
//! Every status the provider can send back maps to exactly one
//! [`ResponseOutcome`]: a severity and message for the operator log, and a
//! message for the customer. Statuses outside the known set fall through to
//! a generic error outcome, so classification never fails.

use std::collections::BTreeMap;

use payform_core::{LogLevel, MessageCategory, StatusCode};
use serde::Serialize;
use tracing::error;

const MSG_ABORTED: &str = "Your transaction was aborted.";
const MSG_NOT_AUTHORISED: &str = "Your transaction was not authorised.";
const MSG_REJECTED: &str = "Your transaction was rejected.";
const MSG_FAILED: &str = "Sorry the transaction has failed.";
const MSG_PROCESSING_ERROR: &str = "Sorry an error occurred while processing your transaction.";

/// Outcome of classifying one provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseOutcome {
    pub status_code: StatusCode,
    pub log_level: LogLevel,
    /// Log message with `{key}` placeholders filled from `log_context`.
    pub log_message_template: &'static str,
    pub log_context: BTreeMap<&'static str, String>,
    pub user_message: &'static str,
    pub user_message_category: MessageCategory,
}

impl ResponseOutcome {
    /// The log message with every placeholder substituted.
    ///
    /// The template is scanned once; substituted values are copied in as-is
    /// and never searched for further placeholders. A `{key}` with no entry
    /// in `log_context` is left in place.
    #[must_use]
    pub fn log_message(&self) -> String {
        let mut message = String::with_capacity(self.log_message_template.len());
        let mut rest = self.log_message_template;

        while let Some((before, after)) = rest.split_once('{') {
            message.push_str(before);
            let placeholder = after.split_once('}').and_then(|(key, tail)| {
                self.log_context.get(key).map(|value| (value, tail))
            });
            if let Some((value, tail)) = placeholder {
                message.push_str(value);
                rest = tail;
            } else {
                message.push('{');
                rest = after;
            }
        }

        message.push_str(rest);
        message
    }

    /// Write the outcome to the operator log.
    pub fn emit(&self) {
        let order_id = self.log_context.get("order_id").map_or("", String::as_str);
        error!(
            severity = self.log_level.as_str(),
            status_code = %self.status_code,
            order_id,
            "{}",
            self.log_message()
        );
    }
}

/// Classify a raw provider response.
///
/// `status_detail` is the provider's free-text explanation and only goes
/// into the log context.
#[must_use]
pub fn classify(status_code: &str, status_detail: &str, order_id: &str) -> ResponseOutcome {
    classify_status(&StatusCode::parse(status_code), status_detail, order_id)
}

/// Classify an already parsed provider status.
#[must_use]
pub fn classify_status(
    status_code: &StatusCode,
    status_detail: &str,
    order_id: &str,
) -> ResponseOutcome {
    let (log_level, log_message_template, user_message) = match status_code {
        StatusCode::Abort => (
            LogLevel::Alert,
            "Payment for order {order_id} was aborted: {status_detail}",
            MSG_ABORTED,
        ),
        StatusCode::NotAuthed => (
            LogLevel::Alert,
            "Payment for order {order_id} was not authorised: {status_detail}",
            MSG_NOT_AUTHORISED,
        ),
        StatusCode::Rejected => (
            LogLevel::Alert,
            "Payment for order {order_id} was rejected: {status_detail}",
            MSG_REJECTED,
        ),
        StatusCode::Malformed => (
            LogLevel::Alert,
            "Malformed payment request for order {order_id}: {status_detail}",
            MSG_FAILED,
        ),
        StatusCode::Invalid => (
            LogLevel::Error,
            "Invalid payment request for order {order_id}: {status_detail}",
            MSG_FAILED,
        ),
        StatusCode::Error => (
            LogLevel::Error,
            "Payment provider error for order {order_id}: {status_detail}",
            MSG_PROCESSING_ERROR,
        ),
        StatusCode::Unrecognized(_) => (
            LogLevel::Error,
            "Unrecognised payment status {status_code} for order {order_id}: {status_detail}",
            MSG_PROCESSING_ERROR,
        ),
    };

    let log_context = BTreeMap::from([
        ("order_id", order_id.to_owned()),
        ("status_code", status_code.to_string()),
        ("status_detail", status_detail.to_owned()),
    ]);

    ResponseOutcome {
        status_code: status_code.clone(),
        log_level,
        log_message_template,
        log_context,
        user_message,
        user_message_category: MessageCategory::Error,
    }
}
