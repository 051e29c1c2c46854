//! Integration tests for provider response classification.

use payform_core::{LogLevel, MessageCategory, StatusCode};
use payform_gateway::{classify, classify_status};

const GENERIC: &str = "Sorry an error occurred while processing your transaction.";

#[test]
fn test_abort_is_alert() {
    let outcome = classify("ABORT", "x", "42");
    assert_eq!(outcome.log_level, LogLevel::Alert);
    assert_eq!(outcome.user_message, "Your transaction was aborted.");
}

#[test]
fn test_unknown_code_uses_default_arm() {
    let outcome = classify("UNKNOWN_CODE", "x", "42");
    assert_eq!(outcome.log_level, LogLevel::Error);
    assert_eq!(outcome.user_message, GENERIC);
    assert_eq!(outcome.user_message_category, MessageCategory::Error);
    assert!(outcome.log_message().contains("UNKNOWN_CODE"));
    assert!(outcome.log_message().contains("42"));
}

#[test]
fn test_success_codes_are_not_special_cased() {
    // Success statuses never reach the failure classifier; if one does it is
    // treated as unrecognised.
    for code in ["OK", "REGISTERED", "AUTHENTICATED"] {
        let outcome = classify(code, "", "42");
        assert_eq!(outcome.log_level, LogLevel::Error, "{code}");
        assert_eq!(outcome.user_message, GENERIC, "{code}");
    }
}

#[test]
fn test_every_outcome_is_complete() {
    for code in [
        "ABORT",
        "NOTAUTHED",
        "REJECTED",
        "MALFORMED",
        "INVALID",
        "ERROR",
        "",
        "garbage",
    ] {
        let outcome = classify(code, "detail", "42");
        assert!(!outcome.user_message.is_empty(), "{code}");
        assert!(!outcome.log_message_template.is_empty(), "{code}");
        assert!(!outcome.log_message().contains('{'), "{code}");
        assert_eq!(
            outcome.log_context.get("order_id").map(String::as_str),
            Some("42")
        );
    }
}

#[test]
fn test_classify_status_matches_classify() {
    let parsed = StatusCode::parse("MALFORMED");
    assert_eq!(
        classify_status(&parsed, "Missing Amount", "7"),
        classify("MALFORMED", "Missing Amount", "7")
    );
}

#[test]
fn test_outcome_json_shape() {
    let outcome = classify("INVALID", "The Amount value is invalid", "42");
    let json = serde_json::to_value(&outcome).expect("outcome serializes");

    assert_eq!(json["status_code"], "INVALID");
    assert_eq!(json["log_level"], "error");
    assert_eq!(json["user_message"], "Sorry the transaction has failed.");
    assert_eq!(json["log_context"]["status_detail"], "The Amount value is invalid");
}
