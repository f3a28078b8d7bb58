//! Property-based tests for log redaction
//!
//! Uses proptest to generate `field=value;` messages and check that exactly
//! the requested fields are redacted.

use authkeep::shared::redaction::{filter_datum, PII_FIELDS};
use proptest::prelude::*;

const KEYS: [&str; 8] = [
    "name", "email", "password", "username", "date", "ip", "zip", "ssn",
];

fn pairs() -> impl Strategy<Value = Vec<(&'static str, String)>> {
    prop::collection::vec(
        (prop::sample::select(KEYS.to_vec()), "[a-zA-Z0-9@. /-]{0,12}"),
        0..8,
    )
}

fn join(pairs: &[(&str, String)]) -> String {
    pairs.iter().map(|(key, value)| format!("{key}={value};")).collect()
}

proptest! {
    #[test]
    fn test_only_listed_fields_are_redacted(pairs in pairs()) {
        let message = join(&pairs);
        let expected: String = pairs
            .iter()
            .map(|(key, value)| {
                if PII_FIELDS.contains(key) {
                    format!("{key}=***;")
                } else {
                    format!("{key}={value};")
                }
            })
            .collect();

        prop_assert_eq!(filter_datum(&PII_FIELDS, "***", &message, ';'), expected);
    }

    #[test]
    fn test_redaction_is_idempotent(pairs in pairs()) {
        let once = filter_datum(&PII_FIELDS, "***", &join(&pairs), ';');
        let twice = filter_datum(&PII_FIELDS, "***", &once, ';');
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_message_without_separator_is_unchanged(message in "[^;]*") {
        prop_assert_eq!(filter_datum(&PII_FIELDS, "***", &message, ';'), message);
    }

    #[test]
    fn test_no_fields_is_identity(message in ".*") {
        let fields: [&str; 0] = [];
        prop_assert_eq!(filter_datum(&fields, "***", &message, ';'), message);
    }
}
