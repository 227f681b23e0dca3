//! Property-based tests for name sanitizing and output decoding

use crate::codec::decode_lines;
use crate::naming::{disambiguate, sanitize, MAX_NAME_LEN};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Strategy for free-text names, including characters the engine rejects
pub fn raw_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Z0-9 _.!@#/-]{0,80}",
        "[\\s\\t\\n]{0,5}[a-z]{1,10}[\\s]{0,5}",
    ]
}

/// Strategy for engine ids
pub fn id_strategy() -> impl Strategy<Value = String> {
    "[a-f0-9]{12,64}"
}

/// Strategy for per-line listing records keyed by `ID`
pub fn listing_strategy() -> impl Strategy<Value = Vec<(String, String, String)>> {
    prop::collection::vec(
        (id_strategy(), "[a-z0-9/_.-]{1,30}", "(Up|Exited) [0-9]{1,3} (seconds|minutes)"),
        0..8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    proptest! {
        /// Sanitizing twice changes nothing
        #[test]
        fn test_sanitize_is_idempotent(raw in raw_name_strategy()) {
            let once = sanitize(&raw);
            prop_assert_eq!(sanitize(&once), once);
        }

        /// Output stays short and uses only legal characters
        #[test]
        fn test_sanitize_output_shape(raw in raw_name_strategy()) {
            let name = sanitize(&raw);
            let legal = Regex::new(r"^[A-Za-z0-9_.\-]*$").unwrap();
            prop_assert!(name.chars().count() <= MAX_NAME_LEN);
            prop_assert!(legal.is_match(&name));
        }

        /// Disambiguated names keep the hash prefix
        #[test]
        fn test_disambiguate_prefix(raw in "[a-zA-Z]{1,20}", hash in "[0-9]{4}") {
            let name = disambiguate(&raw, Some(&hash));
            let prefix = format!("{}.", hash);
            prop_assert!(name.starts_with(&prefix));
            prop_assert!(name.len() <= MAX_NAME_LEN);
        }

        /// Decoding, re-encoding and decoding again keeps the key -> record mapping
        #[test]
        fn test_decode_lines_round_trip(entries in listing_strategy()) {
            let lines: Vec<String> = entries
                .iter()
                .map(|(id, image, status)| json!({"ID": id, "Image": image, "Status": status}).to_string())
                .collect();

            let decoded = decode_lines(&lines, "ID");
            if lines.is_empty() {
                prop_assert!(decoded.is_none());
                return Ok(());
            }
            let decoded = decoded.unwrap();

            let reencoded: Vec<String> = decoded
                .iter()
                .map(|(_, record)| Value::Object(record.clone()).to_string())
                .collect();
            let again = decode_lines(&reencoded, "ID").unwrap();
            prop_assert_eq!(&again, &decoded);

            // last write wins for repeated ids
            for (id, _, _) in &entries {
                let expected = entries
                    .iter()
                    .rev()
                    .find(|(other, _, _)| other == id)
                    .map(|(_, image, _)| image.as_str());
                prop_assert_eq!(decoded.get(id).unwrap()["Image"].as_str(), expected);
            }
        }

        /// Malformed lines never produce records but never the no-result sentinel either
        #[test]
        fn test_decode_lines_garbage(garbage in prop::collection::vec("[^{}\\s][^{}]{0,20}", 1..5)) {
            let decoded = decode_lines(&garbage, "ID");
            prop_assert!(decoded.is_some());
            prop_assert!(decoded.unwrap().is_empty());
        }
    }
}
