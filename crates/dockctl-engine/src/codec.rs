//! Decoding of engine output into records
//!
//! The engine answers in one of a few shapes and each operation picks the
//! matching decoder:
//!
//! - scalar echo: the engine repeats the identifier it acted on
//! - a single JSON document (`info`, `version`)
//! - one JSON object per line, keyed by a caller-chosen field (`ps`, `images`,
//!   `inspect`, `stats` with `--format '{{json .}}'`)
//! - `"key":{...}` fragments per line that only form a document once wrapped
//!   in braces
//!
//! Per-line decoding keeps three answers apart: no input at all (`None`),
//! input with nothing decodable (an empty set) and, for the document shapes,
//! a decode error.

use dockctl_types::{CommandOutcome, CommandResult, Record, RecordSet};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{EngineError, Result};

/// First output line repeats the identifier the operation was given
pub fn echo_matches(result: &CommandResult, unique: &str) -> bool {
    result.first_line().map(str::trim_end) == Some(unique)
}

pub fn echo_outcome(result: &CommandResult, unique: &str) -> CommandOutcome {
    if echo_matches(result, unique) {
        CommandOutcome::succeeded(result.output())
    } else {
        CommandOutcome::failed(result.output())
    }
}

/// Engine error line for an unknown container, e.g.
/// `Error: No such container: abc123` or `Error response from daemon: No such container: abc123`
pub fn is_no_such_container(line: &str, unique: &str) -> bool {
    let line = line.to_ascii_lowercase();
    line.starts_with("error")
        && line.contains("no such container")
        && line.trim_end().ends_with(&unique.to_ascii_lowercase())
}

/// Parse the whole output as one JSON object
pub fn decode_document(lines: &[String], context: &str) -> Result<Record> {
    let text = lines.join("\n");
    serde_json::from_str::<Record>(&text).map_err(|e| EngineError::decode(context, e))
}

/// Decode one JSON object per line, keyed by the value of `key`
///
/// Lines that are not JSON objects, or whose key field is missing or empty,
/// are skipped. A repeated key replaces the earlier record.
pub fn decode_lines(lines: &[String], key: &str) -> Option<RecordSet> {
    if lines.iter().all(|line| line.trim().is_empty()) {
        return None;
    }

    let mut records = RecordSet::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = match serde_json::from_str::<Record>(line) {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping undecodable output line: {}", e);
                continue;
            }
        };

        let Some(primary) = record.get(key).and_then(key_value) else {
            debug!("Skipping record without {} field", key);
            continue;
        };

        if records.insert(primary.clone(), record) {
            warn!("Duplicate {} {} in engine output, keeping the last record", key, primary);
        }
    }

    Some(records)
}

/// Wrap `"key":{...}` fragments into one object and decode it
///
/// The document is assembled in an owned buffer that is released on every
/// return path.
pub fn decode_fragments(lines: &[String], context: &str) -> Result<Option<RecordSet>> {
    let fragments: Vec<&str> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    if fragments.is_empty() {
        return Ok(None);
    }

    let mut document = String::with_capacity(fragments.iter().map(|f| f.len() + 1).sum::<usize>() + 2);
    document.push('{');
    document.push_str(&fragments.join(","));
    document.push('}');

    let assembled = serde_json::from_str::<Record>(&document).map_err(|e| EngineError::decode(context, e))?;

    let mut records = RecordSet::new();
    for (key, value) in assembled {
        match value {
            Value::Object(record) => {
                records.insert(key, record);
            }
            other => debug!("Skipping non-object fragment {}: {}", key, other),
        }
    }
    Ok(Some(records))
}

/// Whether a `ps` record lists `name` among its `Names`
///
/// Docker reports a comma separated string, Podman an array.
pub fn has_name(record: &Record, name: &str) -> bool {
    let matches = |candidate: &str| candidate.trim().trim_start_matches('/') == name;
    match record.get("Names") {
        Some(Value::String(names)) => names.split(',').any(matches),
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

fn key_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
