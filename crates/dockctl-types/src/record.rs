//! Decoded engine output: single records and keyed record sets

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// One decoded inspect/ps/images/stats entry, fields kept in engine order
pub type Record = serde_json::Map<String, Value>;

/// Look up a nested field by a dotted path such as `Config.Image`
pub fn field_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Records keyed by a primary key (container or image id), in engine output order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: IndexMap<String, Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. An existing key keeps its position and its record is
    /// replaced; returns `true` in that case.
    pub fn insert(&mut self, key: impl Into<String>, record: Record) -> bool {
        self.records.insert(key.into(), record).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// First entry in engine listing order
    pub fn first(&self) -> Option<(&str, &Record)> {
        self.records.first().map(|(key, record)| (key.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
