// SPDX-License-Identifier: MIT OR Apache-2.0

//! The structured view of one emitted line.
//!
//! The gate in [`ModuleLogger`](crate::ModuleLogger) hands every passing line to `tracing`
//! as an event. Formatters and hooks rebuild a [`Record`] from that event, so they all
//! agree on level, message and fields regardless of which path the line takes out.

use crate::Level;
use chrono::{DateTime, Local};
use std::fmt::Debug;
use tracing::Event;
use tracing::field::{Field, Visit};

/// Name of the event field that carries the exact [`Level`].
pub(crate) const SEVERITY_FIELD: &str = "severity";
/// Name of the event field that carries the active module.
pub const MODULE_FIELD: &str = "module";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
    time: DateTime<Local>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
            time: Local::now(),
        }
    }

    /// Adds a field. A later field with the same key replaces the earlier one.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(key.into(), value.into());
        self
    }

    fn set_field(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub(crate) fn from_event(event: &Event<'_>) -> Self {
        let mut visitor = RecordVisitor {
            record: Record::new(level_from_tracing(*event.metadata().level()), String::new()),
        };
        event.record(&mut visitor);
        visitor.record
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn time(&self) -> DateTime<Local> {
        self.time
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The module the line was tagged with, if any.
    pub fn module(&self) -> Option<&str> {
        self.field(MODULE_FIELD)
    }

    /// Fields sorted by key, which is the order they are written in.
    pub fn sorted_fields(&self) -> Vec<(&str, &str)> {
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
    }
}

/// Used when an event arrives without our severity field.
fn level_from_tracing(level: tracing::Level) -> Level {
    if level == tracing::Level::ERROR {
        Level::Error
    } else if level == tracing::Level::WARN {
        Level::Warning
    } else if level == tracing::Level::INFO {
        Level::Info
    } else {
        Level::Debug
    }
}

struct RecordVisitor {
    record: Record,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            SEVERITY_FIELD => {
                if let Ok(level) = value.parse() {
                    self.record.level = level;
                }
            }
            "message" => self.record.message = value.to_string(),
            name => self.record.set_field(name.to_string(), value.to_string()),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_replace_and_sort() {
        let record = Record::new(Level::Info, "hello")
            .with_field("zeta", "1")
            .with_field(MODULE_FIELD, "first")
            .with_field(MODULE_FIELD, "second");
        assert_eq!(record.module(), Some("second"));
        assert_eq!(record.sorted_fields(), vec![("module", "second"), ("zeta", "1")]);
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn tracing_levels_map_to_nearest_severity() {
        assert_eq!(level_from_tracing(tracing::Level::ERROR), Level::Error);
        assert_eq!(level_from_tracing(tracing::Level::WARN), Level::Warning);
        assert_eq!(level_from_tracing(tracing::Level::INFO), Level::Info);
        assert_eq!(level_from_tracing(tracing::Level::TRACE), Level::Debug);
    }
}
