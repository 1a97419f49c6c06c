// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mirrors emitted lines to the local syslog.
//!
//! Lines go out in the plain layout (no colors, no timestamp, since syslog stamps its
//! own) whatever the primary output is set to. Debug lines stay out of syslog.

use crate::error::Error;
use crate::formatter::TextFormatter;
use crate::hook::Hook;
use crate::log_record::Record;
use crate::Level;
use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};
use syslog::{Facility, Formatter3164, Logger, LoggerBackend, Severity};

const SYSLOG_LEVELS: &[Level] = &[
    Level::Info,
    Level::Warning,
    Level::Error,
    Level::Panic,
    Level::Fatal,
];

pub struct SyslogHook {
    writer: Mutex<Logger<LoggerBackend, Formatter3164>>,
}

impl SyslogHook {
    /// Connects to the local syslog socket.
    pub fn connect() -> Result<Self, Error> {
        let formatter = Formatter3164 {
            facility: Facility::LOG_USER,
            hostname: None,
            process: process_name(),
            pid: std::process::id(),
        };
        let writer =
            syslog::unix(formatter).map_err(|err| Error::SyslogUnavailable(err.to_string()))?;
        Ok(Self {
            writer: Mutex::new(writer),
        })
    }
}

/// The line as syslog gets it: plain layout, no timestamp, no trailing newline.
fn syslog_line(record: &Record) -> String {
    let mut line = TextFormatter::plain().format(record);
    line.truncate(line.trim_end().len());
    line
}

fn severity(level: Level) -> Severity {
    match level {
        Level::Panic | Level::Fatal => Severity::LOG_CRIT,
        Level::Error => Severity::LOG_ERR,
        Level::Warning => Severity::LOG_WARNING,
        Level::Info => Severity::LOG_INFO,
        Level::Debug => Severity::LOG_DEBUG,
    }
}

fn process_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "modlog".to_string())
}

impl Debug for SyslogHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyslogHook").finish_non_exhaustive()
    }
}

impl Hook for SyslogHook {
    fn levels(&self) -> &[Level] {
        SYSLOG_LEVELS
    }

    fn fire(&self, record: &Record) -> Result<(), Error> {
        let line = syslog_line(record);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let result = match severity(record.level()) {
            Severity::LOG_EMERG | Severity::LOG_ALERT | Severity::LOG_CRIT => writer.crit(line),
            Severity::LOG_ERR => writer.err(line),
            Severity::LOG_WARNING | Severity::LOG_NOTICE => writer.warning(line),
            Severity::LOG_INFO => writer.info(line),
            Severity::LOG_DEBUG => writer.debug(line),
        };
        result.map_err(|err| Error::SyslogWrite(err.to_string()))
    }
}
