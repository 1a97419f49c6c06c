// SPDX-License-Identifier: MIT OR Apache-2.0

//! logfmt text layout.
//!
//! [`TextFormatter`] renders a [`Record`] as a single `key=value` line and plugs into
//! `tracing-subscriber`'s [`FormatEvent`] seam, so the `fmt` layer owns writer plumbing
//! while the layout stays ours.
//!
//! Plain layout, with timestamps off:
//!
//! ```text
//! level=info msg="Printf : Printf" module=log_test
//! ```
//!
//! Values are written bare when they consist only of ASCII alphanumerics and `-._/@^+`,
//! and quoted otherwise.

use crate::Level;
use crate::log_record::Record;
use chrono::SecondsFormat;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

static START: OnceLock<Instant> = OnceLock::new();

/// Pins the reference point for the `[0042]` elapsed-seconds stamp of the colored layout.
pub(crate) fn start_clock() -> Instant {
    *START.get_or_init(Instant::now)
}

/// Width the message is padded to in the colored layout.
const MESSAGE_WIDTH: usize = 44;

/// Formatting switches shared between a logger and its formatter.
///
/// The logger flips these at runtime; the formatter reads them for every line.
#[derive(Debug)]
pub(crate) struct FormatOptions {
    colors: AtomicBool,
    timestamps: AtomicBool,
}

impl FormatOptions {
    pub(crate) fn new(colors: bool, timestamps: bool) -> Self {
        Self {
            colors: AtomicBool::new(colors),
            timestamps: AtomicBool::new(timestamps),
        }
    }

    pub(crate) fn colors(&self) -> bool {
        self.colors.load(Ordering::Relaxed)
    }

    pub(crate) fn set_colors(&self, enabled: bool) {
        self.colors.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn timestamps(&self) -> bool {
        self.timestamps.load(Ordering::Relaxed)
    }

    pub(crate) fn set_timestamps(&self, enabled: bool) {
        self.timestamps.store(enabled, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone)]
pub struct TextFormatter {
    options: Arc<FormatOptions>,
}

impl TextFormatter {
    pub fn new(colors: bool, timestamps: bool) -> Self {
        Self::shared(Arc::new(FormatOptions::new(colors, timestamps)))
    }

    /// No colors, no timestamps. This is what the syslog hook sends.
    pub fn plain() -> Self {
        Self::new(false, false)
    }

    pub(crate) fn shared(options: Arc<FormatOptions>) -> Self {
        Self { options }
    }

    /// Renders one line, including the trailing newline.
    pub fn format(&self, record: &Record) -> String {
        let mut out = String::new();
        if self.options.colors() {
            self.format_colored(&mut out, record);
        } else {
            self.format_plain(&mut out, record);
        }
        out.push('\n');
        out
    }

    fn format_plain(&self, out: &mut String, record: &Record) {
        if self.options.timestamps() {
            let time = record.time().to_rfc3339_opts(SecondsFormat::Secs, true);
            append_key_value(out, "time", &time);
        }
        append_key_value(out, "level", record.level().as_str());
        append_key_value(out, "msg", record.message());
        for (key, value) in record.sorted_fields() {
            append_key_value(out, key, value);
        }
    }

    fn format_colored(&self, out: &mut String, record: &Record) {
        let color = level_color(record.level());
        let level_text: String = record
            .level()
            .as_str()
            .to_ascii_uppercase()
            .chars()
            .take(4)
            .collect();
        let _ = write!(out, "\x1b[{color}m{level_text}\x1b[0m");
        if self.options.timestamps() {
            let elapsed = start_clock().elapsed().as_secs();
            let _ = write!(out, "[{elapsed:04}]");
        }
        let _ = write!(out, " {:<width$} ", record.message(), width = MESSAGE_WIDTH);
        for (key, value) in record.sorted_fields() {
            let _ = write!(out, " \x1b[{color}m{key}\x1b[0m=");
            append_value(out, value);
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl<S, N> FormatEvent<S, N> for TextFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let record = Record::from_event(event);
        writer.write_str(&self.format(&record))
    }
}

fn level_color(level: Level) -> u8 {
    match level {
        Level::Debug => 37,
        Level::Info => 36,
        Level::Warning => 33,
        Level::Error | Level::Panic | Level::Fatal => 31,
    }
}

fn append_key_value(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push('=');
    append_value(out, value);
    out.push(' ');
}

fn append_value(out: &mut String, value: &str) {
    if needs_quoting(value) {
        let _ = write!(out, "{:?}", value);
    } else {
        out.push_str(value);
    }
}

pub(crate) fn needs_quoting(value: &str) -> bool {
    !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+'))
}
