// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Output
//!
//! A sink that captures formatted lines in memory instead of writing them anywhere.
//! Useful for:
//!
//! - Unit testing code that logs through modlog
//! - Asserting on exact line layout, including quoting and the `module` field
//! - Capturing logs where stderr is redirected or unavailable
//!
//! ## Architecture
//!
//! The buffer is an `Arc<Mutex<Vec<u8>>>`. Clones share the same buffer, so you can hand
//! one clone to [`ModuleLogger::set_output`](crate::ModuleLogger::set_output) and keep
//! another to drain.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A capturing writer.
///
/// # Example
///
/// ```rust
/// use modlog::{InMemoryOutput, Level, ModuleLogger};
///
/// let logger = ModuleLogger::new();
/// let output = InMemoryOutput::new();
/// logger.set_output(output.clone());
/// logger.set_colors(false);
/// logger.set_timestamps(false);
/// logger.set_level(Level::Debug);
///
/// let _scope = logger.enter_module("worker");
/// logger.debug("started");
///
/// assert_eq!(output.drain_logs(), "level=debug msg=started module=worker \n");
/// ```
///
/// # Test Isolation Pattern
///
/// When testing through the global logger, swap the output in and restore a fresh
/// instance afterwards:
///
/// ```rust
/// use modlog::InMemoryOutput;
///
/// let output = InMemoryOutput::new();
/// modlog::set_output(output.clone());
/// modlog::warn("captured");
/// assert!(output.drain_logs().contains("captured"));
///
/// // Back to stderr, default level, no hooks.
/// modlog::reset();
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryOutput {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl InMemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns everything written so far and clears the buffer.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn drain_logs(&self) -> String {
        let mut buffer = self.lock();
        let result = String::from_utf8_lossy(&buffer).into_owned();
        buffer.clear();
        result
    }

    /// Returns everything written so far without clearing.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Write for InMemoryOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
