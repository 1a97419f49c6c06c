// SPDX-License-Identifier: MIT OR Apache-2.0

//! The primary sink.
//!
//! [`Output`] is the `MakeWriter` handed to the `fmt` layer. The writer behind it can be
//! swapped at runtime without rebuilding the subscriber, which is how
//! [`ModuleLogger::set_output`](crate::ModuleLogger::set_output) works.

use std::fmt::Debug;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

type BoxedWriter = Box<dyn Write + Send>;

#[derive(Clone)]
pub(crate) struct Output {
    writer: Arc<Mutex<BoxedWriter>>,
}

impl Output {
    /// Standard error, the default sink.
    pub(crate) fn stderr() -> Self {
        let writer: BoxedWriter = Box::new(std::io::stderr());
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Replaces the writer. The previous writer is flushed and dropped.
    pub(crate) fn replace(&self, writer: BoxedWriter) {
        let mut previous = std::mem::replace(&mut *self.lock(), writer);
        let _ = previous.flush();
    }

    pub(crate) fn flush(&self) {
        let _ = self.lock().flush();
    }

    fn lock(&self) -> MutexGuard<'_, BoxedWriter> {
        // A writer that panicked mid-line is still the best place to send the next one.
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Output").finish_non_exhaustive()
    }
}

/// Holds the output lock for the duration of one line.
pub(crate) struct OutputGuard<'a>(MutexGuard<'a, BoxedWriter>);

impl Write for OutputGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.0.write_all(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

impl<'a> MakeWriter<'a> for Output {
    type Writer = OutputGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        OutputGuard(self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryOutput;

    #[test]
    fn replace_redirects_subsequent_writes() {
        let output = Output::stderr();
        let first = InMemoryOutput::new();
        let second = InMemoryOutput::new();

        output.replace(Box::new(first.clone()));
        output.make_writer().write_all(b"one\n").unwrap();
        output.replace(Box::new(second.clone()));
        output.make_writer().write_all(b"two\n").unwrap();

        assert_eq!(first.drain_logs(), "one\n");
        assert_eq!(second.drain_logs(), "two\n");
    }
}
