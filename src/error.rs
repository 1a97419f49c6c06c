// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types.

use crate::Level;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The local syslog could not be reached. Callers usually carry on without it.
    #[error("syslog is not available: {0}")]
    SyslogUnavailable(String),

    #[error("failed to write to syslog: {0}")]
    SyslogWrite(String),

    #[error("not a valid log level: {0:?}")]
    InvalidLevel(String),
}

/**
The fault handed back by the panic-level shorthands.

The line is always written before this value is created, so a caller that catches it
can rely on the log already containing the message. Propagate it with `?` to unwind the
current operation, or drop it to carry on.

```
let logger = modlog::ModuleLogger::new();
# logger.set_output(std::io::sink());
fn step(logger: &modlog::ModuleLogger) -> Result<(), modlog::Panicked> {
    Err(logger.panic("invariant broken"))
}
let fault = step(&logger).unwrap_err();
assert_eq!(fault.message, "invariant broken");
```
*/
#[must_use = "a panic-level line expects the caller to unwind"]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{level}: {message} (module {module})")]
pub struct Panicked {
    pub level: Level,
    /// The module that was active when the line was logged.
    pub module: String,
    pub message: String,
}
