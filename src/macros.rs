// SPDX-License-Identifier: MIT OR Apache-2.0

//! Formatting shorthands.
//!
//! Each macro takes `format!` arguments and logs through the global logger, or through a
//! specific logger when written as `logger => "fmt", args`:
//!
//! ```
//! let logger = modlog::ModuleLogger::new();
//! # logger.set_output(std::io::sink());
//! # modlog::set_output(std::io::sink());
//! modlog::info!("{} : {}", "global", 1);
//! modlog::warn!(logger => "{} : {}", "local", 2);
//! ```
//!
//! Arguments are formatted only when the line passes the gate.

#[macro_export]
macro_rules! debug {
    ($logger:expr => $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().debug(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr => $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr => $($arg:tt)+) => {
        $logger.warn(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().warn(::std::format_args!($($arg)+))
    };
}

/// Same as [`warn!`].
#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => {
        $crate::warn!($($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr => $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().error(::std::format_args!($($arg)+))
    };
}

/**
Logs at panic level and evaluates to the [`Panicked`](crate::Panicked) fault.

```
# modlog::set_output(std::io::sink());
fn load(path: &str) -> Result<(), modlog::Panicked> {
    if path.is_empty() {
        return Err(modlog::log_panic!("empty path for {}", "config"));
    }
    Ok(())
}
assert!(load("").is_err());
```
*/
#[macro_export]
macro_rules! log_panic {
    ($logger:expr => $($arg:tt)+) => {
        $logger.panic(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().panic(::std::format_args!($($arg)+))
    };
}

/// Logs at fatal level, flushes, and exits the process with status 1.
#[macro_export]
macro_rules! fatal {
    ($logger:expr => $($arg:tt)+) => {
        $logger.fatal(::std::format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::global().fatal(::std::format_args!($($arg)+))
    };
}
