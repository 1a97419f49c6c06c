// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide logger.
//!
//! Most programs want exactly one [`ModuleLogger`]. [`global`] creates it on first use
//! with the default configuration; [`init_global`] installs a custom configuration if it
//! runs first. The free functions in this module forward to that instance, so
//!
//! ```
//! modlog::push_module("net");
//! modlog::info("connected");
//! modlog::pop_module();
//! ```
//!
//! is the same as calling the methods on `modlog::global()`.
//!
//! # Thread Safety
//!
//! The instance is shared by every thread. Stack, filter and level live behind one
//! mutex, so each log call sees a consistent snapshot, but the module stack itself is
//! shared: a push on one thread changes the tag of lines logged on another. Confine
//! push/pop to one thread, or give each component its own [`ModuleLogger`].
//!
//! # Tests
//!
//! Tests that touch the global instance should serialize on a lock and call [`reset`]
//! when done:
//!
//! ```
//! use std::sync::Mutex;
//! static GLOBAL_GUARD: Mutex<()> = Mutex::new(());
//!
//! let _guard = GLOBAL_GUARD.lock().unwrap();
//! modlog::set_level(modlog::Level::Debug);
//! // ...
//! modlog::reset();
//! ```

use crate::config::LoggerConfig;
use crate::error::{Error, Panicked};
use crate::hook::Hook;
use crate::module::{ModuleFilter, ModuleGuard};
use crate::{Level, ModuleLogger};
use std::fmt::Display;
use std::io::Write;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGER: OnceLock<ModuleLogger> = OnceLock::new();

/// The process-wide logger, created with [`LoggerConfig::default`] on first use.
pub fn global() -> &'static ModuleLogger {
    GLOBAL_LOGGER.get_or_init(ModuleLogger::new)
}

/**
Creates the process-wide logger from `config`.

Returns `false`, leaving the existing instance alone, if the logger was already created
by an earlier call to this function or to [`global`].

```
use modlog::{Level, LoggerConfig};

let installed = modlog::init_global(LoggerConfig::default().with_level(Level::Warning));
if installed {
    assert_eq!(modlog::level(), Level::Warning);
}
```
*/
pub fn init_global(config: LoggerConfig) -> bool {
    let mut installed = false;
    GLOBAL_LOGGER.get_or_init(|| {
        installed = true;
        ModuleLogger::with_config(config)
    });
    installed
}

/// See [`ModuleLogger::reset`].
pub fn reset() {
    global().reset();
}

pub fn push_module(name: impl Into<String>) {
    global().push_module(name);
}

pub fn pop_module() -> Option<String> {
    global().pop_module()
}

pub fn enter_module(name: impl Into<String>) -> ModuleGuard<'static> {
    global().enter_module(name)
}

#[track_caller]
pub fn current_module() -> String {
    global().current_module()
}

pub fn set_module_filter<I, S>(names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    global().set_module_filter(names);
}

pub fn module_filter() -> ModuleFilter {
    global().module_filter()
}

pub fn set_level(level: Level) {
    global().set_level(level);
}

pub fn level() -> Level {
    global().level()
}

#[track_caller]
pub fn enabled(level: Level) -> bool {
    global().enabled(level)
}

pub fn set_output<W: Write + Send + 'static>(writer: W) {
    global().set_output(writer);
}

pub fn set_colors(enabled: bool) {
    global().set_colors(enabled);
}

pub fn set_timestamps(enabled: bool) {
    global().set_timestamps(enabled);
}

pub fn add_hook(hook: Arc<dyn Hook>) {
    global().add_hook(hook);
}

pub fn add_syslog_hook() -> Result<(), Error> {
    global().add_syslog_hook()
}

#[track_caller]
pub fn log(level: Level, message: impl Display) {
    global().log(level, message);
}

#[track_caller]
pub fn logln(level: Level, args: &[&dyn Display]) {
    global().logln(level, args);
}

#[track_caller]
pub fn print(message: impl Display) {
    global().print(message);
}

#[track_caller]
pub fn println(args: &[&dyn Display]) {
    global().println(args);
}

#[track_caller]
pub fn debug(message: impl Display) {
    global().debug(message);
}

#[track_caller]
pub fn debugln(args: &[&dyn Display]) {
    global().debugln(args);
}

#[track_caller]
pub fn info(message: impl Display) {
    global().info(message);
}

#[track_caller]
pub fn infoln(args: &[&dyn Display]) {
    global().infoln(args);
}

#[track_caller]
pub fn warn(message: impl Display) {
    global().warn(message);
}

#[track_caller]
pub fn warnln(args: &[&dyn Display]) {
    global().warnln(args);
}

#[track_caller]
pub fn warning(message: impl Display) {
    global().warning(message);
}

#[track_caller]
pub fn warningln(args: &[&dyn Display]) {
    global().warningln(args);
}

#[track_caller]
pub fn error(message: impl Display) {
    global().error(message);
}

#[track_caller]
pub fn errorln(args: &[&dyn Display]) {
    global().errorln(args);
}

#[track_caller]
pub fn panic(message: impl Display) -> Panicked {
    global().panic(message)
}

#[track_caller]
pub fn panicln(args: &[&dyn Display]) -> Panicked {
    global().panicln(args)
}

#[track_caller]
pub fn fatal(message: impl Display) -> ! {
    global().fatal(message)
}

#[track_caller]
pub fn fatalln(args: &[&dyn Display]) -> ! {
    global().fatalln(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryOutput;
    use std::sync::{Mutex, PoisonError};

    static TEST_LOGGER_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn global_is_a_single_instance() {
        let _guard = TEST_LOGGER_GUARD
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        assert!(std::ptr::eq(global(), global()));
        assert!(!init_global(LoggerConfig::default()));
    }

    #[test]
    fn free_functions_forward_to_the_global() {
        let _guard = TEST_LOGGER_GUARD
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let output = InMemoryOutput::new();
        set_output(output.clone());
        set_colors(false);
        set_timestamps(false);
        set_level(Level::Debug);

        push_module("net");
        debug("up");
        assert_eq!(pop_module().as_deref(), Some("net"));
        {
            let _scope = enter_module("disk");
            set_module_filter(["disk"]);
            warnln(&[&"almost", &"full"]);
        }
        error("filtered out");
        set_module_filter(Vec::<String>::new());
        error("not filtered");

        assert_eq!(
            output.drain_logs(),
            "level=debug msg=up module=net \n\
             level=warning msg=\"almost full\" module=disk \n\
             level=error msg=\"not filtered\" module=global_logger \n"
        );
        reset();
        assert_eq!(level(), Level::Info);
    }
}
