// SPDX-License-Identifier: MIT OR Apache-2.0

//! The module-aware logger.
//!
//! Every call goes through one gate:
//!
//! 1. The current module is the top of the module stack, or the fallback when the stack
//!    is empty.
//! 2. If the module filter is non-empty and does not contain that module, the line is
//!    dropped.
//! 3. If the line's level is below the threshold, the line is dropped.
//! 4. Otherwise the line is dispatched to `tracing` with `module=<current module>`
//!    attached, and comes out of the `fmt` layer as exactly one line.
//! 5. Hooks registered for the level fire once the dispatch has returned.
//!
//! Steps 1 to 3 read one consistent snapshot under the logger's mutex. The lock is
//! released before dispatch, and hooks run outside the dispatch, so a hook is free to
//! log.

use crate::config::LoggerConfig;
use crate::error::{Error, Panicked};
use crate::formatter::{FormatOptions, TextFormatter, start_clock};
use crate::hook::{Hook, HookSet};
use crate::log_record::{MODULE_FIELD, Record};
use crate::module::{ModuleFilter, ModuleGuard, ModuleStack};
use crate::output::Output;
use crate::Level;
use std::fmt::Display;
use std::io::Write;
use std::panic::Location;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::Dispatch;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;

/// `tracing` target of every event the logger dispatches.
pub const EVENT_TARGET: &str = "modlog";

macro_rules! dispatch_event {
    ($level:expr, $severity:expr, $module:expr, $message:expr) => {
        tracing::event!(
            target: EVENT_TARGET,
            $level,
            severity = $severity,
            module = $module,
            "{}",
            $message
        )
    };
}

#[derive(Debug)]
struct State {
    stack: ModuleStack,
    filter: ModuleFilter,
    level: Level,
    default_module: Option<String>,
}

impl State {
    fn from_config(config: &LoggerConfig) -> Self {
        Self {
            stack: ModuleStack::new(),
            filter: config.module_filter.iter().cloned().collect(),
            level: config.level,
            default_module: config.default_module.clone(),
        }
    }

    fn current_module<'s>(&'s self, caller: &'static Location<'static>) -> &'s str {
        match (self.stack.top(), &self.default_module) {
            (Some(top), _) => top,
            (None, Some(default)) => default.as_str(),
            (None, None) => caller_module(caller),
        }
    }

    fn admits(&self, level: Level, module: &str) -> bool {
        self.filter.allows(module) && level >= self.level
    }
}

/// The stem of the file a call came from, e.g. `log_test` for `tests/log_test.rs`.
fn caller_module(caller: &'static Location<'static>) -> &'static str {
    Path::new(caller.file())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(caller.file())
}

fn join_line(args: &[&dyn Display]) -> String {
    args.iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/**
A logger with a module stack, a module filter and a level threshold.

Construct one and pass it around, or use the process-wide instance behind
[`global`](crate::global). Every logging method is `#[track_caller]`, which is how the
fallback module is found when nothing has been pushed.

```
use modlog::{InMemoryOutput, Level, LoggerConfig, ModuleLogger};

let logger = ModuleLogger::with_config(
    LoggerConfig::default()
        .with_default_module("app")
        .with_colors(false)
        .with_timestamps(false),
);
let output = InMemoryOutput::new();
logger.set_output(output.clone());

logger.info("starting");
logger.push_module("db");
logger.warn(format_args!("{} : {}", "slow", "query"));
logger.pop_module();
logger.debug("not shown at the default level");

assert_eq!(
    output.drain_logs(),
    "level=info msg=starting module=app \n\
     level=warning msg=\"slow : query\" module=db \n"
);
```
*/
#[derive(Debug)]
pub struct ModuleLogger {
    config: LoggerConfig,
    state: Mutex<State>,
    options: Arc<FormatOptions>,
    output: Output,
    hooks: HookSet,
    dispatch: Dispatch,
}

impl Default for ModuleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLogger {
    /// Logs to stderr at [`Level::Info`] with colors and timestamps.
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    pub fn with_config(config: LoggerConfig) -> Self {
        start_clock();
        let options = Arc::new(FormatOptions::new(config.colors, config.timestamps));
        let output = Output::stderr();
        let hooks = HookSet::default();
        let subscriber = Registry::default().with(
            tracing_subscriber::fmt::layer()
                .event_format(TextFormatter::shared(options.clone()))
                .with_writer(output.clone()),
        );
        Self {
            state: Mutex::new(State::from_config(&config)),
            config,
            options,
            output,
            hooks,
            dispatch: Dispatch::new(subscriber),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Puts the logger back the way [`Self::with_config`] left it: stderr, the configured
    /// level, filter and formatting, an empty stack and no hooks.
    pub fn reset(&self) {
        *self.lock_state() = State::from_config(&self.config);
        self.options.set_colors(self.config.colors);
        self.options.set_timestamps(self.config.timestamps);
        self.output.replace(Box::new(std::io::stderr()));
        self.hooks.clear();
    }

    // ---- modules ----

    /// Pushes `name`. Lines logged from now until the matching pop are tagged with it.
    pub fn push_module(&self, name: impl Into<String>) {
        self.lock_state().stack.push(name);
    }

    /**
    Pops the current module.

    Popping an empty stack does nothing and returns `None`; the fallback module stays
    active.
    */
    pub fn pop_module(&self) -> Option<String> {
        self.lock_state().stack.pop()
    }

    /// Pushes `name` and returns a guard that puts the stack back as it was when dropped.
    pub fn enter_module(&self, name: impl Into<String>) -> ModuleGuard<'_> {
        let mut state = self.lock_state();
        let saved = state.stack.clone();
        state.stack.push(name);
        ModuleGuard::new(self, saved)
    }

    pub(crate) fn restore_stack(&self, saved: ModuleStack) {
        self.lock_state().stack = saved;
    }

    /// The module a line logged from here would be tagged with.
    #[track_caller]
    pub fn current_module(&self) -> String {
        self.lock_state()
            .current_module(Location::caller())
            .to_string()
    }

    /// Replaces the module filter. An empty set turns filtering off.
    pub fn set_module_filter<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock_state().filter = names.into_iter().collect();
    }

    pub fn module_filter(&self) -> ModuleFilter {
        self.lock_state().filter.clone()
    }

    // ---- level ----

    pub fn set_level(&self, level: Level) {
        self.lock_state().level = level;
    }

    pub fn level(&self) -> Level {
        self.lock_state().level
    }

    /// Whether a line at `level` logged from here would be written right now.
    #[track_caller]
    pub fn enabled(&self, level: Level) -> bool {
        let state = self.lock_state();
        let module = state.current_module(Location::caller());
        state.admits(level, module)
    }

    // ---- output ----

    /// Sends lines to `writer` from now on. The previous writer is flushed and dropped.
    pub fn set_output<W: Write + Send + 'static>(&self, writer: W) {
        self.output.replace(Box::new(writer));
    }

    pub fn set_colors(&self, enabled: bool) {
        self.options.set_colors(enabled);
    }

    pub fn colors(&self) -> bool {
        self.options.colors()
    }

    pub fn set_timestamps(&self, enabled: bool) {
        self.options.set_timestamps(enabled);
    }

    pub fn timestamps(&self) -> bool {
        self.options.timestamps()
    }

    pub fn add_hook(&self, hook: Arc<dyn Hook>) {
        self.hooks.add(hook);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /**
    Mirrors lines to the local syslog, without colors.

    Fails with [`Error::SyslogUnavailable`] when there is no syslog to talk to. That is
    normal in containers and on some CI machines; treat it as optional:

    ```
    let logger = modlog::ModuleLogger::new();
    if let Err(err) = logger.add_syslog_hook() {
        logger.info(format_args!("continuing without syslog: {err}"));
    }
    ```
    */
    pub fn add_syslog_hook(&self) -> Result<(), Error> {
        #[cfg(unix)]
        {
            let hook = crate::syslog_hook::SyslogHook::connect()?;
            self.add_hook(Arc::new(hook));
            Ok(())
        }
        #[cfg(not(unix))]
        {
            Err(Error::SyslogUnavailable(
                "syslog is only supported on unix".to_string(),
            ))
        }
    }

    // ---- the gate ----

    /// Runs the module filter and level threshold against one snapshot of the state.
    ///
    /// Returns the current module, and whether the line should be written.
    fn admit(&self, level: Level, caller: &'static Location<'static>) -> (String, bool) {
        let state = self.lock_state();
        let module = state.current_module(caller);
        (module.to_string(), state.admits(level, module))
    }

    fn log_at(&self, level: Level, message: &dyn Display, caller: &'static Location<'static>) {
        let (module, admitted) = self.admit(level, caller);
        if admitted {
            self.emit(level, &message.to_string(), &module);
        }
    }

    fn emit(&self, level: Level, message: &str, module: &str) {
        let severity = level.as_str();
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            Level::Debug => dispatch_event!(tracing::Level::DEBUG, severity, module, message),
            Level::Info => dispatch_event!(tracing::Level::INFO, severity, module, message),
            Level::Warning => dispatch_event!(tracing::Level::WARN, severity, module, message),
            Level::Error | Level::Panic | Level::Fatal => {
                dispatch_event!(tracing::Level::ERROR, severity, module, message)
            }
        });
        // Hooks run after the dispatch is done with this thread, so they can log.
        if !self.hooks.is_empty() {
            self.hooks
                .fire(&Record::new(level, message).with_field(MODULE_FIELD, module));
        }
    }

    fn panic_at(&self, message: String, caller: &'static Location<'static>) -> Panicked {
        let (module, admitted) = self.admit(Level::Panic, caller);
        if admitted {
            self.emit(Level::Panic, &message, &module);
        }
        Panicked {
            level: Level::Panic,
            module,
            message,
        }
    }

    fn fatal_at(&self, message: &dyn Display, caller: &'static Location<'static>) -> ! {
        self.log_at(Level::Fatal, message, caller);
        self.output.flush();
        std::process::exit(1)
    }

    /// Logs `message` at `level`.
    #[track_caller]
    pub fn log(&self, level: Level, message: impl Display) {
        self.log_at(level, &message, Location::caller());
    }

    /// Logs `args` joined by single spaces at `level`.
    #[track_caller]
    pub fn logln(&self, level: Level, args: &[&dyn Display]) {
        self.log_at(level, &join_line(args), Location::caller());
    }

    /// Same as [`Self::info`].
    #[track_caller]
    pub fn print(&self, message: impl Display) {
        self.log_at(Level::Info, &message, Location::caller());
    }

    #[track_caller]
    pub fn println(&self, args: &[&dyn Display]) {
        self.log_at(Level::Info, &join_line(args), Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.log_at(Level::Debug, &message, Location::caller());
    }

    #[track_caller]
    pub fn debugln(&self, args: &[&dyn Display]) {
        self.log_at(Level::Debug, &join_line(args), Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.log_at(Level::Info, &message, Location::caller());
    }

    #[track_caller]
    pub fn infoln(&self, args: &[&dyn Display]) {
        self.log_at(Level::Info, &join_line(args), Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: impl Display) {
        self.log_at(Level::Warning, &message, Location::caller());
    }

    #[track_caller]
    pub fn warnln(&self, args: &[&dyn Display]) {
        self.log_at(Level::Warning, &join_line(args), Location::caller());
    }

    /// Same as [`Self::warn`].
    #[track_caller]
    pub fn warning(&self, message: impl Display) {
        self.log_at(Level::Warning, &message, Location::caller());
    }

    #[track_caller]
    pub fn warningln(&self, args: &[&dyn Display]) {
        self.log_at(Level::Warning, &join_line(args), Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.log_at(Level::Error, &message, Location::caller());
    }

    #[track_caller]
    pub fn errorln(&self, args: &[&dyn Display]) {
        self.log_at(Level::Error, &join_line(args), Location::caller());
    }

    /**
    Logs at [`Level::Panic`] and returns the fault for the caller to raise.

    The line is written first. The fault is returned even when the filter or threshold
    kept the line out.
    */
    #[track_caller]
    pub fn panic(&self, message: impl Display) -> Panicked {
        self.panic_at(message.to_string(), Location::caller())
    }

    #[track_caller]
    pub fn panicln(&self, args: &[&dyn Display]) -> Panicked {
        self.panic_at(join_line(args), Location::caller())
    }

    /// Logs at [`Level::Fatal`], flushes the output and exits the process with status 1.
    #[track_caller]
    pub fn fatal(&self, message: impl Display) -> ! {
        self.fatal_at(&message, Location::caller())
    }

    #[track_caller]
    pub fn fatalln(&self, args: &[&dyn Display]) -> ! {
        self.fatal_at(&join_line(args), Location::caller())
    }
}
