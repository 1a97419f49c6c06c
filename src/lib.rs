// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# modlog

modlog is a logging façade that tags every line with the module it came from, and lets
you turn whole modules on or off at runtime.

# The problem

A level threshold is a blunt tool. When one subsystem misbehaves you want its debug
output, not the debug output of everything else in the process. modlog keeps a *module
stack*: whatever is on top is the module every line is tagged with. A *module filter*
then decides which modules get to write at all.

# The gate

Every logging call asks three questions, in order:

1. Which module is current? The top of the stack, or the fallback when the stack is
   empty. The fallback is the configured default module, or else the stem of the source
   file the call was made from (`tests/log_test.rs` logs as `log_test`).
2. Is the filter empty, or does it name that module?
3. Is the line's level at or above the threshold?

A line that passes is written as exactly one line, in a `key=value` layout:

```text
level=info msg="listening on 8080" module=net
```

or, on a terminal with colors on, `INFO[0003] listening on 8080   module=net`.

# Levels

| Level   | Notes                                                            |
|---------|------------------------------------------------------------------|
| debug   |                                                                  |
| info    | The default threshold. `print` and `println` log here.           |
| warning | `warn` and `warning` are the same thing.                         |
| error   |                                                                  |
| panic   | Returns a [`Panicked`] fault after writing the line.             |
| fatal   | Flushes the output and exits the process with status 1.          |

# The API

```
use modlog::Level;

modlog::set_output(std::io::sink());
modlog::set_level(Level::Debug);

modlog::push_module("db");
modlog::debug("connecting");
modlog::info!("{} rows", 42);
modlog::pop_module();

{
    let _scope = modlog::enter_module("cache");
    modlog::warn("cold start");
}

modlog::set_module_filter(["db"]);
modlog::info("dropped: the current module is not in the filter");
# modlog::reset();
```

The free functions and macros use the process-wide logger from [`global`]. Build your
own [`ModuleLogger`] when one component needs its own stack, filter or output.

# Hooks

A [`Hook`] sees every line that passes the gate. [`add_syslog_hook`] installs one that
mirrors lines to the local syslog on unix.

# Configuration

[`LoggerConfig::from_env`] reads `MODLOG_LEVEL`, `MODLOG_MODULES` and `NO_COLOR`. It
fails only when `MODLOG_LEVEL` does not name a level:

```
let config = modlog::LoggerConfig::from_env().unwrap_or_default();
let logger = modlog::ModuleLogger::with_config(config);
# logger.set_output(std::io::sink());
logger.info("configured from the environment");
```

# Multithreading

A [`ModuleLogger`] is `Send + Sync`. Each call reads the stack, filter and level as one
consistent snapshot, and each line reaches the output whole. The stack is shared, not
per-thread: give concurrent components their own logger if they push modules.
*/

mod config;
mod error;
mod formatter;
mod global_logger;
mod hook;
mod inmemory_output;
mod level;
mod log_record;
mod logger;
mod macros;
mod module;
mod output;
#[cfg(unix)]
mod syslog_hook;

pub use config::{LEVEL_VAR, LoggerConfig, MODULES_VAR, NO_COLOR_VAR};
pub use error::{Error, Panicked};
pub use formatter::TextFormatter;
pub use global_logger::{
    add_hook, add_syslog_hook, current_module, debug, debugln, enabled, enter_module, error,
    errorln, fatal, fatalln, global, info, infoln, init_global, level, log, logln,
    module_filter, panic, panicln, pop_module, print, println, push_module, reset, set_colors,
    set_level, set_module_filter, set_output, set_timestamps, warn, warning, warningln, warnln,
};
pub use hook::Hook;
pub use inmemory_output::InMemoryOutput;
pub use level::Level;
pub use log_record::{MODULE_FIELD, Record};
pub use logger::{EVENT_TARGET, ModuleLogger};
pub use module::{ModuleFilter, ModuleGuard, ModuleStack};
#[cfg(unix)]
pub use syslog_hook::SyslogHook;
