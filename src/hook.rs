// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secondary output paths.
//!
//! A [`Hook`] receives every record the logger emits at one of the hook's levels, after
//! the module filter and level threshold have let it through. The syslog mirror is a
//! hook; tests can register their own.

use crate::error::Error;
use crate::log_record::Record;
use crate::Level;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

pub trait Hook: Debug + Send + Sync {
    /// Levels this hook wants to see. Defaults to all of them.
    fn levels(&self) -> &[Level] {
        Level::ALL
    }

    /**
    Called once for each emitted record at one of [`Self::levels`].

    An error is reported on stderr and does not stop the primary output or other hooks.
    */
    fn fire(&self, record: &Record) -> Result<(), Error>;
}

/// The hooks registered on one logger.
#[derive(Debug, Clone, Default)]
pub(crate) struct HookSet {
    hooks: Arc<Mutex<Vec<Arc<dyn Hook>>>>,
}

impl HookSet {
    pub(crate) fn add(&self, hook: Arc<dyn Hook>) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hook);
    }

    pub(crate) fn clear(&self) {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Clones the current hooks so none of them run under the lock.
    fn snapshot(&self) -> Vec<Arc<dyn Hook>> {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fires every hook registered for the record's level.
    ///
    /// Runs outside the `tracing` dispatch, so a hook may log through any logger,
    /// including the one it is registered on.
    pub(crate) fn fire(&self, record: &Record) {
        for hook in self
            .snapshot()
            .iter()
            .filter(|hook| hook.levels().contains(&record.level()))
        {
            if let Err(err) = hook.fire(record) {
                eprintln!("Failed to fire hook: {err}");
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn len(&self) -> usize {
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryOutput, ModuleLogger};

    #[derive(Debug, Default)]
    struct Recording {
        seen: Mutex<Vec<(Level, String, Option<String>)>>,
    }

    impl Hook for Recording {
        fn levels(&self) -> &[Level] {
            &[Level::Warning, Level::Error]
        }

        fn fire(&self, record: &Record) -> Result<(), Error> {
            self.seen.lock().unwrap().push((
                record.level(),
                record.message().to_string(),
                record.module().map(str::to_string),
            ));
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Hook for Failing {
        fn fire(&self, _record: &Record) -> Result<(), Error> {
            Err(Error::SyslogWrite("unplugged".to_string()))
        }
    }

    fn quiet_logger() -> (ModuleLogger, InMemoryOutput) {
        let logger = ModuleLogger::new();
        let output = InMemoryOutput::new();
        logger.set_output(output.clone());
        logger.set_colors(false);
        logger.set_timestamps(false);
        logger.set_level(Level::Debug);
        (logger, output)
    }

    #[test]
    fn hooks_see_only_their_levels() {
        let (logger, output) = quiet_logger();
        let hook = Arc::new(Recording::default());
        logger.add_hook(hook.clone());

        logger.debug("quiet");
        logger.push_module("disk");
        logger.warn("almost full");
        logger.pop_module();
        logger.error("full");

        let seen = hook.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![
                (Level::Warning, "almost full".to_string(), Some("disk".to_string())),
                (Level::Error, "full".to_string(), Some("hook".to_string())),
            ]
        );
        assert_eq!(output.drain_logs().lines().count(), 3);
    }

    #[test]
    fn hooks_do_not_see_gated_lines() {
        let (logger, _output) = quiet_logger();
        let hook = Arc::new(Recording::default());
        logger.add_hook(hook.clone());

        logger.set_module_filter(["elsewhere"]);
        logger.error("filtered");
        logger.set_module_filter(Vec::<String>::new());
        logger.set_level(Level::Fatal);
        logger.error("below threshold");

        assert!(hook.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn failing_hook_does_not_stop_output() {
        let (logger, output) = quiet_logger();
        logger.add_hook(Arc::new(Failing));
        logger.info("still here");
        assert_eq!(output.drain_logs(), "level=info msg=\"still here\" module=hook \n");
    }

    #[derive(Debug)]
    struct Relog(Arc<ModuleLogger>);

    impl Hook for Relog {
        fn levels(&self) -> &[Level] {
            &[Level::Error]
        }

        fn fire(&self, record: &Record) -> Result<(), Error> {
            self.0.warn(format_args!("saw {}", record.message()));
            Ok(())
        }
    }

    #[test]
    fn hook_can_log_through_its_own_logger() {
        let (logger, output) = quiet_logger();
        let logger = Arc::new(logger);
        logger.add_hook(Arc::new(Relog(logger.clone())));

        logger.error("boom");

        assert_eq!(
            output.drain_logs(),
            "level=error msg=boom module=hook \n\
             level=warning msg=\"saw boom\" module=hook \n"
        );
        logger.reset();
    }
}
