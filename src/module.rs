// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module scoping.
//!
//! A module is a caller-chosen name attached to every line logged while it is on top of
//! the [`ModuleStack`]. A [`ModuleFilter`] restricts output to lines whose module is in
//! the set.
//!
//! Scopes can be managed by hand with
//! [`push_module`](crate::ModuleLogger::push_module)/[`pop_module`](crate::ModuleLogger::pop_module),
//! or with a [`ModuleGuard`] that restores the stack when it goes out of scope:
//!
//! ```rust
//! use modlog::ModuleLogger;
//!
//! let logger = ModuleLogger::new();
//! {
//!     let _scope = logger.enter_module("download");
//!     assert_eq!(logger.current_module(), "download");
//! }
//! // Back to the fallback: the stem of this source file, or the configured default.
//! assert_ne!(logger.current_module(), "download");
//! ```

use crate::ModuleLogger;
use std::collections::BTreeSet;

/// LIFO stack of module names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleStack {
    names: Vec<String>,
}

impl ModuleStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Removes the top entry. Popping an empty stack does nothing and returns `None`.
    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    pub fn top(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Drops everything above `depth`. Does nothing if the stack is already shallower.
    pub fn truncate(&mut self, depth: usize) {
        self.names.truncate(depth);
    }
}

/// Set of module names allowed through. An empty filter allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleFilter {
    names: BTreeSet<String>,
}

impl ModuleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn allows(&self, module: &str) -> bool {
        self.names.is_empty() || self.names.contains(module)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ModuleFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/**
Pops a module when dropped.

Returned by [`ModuleLogger::enter_module`]. On drop the stack is put back exactly as it
was before the matching push. Modules pushed by hand inside the scope are cleared, and
entries popped below the scope come back.
*/
#[must_use = "the module is popped as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ModuleGuard<'a> {
    logger: &'a ModuleLogger,
    saved: Option<ModuleStack>,
}

impl<'a> ModuleGuard<'a> {
    pub(crate) fn new(logger: &'a ModuleLogger, saved: ModuleStack) -> Self {
        Self {
            logger,
            saved: Some(saved),
        }
    }
}

impl Drop for ModuleGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.logger.restore_stack(saved);
        }
    }
}
