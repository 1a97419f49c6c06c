// SPDX-License-Identifier: MIT OR Apache-2.0

//! Logger configuration.
//!
//! Everything here can also be changed on a live logger; the config only decides the
//! starting point and what [`ModuleLogger::reset`](crate::ModuleLogger::reset) returns to.

use crate::error::Error;
use crate::Level;

/// Variable holding the level threshold, e.g. `MODLOG_LEVEL=debug`.
pub const LEVEL_VAR: &str = "MODLOG_LEVEL";
/// Variable holding a comma-separated module filter, e.g. `MODLOG_MODULES=net,disk`.
pub const MODULES_VAR: &str = "MODLOG_MODULES";
/// Any non-empty value turns colors off. See <https://no-color.org>.
pub const NO_COLOR_VAR: &str = "NO_COLOR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Module used when the stack is empty. `None` means the stem of the calling source
    /// file, so a call from `src/net.rs` is tagged `module=net`.
    pub default_module: Option<String>,
    pub level: Level,
    pub module_filter: Vec<String>,
    pub colors: bool,
    pub timestamps: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_module: None,
            level: Level::Info,
            module_filter: Vec::new(),
            colors: true,
            timestamps: true,
        }
    }
}

impl LoggerConfig {
    pub fn with_default_module(mut self, name: impl Into<String>) -> Self {
        self.default_module = Some(name.into());
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_module_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.module_filter = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// Defaults overridden by `MODLOG_LEVEL`, `MODLOG_MODULES` and `NO_COLOR`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup(LEVEL_VAR).filter(|v| !v.trim().is_empty()) {
            config.level = level.parse()?;
        }
        if let Some(modules) = lookup(MODULES_VAR) {
            config.module_filter = modules
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        if lookup(NO_COLOR_VAR).is_some_and(|v| !v.is_empty()) {
            config.colors = false;
        }
        Ok(config)
    }
}
