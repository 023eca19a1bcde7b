// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

use super::tracing_init;

pub const DEFAULT_LOG_FILE_PATH: &str = "select_virtualized_log.txt";

/// Configure the tracing logging. You can send the logs to:
/// 1. a file,
/// 2. stdout or stderr,
/// 3. both.
///
/// Use [`TracingConfig::install_global`] once at the start of a program (the `vselect`
/// binary does this), or [`TracingConfig::install_thread_local`] in tests.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// - `String` is the path of the log file. Eg: `/tmp/vselect.log`.
/// - [`DisplayPreference`] is where on the terminal the logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String /* log file path */),
    DisplayAndFile(DisplayPreference, String /* log file path */),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file(maybe_file_path: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                maybe_file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn new_file_and_display(
        maybe_file_path: Option<String>,
        preferred_display: DisplayPreference,
    ) -> Self {
        Self {
            writer_config: WriterConfig::DisplayAndFile(
                preferred_display,
                maybe_file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Install the subscriber for the whole process. Fails if a global subscriber was
    /// already installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be opened or a global subscriber is
    /// already set.
    pub fn install_global(self) -> miette::Result<()> {
        tracing_init::try_initialize_logging_global(self)
    }

    /// Install the subscriber for the current thread only. Logging stops when the
    /// returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file can't be opened.
    pub fn install_thread_local(
        self,
    ) -> miette::Result<tracing::subscriber::DefaultGuard> {
        tracing_init::try_initialize_logging_thread_local(self)
    }
}
