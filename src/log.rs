//! Logging context.
//!
//! A [`LogContext`] is built once from configuration and handed to the
//! components that log. Records go out through `tracing`; the context only
//! decides which levels are emitted.

use serde::Deserialize;

use crate::config::MachineConfig;

/// Maximum verbosity the firmware emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Informational messages and warnings.
    #[default]
    Info,
    /// Per-command debugging.
    Debug,
    /// Per-event tracing.
    Verbose,
}

/// Verbosity gate passed to logging components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogContext {
    verbosity: Verbosity,
}

impl LogContext {
    /// Create a context with the given verbosity.
    pub const fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Context that suppresses everything but errors.
    pub const fn quiet() -> Self {
        Self::new(Verbosity::Quiet)
    }

    /// Build from the `[logging]` section.
    pub fn from_config(config: &MachineConfig) -> Self {
        Self::new(config.logging.verbosity)
    }

    /// Configured verbosity.
    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Info and warning records are emitted.
    #[inline]
    pub fn info_enabled(&self) -> bool {
        self.verbosity >= Verbosity::Info
    }

    /// Debug records are emitted.
    #[inline]
    pub fn debug_enabled(&self) -> bool {
        self.verbosity >= Verbosity::Debug
    }

    /// Verbose (trace) records are emitted.
    #[inline]
    pub fn verbose_enabled(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }
}

macro_rules! log_error {
    ($ctx:expr, $($arg:tt)+) => {{
        let _ = &$ctx;
        ::tracing::error!($($arg)+)
    }};
}

macro_rules! log_warn {
    ($ctx:expr, $($arg:tt)+) => {
        if $ctx.info_enabled() {
            ::tracing::warn!($($arg)+)
        }
    };
}

macro_rules! log_info {
    ($ctx:expr, $($arg:tt)+) => {
        if $ctx.info_enabled() {
            ::tracing::info!($($arg)+)
        }
    };
}

macro_rules! log_debug {
    ($ctx:expr, $($arg:tt)+) => {
        if $ctx.debug_enabled() {
            ::tracing::debug!($($arg)+)
        }
    };
}

macro_rules! log_verbose {
    ($ctx:expr, $($arg:tt)+) => {
        if $ctx.verbose_enabled() {
            ::tracing::trace!($($arg)+)
        }
    };
}

pub(crate) use {log_debug, log_error, log_info, log_verbose, log_warn};
