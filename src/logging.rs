//! Logging setup for the `log` facade.
//!
//! The library itself only emits through `log::{debug, warn}`. Binaries call
//! [`log_init`] once to install an `env_logger` stderr sink filtered by
//! [`LogLevel`].

use log::{Level, LevelFilter};

/// Verbosity levels, ordered from silent to everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::Off,
            LogLevel::User | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }

    fn to_level(self) -> Option<Level> {
        match self {
            LogLevel::Nothing => None,
            LogLevel::User | LogLevel::Error => Some(Level::Error),
            LogLevel::Warning => Some(Level::Warn),
            LogLevel::Info => Some(Level::Info),
            LogLevel::Debug => Some(Level::Debug),
            LogLevel::All => Some(Level::Trace),
        }
    }
}

/// Install the stderr logger at the given level.
///
/// Returns `false` if a logger was already installed.
pub fn log_init(level: LogLevel) -> bool {
    env_logger::Builder::new()
        .filter_level(level.to_filter())
        .try_init()
        .is_ok()
}

/// Add a log entry at the given level.
pub fn log_add(level: LogLevel, message: &str) {
    if let Some(level) = level.to_level() {
        log::log!(target: "rasterkit", level, "{}", message);
    }
}

/// Convenience macro for fatal errors
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::User, &format!($($arg)*))
    };
}

/// Convenience macro for errors
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

/// Convenience macro for warnings
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Warning, &format!($($arg)*))
    };
}

/// Convenience macro for info messages
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

/// Convenience macro for debug messages
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_add($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_i32() {
        assert_eq!(LogLevel::from_i32(0), LogLevel::Nothing);
        assert_eq!(LogLevel::from_i32(1), LogLevel::User);
        assert_eq!(LogLevel::from_i32(2), LogLevel::Error);
        assert_eq!(LogLevel::from_i32(3), LogLevel::Warning);
        assert_eq!(LogLevel::from_i32(4), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(5), LogLevel::Debug);
        assert_eq!(LogLevel::from_i32(6), LogLevel::All);
    }

    #[test]
    fn test_log_level_as_i32() {
        assert_eq!(LogLevel::Nothing.as_i32(), 0);
        assert_eq!(LogLevel::Warning.as_i32(), 3);
        assert_eq!(LogLevel::All.as_i32(), 6);
    }

    #[test]
    fn test_log_level_invalid() {
        // Invalid values should default to Info
        assert_eq!(LogLevel::from_i32(100), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(-1), LogLevel::Info);
    }

    #[test]
    fn test_log_level_filters() {
        assert_eq!(LogLevel::Nothing.to_filter(), LevelFilter::Off);
        assert_eq!(LogLevel::User.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warning.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::All.to_filter(), LevelFilter::Trace);
    }

    #[test]
    fn test_log_macros() {
        log_info!("Info message: {}", 42);
        log_error!("Error code: {}", -1);
        log_warning!("Warning!");
        log_debug!("Debug info");
        log_fatal!("Fatal error");
        log_add(LogLevel::Nothing, "dropped");
    }

    #[test]
    fn test_log_init_only_installs_once() {
        log_init(LogLevel::Debug);
        assert!(!log_init(LogLevel::Info));
        log_debug!("after init");
    }
}
