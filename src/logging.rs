// Logger setup plus conditional logging macros that are only active in debug builds

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Filter used when `RUST_LOG` is unset. Stderr shares the terminal with
    /// the line interface, so it only gets warnings.
    #[must_use]
    pub fn default_filter(&self) -> &'static str {
        match self {
            Self::Stderr => "warn",
            Self::File(_) => "info",
        }
    }
}

/// Default log file used by the TUI, so log lines never draw over the screen.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("lexiguess").join("lexiguess.log"))
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global `env_logger`. `RUST_LOG` overrides the target's default filter.
pub fn init_logging(target: LogTarget) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(target.default_filter()));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    builder
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("lexiguess_log_test").join("nested");
        let path = dir.join("game.log");
        let _ = fs::remove_dir_all(&dir);

        let file = open_log_file(&path);
        assert!(file.is_ok());
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_filter_per_target() {
        assert_eq!(LogTarget::Stderr.default_filter(), "warn");
        assert_eq!(
            LogTarget::File(PathBuf::from("game.log")).default_filter(),
            "info"
        );
    }

    #[test]
    fn test_default_log_path_file_name() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("lexiguess/lexiguess.log"));
        }
    }
}
