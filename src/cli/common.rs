//! Shared CLI plumbing: error type, exit codes and the per-invocation context.

use crate::config::Config;
use crate::persistence::{FileStore, PersistenceAdapter};
use crate::store::ConfiguratorStore;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded
    Success = 0,
    /// Input was understood but rejected (invalid placement, unknown id, ...)
    ValidationError = 1,
    /// Reading or writing files failed
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Kind of CLI failure, deciding the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Rejected input
    Validation,
    /// File system or serialization failure
    Io,
}

/// Error reported to the user with a message and an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure kind
    pub kind: CliErrorKind,
    /// Human-readable message
    pub message: String,
}

impl CliError {
    /// Rejected input (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationError,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of CLI handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Configuration and data location shared by all commands of one invocation.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Loaded application configuration
    pub config: Config,
    /// Directory holding the saved configurator state
    pub data_dir: PathBuf,
}

impl CliContext {
    /// Loads the configuration; `data_dir` overrides `[paths] data_dir`.
    pub fn load(data_dir: Option<&Path>) -> CliResult<Self> {
        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => config
                .data_dir()
                .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?,
        };
        Ok(Self { config, data_dir })
    }

    /// Opens the persisted configurator.
    pub fn open_store(&self) -> CliResult<ConfiguratorStore> {
        let catalog = self
            .config
            .catalog()
            .map_err(|e| CliError::io(format!("Failed to load catalog: {e:#}")))?;
        let grid = self
            .config
            .default_grid()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        let adapter = PersistenceAdapter::new(FileStore::new(&self.data_dir));
        Ok(ConfiguratorStore::with_persistence(catalog, grid, adapter))
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
