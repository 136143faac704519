mod types;

pub use types::*;

use anyhow::{Context, Result};
use log::LevelFilter;
use simple_logger::SimpleLogger;

/// `MAX_PATH` from the Win32 headers, in UTF-16 code units.
pub const MAX_PATH: usize = 260;

/// stderr is reserved for the fatal diagnostic, so only warnings and above get through.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Installs the stderr logger at `LOG_LEVEL`.
pub fn init_logger() -> Result<()> {
    SimpleLogger::new()
        .with_level(LOG_LEVEL)
        .init()
        .context("Failed to initialize logger")
}
