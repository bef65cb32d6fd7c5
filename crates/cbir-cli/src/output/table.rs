//! Plain text table output adapter.

use anyhow::Result;
use cbir_core::{ResultOutput, ScoredCandidate};
use std::io::{self, Write};
use std::sync::Mutex;

/// Aligned text table, one row per ranked candidate.
pub struct TableOutput {
    state: Mutex<TableState>,
}

struct TableState {
    writer: Box<dyn Write + Send>,
    header_written: bool,
}

impl TableOutput {
    /// Creates a new table output writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Creates a new table output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(TableState {
                writer,
                header_written: false,
            }),
        }
    }
}

impl ResultOutput for TableOutput {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, result: &ScoredCandidate) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        if !state.header_written {
            writeln!(state.writer, "{:>4}  {:>10}  PATH", "RANK", "SCORE")?;
            state.header_written = true;
        }
        writeln!(
            state.writer,
            "{:>4}  {:>10.6}  {}",
            result.rank, result.score, result.id
        )?;
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        state.writer.flush()?;
        Ok(())
    }
}
