//! Keygen command handler
//!
//! Prints freshly generated API keys without touching the database.

use std::io::Write;

use crate::services::notify::generate_api_key;

/// Handler for the keygen command
pub struct KeygenCommandHandler {
    count: u32,
}

impl KeygenCommandHandler {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    /// Write `count` keys, one per line
    pub fn write_keys<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for _ in 0..self.count {
            writeln!(out, "{}", generate_api_key())?;
        }
        out.flush()
    }

    pub fn execute(&self) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        self.write_keys(&mut stdout.lock())?;
        tracing::debug!(count = self.count, "Generated API keys");
        Ok(())
    }
}
