//! Transaction support for target builds
//!
//! A target build first clears the paths it owns, then regenerates them.
//! If anything fails in between, the transaction removes those paths again
//! so a failed target never leaves a half-written tree behind.
//!
//! ## Usage
//!
//! ```ignore
//! let transaction = Transaction::new(target.owned_paths(root));
//! transaction.clean()?;
//!
//! // Generate output...
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // owned paths are removed
//! ```

use std::path::PathBuf;

use crate::common::fs::remove_path;
use crate::error::Result;

/// Owned outputs of one target build
#[derive(Debug)]
pub struct Transaction {
    /// Paths the target owns
    owned: Vec<PathBuf>,

    /// Whether the transaction has been committed
    committed: bool,
}

impl Transaction {
    pub fn new(owned: Vec<PathBuf>) -> Self {
        Self {
            owned,
            committed: false,
        }
    }

    pub fn owned_paths(&self) -> &[PathBuf] {
        &self.owned
    }

    /// Remove every owned path so the build starts from nothing
    pub fn clean(&self) -> Result<()> {
        for path in &self.owned {
            remove_path(path)?;
        }
        Ok(())
    }

    /// Commit the transaction (keep the outputs)
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Manually trigger a rollback
    pub fn rollback(&mut self) -> Result<()> {
        if self.committed {
            return Ok(());
        }
        self.clean()
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = self.rollback() {
                tracing::warn!("Rollback failed: {}", e);
            }
        }
    }
}
