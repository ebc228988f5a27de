use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::account::{Account, AccountError};

pub mod json_file;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed account data in `{}`", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid ledger entry in `{}`", .path.display())]
    InvalidLedger {
        path: PathBuf,
        #[source]
        source: AccountError,
    },
}

pub trait AccountStore {
    /// Missing `source` is not an error, a default account is returned instead.
    fn load(&self, source: &Path) -> Result<Account, StorageError>;

    /// Replaces whatever `destination` held before.
    fn save(&self, account: &Account, destination: &Path) -> Result<(), StorageError>;
}
