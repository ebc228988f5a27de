use std::{
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::Path,
};

use tracing::{info, warn};

use crate::{account::Account, transaction::validate_amount};

use super::{AccountStore, StorageError};

/// Keeps each account in its own pretty-printed JSON file.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileStore;

impl AccountStore for JsonFileStore {
    fn load(&self, source: &Path) -> Result<Account, StorageError> {
        let file = match File::open(source) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let account = Account::default();
                warn!(
                    path = %source.display(),
                    account = account.id(),
                    "account file not found, starting with a new account"
                );
                return Ok(account);
            }
            Err(source_err) => {
                return Err(StorageError::Io {
                    path: source.to_path_buf(),
                    source: source_err,
                });
            }
        };

        let account: Account =
            serde_json::from_reader(BufReader::new(file)).map_err(|err| StorageError::Format {
                path: source.to_path_buf(),
                source: err,
            })?;
        for tx in account.transactions() {
            validate_amount(tx.amount()).map_err(|err| StorageError::InvalidLedger {
                path: source.to_path_buf(),
                source: err,
            })?;
        }
        info!(
            path = %source.display(),
            account = account.id(),
            transactions = account.transactions().len(),
            "account loaded"
        );
        Ok(account)
    }

    fn save(&self, account: &Account, destination: &Path) -> Result<(), StorageError> {
        let io_err = |err| StorageError::Io {
            path: destination.to_path_buf(),
            source: err,
        };
        let file = File::create(destination).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, account).map_err(|err| {
            StorageError::Format {
                path: destination.to_path_buf(),
                source: err,
            }
        })?;
        writer.flush().map_err(io_err)?;
        info!(
            path = %destination.display(),
            account = account.id(),
            "account saved"
        );
        Ok(())
    }
}
