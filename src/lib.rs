/// Account entity and the ledger operations on it.
/// Every operation first builds a [`transaction::Transaction`], which is only
/// applied once all checks passed.
pub mod account;

/// Ledger entries and parsing of amounts typed by the user.
pub mod transaction;

/// Human-readable and CSV rendering of an account ledger.
pub mod statement;

/// Persistence interface, plus JSON file implementation.
///
/// NOTE: a single implementation exists today, the trait is the seam for
/// swapping the file format without touching the shell.
pub mod storage;

/// Interactive menu driving a session over two accounts. Lives in the library
/// so that integration tests can feed it scripted input.
pub mod shell;
