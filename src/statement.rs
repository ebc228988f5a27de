use std::{fmt, io::Write};

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{account::Account, transaction::Transaction};

pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Read-only view over a non-empty ledger.
#[derive(Debug, Clone, Copy)]
pub struct Statement<'a> {
    account_id: &'a str,
    entries: &'a [Transaction],
    balance: Decimal,
}

#[derive(Debug, Serialize)]
struct StatementRow<'a> {
    timestamp: String,
    kind: &'static str,
    counterparty: Option<&'a str>,
    amount: String,
}

impl<'a> Statement<'a> {
    pub(crate) fn new(account: &'a Account) -> Option<Self> {
        let entries = account.transactions();
        if entries.is_empty() {
            return None;
        }
        Some(Self {
            account_id: account.id(),
            entries,
            balance: account.balance(),
        })
    }

    pub fn entries(&self) -> &'a [Transaction] {
        self.entries
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// One human-readable line per transaction, oldest first
    pub fn lines(&self) -> impl Iterator<Item = String> + 'a {
        self.entries.iter().map(|tx| {
            format!(
                "{} - {}: {:.2}",
                tx.timestamp().format(TIMESTAMP_FORMAT),
                tx.kind(),
                tx.amount()
            )
        })
    }

    /// Exports the ledger as CSV with a header row.
    pub fn write_csv<W>(&self, output: &mut W) -> anyhow::Result<()>
    where
        W: Write,
    {
        let mut writer = Writer::from_writer(output);
        for tx in self.entries {
            let row = StatementRow {
                timestamp: tx.timestamp().to_rfc3339(),
                kind: tx.kind().label(),
                counterparty: tx.kind().counterparty(),
                amount: format!("{:.2}", tx.amount()),
            };
            if let Err(err) = writer.serialize(row) {
                anyhow::bail!("Failed to write statement row: {err}")
            }
        }
        if let Err(err) = writer.flush() {
            anyhow::bail!("Failed to flush statement: {err}")
        }
        Ok(())
    }
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Statement for account {} ---", self.account_id)?;
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        write!(f, "Current balance: {:.2}", self.balance)
    }
}
