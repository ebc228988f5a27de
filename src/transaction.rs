use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{AccountError, AccountId};

/// Amounts are kept in cents, anything finer is rejected.
pub const MAX_AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferOut { destination: AccountId },
    TransferIn { source: AccountId },
}

impl TransactionKind {
    /// Credits add to the balance, everything else is a debit.
    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn { .. })
    }

    pub fn counterparty(&self) -> Option<&str> {
        match self {
            Self::TransferOut { destination } => Some(destination),
            Self::TransferIn { source } => Some(source),
            Self::Deposit | Self::Withdrawal => None,
        }
    }

    /// Stable machine-readable name, matches the serialized `type` tag
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::TransferOut { .. } => "transfer_out",
            Self::TransferIn { .. } => "transfer_in",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => f.write_str("Deposit"),
            Self::Withdrawal => f.write_str("Withdrawal"),
            Self::TransferOut { destination } => write!(f, "Transfer to {destination}"),
            Self::TransferIn { source } => write!(f, "Transfer from {source}"),
        }
    }
}

/// Single ledger entry. There is no way to change it once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    timestamp: DateTime<Utc>,
    kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
}

impl Transaction {
    pub(crate) fn new(kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            amount,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Checks that `amount` is strictly positive and has at most two decimal places.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, AccountError> {
    if amount <= Decimal::ZERO || amount.normalize().scale() > MAX_AMOUNT_SCALE {
        return Err(AccountError::InvalidAmount {
            input: amount.to_string(),
        });
    }
    Ok(amount)
}

/// Parses an amount typed by the user
pub fn parse_amount(raw: &str) -> Result<Decimal, AccountError> {
    let input = raw.trim();
    let amount = Decimal::from_str(input).map_err(|_| AccountError::InvalidAmount {
        input: input.to_owned(),
    })?;
    validate_amount(amount).map_err(|_| AccountError::InvalidAmount {
        input: input.to_owned(),
    })
}
