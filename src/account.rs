use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    statement::Statement,
    transaction::{Transaction, TransactionKind, validate_amount},
};

pub type AccountId = String;

/// Identifier given to an account that could not be loaded from storage.
pub const DEFAULT_ACCOUNT_ID: &str = "00000-0";

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid amount `{input}`, expected a positive number with at most two decimal places")]
    InvalidAmount { input: String },
    #[error("Insufficient funds: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Invalid destination account: {reason}")]
    InvalidDestination { reason: String },
    #[error("Amount is too large for this account")]
    AmountOverflow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    balance: Decimal,
    transactions: Vec<Transaction>,
}

impl Default for Account {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT_ID)
    }
}

impl Account {
    pub fn new(id: impl Into<AccountId>) -> Self {
        Self {
            id: id.into(),
            balance: Decimal::ZERO,
            transactions: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rename(&mut self, id: impl Into<AccountId>) {
        self.id = id.into();
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Ledger in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Returns `None` when no transactions were made yet.
    pub fn statement(&self) -> Option<Statement<'_>> {
        Statement::new(self)
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<&Transaction, AccountError> {
        let tx = self.handle_credit(TransactionKind::Deposit, amount)?;
        Ok(self.apply(tx))
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<&Transaction, AccountError> {
        let tx = self.handle_debit(TransactionKind::Withdrawal, amount)?;
        Ok(self.apply(tx))
    }

    /// Moves `amount` to `destination`.
    ///
    /// Both sides are validated before either account is touched, so on error
    /// neither balance nor ledger changes.
    pub fn transfer(
        &mut self,
        destination: &mut Account,
        amount: Decimal,
    ) -> Result<&Transaction, AccountError> {
        validate_amount(amount)?;
        if destination.id.is_empty() {
            return Err(AccountError::InvalidDestination {
                reason: "destination account has no identifier".to_string(),
            });
        }
        if destination.id == self.id {
            return Err(AccountError::InvalidDestination {
                reason: format!("cannot transfer from account {} to itself", self.id),
            });
        }

        let debit = self.handle_debit(
            TransactionKind::TransferOut {
                destination: destination.id.clone(),
            },
            amount,
        )?;
        let credit = destination.handle_credit(
            TransactionKind::TransferIn {
                source: self.id.clone(),
            },
            amount,
        )?;
        destination.apply(credit);
        Ok(self.apply(debit))
    }

    fn handle_credit(
        &self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Transaction, AccountError> {
        let amount = validate_amount(amount)?;
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::AmountOverflow)?;
        Ok(Transaction::new(kind, amount))
    }

    fn handle_debit(
        &self,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<Transaction, AccountError> {
        let amount = validate_amount(amount)?;
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(Transaction::new(kind, amount))
    }

    /// Appends an already validated transaction, no further checks happen here.
    fn apply(&mut self, tx: Transaction) -> &Transaction {
        if tx.kind().is_credit() {
            self.balance += tx.amount();
        } else {
            self.balance -= tx.amount();
        }
        debug!(
            account = %self.id,
            kind = tx.kind().label(),
            amount = %tx.amount(),
            balance = %self.balance,
            "transaction applied"
        );
        self.transactions.push(tx);
        &self.transactions[self.transactions.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn funded(id: &str, amount: &str) -> Account {
        let mut acc = Account::new(id);
        acc.deposit(dec(amount)).unwrap();
        acc
    }

    #[test]
    fn default_account() {
        let acc = Account::default();
        assert_eq!(acc.id(), DEFAULT_ACCOUNT_ID);
        assert_eq!(acc.balance(), Decimal::ZERO);
        assert!(acc.transactions().is_empty());
        assert!(acc.statement().is_none());
    }

    #[test]
    fn deposit() {
        let mut acc = Account::new("12345-X");
        let tx = acc.deposit(dec("50.00")).unwrap();
        assert_eq!(tx.amount(), dec("50"));
        assert_eq!(tx.kind(), &TransactionKind::Deposit);
        assert_eq!(acc.balance(), dec("50"));
        assert_eq!(acc.transactions().len(), 1);

        for amount in [Decimal::ZERO, dec("-1"), dec("0.001")] {
            let err = acc.deposit(amount).unwrap_err();
            assert!(matches!(err, AccountError::InvalidAmount { .. }));
        }
        assert_eq!(acc.balance(), dec("50"));
        assert_eq!(acc.transactions().len(), 1);
    }

    #[test]
    fn withdraw() {
        let mut acc = funded("12345-X", "100");
        let tx = acc.withdraw(dec("30.50")).unwrap();
        assert_eq!(tx.kind(), &TransactionKind::Withdrawal);
        assert_eq!(acc.balance(), dec("69.50"));

        let err = acc.withdraw(dec("69.51")).unwrap_err();
        assert!(matches!(
            err,
            AccountError::InsufficientFunds { requested, available }
                if requested == dec("69.51") && available == dec("69.5")
        ));
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested 69.51, available 69.50"
        );
        assert_eq!(acc.balance(), dec("69.50"));
        assert_eq!(acc.transactions().len(), 2);

        // emptying the account is allowed
        acc.withdraw(dec("69.50")).unwrap();
        assert_eq!(acc.balance(), Decimal::ZERO);

        let err = acc.withdraw(Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AccountError::InvalidAmount { .. }));
    }

    #[test]
    fn transfer() {
        let mut source = funded("12345-X", "100");
        let mut destination = Account::new("54321-Y");

        let tx = source.transfer(&mut destination, dec("40")).unwrap();
        assert_eq!(
            tx.kind(),
            &TransactionKind::TransferOut {
                destination: "54321-Y".to_string()
            }
        );
        assert_eq!(source.balance(), dec("60"));
        assert_eq!(destination.balance(), dec("40"));
        assert_eq!(source.transactions().len(), 2);
        assert_eq!(destination.transactions().len(), 1);
        assert_eq!(
            destination.transactions()[0].kind(),
            &TransactionKind::TransferIn {
                source: "12345-X".to_string()
            }
        );
        assert_eq!(destination.transactions()[0].amount(), dec("40"));
    }

    #[test]
    fn rejected_transfer_leaves_both_accounts_untouched() {
        let mut source = funded("12345-X", "100");
        let mut destination = funded("54321-Y", "5");

        let err = source.transfer(&mut destination, dec("100.01")).unwrap_err();
        assert!(matches!(err, AccountError::InsufficientFunds { .. }));

        let err = source.transfer(&mut destination, dec("-3")).unwrap_err();
        assert!(matches!(err, AccountError::InvalidAmount { .. }));

        let mut twin = Account::new("12345-X");
        let err = source.transfer(&mut twin, dec("1")).unwrap_err();
        assert!(matches!(err, AccountError::InvalidDestination { .. }));

        let mut anonymous = Account::new("");
        let err = source.transfer(&mut anonymous, dec("1")).unwrap_err();
        assert!(matches!(err, AccountError::InvalidDestination { .. }));

        assert_eq!(source.balance(), dec("100"));
        assert_eq!(source.transactions().len(), 1);
        assert_eq!(destination.balance(), dec("5"));
        assert_eq!(destination.transactions().len(), 1);
        assert!(twin.transactions().is_empty());
        assert!(anonymous.transactions().is_empty());
    }

    #[test]
    fn deposit_overflow() {
        let mut acc = Account::new("12345-X");
        acc.deposit(Decimal::MAX).unwrap();
        let err = acc.deposit(Decimal::ONE).unwrap_err();
        assert!(matches!(err, AccountError::AmountOverflow));
        assert_eq!(acc.balance(), Decimal::MAX);
    }

    #[test]
    fn reference_session() {
        let mut mine = funded("12345-X", "100.00");
        let mut other = Account::new("54321-Y");

        mine.deposit(dec("50.00")).unwrap();
        assert_eq!(mine.balance(), dec("150.00"));

        assert!(mine.withdraw(dec("200.00")).is_err());
        assert_eq!(mine.balance(), dec("150.00"));

        mine.transfer(&mut other, dec("50.00")).unwrap();
        assert_eq!(mine.balance(), dec("100.00"));
        assert_eq!(other.balance(), dec("50.00"));
    }

    fn cents() -> impl Strategy<Value = Decimal> {
        (1i64..10_000_000).prop_map(|c| Decimal::new(c, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        #[test]
        fn deposit_adds_exactly_one_entry(start in cents(), amount in cents()) {
            let mut acc = Account::new("12345-X");
            acc.deposit(start).unwrap();
            let before = acc.balance();

            acc.deposit(amount).unwrap();
            prop_assert_eq!(acc.balance(), before + amount);
            prop_assert_eq!(acc.transactions().len(), 2);
            let last = &acc.transactions()[1];
            prop_assert_eq!(last.kind(), &TransactionKind::Deposit);
            prop_assert_eq!(last.amount(), amount);
        }

        #[test]
        fn withdraw_never_overdraws(start in cents(), amount in cents()) {
            let mut acc = Account::new("12345-X");
            acc.deposit(start).unwrap();

            match acc.withdraw(amount).map(|_| ()) {
                Ok(_) => {
                    prop_assert!(amount <= start);
                    prop_assert_eq!(acc.balance(), start - amount);
                }
                Err(AccountError::InsufficientFunds { .. }) => {
                    prop_assert!(amount > start);
                    prop_assert_eq!(acc.balance(), start);
                    prop_assert_eq!(acc.transactions().len(), 1);
                }
                Err(err) => prop_assert!(false, "unexpected error: {err}"),
            }
            prop_assert!(acc.balance() >= Decimal::ZERO);
        }

        #[test]
        fn transfer_conserves_money(start in cents(), amount in cents()) {
            let mut source = Account::new("12345-X");
            source.deposit(start).unwrap();
            let mut destination = Account::new("54321-Y");

            let moved = source.transfer(&mut destination, amount).is_ok();
            prop_assert_eq!(moved, amount <= start);
            prop_assert_eq!(source.balance() + destination.balance(), start);
            if moved {
                prop_assert_eq!(destination.balance(), amount);
                prop_assert_eq!(source.transactions().len(), 2);
                prop_assert_eq!(destination.transactions().len(), 1);
            }
        }
    }
}
