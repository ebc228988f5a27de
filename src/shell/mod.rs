//! Interactive menu on top of [`crate::account`], reading choices line by line.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    account::{Account, AccountError, AccountId, DEFAULT_ACCOUNT_ID},
    storage::AccountStore,
    transaction::parse_amount,
};

pub mod menu;

use menu::MenuOption;

const MENU_RULE: &str = "---------------------------------------------";

/// Where accounts live between runs.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub primary_path: PathBuf,
    /// Account that receives transfers
    pub secondary_path: PathBuf,
    /// Identifier given to the secondary account when it has never been saved
    pub counterpart_id: AccountId,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            primary_path: PathBuf::from("bank_data.json"),
            secondary_path: PathBuf::from("bank_secondary.json"),
            counterpart_id: "54321-Y".to_string(),
        }
    }
}

pub struct Shell<'w, R, W: 'w, S> {
    pub input: R,
    pub output: &'w mut W,
    pub store: S,
    pub config: ShellConfig,
}

impl<'w, R, W, S> Shell<'w, R, W, S>
where
    R: BufRead,
    W: Write + 'w,
    S: AccountStore,
{
    /// Runs until the user picks "Exit" or input ends, then saves both accounts.
    pub fn run(mut self) -> Result<()> {
        let mut primary = self.store.load(&self.config.primary_path)?;
        let mut secondary = self.store.load(&self.config.secondary_path)?;
        if secondary.id() == DEFAULT_ACCOUNT_ID {
            secondary.rename(self.config.counterpart_id.clone());
        }

        while self.step(&mut primary, &mut secondary)? {}

        for (account, path) in [
            (&primary, &self.config.primary_path),
            (&secondary, &self.config.secondary_path),
        ] {
            self.store.save(account, path)?;
            writeln!(self.output, "Account data for '{}' saved.", account.id())?;
        }
        writeln!(self.output, "Thank you for using the virtual bank!")?;
        self.output.flush().context("Failed to flush output")
    }

    /// Handles one menu round, `false` means the session is over.
    fn step(&mut self, primary: &mut Account, secondary: &mut Account) -> Result<bool> {
        self.print_menu()?;
        let Some(line) = self.prompt("Enter an option: ")? else {
            info!("input closed, ending session");
            return Ok(false);
        };
        let option = match line.parse::<MenuOption>() {
            Ok(option) => option,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(true);
            }
        };

        match option {
            MenuOption::Balance => {
                writeln!(
                    self.output,
                    "Your current balance is: {:.2}",
                    primary.balance()
                )?;
            }
            MenuOption::Deposit => {
                let Some(raw) = self.prompt("Amount to deposit: ")? else {
                    return Ok(false);
                };
                match parse_amount(&raw)
                    .and_then(|amount| primary.deposit(amount).map(|_| amount))
                {
                    Ok(amount) => {
                        writeln!(self.output, "Deposit of {amount:.2} completed.")?;
                        self.print_new_balance(primary)?;
                    }
                    Err(err) => self.report(primary, err)?,
                }
            }
            MenuOption::Withdraw => {
                let Some(raw) = self.prompt("Amount to withdraw: ")? else {
                    return Ok(false);
                };
                match parse_amount(&raw)
                    .and_then(|amount| primary.withdraw(amount).map(|_| amount))
                {
                    Ok(amount) => {
                        writeln!(self.output, "Withdrawal of {amount:.2} completed.")?;
                        self.print_new_balance(primary)?;
                    }
                    Err(err) => self.report(primary, err)?,
                }
            }
            MenuOption::Statement => match primary.statement() {
                Some(statement) => writeln!(self.output, "\n{statement}")?,
                None => writeln!(self.output, "No transactions have been made.")?,
            },
            MenuOption::Transfer => {
                writeln!(
                    self.output,
                    "Transferring from account '{}' to '{}'",
                    primary.id(),
                    secondary.id()
                )?;
                let Some(raw) = self.prompt("Amount to transfer: ")? else {
                    return Ok(false);
                };
                match parse_amount(&raw)
                    .and_then(|amount| primary.transfer(secondary, amount).map(|_| amount))
                {
                    Ok(amount) => {
                        writeln!(
                            self.output,
                            "Transfer of {amount:.2} to account {} completed.",
                            secondary.id()
                        )?;
                        self.print_new_balance(primary)?;
                    }
                    Err(err) => self.report(primary, err)?,
                }
            }
            MenuOption::Exit => return Ok(false),
        }
        Ok(true)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Welcome to your virtual bank ---")?;
        writeln!(self.output, "{MENU_RULE}")?;
        for option in MenuOption::ALL {
            writeln!(self.output, "{} - {option}", option.number())?;
        }
        writeln!(self.output, "{MENU_RULE}")?;
        Ok(())
    }

    fn print_new_balance(&mut self, account: &Account) -> Result<()> {
        writeln!(self.output, "Your new balance is: {:.2}", account.balance())?;
        Ok(())
    }

    /// Rejected operations are not fatal, the user just sees why.
    fn report(&mut self, account: &Account, err: AccountError) -> Result<()> {
        warn!(account = account.id(), %err, "operation rejected");
        writeln!(self.output, "{err}")?;
        Ok(())
    }

    /// Reads one line, `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush().context("Failed to flush output")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
