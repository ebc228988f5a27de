use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Invalid option `{input}`, enter a number between 1 and {}", MenuOption::ALL.len())]
    InvalidMenuSelection { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Balance,
    Deposit,
    Withdraw,
    Statement,
    Transfer,
    Exit,
}

impl MenuOption {
    /// Menu order, an option's number is its position plus one
    pub const ALL: [MenuOption; 6] = [
        Self::Balance,
        Self::Deposit,
        Self::Withdraw,
        Self::Statement,
        Self::Transfer,
        Self::Exit,
    ];

    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|option| *option == self)
            .map_or(0, |idx| idx + 1)
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Balance => "Check balance",
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Statement => "Show statement",
            Self::Transfer => "Transfer",
            Self::Exit => "Exit",
        })
    }
}

impl FromStr for MenuOption {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        input
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| MenuError::InvalidMenuSelection {
                input: input.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_selection() {
        assert_eq!("1".parse::<MenuOption>().unwrap(), MenuOption::Balance);
        assert_eq!(" 5\n".parse::<MenuOption>().unwrap(), MenuOption::Transfer);
        assert_eq!("6".parse::<MenuOption>().unwrap(), MenuOption::Exit);
        for option in MenuOption::ALL {
            assert_eq!(
                option.number().to_string().parse::<MenuOption>().unwrap(),
                option
            );
        }
    }

    #[test]
    fn reject_invalid_selection() {
        for input in ["0", "7", "-1", "abc", "", "2.5"] {
            let err = input.parse::<MenuOption>().unwrap_err();
            assert!(matches!(
                &err,
                MenuError::InvalidMenuSelection { input: got } if got == input
            ));
        }
        assert_eq!(
            "9".parse::<MenuOption>().unwrap_err().to_string(),
            "Invalid option `9`, enter a number between 1 and 6"
        );
    }
}
