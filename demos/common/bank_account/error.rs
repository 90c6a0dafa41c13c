use thiserror::Error;

use traya::error::DispatchError;

#[derive(Debug, Error)]
pub enum BankAccountError {
    #[error("Not enough money: balance is {balance}, requested {amount}")]
    InsufficientFunds { balance: i64, amount: i64 },

    #[error("Negative amount")]
    NegativeAmount,

    #[error("Amount {amount} would overflow the account totals")]
    AmountOverflow { amount: i64 },

    #[error("Bank account not created yet")]
    NotCreated,

    #[error("Bank account {0} already created")]
    AlreadyCreated(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
