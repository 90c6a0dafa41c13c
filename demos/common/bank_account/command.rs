use chrono::{DateTime, Utc};

pub enum BankAccountCommand {
    Create { account_number: String },
    Deposit { date: DateTime<Utc>, amount: i64 },
    Withdraw { date: DateTime<Utc>, amount: i64 },
}
