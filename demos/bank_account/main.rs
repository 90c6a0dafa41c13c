use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use traya::publisher::{InMemoryPublisher, TracingPublisher};
use traya::{Aggregate, AggregateRoot, Committer};

use crate::common::{BankAccount, BankAccountCommand, BankAccountError, BankAccountEvent};

#[path = "../common/lib.rs"]
mod common;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let unhandled: Vec<&str> = BankAccount::handlers().unhandled(&BankAccountEvent::samples());
    assert!(unhandled.is_empty(), "bank account events without handler: {:?}", unhandled);

    let store: Arc<InMemoryPublisher<BankAccount>> = Arc::new(InMemoryPublisher::new());
    let committer = Committer::new(TracingPublisher::new(store.clone()));

    let account_number: String = uuid::Uuid::new_v4().to_string();

    // Open the account
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::new();
    BankAccount::handle_command(&mut account, BankAccountCommand::Create { account_number }).unwrap();
    committer.commit(&mut account).await.unwrap();

    // Salary deposit (2000)
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::from_history(store.events().await).unwrap();
    BankAccount::handle_command(
        &mut account,
        BankAccountCommand::Deposit {
            date: Utc::now(),
            amount: 2000,
        },
    )
    .unwrap();
    committer.commit(&mut account).await.unwrap();

    let mut account: AggregateRoot<BankAccount> = AggregateRoot::from_history(store.events().await).unwrap();
    println!("===> Your bank account balance is {} euros", account.state().balance());

    match BankAccount::handle_command(
        &mut account,
        BankAccountCommand::Withdraw {
            date: Utc::now(),
            amount: 3000,
        },
    ) {
        Err(BankAccountError::InsufficientFunds { balance, amount }) => {
            println!("===> Can't withdraw {} euros, balance is {} euros", amount, balance)
        }
        other => panic!("expected insufficient funds, got {:?}", other),
    }

    BankAccount::handle_command(
        &mut account,
        BankAccountCommand::Withdraw {
            date: Utc::now(),
            amount: 500,
        },
    )
    .unwrap();
    let published: usize = committer.commit(&mut account).await.unwrap();
    println!("===> Committed {} event(s)", published);

    let account: AggregateRoot<BankAccount> = AggregateRoot::from_history(store.events().await).unwrap();
    println!("===> Now your bank account balance is {} euros", account.state().balance());
    println!("{:#?}", account);
}
