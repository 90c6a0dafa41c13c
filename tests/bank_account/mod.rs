use std::sync::Arc;

use chrono::Utc;

use traya::error::DispatchError;
use traya::publisher::InMemoryPublisher;
use traya::{Aggregate, AggregateRoot, Committer, Event};

use crate::common::{BankAccount, BankAccountCommand, BankAccountError, BankAccountEvent, BankAccountState};

fn deposit(amount: i64) -> BankAccountCommand {
    BankAccountCommand::Deposit { date: Utc::now(), amount }
}

fn withdraw(amount: i64) -> BankAccountCommand {
    BankAccountCommand::Withdraw { date: Utc::now(), amount }
}

fn create(account_number: &str) -> BankAccountCommand {
    BankAccountCommand::Create {
        account_number: account_number.to_string(),
    }
}

#[tokio::test]
async fn bank_account_scenario_test() {
    let store: Arc<InMemoryPublisher<BankAccount>> = Arc::new(InMemoryPublisher::new());
    let committer = Committer::new(store.clone());
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::new();

    BankAccount::handle_command(&mut account, create("A1")).unwrap();
    assert_eq!(account.state().balance(), 0);
    assert_eq!(account.state().account_number.as_deref(), Some("A1"));

    BankAccount::handle_command(&mut account, deposit(2000)).unwrap();
    assert_eq!(account.state().balance(), 2000);

    let result = BankAccount::handle_command(&mut account, withdraw(3000));
    assert!(matches!(
        result,
        Err(BankAccountError::InsufficientFunds {
            balance: 2000,
            amount: 3000
        })
    ));
    assert_eq!(account.state().balance(), 2000);
    assert_eq!(account.uncommitted_events().len(), 2);

    BankAccount::handle_command(&mut account, withdraw(500)).unwrap();
    assert_eq!(account.state().balance(), 1500);
    let before_commit: BankAccountState = account.state().clone();

    assert_eq!(committer.commit(&mut account).await.unwrap(), 3);

    let published = store.events().await;
    let kinds: Vec<&str> = published.iter().map(|event| event.kind()).collect();
    assert_eq!(kinds, vec!["Created", "Deposited", "Withdrew"]);
    assert!(matches!(published[1].payload(), BankAccountEvent::Deposited { amount: 2000, .. }));
    assert!(matches!(published[2].payload(), BankAccountEvent::Withdrew { amount: 500, .. }));
    assert!(published.iter().all(|event| event.stream_id() == "A1"));

    let reloaded: AggregateRoot<BankAccount> = AggregateRoot::from_history(published).unwrap();
    assert_eq!(reloaded.state(), &before_commit);
    assert_eq!(reloaded.state().balance(), 1500);
    assert_eq!(reloaded.version(), account.version());
}

#[tokio::test]
async fn reload_between_commits_test() {
    let store: Arc<InMemoryPublisher<BankAccount>> = Arc::new(InMemoryPublisher::new());
    let committer = Committer::new(store.clone());

    let mut account: AggregateRoot<BankAccount> = AggregateRoot::new();
    BankAccount::handle_command(&mut account, create("A2")).unwrap();
    committer.commit(&mut account).await.unwrap();

    let mut account: AggregateRoot<BankAccount> = AggregateRoot::from_history(store.events().await).unwrap();
    BankAccount::handle_command(&mut account, deposit(2000)).unwrap();
    committer.commit(&mut account).await.unwrap();

    let mut account: AggregateRoot<BankAccount> = AggregateRoot::from_history(store.events().await).unwrap();
    BankAccount::handle_command(&mut account, withdraw(500)).unwrap();
    committer.commit(&mut account).await.unwrap();

    let account: AggregateRoot<BankAccount> = AggregateRoot::from_history(store.events().await).unwrap();
    assert_eq!(account.state().balance(), 1500);
    assert_eq!(store.len().await, 3);

    let versions: Vec<Option<i32>> = store.events().await.iter().map(|event| event.version()).collect();
    assert_eq!(versions, vec![None, Some(2), Some(3)]);
}

#[test]
fn withdraw_whole_balance_test() {
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::new();
    BankAccount::handle_command(&mut account, create("A3")).unwrap();
    BankAccount::handle_command(&mut account, deposit(100)).unwrap();

    BankAccount::handle_command(&mut account, withdraw(100)).unwrap();

    assert_eq!(account.state().balance(), 0);
}

#[test]
fn domain_errors_record_nothing_test() {
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::new();

    assert!(matches!(
        BankAccount::handle_command(&mut account, deposit(10)),
        Err(BankAccountError::NotCreated)
    ));

    BankAccount::handle_command(&mut account, create("A4")).unwrap();
    assert!(matches!(
        BankAccount::handle_command(&mut account, create("A5")),
        Err(BankAccountError::AlreadyCreated(number)) if number == "A4"
    ));
    assert!(matches!(
        BankAccount::handle_command(&mut account, deposit(-1)),
        Err(BankAccountError::NegativeAmount)
    ));

    assert_eq!(account.uncommitted_events().len(), 1);
}

#[test]
fn published_events_carry_metadata_test() {
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::new();
    BankAccount::handle_command(&mut account, create("A6")).unwrap();
    BankAccount::handle_command(&mut account, deposit(42)).unwrap();

    let events = account.pop();

    let metadata = events[1].metadata();
    assert_eq!(metadata.get("_aggregate_id"), Some(&serde_json::json!("A6")));
    assert_eq!(metadata.get("_aggregate_version"), Some(&serde_json::json!(2)));

    let payload = events[1].payload_map().unwrap();
    assert_eq!(payload.get("type"), Some(&serde_json::json!("Deposited")));
    assert_eq!(payload.get("amount"), Some(&serde_json::json!(42)));
}

#[test]
fn every_variant_has_a_handler_test() {
    let handlers = BankAccount::handlers();

    assert!(handlers.unhandled(&BankAccountEvent::samples()).is_empty());
    assert_eq!(handlers.len(), BankAccountEvent::samples().len());
}

#[test]
fn deposit_overflow_records_nothing_test() {
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::new();
    BankAccount::handle_command(&mut account, create("A7")).unwrap();
    BankAccount::handle_command(&mut account, deposit(i64::MAX)).unwrap();

    let result = BankAccount::handle_command(&mut account, deposit(i64::MAX));
    assert!(matches!(result, Err(BankAccountError::AmountOverflow { amount: i64::MAX })));
    assert!(matches!(
        BankAccount::handle_command(&mut account, deposit(1)),
        Err(BankAccountError::AmountOverflow { amount: 1 })
    ));

    assert_eq!(account.state().balance(), i64::MAX);
    assert_eq!(account.uncommitted_events().len(), 2);

    BankAccount::handle_command(&mut account, withdraw(i64::MAX)).unwrap();
    assert_eq!(account.state().balance(), 0);
}

#[test]
fn version_overflow_records_nothing_test() {
    let history = vec![
        Event::new("A8", BankAccountEvent::Created),
        Event::new("A8", BankAccountEvent::Deposited { date: Utc::now(), amount: 10 }).with_version(i32::MAX),
    ];
    let mut account: AggregateRoot<BankAccount> = AggregateRoot::from_history(history).unwrap();

    let result = BankAccount::handle_command(&mut account, deposit(1));
    assert!(matches!(
        result,
        Err(BankAccountError::Dispatch(DispatchError::VersionOverflow { stream_id, .. })) if stream_id == "A8"
    ));
    assert!(account.uncommitted_events().is_empty());
    assert_eq!(account.state().balance(), 10);
}
