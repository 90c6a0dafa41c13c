use traya::error::DispatchError;
use traya::types::SequenceNumber;
use traya::{Aggregate, AggregateRoot, Event, Handlers};

use super::{BankAccountCommand, BankAccountError, BankAccountEvent, BankAccountState};

pub struct BankAccount;

impl BankAccount {
    /// Validates the command against the current state and records the resulting event. Nothing is
    /// recorded when validation fails.
    pub fn handle_command(
        root: &mut AggregateRoot<Self>,
        command: BankAccountCommand,
    ) -> Result<(), BankAccountError> {
        let state: &BankAccountState = root.state();

        let event: Event<BankAccountEvent> = match command {
            BankAccountCommand::Create { account_number } => {
                if let Some(existing) = &state.account_number {
                    return Err(BankAccountError::AlreadyCreated(existing.clone()));
                }
                Event::new(account_number, BankAccountEvent::Created)
            }
            BankAccountCommand::Deposit { date, amount } => {
                let account_number: String = Self::account_number(state)?;
                if amount < 0 {
                    return Err(BankAccountError::NegativeAmount);
                }
                if state.deposits.checked_add(amount).is_none() {
                    return Err(BankAccountError::AmountOverflow { amount });
                }
                Event::new(account_number, BankAccountEvent::Deposited { date, amount }).with_version(Self::next_version(root)?)
            }
            BankAccountCommand::Withdraw { date, amount } => {
                let account_number: String = Self::account_number(state)?;
                if amount < 0 {
                    return Err(BankAccountError::NegativeAmount);
                }
                if amount > state.balance() {
                    return Err(BankAccountError::InsufficientFunds {
                        balance: state.balance(),
                        amount,
                    });
                }
                Event::new(account_number, BankAccountEvent::Withdrew { date, amount }).with_version(Self::next_version(root)?)
            }
        };

        Ok(root.record(event)?)
    }

    fn account_number(state: &BankAccountState) -> Result<String, BankAccountError> {
        state.account_number.clone().ok_or(BankAccountError::NotCreated)
    }

    fn next_version(root: &AggregateRoot<Self>) -> Result<SequenceNumber, BankAccountError> {
        let account_number: String = Self::account_number(root.state())?;
        root.next_version().ok_or_else(|| {
            BankAccountError::Dispatch(DispatchError::VersionOverflow {
                aggregate: Self::NAME,
                stream_id: account_number,
            })
        })
    }

    fn on_created(_: BankAccountState, event: &Event<BankAccountEvent>) -> BankAccountState {
        BankAccountState::opened(event.stream_id().to_string())
    }

    fn on_deposited(state: BankAccountState, event: &Event<BankAccountEvent>) -> BankAccountState {
        match event.payload() {
            BankAccountEvent::Deposited { amount, .. } => state.add_amount(*amount),
            _ => state,
        }
    }

    fn on_withdrew(state: BankAccountState, event: &Event<BankAccountEvent>) -> BankAccountState {
        match event.payload() {
            BankAccountEvent::Withdrew { amount, .. } => state.sub_amount(*amount),
            _ => state,
        }
    }
}

impl Aggregate for BankAccount {
    const NAME: &'static str = "bank_account";
    type State = BankAccountState;
    type Event = BankAccountEvent;

    fn handlers() -> Handlers<Self> {
        Handlers::new()
            .on("Created", Self::on_created)
            .on("Deposited", Self::on_deposited)
            .on("Withdrew", Self::on_withdrew)
    }
}
