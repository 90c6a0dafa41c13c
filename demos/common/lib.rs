//! Common structs shared between the demos and the integration tests

pub use bank_account::*;

mod bank_account;
