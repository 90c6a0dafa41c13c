pub use aggregate::*;
pub use command::*;
pub use error::*;
pub use event::*;
pub use state::*;

mod aggregate;
mod command;
mod error;
mod event;
mod state;
