pub mod contract;
mod error;
pub mod events;
mod integration_tests;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
