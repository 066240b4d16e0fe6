use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Payment(#[from] PaymentError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Denom can not be empty")]
    EmptyDenom {},

    #[error("Token URI can not be empty")]
    EmptyTokenUri {},

    #[error("Token {token_id} does not exist")]
    TokenNotFound { token_id: u64 },

    #[error("Token {token_id} is not listed")]
    NotListed { token_id: u64 },

    #[error("Price must be greater than zero")]
    InvalidPrice {},

    #[error("No offer on token {token_id}")]
    NoOffer { token_id: u64 },

    #[error("Offer must be higher than the current offer of {current}")]
    OfferTooLow { current: Uint128 },

    #[error("Seller can not make an offer on their own listing")]
    SelfOffer {},

    #[error("Token is already owned by the recipient")]
    SelfTransfer {},

    #[error("Cannot migrate from contract {previous_contract}")]
    CannotMigrate { previous_contract: String },
}
