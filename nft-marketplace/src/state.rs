use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    /// native denom listing prices and offers are paid in
    pub denom: String,
}

#[cw_serde]
pub struct Token {
    pub owner: Addr,
    pub token_uri: String,
}

#[cw_serde]
pub struct Listing {
    pub token_id: u64,
    pub seller: Addr,
    pub price: Uint128,
    pub active: bool,
}

/// Funds of a standing offer are held by the contract until it is resolved.
#[cw_serde]
pub struct Offer {
    pub token_id: u64,
    pub bidder: Addr,
    pub amount: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Last minted token id, 0 before the first mint.
pub const TOKEN_IDS: Item<u64> = Item::new("token_ids");

pub const TOKENS: Map<u64, Token> = Map::new("tokens");

pub const OWNED_TOKENS: Map<(Addr, u64), Empty> = Map::new("owned_tokens");

pub const LISTINGS: Map<u64, Listing> = Map::new("listings");

// at most one standing offer per token
pub const OFFERS: Map<u64, Offer> = Map::new("offers");
