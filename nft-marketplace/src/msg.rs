use crate::state::{Listing, Offer};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Empty, Uint128};
use cw721::{NftInfoResponse, NumTokensResponse, OwnerOfResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mint a new token owned by the sender
    Mint { token_uri: String },
    /// List an owned token for sale, or update the price of an active listing
    ListNft { token_id: u64, price: Uint128 },
    CancelListing { token_id: u64 },
    /// Bid on a listed token with the attached funds
    MakeOffer { token_id: u64 },
    CancelOffer { token_id: u64 },
    AcceptOffer { token_id: u64 },
    RejectOffer { token_id: u64 },
    TransferNft { recipient: String, token_id: u64 },
    TransferOwnership { new_owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    /// Number of tokens minted so far, which is also the last assigned id
    #[returns(u64)]
    TokenIds {},
    #[returns(TokenResponse)]
    Token { token_id: u64 },
    #[returns(OwnedTokensResponse)]
    TokensByOwner {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Listing)]
    Listing { token_id: u64 },
    #[returns(Vec<Listing>)]
    AllListings {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Vec<Listing>)]
    ListingsBySeller {
        seller: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Option<Offer>)]
    Offer { token_id: u64 },
    // cw721
    #[returns(OwnerOfResponse)]
    OwnerOf {
        token_id: String,
        include_expired: Option<bool>,
    },
    #[returns(NumTokensResponse)]
    NumTokens {},
    #[returns(NftInfoResponse<Empty>)]
    NftInfo { token_id: String },
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: String,
    pub denom: String,
}

#[cw_serde]
pub struct TokenResponse {
    pub token_id: u64,
    pub owner: Addr,
    pub token_uri: String,
}

#[cw_serde]
pub struct OwnedTokensResponse {
    pub tokens: Vec<u64>,
}

#[cw_serde]
pub struct MigrateMsg {}
