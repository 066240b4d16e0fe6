//! Events emitted by the marketplace. The chain reports them with a `wasm-`
//! prefix on the type, e.g. `wasm-NFTListed`.

use cosmwasm_std::{Addr, Event, Uint128};

pub const NFT_MINTED: &str = "NFTMinted";
pub const NFT_LISTED: &str = "NFTListed";
pub const NFT_LISTING_CANCELLED: &str = "NFTListingCancelled";
pub const NFT_TRANSFERRED: &str = "NFTTransferred";
pub const OFFER_CREATED: &str = "OfferCreated";
pub const OFFER_CANCELLED: &str = "OfferCancelled";
pub const OFFER_ACCEPTED: &str = "OfferAccepted";
pub const OFFER_REJECTED: &str = "OfferRejected";

pub fn nft_minted(owner: &Addr, token_id: u64, token_uri: &str) -> Event {
    Event::new(NFT_MINTED)
        .add_attribute("owner", owner)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("uri", token_uri)
}

pub fn nft_listed(token_id: u64, price: Uint128) -> Event {
    Event::new(NFT_LISTED)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("price", price)
}

pub fn nft_listing_cancelled(token_id: u64, owner: &Addr) -> Event {
    Event::new(NFT_LISTING_CANCELLED)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("owner", owner)
}

pub fn nft_transferred(token_id: u64, from: &Addr, to: &Addr) -> Event {
    Event::new(NFT_TRANSFERRED)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("from", from)
        .add_attribute("to", to)
}

/// Shared shape of the offer lifecycle events.
fn offer_event(ty: &str, token_id: u64, bidder: &Addr, amount: Uint128) -> Event {
    Event::new(ty)
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("bidder", bidder)
        .add_attribute("amount", amount)
}

pub fn offer_created(token_id: u64, bidder: &Addr, amount: Uint128) -> Event {
    offer_event(OFFER_CREATED, token_id, bidder, amount)
}

pub fn offer_cancelled(token_id: u64, bidder: &Addr, amount: Uint128) -> Event {
    offer_event(OFFER_CANCELLED, token_id, bidder, amount)
}

pub fn offer_accepted(token_id: u64, bidder: &Addr, amount: Uint128) -> Event {
    offer_event(OFFER_ACCEPTED, token_id, bidder, amount)
}

pub fn offer_rejected(token_id: u64, bidder: &Addr, amount: Uint128) -> Event {
    offer_event(OFFER_REJECTED, token_id, bidder, amount)
}
