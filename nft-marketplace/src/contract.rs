#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coins, to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Empty, Env, MessageInfo,
    Order, OverflowError, OverflowOperation, Response, StdError, StdResult, Storage, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use cw721::{NftInfoResponse, NumTokensResponse, OwnerOfResponse};
use cw_storage_plus::Bound;
use cw_utils::{must_pay, nonpayable};

use crate::error::ContractError;
use crate::events;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, OwnedTokensResponse, QueryMsg,
    TokenResponse,
};
use crate::state::{
    Config, Listing, Offer, Token, CONFIG, LISTINGS, OFFERS, OWNED_TOKENS, TOKENS, TOKEN_IDS,
};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:nft-marketplace";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.denom.trim().is_empty() {
        return Err(ContractError::EmptyDenom {});
    }

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        denom: msg.denom,
    };
    CONFIG.save(deps.storage, &config)?;
    TOKEN_IDS.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("denom", config.denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { token_uri } => execute_mint(deps, info, token_uri),
        ExecuteMsg::ListNft { token_id, price } => execute_list_nft(deps, info, token_id, price),
        ExecuteMsg::CancelListing { token_id } => execute_cancel_listing(deps, info, token_id),
        ExecuteMsg::MakeOffer { token_id } => execute_make_offer(deps, info, token_id),
        ExecuteMsg::CancelOffer { token_id } => execute_cancel_offer(deps, info, token_id),
        ExecuteMsg::AcceptOffer { token_id } => execute_accept_offer(deps, info, token_id),
        ExecuteMsg::RejectOffer { token_id } => execute_reject_offer(deps, info, token_id),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, info, recipient, token_id),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

pub fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    token_uri: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    if token_uri.trim().is_empty() {
        return Err(ContractError::EmptyTokenUri {});
    }

    let token_id = TOKEN_IDS.update(deps.storage, |id| -> Result<u64, ContractError> {
        id.checked_add(1)
            .ok_or_else(|| OverflowError::new(OverflowOperation::Add, id, 1).into())
    })?;

    TOKENS.save(
        deps.storage,
        token_id,
        &Token {
            owner: info.sender.clone(),
            token_uri: token_uri.clone(),
        },
    )?;
    OWNED_TOKENS.save(deps.storage, (info.sender.clone(), token_id), &Empty {})?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("token_id", token_id.to_string())
        .add_event(events::nft_minted(&info.sender, token_id, &token_uri)))
}

pub fn execute_list_nft(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    price: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let token = load_token(deps.storage, token_id)?;
    if token.owner != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    if price.is_zero() {
        return Err(ContractError::InvalidPrice {});
    }

    let listing = Listing {
        token_id,
        seller: info.sender,
        price,
        active: true,
    };
    LISTINGS.save(deps.storage, token_id, &listing)?;

    Ok(Response::new()
        .add_attribute("action", "list_nft")
        .add_attribute("seller", listing.seller)
        .add_event(events::nft_listed(token_id, price)))
}

pub fn execute_cancel_listing(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let listing = load_active_listing(deps.storage, token_id)?;
    if listing.seller != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    let config = CONFIG.load(deps.storage)?;
    let refund = close_listing(deps.storage, listing)?;

    let mut res = Response::new()
        .add_attribute("action", "cancel_listing")
        .add_event(events::nft_listing_cancelled(token_id, &info.sender));
    if let Some(offer) = refund {
        res = res
            .add_attribute("refunded", offer.bidder.as_str())
            .add_message(refund_msg(&config.denom, &offer));
    }

    Ok(res)
}

pub fn execute_make_offer(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = must_pay(&info, &config.denom)?;

    let listing = load_active_listing(deps.storage, token_id)?;
    if listing.seller == info.sender {
        return Err(ContractError::SelfOffer {});
    }

    let mut res = Response::new().add_attribute("action", "make_offer");

    // a standing offer is outbid and returned to its bidder
    if let Some(current) = OFFERS.may_load(deps.storage, token_id)? {
        if amount <= current.amount {
            return Err(ContractError::OfferTooLow {
                current: current.amount,
            });
        }
        res = res
            .add_attribute("outbid", current.bidder.as_str())
            .add_message(refund_msg(&config.denom, &current));
    }

    let offer = Offer {
        token_id,
        bidder: info.sender,
        amount,
    };
    OFFERS.save(deps.storage, token_id, &offer)?;

    Ok(res.add_event(events::offer_created(token_id, &offer.bidder, amount)))
}

pub fn execute_cancel_offer(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let offer = load_offer(deps.storage, token_id)?;
    if offer.bidder != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    let config = CONFIG.load(deps.storage)?;
    OFFERS.remove(deps.storage, token_id);

    Ok(Response::new()
        .add_attribute("action", "cancel_offer")
        .add_message(refund_msg(&config.denom, &offer))
        .add_event(events::offer_cancelled(token_id, &offer.bidder, offer.amount)))
}

pub fn execute_accept_offer(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let mut listing = load_active_listing(deps.storage, token_id)?;
    if listing.seller != info.sender {
        return Err(ContractError::Unauthorized {});
    }
    let offer = load_offer(deps.storage, token_id)?;
    let config = CONFIG.load(deps.storage)?;

    OFFERS.remove(deps.storage, token_id);
    listing.active = false;
    LISTINGS.save(deps.storage, token_id, &listing)?;
    move_token(deps.storage, token_id, &listing.seller, &offer.bidder)?;

    let payment = BankMsg::Send {
        to_address: listing.seller.to_string(),
        amount: coins(offer.amount.u128(), config.denom),
    };

    Ok(Response::new()
        .add_attribute("action", "accept_offer")
        .add_attribute("seller", listing.seller)
        .add_message(payment)
        .add_event(events::offer_accepted(token_id, &offer.bidder, offer.amount)))
}

pub fn execute_reject_offer(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let listing = load_active_listing(deps.storage, token_id)?;
    if listing.seller != info.sender {
        return Err(ContractError::Unauthorized {});
    }
    let offer = load_offer(deps.storage, token_id)?;
    let config = CONFIG.load(deps.storage)?;

    OFFERS.remove(deps.storage, token_id);

    Ok(Response::new()
        .add_attribute("action", "reject_offer")
        .add_message(refund_msg(&config.denom, &offer))
        .add_event(events::offer_rejected(token_id, &offer.bidder, offer.amount)))
}

pub fn execute_transfer_nft(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    let token = load_token(deps.storage, token_id)?;
    if token.owner != info.sender {
        return Err(ContractError::Unauthorized {});
    }
    if recipient == info.sender {
        return Err(ContractError::SelfTransfer {});
    }

    let mut res = Response::new().add_attribute("action", "transfer_nft");

    // the listing belongs to the previous owner and does not survive the transfer
    if let Some(listing) = LISTINGS.may_load(deps.storage, token_id)? {
        if listing.active {
            if let Some(offer) = close_listing(deps.storage, listing)? {
                let config = CONFIG.load(deps.storage)?;
                res = res
                    .add_attribute("refunded", offer.bidder.as_str())
                    .add_message(refund_msg(&config.denom, &offer));
            }
            res = res.add_event(events::nft_listing_cancelled(token_id, &info.sender));
        }
    }

    move_token(deps.storage, token_id, &info.sender, &recipient)?;

    Ok(res.add_event(events::nft_transferred(
        token_id,
        &info.sender,
        &recipient,
    )))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let mut config = CONFIG.load(deps.storage)?;
    if config.owner != info.sender {
        return Err(ContractError::Unauthorized {});
    }

    config.owner = deps.api.addr_validate(&new_owner)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("new_owner", config.owner))
}

fn load_token(storage: &dyn Storage, token_id: u64) -> Result<Token, ContractError> {
    TOKENS
        .may_load(storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })
}

fn load_active_listing(storage: &dyn Storage, token_id: u64) -> Result<Listing, ContractError> {
    match LISTINGS.may_load(storage, token_id)? {
        Some(listing) if listing.active => Ok(listing),
        _ => Err(ContractError::NotListed { token_id }),
    }
}

fn load_offer(storage: &dyn Storage, token_id: u64) -> Result<Offer, ContractError> {
    OFFERS
        .may_load(storage, token_id)?
        .ok_or(ContractError::NoOffer { token_id })
}

/// Deactivates the listing and takes its standing offer, if any, for refund.
fn close_listing(
    storage: &mut dyn Storage,
    mut listing: Listing,
) -> Result<Option<Offer>, ContractError> {
    listing.active = false;
    LISTINGS.save(storage, listing.token_id, &listing)?;

    let offer = OFFERS.may_load(storage, listing.token_id)?;
    OFFERS.remove(storage, listing.token_id);
    Ok(offer)
}

fn move_token(
    storage: &mut dyn Storage,
    token_id: u64,
    from: &Addr,
    to: &Addr,
) -> Result<(), ContractError> {
    let mut token = load_token(storage, token_id)?;
    if token.owner != *from {
        return Err(ContractError::Unauthorized {});
    }

    token.owner = to.clone();
    TOKENS.save(storage, token_id, &token)?;

    OWNED_TOKENS.remove(storage, (from.clone(), token_id));
    OWNED_TOKENS.save(storage, (to.clone(), token_id), &Empty {})?;

    Ok(())
}

fn refund_msg(denom: &str, offer: &Offer) -> BankMsg {
    BankMsg::Send {
        to_address: offer.bidder.to_string(),
        amount: coins(offer.amount.u128(), denom),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::CannotMigrate {
            previous_contract: stored.contract,
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::TokenIds {} => to_json_binary(&query_token_ids(deps)?),
        QueryMsg::Token { token_id } => to_json_binary(&query_token(deps, token_id)?),
        QueryMsg::TokensByOwner {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_tokens_by_owner(deps, owner, start_after, limit)?),
        QueryMsg::Listing { token_id } => to_json_binary(&query_listing(deps, token_id)?),
        QueryMsg::AllListings { start_after, limit } => {
            to_json_binary(&query_all_listings(deps, start_after, limit)?)
        }
        QueryMsg::ListingsBySeller {
            seller,
            start_after,
            limit,
        } => to_json_binary(&query_listings_by_seller(
            deps,
            seller,
            start_after,
            limit,
        )?),
        QueryMsg::Offer { token_id } => to_json_binary(&query_offer(deps, token_id)?),
        QueryMsg::OwnerOf { token_id, .. } => to_json_binary(&query_owner_of(deps, token_id)?),
        QueryMsg::NumTokens {} => to_json_binary(&query_num_tokens(deps)?),
        QueryMsg::NftInfo { token_id } => to_json_binary(&query_nft_info(deps, token_id)?),
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner.to_string(),
        denom: config.denom,
    })
}

pub fn query_token_ids(deps: Deps) -> StdResult<u64> {
    TOKEN_IDS.load(deps.storage)
}

pub fn query_token(deps: Deps, token_id: u64) -> StdResult<TokenResponse> {
    let token = TOKENS.load(deps.storage, token_id)?;
    Ok(TokenResponse {
        token_id,
        owner: token.owner,
        token_uri: token.token_uri,
    })
}

pub fn query_tokens_by_owner(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<OwnedTokensResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    let tokens = OWNED_TOKENS
        .prefix(owner)
        .keys(
            deps.storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .collect::<StdResult<Vec<u64>>>()?;

    Ok(OwnedTokensResponse { tokens })
}

pub fn query_listing(deps: Deps, token_id: u64) -> StdResult<Listing> {
    LISTINGS.load(deps.storage, token_id)
}

pub fn query_all_listings(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<Listing>> {
    active_listings(deps, start_after, limit, None)
}

pub fn query_listings_by_seller(
    deps: Deps,
    seller: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<Listing>> {
    let seller = deps.api.addr_validate(&seller)?;
    active_listings(deps, start_after, limit, Some(seller))
}

fn active_listings(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
    seller: Option<Addr>,
) -> StdResult<Vec<Listing>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    LISTINGS
        .range(
            deps.storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .map(|item| item.map(|(_, listing)| listing))
        .filter(|item| match item {
            Ok(listing) => {
                listing.active && seller.as_ref().map_or(true, |s| listing.seller == *s)
            }
            Err(_) => true,
        })
        .take(limit)
        .collect()
}

pub fn query_offer(deps: Deps, token_id: u64) -> StdResult<Option<Offer>> {
    OFFERS.may_load(deps.storage, token_id)
}

fn parse_token_id(token_id: &str) -> StdResult<u64> {
    token_id
        .parse()
        .map_err(|_| StdError::generic_err("Invalid token ID"))
}

pub fn query_owner_of(deps: Deps, token_id: String) -> StdResult<OwnerOfResponse> {
    let token = TOKENS.load(deps.storage, parse_token_id(&token_id)?)?;
    Ok(OwnerOfResponse {
        owner: token.owner.to_string(),
        approvals: vec![],
    })
}

pub fn query_num_tokens(deps: Deps) -> StdResult<NumTokensResponse> {
    let count = TOKEN_IDS.load(deps.storage)?;
    Ok(NumTokensResponse { count })
}

pub fn query_nft_info(deps: Deps, token_id: String) -> StdResult<NftInfoResponse<Empty>> {
    let token = TOKENS.load(deps.storage, parse_token_id(&token_id)?)?;
    Ok(NftInfoResponse {
        token_uri: Some(token.token_uri),
        extension: Empty {},
    })
}
