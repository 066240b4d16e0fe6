#[cfg(test)]
pub mod tests {
    use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, TokenResponse};
    use crate::state::{Listing, Offer};
    use crate::ContractError;
    use cosmwasm_std::{coins, Addr, Empty, Event, Uint128};
    use cw721::{Cw721QueryMsg, NumTokensResponse, OwnerOfResponse};
    use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

    pub fn marketplace_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new(
            crate::contract::execute,
            crate::contract::instantiate,
            crate::contract::query,
        );

        Box::new(contract)
    }

    pub const OWNER: &str = "owner";
    pub const BUYER: &str = "buyer";
    pub const RIVAL: &str = "rival";
    pub const DENOM: &str = "uxion";

    const URI: &str = "https://lavender-electric-gerbil-466.mypinata.cloud/ipfs/Qmaz3L8dtMxR3k1B8wauqZe5riv7xUFanQxMp2AkJz3V34";
    const ONE_XION: u128 = 1_000_000;

    pub fn proper_instantiate() -> (App, Addr) {
        let mut app = App::new(|router, _, storage| {
            for account in [BUYER, RIVAL] {
                router
                    .bank
                    .init_balance(storage, &Addr::unchecked(account), coins(10 * ONE_XION, DENOM))
                    .unwrap();
            }
        });
        let code_id = app.store_code(marketplace_contract());

        let contract_addr = app
            .instantiate_contract(
                code_id,
                Addr::unchecked(OWNER),
                &InstantiateMsg {
                    owner: OWNER.to_string(),
                    denom: DENOM.to_string(),
                },
                &[],
                "marketplace",
                None,
            )
            .unwrap();

        (app, contract_addr)
    }

    fn mint(app: &mut App, contract_addr: &Addr, sender: &str) -> AppResponse {
        app.execute_contract(
            Addr::unchecked(sender),
            contract_addr.clone(),
            &ExecuteMsg::Mint {
                token_uri: URI.to_string(),
            },
            &[],
        )
        .unwrap()
    }

    fn list(app: &mut App, contract_addr: &Addr, token_id: u64, price: u128) -> AppResponse {
        app.execute_contract(
            Addr::unchecked(OWNER),
            contract_addr.clone(),
            &ExecuteMsg::ListNft {
                token_id,
                price: Uint128::new(price),
            },
            &[],
        )
        .unwrap()
    }

    fn offer(
        app: &mut App,
        contract_addr: &Addr,
        bidder: &str,
        token_id: u64,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        app.execute_contract(
            Addr::unchecked(bidder),
            contract_addr.clone(),
            &ExecuteMsg::MakeOffer { token_id },
            &coins(amount, DENOM),
        )
    }

    fn balance(app: &App, account: &str) -> u128 {
        app.wrap()
            .query_balance(account, DENOM)
            .unwrap()
            .amount
            .u128()
    }

    #[test]
    fn mint_new_token_with_id_one() {
        let (mut app, contract_addr) = proper_instantiate();

        let res = mint(&mut app, &contract_addr, OWNER);
        assert!(res.has_event(&Event::new("wasm-NFTMinted").add_attributes(vec![
            ("owner", OWNER),
            ("token_id", "1"),
            ("uri", URI),
        ])));

        let token_ids: u64 = app
            .wrap()
            .query_wasm_smart(contract_addr.clone(), &QueryMsg::TokenIds {})
            .unwrap();
        assert_eq!(token_ids, 1);

        // the registry answers standard cw721 queries
        let n_tokens: NumTokensResponse = app
            .wrap()
            .query_wasm_smart(contract_addr, &Cw721QueryMsg::NumTokens {})
            .unwrap();
        assert_eq!(n_tokens.count, 1);
    }

    #[test]
    fn list_new_created_nft() {
        let (mut app, contract_addr) = proper_instantiate();
        mint(&mut app, &contract_addr, OWNER);

        let res = list(&mut app, &contract_addr, 1, 1000);
        assert!(res.has_event(
            &Event::new("wasm-NFTListed").add_attributes(vec![("token_id", "1"), ("price", "1000")])
        ));

        let listings: Vec<Listing> = app
            .wrap()
            .query_wasm_smart(
                contract_addr,
                &QueryMsg::AllListings {
                    start_after: None,
                    limit: None,
                },
            )
            .unwrap();
        assert_eq!(
            listings,
            vec![Listing {
                token_id: 1,
                seller: Addr::unchecked(OWNER),
                price: Uint128::new(1000),
                active: true,
            }]
        );
    }

    #[test]
    fn cancel_new_listed_nft() {
        let (mut app, contract_addr) = proper_instantiate();
        mint(&mut app, &contract_addr, OWNER);
        list(&mut app, &contract_addr, 1, 1000 * ONE_XION);

        let res = app
            .execute_contract(
                Addr::unchecked(OWNER),
                contract_addr.clone(),
                &ExecuteMsg::CancelListing { token_id: 1 },
                &[],
            )
            .unwrap();
        assert!(res.has_event(
            &Event::new("wasm-NFTListingCancelled")
                .add_attributes(vec![("token_id", "1"), ("owner", OWNER)])
        ));

        let err = offer(&mut app, &contract_addr, BUYER, 1, ONE_XION).unwrap_err();
        assert_eq!(
            err.downcast::<ContractError>().unwrap(),
            ContractError::NotListed { token_id: 1 }
        );
    }

    #[test]
    fn buyer_makes_offer_on_listed_nft() {
        let (mut app, contract_addr) = proper_instantiate();
        mint(&mut app, &contract_addr, OWNER);
        list(&mut app, &contract_addr, 1, ONE_XION);

        let res = offer(&mut app, &contract_addr, BUYER, 1, 2 * ONE_XION).unwrap();
        assert!(res.has_event(&Event::new("wasm-OfferCreated").add_attributes(vec![
            ("token_id", "1"),
            ("bidder", BUYER),
            ("amount", "2000000"),
        ])));

        // bid is escrowed by the contract
        assert_eq!(balance(&app, BUYER), 8 * ONE_XION);
        assert_eq!(balance(&app, contract_addr.as_str()), 2 * ONE_XION);

        let standing: Option<Offer> = app
            .wrap()
            .query_wasm_smart(contract_addr, &QueryMsg::Offer { token_id: 1 })
            .unwrap();
        assert_eq!(
            standing,
            Some(Offer {
                token_id: 1,
                bidder: Addr::unchecked(BUYER),
                amount: Uint128::new(2 * ONE_XION),
            })
        );
    }

    #[test]
    fn accepted_offer_settles_sale() {
        let (mut app, contract_addr) = proper_instantiate();
        mint(&mut app, &contract_addr, OWNER);
        list(&mut app, &contract_addr, 1, ONE_XION);
        offer(&mut app, &contract_addr, BUYER, 1, 2 * ONE_XION).unwrap();

        let res = app
            .execute_contract(
                Addr::unchecked(OWNER),
                contract_addr.clone(),
                &ExecuteMsg::AcceptOffer { token_id: 1 },
                &[],
            )
            .unwrap();
        assert!(res.has_event(
            &Event::new("wasm-OfferAccepted")
                .add_attributes(vec![("token_id", "1"), ("bidder", BUYER)])
        ));

        assert_eq!(balance(&app, OWNER), 2 * ONE_XION);
        assert_eq!(balance(&app, contract_addr.as_str()), 0);

        let owner_of: OwnerOfResponse = app
            .wrap()
            .query_wasm_smart(
                contract_addr.clone(),
                &Cw721QueryMsg::OwnerOf {
                    token_id: "1".to_string(),
                    include_expired: None,
                },
            )
            .unwrap();
        assert_eq!(owner_of.owner, BUYER);

        let token: TokenResponse = app
            .wrap()
            .query_wasm_smart(contract_addr, &QueryMsg::Token { token_id: 1 })
            .unwrap();
        assert_eq!(token.owner, Addr::unchecked(BUYER));
    }

    #[test]
    fn rejected_and_outbid_offers_are_refunded() {
        let (mut app, contract_addr) = proper_instantiate();
        mint(&mut app, &contract_addr, OWNER);
        list(&mut app, &contract_addr, 1, ONE_XION);

        offer(&mut app, &contract_addr, BUYER, 1, ONE_XION).unwrap();
        offer(&mut app, &contract_addr, RIVAL, 1, 3 * ONE_XION).unwrap();
        assert_eq!(balance(&app, BUYER), 10 * ONE_XION);
        assert_eq!(balance(&app, RIVAL), 7 * ONE_XION);

        let res = app
            .execute_contract(
                Addr::unchecked(OWNER),
                contract_addr.clone(),
                &ExecuteMsg::RejectOffer { token_id: 1 },
                &[],
            )
            .unwrap();
        assert!(res.has_event(
            &Event::new("wasm-OfferRejected")
                .add_attributes(vec![("token_id", "1"), ("bidder", RIVAL)])
        ));
        assert_eq!(balance(&app, RIVAL), 10 * ONE_XION);
        assert_eq!(balance(&app, contract_addr.as_str()), 0);

        // the listing is still open for new bids
        offer(&mut app, &contract_addr, BUYER, 1, ONE_XION).unwrap();
        let res = app
            .execute_contract(
                Addr::unchecked(BUYER),
                contract_addr.clone(),
                &ExecuteMsg::CancelOffer { token_id: 1 },
                &[],
            )
            .unwrap();
        assert!(res.has_event(
            &Event::new("wasm-OfferCancelled")
                .add_attributes(vec![("token_id", "1"), ("bidder", BUYER)])
        ));
        assert_eq!(balance(&app, BUYER), 10 * ONE_XION);
    }

    #[test]
    fn failed_offer_keeps_funds_with_bidder() {
        let (mut app, contract_addr) = proper_instantiate();
        mint(&mut app, &contract_addr, OWNER);
        list(&mut app, &contract_addr, 1, ONE_XION);
        offer(&mut app, &contract_addr, BUYER, 1, 2 * ONE_XION).unwrap();

        let err = offer(&mut app, &contract_addr, RIVAL, 1, ONE_XION).unwrap_err();
        assert_eq!(
            err.downcast::<ContractError>().unwrap(),
            ContractError::OfferTooLow {
                current: Uint128::new(2 * ONE_XION)
            }
        );
        assert_eq!(balance(&app, RIVAL), 10 * ONE_XION);
        assert_eq!(balance(&app, contract_addr.as_str()), 2 * ONE_XION);
    }
}
