use concordium_cis2::OnReceivingCis2Params;
use concordium_std::*;

use crate::errors::CustomContractError;
use crate::events::AuctionEvent;
use crate::external::{CreateParams, InitParams};
use crate::nft;
use crate::state::{Auction, Settlement, State};
use crate::types::{ContractResult, ContractTokenAmount, ContractTokenId};

/// Init function that sets up an empty auction registry bound to the
/// custody contract.
#[init(contract = "AuctionHouse", parameter = "InitParams")]
fn contract_init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;
    Ok(State::new(state_builder, params.nft))
}

/// Register an auction for an asset, fixing its minimum bid and the length
/// of its bidding window.
#[receive(
    contract = "AuctionHouse",
    name = "create",
    parameter = "CreateParams",
    mutable
)]
fn contract_create<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let params: CreateParams = ctx.parameter_cursor().get()?;
    host.state_mut()
        .create(params.id, params.minimum_bid, params.duration)?;
    Ok(())
}

/// Open the bidding window for a registered auction. The caller becomes the
/// depositor and must have placed the asset into this contract's custody
/// beforehand.
#[receive(
    contract = "AuctionHouse",
    name = "start",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn contract_start<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let id: ContractTokenId = ctx.parameter_cursor().get()?;

    let depositor = match ctx.sender() {
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
        Address::Account(account) => account,
    };

    host.state().startable(&id)?;

    // The asset must already sit in this contract's custody
    let custody = host.state().nft;
    let held = nft::balance_of(host, &custody, &id, Address::Contract(ctx.self_address()))?;
    ensure!(
        held == ContractTokenAmount::from(1),
        CustomContractError::AssetNotEscrowed.into()
    );

    host.state_mut()
        .start(&id, depositor, ctx.metadata().slot_time())?;

    logger.log(&AuctionEvent::started(&id))?;

    Ok(())
}

/// Place a bid on an active auction. The attached amount is the bid; the
/// displaced bid, if any, is refunded in full within the same operation.
#[receive(
    contract = "AuctionHouse",
    name = "bid",
    parameter = "ContractTokenId",
    mutable,
    payable,
    enable_logger
)]
fn contract_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let id: ContractTokenId = ctx.parameter_cursor().get()?;

    let bidder = match ctx.sender() {
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress.into()),
        Address::Account(account) => account,
    };

    let displaced = host
        .state_mut()
        .bid(&id, bidder, amount, ctx.metadata().slot_time())?;

    logger.log(&AuctionEvent::bid(&id, &bidder, amount))?;

    // Refund the displaced bid in full
    if let Some(refund) = displaced {
        host.invoke_transfer(&refund.account, refund.amount)?;
    }

    Ok(())
}

/// Close an auction whose end time has passed. Hands the asset to the
/// winner and the escrowed funds to the depositor, or returns the asset to
/// the depositor when no bid was received. Any caller may close.
#[receive(
    contract = "AuctionHouse",
    name = "close",
    parameter = "ContractTokenId",
    mutable,
    enable_logger
)]
fn contract_close<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let id: ContractTokenId = ctx.parameter_cursor().get()?;

    let settlement = host.state_mut().close(&id, ctx.metadata().slot_time())?;
    let custody = host.state().nft;

    match settlement {
        Settlement::Sale {
            depositor,
            winner,
            amount,
        } => {
            nft::transfer(
                host,
                &custody,
                id.clone(),
                Address::Contract(ctx.self_address()),
                winner,
            )?;
            host.invoke_transfer(&depositor, amount)?;
            logger.log(&AuctionEvent::ended(&id, &winner, amount))?;
        }
        Settlement::Unsold { depositor } => {
            nft::transfer(
                host,
                &custody,
                id.clone(),
                Address::Contract(ctx.self_address()),
                depositor,
            )?;
            logger.log(&AuctionEvent::ended_no_bids(&id))?;
        }
    }

    Ok(())
}

/// View function that returns one auction record.
#[receive(
    contract = "AuctionHouse",
    name = "view",
    parameter = "ContractTokenId",
    return_value = "Auction"
)]
fn contract_view<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Auction> {
    let id: ContractTokenId = ctx.parameter_cursor().get()?;
    Ok(host.state().get(&id)?)
}

/// Hook for CIS-2 transfers into custody. Deposits are accepted as-is; the
/// start precondition verifies custody when the bidding window opens.
#[receive(
    contract = "AuctionHouse",
    name = "onReceivingCIS2",
    parameter = "OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>"
)]
fn contract_on_cis2_received<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    _host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    ensure!(
        matches!(ctx.sender(), Address::Contract(_)),
        CustomContractError::ContractOnly.into()
    );
    let _params: OnReceivingCis2Params<ContractTokenId, ContractTokenAmount> =
        ctx.parameter_cursor().get()?;
    Ok(())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    use concordium_cis2::{AdditionalData, Receiver};

    use crate::escrow::EscrowedBid;
    use crate::state::AuctionState;
    use crate::types::{ContractBalanceOfQueryResponse, TransferParameter};

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 7,
        subindex: 0,
    };

    const ALICE: AccountAddress = AccountAddress([1u8; 32]);
    const BOB: AccountAddress = AccountAddress([2u8; 32]);
    const CAROL: AccountAddress = AccountAddress([3u8; 32]);
    const DAVE: AccountAddress = AccountAddress([4u8; 32]);

    /// Slot time at which the bidding window opens, in milliseconds.
    const START: u64 = 1_000;
    const DURATION_MILLIS: u64 = 30_000;
    const END: u64 = START + DURATION_MILLIS;

    fn token_1() -> ContractTokenId {
        concordium_cis2::TokenIdVec(vec![1])
    }

    fn minimum_bid() -> Amount {
        Amount::from_micro_ccd(1_000_000_000_000_000)
    }

    fn first_bid() -> Amount {
        Amount::from_micro_ccd(2_000_000_000_000_000)
    }

    fn second_bid() -> Amount {
        Amount::from_micro_ccd(3_000_000_000_000_000)
    }

    fn fresh_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let state = State::new(&mut state_builder, NFT_CONTRACT);
        TestHost::new(state, state_builder)
    }

    /// A host whose auction is registered and accepting bids, with CAROL as
    /// the depositor.
    fn active_auction_host() -> TestHost<State<TestStateApi>> {
        let mut host = fresh_host();
        host.state_mut()
            .create(
                token_1(),
                minimum_bid(),
                Duration::from_millis(DURATION_MILLIS),
            )
            .expect("Registering the auction should succeed");
        host.state_mut()
            .start(&token_1(), CAROL, Timestamp::from_timestamp_millis(START))
            .expect("Opening the bidding window should succeed");
        host
    }

    fn receive_ctx<'a>(sender: AccountAddress, slot_time: u64) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender));
        ctx.set_self_address(SELF_ADDRESS);
        ctx.set_metadata_slot_time(Timestamp::from_timestamp_millis(slot_time));
        ctx
    }

    fn expect_error<E, T>(expr: Result<T, E>, err: E, msg: &str)
    where
        E: PartialEq + Debug,
        T: Debug,
    {
        let actual = expr.expect_err(msg);
        claim_eq!(actual, err);
    }

    fn mock_custody_holding(host: &mut TestHost<State<TestStateApi>>, held: u64) {
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("balanceOf".into()),
            MockFn::new(move |_parameter, _amount, _balance, _state| {
                Ok((
                    false,
                    Some(ContractBalanceOfQueryResponse::from(vec![
                        ContractTokenAmount::from(held),
                    ])),
                ))
            }),
        );
    }

    /// Mock the custody contract's `transfer` entrypoint and trap unless the
    /// asset is handed to the expected receiver.
    fn mock_asset_transfer_to(host: &mut TestHost<State<TestStateApi>>, expected: AccountAddress) {
        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            MockFn::new(move |parameter, _amount, _balance, _state| {
                let transfers = TransferParameter::deserial(&mut Cursor::new(parameter))
                    .map_err(|_| CallContractError::Trap)?;
                let transfer = transfers.0.first().ok_or(CallContractError::Trap)?;
                match &transfer.to {
                    Receiver::Account(account) if *account == expected => (),
                    _ => return Err(CallContractError::Trap),
                }
                Ok((false, Some(())))
            }),
        );
    }

    #[concordium_test]
    /// Initialization binds the custody contract and starts with an empty
    /// registry.
    fn test_init() {
        let parameter_bytes = to_bytes(&InitParams { nft: NFT_CONTRACT });
        let mut ctx = TestInitContext::empty();
        ctx.set_parameter(&parameter_bytes);
        let mut state_builder = TestStateBuilder::new();

        let state = contract_init(&ctx, &mut state_builder)
            .expect("Contract initialization results in error");

        claim_eq!(
            state.nft,
            NFT_CONTRACT,
            "Registry should be bound to the custody contract"
        );
        claim!(
            state.auctions.iter().next().is_none(),
            "Registry should start empty"
        );
    }

    #[concordium_test]
    /// Registering an auction stores a fresh record; registering the same
    /// asset twice is rejected.
    fn test_create_and_duplicate() {
        let mut host = fresh_host();
        let parameter_bytes = to_bytes(&CreateParams {
            id: token_1(),
            minimum_bid: minimum_bid(),
            duration: Duration::from_millis(DURATION_MILLIS),
        });
        let mut ctx = receive_ctx(CAROL, START);
        ctx.set_parameter(&parameter_bytes);

        contract_create(&ctx, &mut host).expect("Registering a new auction should succeed");

        let auction = host
            .state()
            .get(&token_1())
            .expect("Record should exist after registration");
        claim_eq!(auction.state, AuctionState::Uninitialized);
        claim_eq!(auction.minimum_bid, minimum_bid());
        claim_eq!(auction.duration, Duration::from_millis(DURATION_MILLIS));
        claim_eq!(auction.highest_bid, None);
        claim_eq!(auction.depositor, None);

        let res = contract_create(&ctx, &mut host);
        expect_error(
            res,
            CustomContractError::AlreadyExists.into(),
            "Registering the same asset twice should be rejected",
        );
    }

    #[concordium_test]
    /// The depositor opens the bidding window once the asset is in custody.
    fn test_start() {
        let mut host = fresh_host();
        host.state_mut()
            .create(
                token_1(),
                minimum_bid(),
                Duration::from_millis(DURATION_MILLIS),
            )
            .expect("Registering the auction should succeed");
        mock_custody_holding(&mut host, 1);

        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(CAROL, START);
        ctx.set_parameter(&parameter_bytes);

        contract_start(&ctx, &mut host, &mut logger)
            .expect("Opening the bidding window should succeed");

        let auction = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(auction.state, AuctionState::Active);
        claim_eq!(auction.depositor, Some(CAROL));
        claim_eq!(auction.start, Some(Timestamp::from_timestamp_millis(START)));
        claim_eq!(auction.end, Some(Timestamp::from_timestamp_millis(END)));
        claim!(
            logger.logs.contains(&to_bytes(&AuctionEvent::started(&token_1()))),
            "Started event should be logged"
        );
    }

    #[concordium_test]
    /// Opening the bidding window fails while the asset is not in custody.
    fn test_start_without_custody() {
        let mut host = fresh_host();
        host.state_mut()
            .create(
                token_1(),
                minimum_bid(),
                Duration::from_millis(DURATION_MILLIS),
            )
            .expect("Registering the auction should succeed");
        mock_custody_holding(&mut host, 0);

        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(CAROL, START);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_start(&ctx, &mut host, &mut logger);
        expect_error(
            res,
            CustomContractError::AssetNotEscrowed.into(),
            "Starting without custody of the asset should be rejected",
        );
    }

    #[concordium_test]
    /// Starting an unregistered auction is rejected before custody is even
    /// queried.
    fn test_start_unknown() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(CAROL, START);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_start(&ctx, &mut host, &mut logger);
        expect_error(
            res,
            CustomContractError::NotFound.into(),
            "Starting an unregistered auction should be rejected",
        );
    }

    #[concordium_test]
    /// The bidding window can only be opened once.
    fn test_start_twice() {
        let mut host = fresh_host();
        host.state_mut()
            .create(
                token_1(),
                minimum_bid(),
                Duration::from_millis(DURATION_MILLIS),
            )
            .expect("Registering the auction should succeed");
        mock_custody_holding(&mut host, 1);

        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(CAROL, START);
        ctx.set_parameter(&parameter_bytes);

        contract_start(&ctx, &mut host, &mut logger)
            .expect("Opening the bidding window should succeed");

        let res = contract_start(&ctx, &mut host, &mut logger);
        expect_error(
            res,
            CustomContractError::AlreadyStarted.into(),
            "Opening the bidding window twice should be rejected",
        );
    }

    #[concordium_test]
    /// A first bid above the minimum is escrowed and logged with its exact
    /// amount and bidder.
    fn test_bid() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(ALICE, START + 5_000);
        ctx.set_parameter(&parameter_bytes);
        // the attached amount has already arrived in the contract balance
        host.set_self_balance(first_bid());

        contract_bid(&ctx, &mut host, first_bid(), &mut logger).expect("Bidding should pass");

        let auction = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(
            auction.highest_bid,
            Some(EscrowedBid {
                account: ALICE,
                amount: first_bid(),
            }),
            "The first bid should be escrowed"
        );
        claim!(
            logger
                .logs
                .contains(&to_bytes(&AuctionEvent::bid(&token_1(), &ALICE, first_bid()))),
            "Bid event should be logged"
        );
        claim!(
            host.get_transfers().is_empty(),
            "No funds should leave escrow on a first bid"
        );
    }

    #[concordium_test]
    /// A higher bid displaces the previous one, which is refunded in full
    /// within the same operation.
    fn test_outbid_refunds_previous() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());

        let mut alice_ctx = receive_ctx(ALICE, START + 5_000);
        alice_ctx.set_parameter(&parameter_bytes);
        host.set_self_balance(first_bid());
        contract_bid(&alice_ctx, &mut host, first_bid(), &mut logger)
            .expect("Bidding should pass");

        let mut bob_ctx = receive_ctx(BOB, START + 10_000);
        bob_ctx.set_parameter(&parameter_bytes);
        host.set_self_balance(first_bid() + second_bid());
        contract_bid(&bob_ctx, &mut host, second_bid(), &mut logger)
            .expect("Outbidding should pass");

        let auction = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(
            auction.highest_bid,
            Some(EscrowedBid {
                account: BOB,
                amount: second_bid(),
            }),
            "The highest bid should belong to the most recent bidder"
        );
        claim_eq!(
            host.get_transfers(),
            [(ALICE, first_bid())],
            "The displaced bidder should be refunded the exact amount paid"
        );
    }

    #[concordium_test]
    /// Bids at or below the highest bid, or below the minimum, are rejected
    /// and leave the record unchanged.
    fn test_bid_too_low() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());

        let mut alice_ctx = receive_ctx(ALICE, START + 5_000);
        alice_ctx.set_parameter(&parameter_bytes);
        host.set_self_balance(first_bid());
        contract_bid(&alice_ctx, &mut host, first_bid(), &mut logger)
            .expect("Bidding should pass");

        let mut bob_ctx = receive_ctx(BOB, START + 10_000);
        bob_ctx.set_parameter(&parameter_bytes);

        // equal to the current highest bid
        let res = contract_bid(&bob_ctx, &mut host, first_bid(), &mut logger);
        expect_error(
            res,
            CustomContractError::BidTooLow.into(),
            "A bid equal to the highest should be rejected",
        );

        // zero
        let res = contract_bid(&bob_ctx, &mut host, Amount::zero(), &mut logger);
        expect_error(
            res,
            CustomContractError::BidTooLow.into(),
            "Bidding zero should fail",
        );

        let auction = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(
            auction.highest_bid,
            Some(EscrowedBid {
                account: ALICE,
                amount: first_bid(),
            }),
            "Rejected bids should leave the escrow slot unchanged"
        );
    }

    #[concordium_test]
    /// A first bid below the minimum is rejected even though it exceeds the
    /// (empty) highest bid.
    fn test_bid_below_minimum() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(ALICE, START + 5_000);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_bid(
            &ctx,
            &mut host,
            Amount::from_micro_ccd(999_999_999_999_999),
            &mut logger,
        );
        expect_error(
            res,
            CustomContractError::BidTooLow.into(),
            "A bid below the minimum should be rejected",
        );
    }

    #[concordium_test]
    /// Bids are rejected once the end time is reached.
    fn test_bid_after_window() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(ALICE, END);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_bid(&ctx, &mut host, first_bid(), &mut logger);
        expect_error(
            res,
            CustomContractError::AuctionNotActive.into(),
            "Bidding at the end time should be rejected",
        );
    }

    #[concordium_test]
    /// Bids are rejected while the bidding window has not been opened.
    fn test_bid_unstarted() {
        let mut host = fresh_host();
        host.state_mut()
            .create(
                token_1(),
                minimum_bid(),
                Duration::from_millis(DURATION_MILLIS),
            )
            .expect("Registering the auction should succeed");

        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(ALICE, START);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_bid(&ctx, &mut host, first_bid(), &mut logger);
        expect_error(
            res,
            CustomContractError::AuctionNotActive.into(),
            "Bidding before the window opens should be rejected",
        );
    }

    #[concordium_test]
    /// Only account addresses can bid.
    fn test_bid_from_contract() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(ALICE, START + 5_000);
        ctx.set_sender(Address::Contract(NFT_CONTRACT));
        ctx.set_parameter(&parameter_bytes);

        let res = contract_bid(&ctx, &mut host, first_bid(), &mut logger);
        expect_error(
            res,
            CustomContractError::OnlyAccountAddress.into(),
            "Bidding from a contract address should be rejected",
        );
    }

    #[concordium_test]
    /// Closing at the end time settles the auction: the asset goes to the
    /// winner, the depositor is paid exactly the winning amount, and the
    /// record becomes immutable.
    fn test_close_with_winner() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());

        let mut alice_ctx = receive_ctx(ALICE, START + 5_000);
        alice_ctx.set_parameter(&parameter_bytes);
        host.set_self_balance(first_bid());
        contract_bid(&alice_ctx, &mut host, first_bid(), &mut logger)
            .expect("Bidding should pass");

        let mut bob_ctx = receive_ctx(BOB, START + 10_000);
        bob_ctx.set_parameter(&parameter_bytes);
        host.set_self_balance(first_bid() + second_bid());
        contract_bid(&bob_ctx, &mut host, second_bid(), &mut logger)
            .expect("Outbidding should pass");

        // anyone may settle once the window is over
        mock_asset_transfer_to(&mut host, BOB);
        host.set_self_balance(second_bid());
        let mut close_ctx = receive_ctx(DAVE, END);
        close_ctx.set_parameter(&parameter_bytes);
        contract_close(&close_ctx, &mut host, &mut logger)
            .expect("Closing at the end time should succeed");

        let auction = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(auction.state, AuctionState::Closed);
        claim!(
            logger
                .logs
                .contains(&to_bytes(&AuctionEvent::ended(&token_1(), &BOB, second_bid()))),
            "Ended event should carry the final bidder and amount"
        );
        claim_eq!(
            host.get_transfers(),
            [(ALICE, first_bid()), (CAROL, second_bid())],
            "The depositor should be paid exactly the winning amount"
        );

        // the record stays queryable and identical
        let again = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(again.state, auction.state);
        claim_eq!(again.highest_bid, auction.highest_bid);
        claim_eq!(again.depositor, auction.depositor);
        claim_eq!(again.end, auction.end);

        // no operation after close mutates it
        let res = contract_close(&close_ctx, &mut host, &mut logger);
        expect_error(
            res,
            CustomContractError::AuctionAlreadyClosed.into(),
            "Closing a second time should be rejected",
        );
        let res = contract_bid(&bob_ctx, &mut host, second_bid() + second_bid(), &mut logger);
        expect_error(
            res,
            CustomContractError::AuctionNotActive.into(),
            "Bidding on a closed auction should be rejected",
        );
    }

    #[concordium_test]
    /// Closing before the end time is rejected and leaves the auction
    /// biddable.
    fn test_close_before_end() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(DAVE, END - 1);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_close(&ctx, &mut host, &mut logger);
        expect_error(
            res,
            CustomContractError::AuctionNotYetEndable.into(),
            "Closing before the end time should be rejected",
        );

        let auction = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(auction.state, AuctionState::Active);
    }

    #[concordium_test]
    /// Closing without any bid returns the asset to the depositor and
    /// releases no funds.
    fn test_close_no_bids() {
        let mut host = active_auction_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());

        mock_asset_transfer_to(&mut host, CAROL);
        let mut ctx = receive_ctx(DAVE, END);
        ctx.set_parameter(&parameter_bytes);
        contract_close(&ctx, &mut host, &mut logger)
            .expect("Closing without bids should succeed");

        let auction = host.state().get(&token_1()).expect("Record should exist");
        claim_eq!(auction.state, AuctionState::Closed);
        claim_eq!(auction.highest_bid, None);
        claim!(
            logger
                .logs
                .contains(&to_bytes(&AuctionEvent::ended_no_bids(&token_1()))),
            "EndedNoBids event should be logged"
        );
        claim!(
            host.get_transfers().is_empty(),
            "No funds should be released when there was no bid"
        );
    }

    #[concordium_test]
    /// Closing an auction whose window was never opened is rejected.
    fn test_close_unstarted() {
        let mut host = fresh_host();
        host.state_mut()
            .create(
                token_1(),
                minimum_bid(),
                Duration::from_millis(DURATION_MILLIS),
            )
            .expect("Registering the auction should succeed");

        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(DAVE, END);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_close(&ctx, &mut host, &mut logger);
        expect_error(
            res,
            CustomContractError::AuctionNotActive.into(),
            "Closing before the window was opened should be rejected",
        );
    }

    #[concordium_test]
    /// Unknown assets are reported as such for every operation.
    fn test_unknown_asset() {
        let mut host = fresh_host();
        let mut logger = TestLogger::init();
        let parameter_bytes = to_bytes(&token_1());
        let mut ctx = receive_ctx(ALICE, START);
        ctx.set_parameter(&parameter_bytes);

        let res = contract_bid(&ctx, &mut host, first_bid(), &mut logger);
        expect_error(
            res,
            CustomContractError::NotFound.into(),
            "Bidding on an unknown asset should be rejected",
        );

        let res = contract_close(&ctx, &mut host, &mut logger);
        expect_error(
            res,
            CustomContractError::NotFound.into(),
            "Closing an unknown asset should be rejected",
        );

        let res = contract_view(&ctx, &host);
        expect_error(
            res,
            CustomContractError::NotFound.into(),
            "Viewing an unknown asset should be rejected",
        );
    }

    #[concordium_test]
    /// Custody deposits via the CIS-2 hook are accepted from contracts only.
    fn test_on_receiving_cis2() {
        let host = fresh_host();
        let parameter_bytes = to_bytes(&OnReceivingCis2Params {
            token_id: token_1(),
            amount: ContractTokenAmount::from(1),
            from: Address::Account(CAROL),
            data: AdditionalData::empty(),
        });

        let mut ctx = receive_ctx(CAROL, START);
        ctx.set_sender(Address::Contract(NFT_CONTRACT));
        ctx.set_parameter(&parameter_bytes);
        contract_on_cis2_received(&ctx, &host)
            .expect("Deposit notifications from the custody contract should be accepted");

        let mut ctx = receive_ctx(CAROL, START);
        ctx.set_parameter(&parameter_bytes);
        let res = contract_on_cis2_received(&ctx, &host);
        expect_error(
            res,
            CustomContractError::ContractOnly.into(),
            "Deposit notifications from accounts should be rejected",
        );
    }
}
