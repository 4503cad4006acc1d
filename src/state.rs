use concordium_std::*;

use crate::errors::CustomContractError;
use crate::escrow::{EscrowedBid, Refund};
use crate::types::ContractTokenId;

/// The phase an auction record is in.
#[derive(Debug, Serialize, SchemaType, Eq, PartialEq, Clone, Copy)]
pub enum AuctionState {
    /// Registered, but the bidding window has not been opened yet.
    Uninitialized,
    /// Accepting bids until the end time is reached.
    Active,
    /// Settled. The record is kept for queries and rejects every mutating
    /// call.
    Closed,
}

/// One auction record per asset under management.
#[derive(Debug, Serialize, SchemaType, Clone)]
pub struct Auction {
    pub state: AuctionState,
    /// Smallest accepted bid, fixed at registration.
    pub minimum_bid: Amount,
    /// Length of the bidding window, fixed at registration.
    pub duration: Duration,
    /// Account that placed the asset into custody. Receives the payout.
    pub depositor: Option<AccountAddress>,
    /// Opening time of the bidding window, written once.
    pub start: Option<Timestamp>,
    /// `start + duration`, written once together with `start`.
    pub end: Option<Timestamp>,
    /// Escrow slot of the current highest bid.
    pub highest_bid: Option<EscrowedBid>,
}

/// Outcome of closing an auction. The caller still has to perform the
/// transfers each variant carries.
#[must_use]
pub enum Settlement {
    /// The asset goes to the winner, the escrowed amount to the depositor.
    Sale {
        depositor: AccountAddress,
        winner: AccountAddress,
        amount: Amount,
    },
    /// No bids were received, the asset goes back to the depositor.
    Unsold { depositor: AccountAddress },
}

/// The contract state: the auction registry.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Custody contract holding the assets under auction.
    pub nft: ContractAddress,
    /// Auction records keyed by asset identifier.
    pub auctions: StateMap<ContractTokenId, Auction, S>,
}

impl<S: HasStateApi> State<S> {
    /// Create a new state with no auctions, bound to a custody contract.
    pub fn new(state_builder: &mut StateBuilder<S>, nft: ContractAddress) -> Self {
        State {
            nft,
            auctions: state_builder.new_map(),
        }
    }

    /// Register a new auction for an asset.
    pub fn create(
        &mut self,
        id: ContractTokenId,
        minimum_bid: Amount,
        duration: Duration,
    ) -> Result<(), CustomContractError> {
        ensure!(
            self.auctions.get(&id).is_none(),
            CustomContractError::AlreadyExists
        );
        self.auctions.insert(
            id,
            Auction {
                state: AuctionState::Uninitialized,
                minimum_bid,
                duration,
                depositor: None,
                start: None,
                end: None,
                highest_bid: None,
            },
        );
        Ok(())
    }

    /// Check that an auction exists and its bidding window can still be
    /// opened. Lets the caller verify asset custody before transitioning.
    pub fn startable(&self, id: &ContractTokenId) -> Result<(), CustomContractError> {
        let auction = self.auctions.get(id).ok_or(CustomContractError::NotFound)?;
        ensure!(
            auction.state == AuctionState::Uninitialized,
            CustomContractError::AlreadyStarted
        );
        Ok(())
    }

    /// Open the bidding window and record the depositor. Custody of the
    /// asset must have been verified by the caller.
    pub fn start(
        &mut self,
        id: &ContractTokenId,
        depositor: AccountAddress,
        now: Timestamp,
    ) -> Result<(), CustomContractError> {
        let mut auction = self
            .auctions
            .get_mut(id)
            .ok_or(CustomContractError::NotFound)?;
        ensure!(
            auction.state == AuctionState::Uninitialized,
            CustomContractError::AlreadyStarted
        );
        let end = now
            .checked_add(auction.duration)
            .ok_or(CustomContractError::InvalidDuration)?;
        auction.depositor = Some(depositor);
        auction.start = Some(now);
        auction.end = Some(end);
        auction.state = AuctionState::Active;
        Ok(())
    }

    /// Accept a bid, replacing the escrow slot. Returns the displaced bid
    /// that must be refunded within the same operation.
    pub fn bid(
        &mut self,
        id: &ContractTokenId,
        bidder: AccountAddress,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Option<Refund>, CustomContractError> {
        let mut auction = self
            .auctions
            .get_mut(id)
            .ok_or(CustomContractError::NotFound)?;
        ensure!(
            auction.state == AuctionState::Active,
            CustomContractError::AuctionNotActive
        );
        // `end` is always set while the auction is active.
        let end = auction.end.ok_or(CustomContractError::AuctionNotActive)?;
        ensure!(now < end, CustomContractError::AuctionNotActive);

        let floor = auction
            .highest_bid
            .as_ref()
            .map(|bid| bid.amount)
            .unwrap_or_else(Amount::zero);
        ensure!(
            amount > floor && amount >= auction.minimum_bid,
            CustomContractError::BidTooLow
        );

        Ok(auction
            .highest_bid
            .replace(EscrowedBid {
                account: bidder,
                amount,
            })
            .map(Into::into))
    }

    /// Close the auction once its end time has passed. The record stays in
    /// the registry for historical queries; only its phase changes.
    pub fn close(
        &mut self,
        id: &ContractTokenId,
        now: Timestamp,
    ) -> Result<Settlement, CustomContractError> {
        let mut auction = self
            .auctions
            .get_mut(id)
            .ok_or(CustomContractError::NotFound)?;
        match auction.state {
            AuctionState::Uninitialized => bail!(CustomContractError::AuctionNotActive),
            AuctionState::Closed => bail!(CustomContractError::AuctionAlreadyClosed),
            AuctionState::Active => (),
        }
        // `end` and `depositor` are always set while the auction is active.
        let end = auction.end.ok_or(CustomContractError::AuctionNotActive)?;
        ensure!(now >= end, CustomContractError::AuctionNotYetEndable);
        let depositor = auction
            .depositor
            .ok_or(CustomContractError::AuctionNotActive)?;

        auction.state = AuctionState::Closed;
        let settlement = match &auction.highest_bid {
            Some(bid) => Settlement::Sale {
                depositor,
                winner: bid.account,
                amount: bid.amount,
            },
            None => Settlement::Unsold { depositor },
        };
        Ok(settlement)
    }

    /// Snapshot of an auction record.
    pub fn get(&self, id: &ContractTokenId) -> Result<Auction, CustomContractError> {
        self.auctions
            .get(id)
            .map(|auction| (*auction).clone())
            .ok_or(CustomContractError::NotFound)
    }
}
