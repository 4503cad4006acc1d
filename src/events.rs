use concordium_std::*;

use crate::types::ContractTokenId;

/// Tag for the Started event.
pub const STARTED_TAG: u8 = u8::MAX - 1;

/// Tag for the Bid event.
pub const BID_TAG: u8 = u8::MAX - 2;

/// Tag for the Ended event.
pub const ENDED_TAG: u8 = u8::MAX - 3;

/// Tag for the EndedNoBids event.
pub const ENDED_NO_BIDS_TAG: u8 = u8::MAX - 4;

/// Bidding window opened event data.
#[derive(Debug, Serial)]
pub struct StartedEvent<'a> {
    /// Asset identifier.
    pub id: &'a ContractTokenId,
}

/// Bid accepted event data.
#[derive(Debug, Serial)]
pub struct BidEvent<'a> {
    /// Asset identifier.
    pub id: &'a ContractTokenId,
    /// Bidder account address.
    pub bidder: &'a AccountAddress,
    /// Bid amount.
    pub amount: Amount,
}

/// Auction settled event data.
#[derive(Debug, Serial)]
pub struct EndedEvent<'a> {
    /// Asset identifier.
    pub id: &'a ContractTokenId,
    /// Address of the auction winner.
    pub winner: &'a AccountAddress,
    /// Winning bid amount.
    pub amount: Amount,
}

/// Auction settled without bids event data.
#[derive(Debug, Serial)]
pub struct EndedNoBidsEvent<'a> {
    /// Asset identifier.
    pub id: &'a ContractTokenId,
}

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvent<'a> {
    Started(StartedEvent<'a>),
    Bid(BidEvent<'a>),
    Ended(EndedEvent<'a>),
    EndedNoBids(EndedNoBidsEvent<'a>),
}

impl<'a> AuctionEvent<'a> {
    pub fn started(id: &'a ContractTokenId) -> Self {
        Self::Started(StartedEvent { id })
    }

    pub fn bid(id: &'a ContractTokenId, bidder: &'a AccountAddress, amount: Amount) -> Self {
        Self::Bid(BidEvent { id, bidder, amount })
    }

    pub fn ended(id: &'a ContractTokenId, winner: &'a AccountAddress, amount: Amount) -> Self {
        Self::Ended(EndedEvent { id, winner, amount })
    }

    pub fn ended_no_bids(id: &'a ContractTokenId) -> Self {
        Self::EndedNoBids(EndedNoBidsEvent { id })
    }
}

impl<'a> Serial for AuctionEvent<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvent::Started(event) => {
                out.write_u8(STARTED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::Bid(event) => {
                out.write_u8(BID_TAG)?;
                event.serial(out)
            }
            AuctionEvent::Ended(event) => {
                out.write_u8(ENDED_TAG)?;
                event.serial(out)
            }
            AuctionEvent::EndedNoBids(event) => {
                out.write_u8(ENDED_NO_BIDS_TAG)?;
                event.serial(out)
            }
        }
    }
}
