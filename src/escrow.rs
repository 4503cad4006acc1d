use concordium_std::*;

/// Funds backing the current highest bid of one auction.
///
/// At most one such record exists per auction while bidding is open; the
/// contract balance holds exactly the sum of these records across all
/// auctions. The record is replaced the moment a strictly higher bid is
/// accepted, and the displaced record comes back as a [`Refund`].
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct EscrowedBid {
    /// Bidder account the funds were taken from.
    pub account: AccountAddress,
    /// Escrowed amount.
    pub amount: Amount,
}

/// A displaced bid. It must be paid back to the bidder within the same
/// operation that displaced it.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub struct Refund {
    pub account: AccountAddress,
    pub amount: Amount,
}

impl From<EscrowedBid> for Refund {
    fn from(bid: EscrowedBid) -> Self {
        Self {
            account: bid.account,
            amount: bid.amount,
        }
    }
}
