use concordium_std::*;

use crate::types::ContractTokenId;

/// Type of the parameter to the `init` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Custody contract that holds the assets put up for auction.
    pub nft: ContractAddress,
}

/// Parameter to the `create` entrypoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct CreateParams {
    /// Asset identifier, also the lookup key of the auction record.
    pub id: ContractTokenId,
    /// Smallest accepted bid.
    pub minimum_bid: Amount,
    /// Length of the bidding window.
    pub duration: Duration,
}
