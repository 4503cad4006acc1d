//! A contract that auctions unique CIS-2 assets inside fixed time windows,
//! custodying the asset and the highest bidder's funds until settlement.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod errors;
mod escrow;
mod events;
mod external;
mod nft;
mod state;
mod types;
