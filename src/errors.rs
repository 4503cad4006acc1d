use concordium_cis2::Cis2Error;
use concordium_std::*;

use crate::types::ContractError;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// No auction is registered for this asset (Error code: -4).
    NotFound,
    /// An auction is already registered for this asset (Error code: -5).
    AlreadyExists,
    /// The bidding window has already been opened (Error code: -6).
    AlreadyStarted,
    /// The asset is not held in custody by this contract (Error code: -7).
    AssetNotEscrowed,
    /// The auction is not accepting bids (Error code: -8).
    AuctionNotActive,
    /// The auction has already been closed (Error code: -9).
    AuctionAlreadyClosed,
    /// Attempt to close the auction before its end time (Error code: -10).
    AuctionNotYetEndable,
    /// Bid is below the minimum or does not exceed the highest bid
    /// (Error code: -11).
    BidTooLow,
    /// Only account addresses can perform this action (Error code: -12).
    OnlyAccountAddress,
    /// This function must only be called by a contract (Error code: -13).
    ContractOnly,
    /// The bidding window would end past the representable time range
    /// (Error code: -14).
    InvalidDuration,
    /// Failed to invoke a contract (Error code: -15).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -16).
    InvokeTransferError,
    /// Incompatible custody contract (Error code: -17).
    Incompatible,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
