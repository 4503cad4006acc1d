use concordium_cis2::*;

use crate::errors::CustomContractError;

pub type ContractResult<A> = Result<A, ContractError>;

/// Token ID type of the custody contract. Kept fully generic so any CIS-2
/// identifier can be auctioned.
pub type ContractTokenId = TokenIdVec;

/// Contract token amount type. Unique assets always carry amount 1.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the
/// token IDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the
/// token amounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;
