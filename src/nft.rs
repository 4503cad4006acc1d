use concordium_cis2::{AdditionalData, BalanceOfQuery, Receiver, Transfer};
use concordium_std::*;

use crate::errors::CustomContractError;
use crate::types::{
    ContractBalanceOfQueryParams, ContractBalanceOfQueryResponse, ContractError, ContractResult,
    ContractTokenAmount, ContractTokenId, TransferParameter,
};

/// Move an asset between custody and an account through the custody
/// contract's CIS-2 `transfer` entrypoint.
pub fn transfer<T>(
    host: &mut impl HasHost<T>,
    nft: &ContractAddress,
    id: ContractTokenId,
    from: Address,
    to: AccountAddress,
) -> ContractResult<()> {
    let parameter = TransferParameter(vec![Transfer {
        token_id: id,
        amount: ContractTokenAmount::from(1),
        from,
        to: Receiver::Account(to),
        data: AdditionalData::empty(),
    }]);
    host.invoke_contract(
        nft,
        &parameter,
        EntrypointName::new_unchecked("transfer"),
        Amount::zero(),
    )
    .map_err(handle_call_error)?;

    Ok(())
}

/// Amount of an asset an address holds according to the custody contract.
pub fn balance_of<T>(
    host: &impl HasHost<T>,
    nft: &ContractAddress,
    id: &ContractTokenId,
    address: Address,
) -> ContractResult<ContractTokenAmount> {
    let parameter = ContractBalanceOfQueryParams {
        queries: vec![BalanceOfQuery {
            token_id: id.clone(),
            address,
        }],
    };
    let mut response = host
        .invoke_contract_read_only(
            nft,
            &parameter,
            EntrypointName::new_unchecked("balanceOf"),
            Amount::zero(),
        )
        .map_err(handle_call_error)?
        .ok_or(CustomContractError::Incompatible)?;

    let amounts = ContractBalanceOfQueryResponse::deserial(&mut response)
        .map_err(|_| CustomContractError::Incompatible)?;
    amounts
        .0
        .into_iter()
        .next()
        .ok_or_else(|| CustomContractError::Incompatible.into())
}

fn handle_call_error<R>(error: CallContractError<R>) -> ContractError {
    match error {
        CallContractError::MissingEntrypoint | CallContractError::MessageFailed => {
            CustomContractError::Incompatible.into()
        }
        CallContractError::LogicReject { .. } => CustomContractError::InvokeContractError.into(),
        e => e.into(),
    }
}

#[concordium_cfg_test]
mod tests {
    use concordium_std::test_infrastructure::*;

    use super::*;

    const NFT_CONTRACT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };

    const USER_1: AccountAddress = AccountAddress([1; 32]);

    fn token_1() -> ContractTokenId {
        concordium_cis2::TokenIdVec(vec![1])
    }

    #[concordium_test]
    fn test_transfer() {
        let state = ();
        let state_builder = TestStateBuilder::new();
        let mut host = TestHost::new(state, state_builder);

        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            MockFn::new(|parameter, _amount, _balance, _state| {
                let transfers = TransferParameter::deserial(&mut Cursor::new(parameter))
                    .map_err(|_| CallContractError::Trap)?;
                let transfer = transfers.0.first().ok_or(CallContractError::Trap)?;
                if transfer.amount != ContractTokenAmount::from(1) {
                    return Err(CallContractError::Trap);
                }
                match &transfer.to {
                    Receiver::Account(account) if *account == USER_1 => (),
                    _ => return Err(CallContractError::Trap),
                }
                Ok((false, Some(())))
            }),
        );

        let response = transfer(
            &mut host,
            &NFT_CONTRACT,
            token_1(),
            Address::Contract(NFT_CONTRACT),
            USER_1,
        );

        claim_eq!(response, Ok(()))
    }

    #[concordium_test]
    fn test_balance_of() {
        let state = ();
        let state_builder = TestStateBuilder::new();
        let mut host = TestHost::new(state, state_builder);

        host.setup_mock_entrypoint(
            NFT_CONTRACT,
            OwnedEntrypointName::new_unchecked("balanceOf".into()),
            MockFn::new(|parameter, _amount, _balance, _state| {
                let queries = ContractBalanceOfQueryParams::deserial(&mut Cursor::new(parameter))
                    .map_err(|_| CallContractError::Trap)?;
                let query = queries.queries.first().ok_or(CallContractError::Trap)?;
                if query.token_id != token_1() {
                    return Err(CallContractError::Trap);
                }
                Ok((
                    false,
                    Some(ContractBalanceOfQueryResponse::from(vec![
                        ContractTokenAmount::from(1),
                    ])),
                ))
            }),
        );

        let response = balance_of(
            &host,
            &NFT_CONTRACT,
            &token_1(),
            Address::Account(USER_1),
        );

        claim_eq!(response, Ok(ContractTokenAmount::from(1)))
    }
}
