//! Encoding of batched calls executed by the smart wallet an EOA delegates to

use crate::{error::SmartWalletError, gen::ISmartWallet};
use alloy::{
    primitives::{b256, Address, Bytes, B256, U256},
    sol_types::{SolCall, SolValue},
};
use alloy_chains::Chain;
use delegator_primitives::{chain::ChainExt, Call, CallPlanner};
use serde::{Deserialize, Serialize};

/// Execution mode of a batch (ERC-7821 mode word)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModeType {
    /// Any failing call reverts the whole batch
    BatchedCall,
    /// Failing calls are skipped
    BatchedCallCanRevert,
}

impl ModeType {
    pub const BATCHED_CALL: B256 =
        b256!("0100000000000000000000000000000000000000000000000000000000000000");
    pub const BATCHED_CALL_CAN_REVERT: B256 =
        b256!("0101000000000000000000000000000000000000000000000000000000000000");

    pub fn word(&self) -> B256 {
        match self {
            Self::BatchedCall => Self::BATCHED_CALL,
            Self::BatchedCallCanRevert => Self::BATCHED_CALL_CAN_REVERT,
        }
    }

    pub fn from_word(word: B256) -> Result<Self, SmartWalletError> {
        if word == Self::BATCHED_CALL {
            Ok(Self::BatchedCall)
        } else if word == Self::BATCHED_CALL_CAN_REVERT {
            Ok(Self::BatchedCallCanRevert)
        } else {
            Err(SmartWalletError::UnsupportedMode { mode: word.to_string() })
        }
    }
}

/// Options of a batched execution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Revert the whole batch if any call fails
    pub revert_on_failure: bool,
}

impl ExecuteOptions {
    pub fn mode(&self) -> ModeType {
        if self.revert_on_failure {
            ModeType::BatchedCall
        } else {
            ModeType::BatchedCallCanRevert
        }
    }
}

/// Calldata for the smart wallet together with the native value it needs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodParameters {
    pub calldata: Bytes,
    pub value: U256,
}

/// Call of the smart wallet ready to be sent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionCall {
    /// Smart wallet implementation the batch is meant for
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl From<&Call> for ISmartWallet::Call {
    fn from(call: &Call) -> Self {
        Self { to: call.target, value: call.value, data: call.data.clone() }
    }
}

impl From<ISmartWallet::Call> for Call {
    fn from(call: ISmartWallet::Call) -> Self {
        Self { target: call.to, value: call.value, data: call.data }
    }
}

pub struct SmartWallet;

impl SmartWallet {
    /// Encodes the calls of the planner as one `execute(bytes32,bytes)` call
    ///
    /// # Arguments
    /// * `planner` - The planned calls, in execution order
    /// * `options` - The [ExecuteOptions](ExecuteOptions) selecting the execution mode
    ///
    /// # Returns
    /// * `MethodParameters` - The calldata and the total value of the calls
    pub fn encode_plan(planner: &CallPlanner, options: ExecuteOptions) -> MethodParameters {
        let calls: Vec<ISmartWallet::Call> = planner.calls().iter().map(Into::into).collect();

        let execute = ISmartWallet::executeCall {
            mode: options.mode().word(),
            executionData: calls.abi_encode().into(),
        };

        MethodParameters { calldata: execute.abi_encode().into(), value: planner.total_value() }
    }

    /// Encodes a list of calls as one `execute(bytes32,bytes)` call
    ///
    /// Fails if the values of the calls overflow when summed up.
    pub fn encode_batched_call(
        calls: &[Call],
        options: ExecuteOptions,
    ) -> Result<MethodParameters, SmartWalletError> {
        let mut planner = CallPlanner::new();
        for call in calls {
            planner.push(call.clone())?;
        }
        Ok(Self::encode_plan(&planner, options))
    }

    /// Decodes calldata produced by [encode_plan](SmartWallet::encode_plan)
    pub fn decode_batched_call(calldata: &[u8]) -> Result<(ModeType, Vec<Call>), SmartWalletError> {
        let execute = ISmartWallet::executeCall::abi_decode(calldata)
            .map_err(|e| SmartWalletError::Decode { inner: e.to_string() })?;
        let mode = ModeType::from_word(execute.mode)?;

        let calls = Vec::<ISmartWallet::Call>::abi_decode(&execute.executionData)
            .map_err(|e| SmartWalletError::Decode { inner: e.to_string() })?;

        Ok((mode, calls.into_iter().map(Into::into).collect()))
    }

    /// Addresses the encoded batch to the smart wallet deployment of the chain
    pub fn create_execute(
        method_parameters: MethodParameters,
        chain: Chain,
    ) -> Result<ExecutionCall, SmartWalletError> {
        let to = chain
            .smart_wallet_address()
            .ok_or(SmartWalletError::UnsupportedChain { chain_id: chain.id() })?;

        Ok(ExecutionCall { to, data: method_parameters.calldata, value: method_parameters.value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes, I256};
    use alloy_chains::NamedChain;
    use delegator_primitives::constants::smart_wallet;
    use std::str::FromStr;

    fn planner() -> CallPlanner {
        let mut planner = CallPlanner::new();
        planner
            .add("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa0001", I256::try_from(100).unwrap(), "0x")
            .unwrap();
        planner
            .add("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa0002", I256::try_from(50).unwrap(), "0xbeef")
            .unwrap();
        planner
    }

    #[test]
    fn encode_plan() -> eyre::Result<()> {
        let planner = planner();

        let params = SmartWallet::encode_plan(&planner, ExecuteOptions { revert_on_failure: true });

        assert_eq!(params.value, U256::from(150));
        assert_eq!(params.calldata[0..4], ISmartWallet::executeCall::SELECTOR);
        assert_eq!(params.calldata[4..36], ModeType::BATCHED_CALL[..]);

        let (mode, calls) = SmartWallet::decode_batched_call(&params.calldata)?;
        assert_eq!(mode, ModeType::BatchedCall);
        assert_eq!(calls, planner.calls());
        Ok(())
    }

    #[test]
    fn encode_single_empty_call_layout() {
        let call =
            Call::new(address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"), U256::ZERO, Bytes::new());

        let params = SmartWallet::encode_batched_call(&[call], ExecuteOptions::default()).unwrap();

        // selector, mode, offset, length, then abi.encode(Call[]) of 7 words
        assert_eq!(params.calldata.len(), 4 + 32 * 3 + 32 * 7);
        assert_eq!(params.calldata[4..36], ModeType::BATCHED_CALL_CAN_REVERT[..]);
        assert_eq!(U256::from_be_slice(&params.calldata[36..68]), U256::from(0x40));
        assert_eq!(U256::from_be_slice(&params.calldata[68..100]), U256::from(32 * 7));
        assert_eq!(params.value, U256::ZERO);
    }

    #[test]
    fn encode_batched_call_overflow() {
        let calls = vec![
            Call::new(Address::ZERO, U256::MAX, Bytes::new()),
            Call::new(Address::ZERO, U256::from(1), bytes!("00")),
        ];

        let res = SmartWallet::encode_batched_call(&calls, ExecuteOptions::default());
        assert!(matches!(res, Err(SmartWalletError::InvalidCall(_))));
    }

    #[test]
    fn decode_unknown_mode() {
        let execute = ISmartWallet::executeCall {
            mode: B256::ZERO,
            executionData: Vec::<ISmartWallet::Call>::new().abi_encode().into(),
        };

        let res = SmartWallet::decode_batched_call(&execute.abi_encode());
        assert!(matches!(res, Err(SmartWalletError::UnsupportedMode { .. })));
        assert!(matches!(
            SmartWallet::decode_batched_call(&bytes!("e9ae5c53")),
            Err(SmartWalletError::Decode { .. })
        ));
    }

    #[test]
    fn create_execute() {
        let params = SmartWallet::encode_plan(&planner(), ExecuteOptions::default());

        let execution =
            SmartWallet::create_execute(params.clone(), Chain::from_named(NamedChain::Sepolia))
                .unwrap();
        assert_eq!(execution.to, Address::from_str(smart_wallet::ADDRESS).unwrap());
        assert_eq!(execution.data, params.calldata);
        assert_eq!(execution.value, U256::from(150));

        assert_eq!(
            SmartWallet::create_execute(params, Chain::from_id(31337)),
            Err(SmartWalletError::UnsupportedChain { chain_id: 31337 })
        );
    }
}
