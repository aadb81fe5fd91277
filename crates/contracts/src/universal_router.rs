//! Universal Router commands used to swap native currency through a delegated account

use crate::{error::RouteError, gen::IUniversalRouter};
use alloy::{
    primitives::{address, Address, Bytes, U256},
    sol_types::{SolCall, SolValue},
};

/// Recipient placeholder resolving to the caller of the router
pub const MSG_SENDER: Address = address!("0000000000000000000000000000000000000001");
/// Recipient placeholder resolving to the router itself
pub const ADDRESS_THIS: Address = address!("0000000000000000000000000000000000000002");
/// Flag allowing a command to revert without reverting the whole execution
pub const ALLOW_REVERT_FLAG: u8 = 0x80;
/// Largest fee representable in a path (uint24)
const MAX_FEE: u32 = 0xff_ffff;

/// Router commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    V3SwapExactIn = 0x00,
    Sweep = 0x04,
    PayPortion = 0x06,
    WrapEth = 0x0b,
}

/// Ordered list of router commands and their abi-encoded inputs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutePlanner {
    commands: Vec<u8>,
    inputs: Vec<Bytes>,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(
        &mut self,
        command: CommandType,
        input: Bytes,
        allow_revert: bool,
    ) -> &mut Self {
        let command = command as u8;
        self.commands.push(if allow_revert { command | ALLOW_REVERT_FLAG } else { command });
        self.inputs.push(input);
        self
    }

    /// Wraps `amount` of native currency held by the router into WETH
    pub fn wrap_eth(&mut self, recipient: Address, amount: U256) -> &mut Self {
        let input = (recipient, amount).abi_encode_params().into();
        self.add_command(CommandType::WrapEth, input, false)
    }

    pub fn v3_swap_exact_in(
        &mut self,
        recipient: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: Bytes,
        payer_is_user: bool,
    ) -> &mut Self {
        let input =
            (recipient, amount_in, amount_out_min, path, payer_is_user).abi_encode_params().into();
        self.add_command(CommandType::V3SwapExactIn, input, false)
    }

    /// Pays `bips` of the router balance of `token` to `recipient`
    pub fn pay_portion(&mut self, token: Address, recipient: Address, bips: U256) -> &mut Self {
        let input = (token, recipient, bips).abi_encode_params().into();
        self.add_command(CommandType::PayPortion, input, false)
    }

    /// Sends the whole router balance of `token` to `recipient`, requiring at least `amount_min`
    pub fn sweep(&mut self, token: Address, recipient: Address, amount_min: U256) -> &mut Self {
        let input = (token, recipient, amount_min).abi_encode_params().into();
        self.add_command(CommandType::Sweep, input, false)
    }

    pub fn commands(&self) -> &[u8] {
        &self.commands
    }

    pub fn inputs(&self) -> &[Bytes] {
        &self.inputs
    }

    /// Encodes `execute(bytes commands, bytes[] inputs, uint256 deadline)`
    pub fn encode_execute(&self, deadline: U256) -> Bytes {
        IUniversalRouter::executeCall {
            commands: self.commands.clone().into(),
            inputs: self.inputs.clone(),
            deadline,
        }
        .abi_encode()
        .into()
    }
}

/// Packs a Uniswap V3 path: `token | fee (3 bytes) | token | ...`
pub fn encode_v3_path(tokens: &[Address], fees: &[u32]) -> Result<Bytes, RouteError> {
    if tokens.len() < 2 || fees.len() != tokens.len() - 1 {
        return Err(RouteError::PathLength { tokens: tokens.len(), fees: fees.len() });
    }

    let mut path = Vec::with_capacity(tokens.len() * 20 + fees.len() * 3);
    path.extend_from_slice(tokens[0].as_slice());
    for (fee, token) in fees.iter().zip(&tokens[1..]) {
        if *fee > MAX_FEE {
            return Err(RouteError::FeeTooLarge { fee: *fee });
        }
        path.extend_from_slice(&fee.to_be_bytes()[1..]);
        path.extend_from_slice(token.as_slice());
    }

    Ok(path.into())
}

/// Swap of native currency for a token through a single V3 pool
///
/// The router wraps the attached value, swaps it, pays a portion of the output to a fee
/// recipient and sweeps the rest to the recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeSwap {
    pub weth: Address,
    pub token_out: Address,
    pub pool_fee: u32,
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub fee_recipient: Address,
    pub fee_bips: U256,
    pub recipient: Address,
}

impl NativeSwap {
    pub fn route(&self) -> Result<RoutePlanner, RouteError> {
        let path = encode_v3_path(&[self.weth, self.token_out], &[self.pool_fee])?;

        let mut planner = RoutePlanner::new();
        planner
            .wrap_eth(ADDRESS_THIS, self.amount_in)
            .v3_swap_exact_in(ADDRESS_THIS, self.amount_in, self.amount_out_min, path, false)
            .pay_portion(self.token_out, self.fee_recipient, self.fee_bips)
            .sweep(self.token_out, self.recipient, self.amount_out_min);

        Ok(planner)
    }
}
