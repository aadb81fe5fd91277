use alloy::{primitives::Selector, sol, sol_types::SolCall};
use lazy_static::lazy_static;
use std::collections::HashMap;

sol! {
    /// Batched executor (ERC-7821) implemented by the smart wallet
    #[derive(Debug, PartialEq, Eq)]
    interface ISmartWallet {
        struct Call {
            address to;
            uint256 value;
            bytes data;
        }

        function execute(bytes32 mode, bytes calldata executionData) external payable;
    }

    /// Uniswap Universal Router
    #[derive(Debug, PartialEq, Eq)]
    interface IUniversalRouter {
        function execute(bytes calldata commands, bytes[] calldata inputs, uint256 deadline) external payable;
    }
}

lazy_static! {
    pub static ref SELECTORS_NAMES: HashMap<Selector, String> = {
        let mut map = HashMap::new();
        // smart wallet
        map.insert(ISmartWallet::executeCall::SELECTOR.into(), ISmartWallet::executeCall::SIGNATURE.into());
        // universal router
        map.insert(IUniversalRouter::executeCall::SELECTOR.into(), IUniversalRouter::executeCall::SIGNATURE.into());
        map
    };
}

/// Signature of the function the calldata invokes, if it is a known one
pub fn function_signature(calldata: &[u8]) -> Option<&'static str> {
    let selector = Selector::try_from(calldata.get(0..4)?).ok()?;
    SELECTORS_NAMES.get(&selector).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::hex;

    #[test]
    fn selectors() {
        assert_eq!(ISmartWallet::executeCall::SELECTOR, hex!("e9ae5c53"));
        assert_eq!(IUniversalRouter::executeCall::SELECTOR, hex!("3593564c"));
    }

    #[test]
    fn known_function_signature() {
        assert_eq!(function_signature(&hex!("e9ae5c530000")), Some("execute(bytes32,bytes)"));
        assert_eq!(
            function_signature(&hex!("3593564c")),
            Some("execute(bytes,bytes[],uint256)")
        );
        assert_eq!(function_signature(&hex!("a9059cbb")), None);
        assert_eq!(function_signature(&hex!("e9ae")), None);
    }
}
