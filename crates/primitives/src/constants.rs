//! EIP-7702 delegation-related constants

/// Smart wallet implementation that EOAs delegate to
pub mod smart_wallet {
    /// Address of the smart wallet implementation (same deployment on every supported chain)
    pub const ADDRESS: &str = "0x000000009b1d0af20d8c6d0a44e162d11f9b8f00";
}

/// EIP-7702 delegation designator
pub mod delegation {
    /// Code prefix of a delegated account
    pub const DESIGNATOR_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];
    /// Length of the code of a delegated account (prefix + address)
    pub const DESIGNATOR_LENGTH: usize = 23;
}

/// Local wallet
pub mod wallet {
    /// Derivation path of the default account of a mnemonic
    pub const DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";
}

/// Uniswap Universal Router deployment used by the swap flow (Sepolia)
pub mod universal_router {
    /// Universal Router
    pub const ROUTER: &str = "0x3a9d48ab9751398bbfa63ad67599bb04e4bdf98b";
    /// Wrapped ether
    pub const WETH: &str = "0xfff9976782d46cc05630d1f6ebab18b2324d6b14";
    /// UNI token
    pub const UNI: &str = "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984";
    /// Fee tier of the WETH/UNI pool (0.01%)
    pub const POOL_FEE: u32 = 100;
    /// Default swap deadline (in seconds from now)
    pub const DEADLINE: u64 = 86400;
}

/// Transaction debug output
pub mod debug {
    /// Number of characters shown in calldata previews
    pub const PREVIEW_LENGTH: usize = 100;
}

/// Chains with a known smart wallet deployment
pub mod supported_chains {
    use alloy_chains::NamedChain;

    pub const CHAINS: [NamedChain; 8] = [
        NamedChain::Mainnet,
        NamedChain::Sepolia,
        NamedChain::Optimism,
        NamedChain::Base,
        NamedChain::Arbitrum,
        NamedChain::Polygon,
        NamedChain::BinanceSmartChain,
        NamedChain::Unichain,
    ];
}
