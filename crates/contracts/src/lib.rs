//! Smart wallet and Universal Router interfaces used by EIP-7702 delegated accounts

mod error;
mod gen;
pub mod smart_wallet;
pub mod universal_router;

pub use error::{decode_revert_string, RouteError, SmartWalletError};
pub use gen::{function_signature, ISmartWallet, IUniversalRouter, SELECTORS_NAMES};
pub use smart_wallet::{ExecuteOptions, ExecutionCall, MethodParameters, ModeType, SmartWallet};
pub use universal_router::{encode_v3_path, CommandType, NativeSwap, RoutePlanner};
