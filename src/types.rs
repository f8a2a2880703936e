//! Safe Queue Monitor - Type System
//!
//! - `chain`: Supported networks (Chain)
//! - `wallet`: Configured wallets, signer aliases and ownership (MonitoredWallet, SignerAlias, WalletInfo)
//! - `transaction`: Pending multisig transactions (QueuedTransaction)
//! - `display`: Rendering switches (DisplayOptions)
//! - `results`: Per-wallet and per-run outputs (AggregatedWalletResult, MonitorResult)

mod chain;
mod display;
mod results;
mod transaction;
mod wallet;

pub use chain::*;
pub use display::*;
pub use results::*;
pub use transaction::*;
pub use wallet::*;
