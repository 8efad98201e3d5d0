pub mod blueprint;
pub mod core;
pub mod error;
pub mod flow;
pub mod params;
pub mod provider;
pub mod session;
pub mod tx;
pub mod types;

pub use crate::core::engine::{ScriptEngine, TxAssembler};
pub use crate::core::provider::ChainProvider;
pub use crate::core::wallet::{WalletApi, WalletConnector};
pub use crate::error::{GiftCardError, Result};
pub use crate::flow::{FlowStage, GiftCardFlow};
pub use crate::params::apply_params;
pub use crate::provider::BlockfrostProvider;
pub use crate::session::{Session, SessionBuilder};
pub use crate::tx::{LockBuilder, RedeemBuilder, TxPlan};
pub use crate::types::{
    AppliedValidators, AssetId, AssetName, GiftCardAction, Network, OutputReference, TxHash, Utxo,
    ValidatorBundle,
};
