use async_trait::async_trait;

use crate::core::BoundaryError;
use crate::tx::TxPlan;
use crate::types::{
    Address, AppliedValidators, AssetName, Network, OutputReference, UnsignedTx, ValidatorBundle,
};

/// Applies constructor parameters to the compiled validator pair and
/// derives the resulting artifacts (lock address, policy id, scripts).
/// The cryptographic work lives entirely behind this trait and must be
/// deterministic for identical inputs.
pub trait ScriptEngine {
    fn apply(
        &self,
        validators: &ValidatorBundle,
        token_name: &AssetName,
        out_ref: &OutputReference,
        network: Network,
    ) -> Result<AppliedValidators, BoundaryError>;
}

/// Turns a declarative transaction plan into a balanced unsigned
/// transaction. Coin selection, fee computation and CBOR serialization
/// are delegated wholesale.
#[async_trait(?Send)]
pub trait TxAssembler {
    async fn complete(
        &self,
        plan: &TxPlan,
        change_address: &Address,
    ) -> Result<UnsignedTx, BoundaryError>;
}
