use serde::{Deserialize, Serialize};

use crate::types::{Address, AssetId, Datum, PlutusScript, Redeemer, Utxo, Value};

/// One planned input. Script inputs carry the redeemer to spend with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInput {
    pub utxo: Utxo,
    pub redeemer: Option<Redeemer>,
}

/// One planned mint (positive amount) or burn (negative amount) of a
/// single asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMint {
    pub asset: AssetId,
    pub amount: i64,
    pub redeemer: Redeemer,
}

/// One planned output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanOutput {
    pub address: Address,
    pub value: Value,
    pub inline_datum: Option<Datum>,
}

/// Declarative description of a transaction, consumed by a
/// [`TxAssembler`](crate::core::engine::TxAssembler). Matches what the
/// wrapped SDK's transaction builder accepts: inputs to collect, assets to
/// mint or burn, outputs to pay, and the validators to attach to the
/// witness set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxPlan {
    pub inputs: Vec<PlanInput>,
    pub mints: Vec<PlanMint>,
    pub outputs: Vec<PlanOutput>,
    pub scripts: Vec<PlutusScript>,
}

impl TxPlan {
    /// Net minted amount of an asset across the plan
    pub fn minted_amount(&self, asset: &AssetId) -> i64 {
        self.mints
            .iter()
            .filter(|m| &m.asset == asset)
            .map(|m| m.amount)
            .sum()
    }
}
