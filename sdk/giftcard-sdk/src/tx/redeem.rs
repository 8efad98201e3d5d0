use crate::error::{GiftCardError, Result};
use crate::tx::plan::{PlanInput, PlanMint, TxPlan};
use crate::types::{AppliedValidators, GiftCardAction, PlutusValue, Utxo};

/// Builder for the redeem transaction: spends every UTXO at the lock
/// address, burns the minted unit and attaches both validators.
pub struct RedeemBuilder<'a> {
    applied: &'a AppliedValidators,
    inputs: Vec<Utxo>,
}

impl<'a> RedeemBuilder<'a> {
    pub fn new(applied: &'a AppliedValidators) -> Self {
        Self {
            applied,
            inputs: Vec::new(),
        }
    }

    /// The UTXOs currently sitting at the lock address
    pub fn with_inputs(mut self, utxos: Vec<Utxo>) -> Self {
        self.inputs = utxos;
        self
    }

    pub fn build_plan(&self) -> Result<TxPlan> {
        if self.inputs.is_empty() {
            return Err(GiftCardError::NoSpendableInput(
                self.applied.lock_address.0.clone(),
            ));
        }

        let inputs = self
            .inputs
            .iter()
            .map(|utxo| PlanInput {
                utxo: utxo.clone(),
                // The spend validator ignores its redeemer
                redeemer: Some(PlutusValue::unit()),
            })
            .collect();

        Ok(TxPlan {
            inputs,
            mints: vec![PlanMint {
                asset: self.applied.asset.clone(),
                amount: -1,
                redeemer: GiftCardAction::Burn.redeemer(),
            }],
            outputs: Vec::new(),
            scripts: vec![
                self.applied.mint_script.clone(),
                self.applied.spend_script.clone(),
            ],
        })
    }
}
