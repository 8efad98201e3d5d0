use crate::error::{GiftCardError, Result};
use crate::tx::plan::{PlanInput, PlanMint, PlanOutput, TxPlan};
use crate::types::{AppliedValidators, GiftCardAction, PlutusValue, Utxo, Value};

/// Builder for the gift-card lock transaction: spends one wallet UTXO,
/// mints exactly one unit of the derived asset and pays the gift lovelace
/// to the lock address with an inline unit datum.
pub struct LockBuilder<'a> {
    applied: &'a AppliedValidators,
    input: Option<Utxo>,
    amount: Option<u64>,
}

impl<'a> LockBuilder<'a> {
    pub fn new(applied: &'a AppliedValidators) -> Self {
        Self {
            applied,
            input: None,
            amount: None,
        }
    }

    /// Wallet UTXO to spend. Must be the one the validators were
    /// parameterized with.
    pub fn with_input(mut self, utxo: Utxo) -> Self {
        self.input = Some(utxo);
        self
    }

    /// Gift amount in lovelace
    pub fn with_amount(mut self, lovelace: u64) -> Self {
        self.amount = Some(lovelace);
        self
    }

    pub fn build_plan(&self) -> Result<TxPlan> {
        let input = self
            .input
            .clone()
            .ok_or(GiftCardError::MissingField("input"))?;
        let amount = self.amount.ok_or(GiftCardError::MissingField("amount"))?;
        if amount == 0 {
            return Err(GiftCardError::InvalidAmount("0".to_string()));
        }

        Ok(TxPlan {
            inputs: vec![PlanInput {
                utxo: input,
                redeemer: None,
            }],
            mints: vec![PlanMint {
                asset: self.applied.asset.clone(),
                amount: 1,
                redeemer: GiftCardAction::Mint.redeemer(),
            }],
            outputs: vec![PlanOutput {
                address: self.applied.lock_address.clone(),
                value: Value::lovelace(amount),
                // The spend validator never reads it, but an inline datum
                // must be present for the output to be spendable.
                inline_datum: Some(PlutusValue::unit()),
            }],
            scripts: vec![self.applied.mint_script.clone()],
        })
    }
}
