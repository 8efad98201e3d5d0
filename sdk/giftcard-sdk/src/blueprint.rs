//! Aiken blueprint (`plutus.json`) loading.

use serde::Deserialize;

use crate::error::{GiftCardError, Result};
use crate::types::{PlutusScript, ValidatorBundle};

#[derive(Deserialize)]
struct Blueprint {
    validators: Vec<BlueprintValidator>,
}

#[derive(Deserialize)]
struct BlueprintValidator {
    title: String,
    #[serde(rename = "compiledCode")]
    compiled_code: String,
}

impl ValidatorBundle {
    /// Load the raw gift-card/redeem pair from blueprint JSON produced by
    /// `aiken build`
    pub fn from_blueprint(json: &str) -> Result<Self> {
        let blueprint: Blueprint =
            serde_json::from_str(json).map_err(|e| GiftCardError::Blueprint(e.to_string()))?;

        let find = |needle: &str| -> Result<PlutusScript> {
            blueprint
                .validators
                .iter()
                .find(|v| v.title.contains(needle))
                .map(|v| PlutusScript::new(v.compiled_code.clone()))
                .ok_or_else(|| {
                    GiftCardError::Blueprint(format!("no validator titled {needle} in blueprint"))
                })
        };

        Ok(Self {
            gift_card: find("gift_card")?,
            redeem: find("redeem")?,
        })
    }
}
