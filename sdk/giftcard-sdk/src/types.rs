use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GiftCardError, Result};

/// Target Cardano network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Preprod,
    Preview,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Preprod => "Preprod",
            Network::Preview => "Preview",
        }
    }
}

/// Hash identifying a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bech32 payment address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a minting policy (script hash, hex)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyId(pub String);

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable asset name. Stored as the raw text; the chain sees the
/// hex encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetName(String);

impl AssetName {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(GiftCardError::EmptyTokenName);
        }
        Ok(Self(text))
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// On-chain encoding of the name
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }
}

/// Fully-qualified asset unit: policy id followed by the hex-encoded name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(policy_id: &PolicyId, name: &AssetName) -> Self {
        Self(format!("{}{}", policy_id.0, name.to_hex()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reference to a transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputReference {
    pub tx_hash: TxHash,
    pub output_index: u64,
}

/// Value carried by an output: lovelace plus native assets keyed by unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub lovelace: u64,
    #[serde(default)]
    pub assets: BTreeMap<String, u64>,
}

impl Value {
    pub fn lovelace(amount: u64) -> Self {
        Self {
            lovelace: amount,
            assets: BTreeMap::new(),
        }
    }

    pub fn with_asset(mut self, unit: impl Into<String>, quantity: u64) -> Self {
        self.assets.insert(unit.into(), quantity);
        self
    }
}

/// Unspent transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub out_ref: OutputReference,
    pub address: Address,
    pub value: Value,
}

/// Parse a user-supplied ADA amount ("5", "1.5") into lovelace.
/// At most six fractional digits; zero and non-numeric input are rejected.
pub fn parse_ada(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let invalid = || GiftCardError::InvalidAmount(input.to_string());

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > 6 {
        return Err(invalid());
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let fraction: u64 = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<6}");
        padded.parse().map_err(|_| invalid())?
    };

    let lovelace = whole
        .checked_mul(1_000_000)
        .and_then(|n| n.checked_add(fraction))
        .ok_or_else(invalid)?;
    if lovelace == 0 {
        return Err(invalid());
    }
    Ok(lovelace)
}

/// Compiled Plutus script, CBOR bytes hex-encoded. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlutusScript {
    pub cbor_hex: String,
}

impl PlutusScript {
    pub fn new(cbor_hex: impl Into<String>) -> Self {
        Self {
            cbor_hex: cbor_hex.into(),
        }
    }
}

/// The raw, unparameterized validator pair from the Aiken blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorBundle {
    pub gift_card: PlutusScript,
    pub redeem: PlutusScript,
}

/// Contract artifacts derived for one (token name, output reference) pair.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedValidators {
    /// Address the gift lovelace is paid to
    pub lock_address: Address,
    /// Policy id of the parameterized minting script
    pub policy_id: PolicyId,
    /// Parameterized minting policy
    pub mint_script: PlutusScript,
    /// Parameterized spend validator
    pub spend_script: PlutusScript,
    /// Unit of the single token this pair mints and burns
    pub asset: AssetId,
}

/// Constructor-tagged Plutus argument. The backends own the CBOR encoding;
/// this crate only names the constructor and nested fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlutusValue {
    pub constructor: u64,
    #[serde(default)]
    pub fields: Vec<PlutusValue>,
}

impl PlutusValue {
    pub fn constr(constructor: u64) -> Self {
        Self {
            constructor,
            fields: Vec::new(),
        }
    }

    /// The unit value, used where a datum or redeemer is required but
    /// carries no information
    pub fn unit() -> Self {
        Self::constr(0)
    }
}

/// Argument handed to a validator at spend/mint time
pub type Redeemer = PlutusValue;

/// Data attached inline to a locked output
pub type Datum = PlutusValue;

/// Which authorized action a redeemer selects on the gift-card policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftCardAction {
    Mint,
    Burn,
}

impl GiftCardAction {
    pub fn redeemer(&self) -> Redeemer {
        match self {
            GiftCardAction::Mint => Redeemer::constr(0),
            GiftCardAction::Burn => Redeemer::constr(1),
        }
    }
}

/// Assembled but unsigned transaction, CBOR hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTx {
    pub cbor_hex: String,
}

/// Fully signed transaction ready for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTx {
    pub cbor_hex: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ada_accepts_whole_and_fractional() {
        assert_eq!(parse_ada("5").unwrap(), 5_000_000);
        assert_eq!(parse_ada("1.5").unwrap(), 1_500_000);
        assert_eq!(parse_ada(".25").unwrap(), 250_000);
        assert_eq!(parse_ada("0.000001").unwrap(), 1);
    }

    #[test]
    fn parse_ada_rejects_garbage() {
        assert!(parse_ada("").is_err());
        assert!(parse_ada("abc").is_err());
        assert!(parse_ada("1.2.3").is_err());
        assert!(parse_ada("0.0000001").is_err());
        assert!(parse_ada("0").is_err());
        assert!(parse_ada("-3").is_err());
    }

    #[test]
    fn asset_unit_is_policy_id_plus_hex_name() {
        let policy = PolicyId("ab".repeat(28));
        let name = AssetName::new("GIFT").unwrap();
        let unit = AssetId::new(&policy, &name);
        assert_eq!(unit.0, format!("{}{}", policy.0, hex::encode("GIFT")));
    }

    #[test]
    fn empty_token_name_is_rejected() {
        assert!(matches!(
            AssetName::new(""),
            Err(GiftCardError::EmptyTokenName)
        ));
    }

    #[test]
    fn action_redeemers_carry_constructor_tags() {
        assert_eq!(GiftCardAction::Mint.redeemer().constructor, 0);
        assert_eq!(GiftCardAction::Burn.redeemer().constructor, 1);
        assert!(GiftCardAction::Burn.redeemer().fields.is_empty());
    }
}
