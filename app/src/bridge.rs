//! Passthrough to the host page's SDK glue (`assets/bridge.js`).
//!
//! Everything cryptographic or ledger-specific stays on the JS side of
//! this boundary; the Rust side only marshals values.

use std::sync::Arc;

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use giftcard_sdk::core::engine::{ScriptEngine, TxAssembler};
use giftcard_sdk::core::wallet::{WalletApi, WalletConnector};
use giftcard_sdk::core::BoundaryError;
use giftcard_sdk::tx::TxPlan;
use giftcard_sdk::types::{
    Address, AppliedValidators, AssetId, AssetName, Network, OutputReference, PlutusScript,
    PolicyId, SignedTx, TxHash, UnsignedTx, Utxo, ValidatorBundle, Value,
};
use giftcard_sdk::GiftCardError;

/// Name of the glue object `assets/bridge.js` installs on `window`
const GLUE_GLOBAL: &str = "giftcardBridge";

fn js_err(context: &str, value: JsValue) -> BoundaryError {
    format!("{context}: {value:?}").into()
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, BoundaryError> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|e| js_err(key, e))
}

fn get_string(target: &JsValue, key: &str) -> Result<String, BoundaryError> {
    get(target, key)?
        .as_string()
        .ok_or_else(|| format!("{key} is not a string").into())
}

fn get_f64(target: &JsValue, key: &str) -> Result<f64, BoundaryError> {
    get(target, key)?
        .as_f64()
        .ok_or_else(|| format!("{key} is not a number").into())
}

fn call_sync(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, BoundaryError> {
    let func: Function = get(target, name)?
        .dyn_into()
        .map_err(|_| format!("{name} is not a function"))?;
    let list = Array::new();
    for arg in args {
        list.push(arg);
    }
    func.apply(target, &list).map_err(|e| js_err(name, e))
}

async fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, BoundaryError> {
    let out = call_sync(target, name, args)?;
    match out.dyn_into::<Promise>() {
        Ok(promise) => JsFuture::from(promise).await.map_err(|e| js_err(name, e)),
        Err(value) => Ok(value),
    }
}

/// Handle to the glue object wrapping the JS transaction SDK
pub struct LucidBridge {
    glue: JsValue,
}

impl LucidBridge {
    /// Locate the glue installed by the host page
    pub fn attach() -> Result<Arc<Self>, GiftCardError> {
        let window: JsValue = web_sys::window()
            .ok_or_else(|| GiftCardError::WalletUnavailable("no window object".to_string()))?
            .into();
        let glue = Reflect::get(&window, &JsValue::from_str(GLUE_GLOBAL))
            .ok()
            .filter(|value| !value.is_undefined())
            .ok_or_else(|| {
                GiftCardError::WalletUnavailable(format!("{GLUE_GLOBAL} is not loaded"))
            })?;
        Ok(Arc::new(Self { glue }))
    }

    /// Create the glue's SDK instance against the provider credentials
    pub async fn init(&self, network: Network, project_id: &str) -> Result<(), GiftCardError> {
        call(
            &self.glue,
            "init",
            &[
                JsValue::from_str(network.as_str()),
                JsValue::from_str(project_id),
            ],
        )
        .await
        .map_err(|e| GiftCardError::Provider(e.to_string()))?;
        Ok(())
    }
}

impl ScriptEngine for LucidBridge {
    fn apply(
        &self,
        validators: &ValidatorBundle,
        token_name: &AssetName,
        out_ref: &OutputReference,
        _network: Network,
    ) -> Result<AppliedValidators, BoundaryError> {
        let args = [
            JsValue::from_str(&token_name.to_hex()),
            JsValue::from_str(out_ref.tx_hash.as_str()),
            JsValue::from_f64(out_ref.output_index as f64),
            JsValue::from_str(&validators.gift_card.cbor_hex),
            JsValue::from_str(&validators.redeem.cbor_hex),
        ];
        let out = call_sync(&self.glue, "applyParams", &args)?;

        let policy_id = PolicyId(get_string(&out, "policyId")?);
        let asset = AssetId::new(&policy_id, token_name);
        Ok(AppliedValidators {
            lock_address: Address(get_string(&out, "lockAddress")?),
            policy_id,
            mint_script: PlutusScript::new(get_string(&out, "mintScript")?),
            spend_script: PlutusScript::new(get_string(&out, "spendScript")?),
            asset,
        })
    }
}

#[async_trait(?Send)]
impl TxAssembler for LucidBridge {
    async fn complete(
        &self,
        plan: &TxPlan,
        change_address: &Address,
    ) -> Result<UnsignedTx, BoundaryError> {
        let plan_json = serde_json::to_string(plan)?;
        let out = call(
            &self.glue,
            "completeTx",
            &[
                JsValue::from_str(&plan_json),
                JsValue::from_str(change_address.as_str()),
            ],
        )
        .await?;
        Ok(UnsignedTx {
            cbor_hex: out
                .as_string()
                .ok_or("completeTx did not return a string")?,
        })
    }
}

/// CIP-30 capability negotiation against `window.cardano.<name>`
pub struct Cip30Connector {
    wallet_name: String,
    bridge: Arc<LucidBridge>,
}

impl Cip30Connector {
    pub fn new(wallet_name: impl Into<String>, bridge: Arc<LucidBridge>) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            bridge,
        }
    }
}

#[async_trait(?Send)]
impl WalletConnector for Cip30Connector {
    fn name(&self) -> &str {
        &self.wallet_name
    }

    async fn enable(&self) -> Result<Arc<dyn WalletApi>, BoundaryError> {
        let window: JsValue = web_sys::window().ok_or("no window object")?.into();
        let cardano = get(&window, "cardano")?;
        if cardano.is_undefined() {
            return Err("no cardano wallet extensions present".into());
        }
        let namespace = get(&cardano, &self.wallet_name)?;
        if namespace.is_undefined() {
            return Err(format!("wallet extension {} not installed", self.wallet_name).into());
        }

        let handle = call(&namespace, "enable", &[]).await?;
        // Bind the authorized CIP-30 handle into the glue's SDK instance
        call(&self.bridge.glue, "selectWallet", &[handle]).await?;

        Ok(Arc::new(BridgeWallet {
            bridge: self.bridge.clone(),
        }))
    }
}

/// Wallet operations forwarded through the glue after `selectWallet`
struct BridgeWallet {
    bridge: Arc<LucidBridge>,
}

#[async_trait(?Send)]
impl WalletApi for BridgeWallet {
    async fn address(&self) -> Result<Address, BoundaryError> {
        let out = call(&self.bridge.glue, "walletAddress", &[]).await?;
        Ok(Address(
            out.as_string()
                .ok_or("walletAddress did not return a string")?,
        ))
    }

    async fn utxos(&self) -> Result<Vec<Utxo>, BoundaryError> {
        let out = call(&self.bridge.glue, "walletUtxos", &[]).await?;
        let entries: Array = out
            .dyn_into()
            .map_err(|_| "walletUtxos did not return an array")?;

        let mut utxos = Vec::new();
        for entry in entries.iter() {
            utxos.push(Utxo {
                out_ref: OutputReference {
                    tx_hash: TxHash::new(get_string(&entry, "txHash")?),
                    output_index: get_f64(&entry, "outputIndex")? as u64,
                },
                address: Address(get_string(&entry, "address")?),
                value: Value::lovelace(get_string(&entry, "lovelace")?.parse()?),
            });
        }
        Ok(utxos)
    }

    async fn sign(&self, tx: &UnsignedTx) -> Result<SignedTx, BoundaryError> {
        let out = call(
            &self.bridge.glue,
            "signTx",
            &[JsValue::from_str(&tx.cbor_hex)],
        )
        .await?;
        Ok(SignedTx {
            cbor_hex: out.as_string().ok_or("signTx did not return a string")?,
        })
    }
}
