#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use giftcard_sdk::core::engine::{ScriptEngine, TxAssembler};
use giftcard_sdk::core::provider::ChainProvider;
use giftcard_sdk::core::wallet::{WalletApi, WalletConnector};
use giftcard_sdk::core::BoundaryError;
use giftcard_sdk::session::Session;
use giftcard_sdk::tx::TxPlan;
use giftcard_sdk::types::{
    Address, AppliedValidators, AssetId, AssetName, Network, OutputReference, PlutusScript,
    PolicyId, SignedTx, TxHash, UnsignedTx, Utxo, ValidatorBundle, Value,
};
use giftcard_sdk::GiftCardFlow;

pub const WALLET_ADDRESS: &str = "addr_test1wallet000000000000000000000000000000000000";

/// In-memory chain, wallet, script engine and assembler in one place, the
/// way the SDK expects a real backend stack to behave. Submitted plans are
/// applied to the ledger so settlement and redeem queries see real state.
pub struct TestLedger {
    state: Mutex<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    wallet_utxos: Vec<Utxo>,
    chain_utxos: BTreeMap<String, Vec<Utxo>>,
    submitted: Vec<TxPlan>,
    fail_health: bool,
    fail_submit: bool,
    fail_apply: bool,
}

impl TestLedger {
    /// Ledger with one funded wallet UTXO
    pub fn new() -> Arc<Self> {
        let ledger = Self::empty();
        ledger.fund_wallet(&"9f".repeat(32), 0, 100_000_000);
        ledger
    }

    /// Ledger whose wallet owns nothing
    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(LedgerState::default()),
        })
    }

    pub fn fund_wallet(&self, tx_hash: &str, index: u64, lovelace: u64) {
        let utxo = Utxo {
            out_ref: OutputReference {
                tx_hash: TxHash::new(tx_hash),
                output_index: index,
            },
            address: Address(WALLET_ADDRESS.to_string()),
            value: Value::lovelace(lovelace),
        };
        self.state.lock().unwrap().wallet_utxos.push(utxo);
    }

    pub fn set_fail_health(&self, fail: bool) {
        self.state.lock().unwrap().fail_health = fail;
    }

    pub fn set_fail_submit(&self, fail: bool) {
        self.state.lock().unwrap().fail_submit = fail;
    }

    pub fn set_fail_apply(&self, fail: bool) {
        self.state.lock().unwrap().fail_apply = fail;
    }

    pub fn submitted_plans(&self) -> Vec<TxPlan> {
        self.state.lock().unwrap().submitted.clone()
    }

    pub fn wallet_utxos(&self) -> Vec<Utxo> {
        self.state.lock().unwrap().wallet_utxos.clone()
    }

    fn apply_plan(&self, plan: &TxPlan, tx_hash: &TxHash) {
        let mut state = self.state.lock().unwrap();
        for input in &plan.inputs {
            state
                .wallet_utxos
                .retain(|u| u.out_ref != input.utxo.out_ref);
            for utxos in state.chain_utxos.values_mut() {
                utxos.retain(|u| u.out_ref != input.utxo.out_ref);
            }
        }
        for (index, output) in plan.outputs.iter().enumerate() {
            let utxo = Utxo {
                out_ref: OutputReference {
                    tx_hash: tx_hash.clone(),
                    output_index: index as u64,
                },
                address: output.address.clone(),
                value: output.value.clone(),
            };
            state
                .chain_utxos
                .entry(output.address.0.clone())
                .or_default()
                .push(utxo);
        }
        state.submitted.push(plan.clone());
    }
}

#[async_trait(?Send)]
impl ChainProvider for TestLedger {
    async fn health(&self) -> Result<(), BoundaryError> {
        if self.state.lock().unwrap().fail_health {
            return Err("injected health failure".into());
        }
        Ok(())
    }

    async fn utxos_at(&self, address: &Address) -> Result<Vec<Utxo>, BoundaryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .chain_utxos
            .get(&address.0)
            .cloned()
            .unwrap_or_default())
    }

    async fn submit(&self, tx: &SignedTx) -> Result<TxHash, BoundaryError> {
        if self.state.lock().unwrap().fail_submit {
            return Err("injected submit failure".into());
        }
        let bytes = hex::decode(&tx.cbor_hex)?;
        let plan: TxPlan = serde_json::from_slice(&bytes)?;
        let tx_hash = TxHash::new(hex::encode(Sha256::digest(&bytes)));
        self.apply_plan(&plan, &tx_hash);
        Ok(tx_hash)
    }

    async fn await_tx(&self, _tx_hash: &TxHash) -> Result<bool, BoundaryError> {
        Ok(true)
    }
}

impl ScriptEngine for TestLedger {
    fn apply(
        &self,
        validators: &ValidatorBundle,
        token_name: &AssetName,
        out_ref: &OutputReference,
        network: Network,
    ) -> Result<AppliedValidators, BoundaryError> {
        if self.state.lock().unwrap().fail_apply {
            return Err("injected parameterization failure".into());
        }

        let mut hasher = Sha256::new();
        hasher.update(validators.gift_card.cbor_hex.as_bytes());
        hasher.update(validators.redeem.cbor_hex.as_bytes());
        hasher.update(token_name.to_hex().as_bytes());
        hasher.update(out_ref.tx_hash.as_str().as_bytes());
        hasher.update(out_ref.output_index.to_le_bytes());
        hasher.update(network.as_str().as_bytes());
        let digest = hex::encode(hasher.finalize());

        let policy_id = PolicyId(digest[..56].to_string());
        Ok(AppliedValidators {
            lock_address: Address(format!("addr_test1{}", &digest[..40])),
            policy_id: policy_id.clone(),
            mint_script: PlutusScript::new(format!(
                "{}{}",
                validators.gift_card.cbor_hex,
                &digest[..8]
            )),
            spend_script: PlutusScript::new(format!(
                "{}{}",
                validators.redeem.cbor_hex,
                &digest[..8]
            )),
            asset: AssetId::new(&policy_id, token_name),
        })
    }
}

#[async_trait(?Send)]
impl TxAssembler for TestLedger {
    async fn complete(
        &self,
        plan: &TxPlan,
        _change_address: &Address,
    ) -> Result<UnsignedTx, BoundaryError> {
        // Coin selection and fees are not modeled; the plan is the tx
        Ok(UnsignedTx {
            cbor_hex: hex::encode(serde_json::to_vec(plan)?),
        })
    }
}

pub struct TestWallet {
    ledger: Arc<TestLedger>,
}

#[async_trait(?Send)]
impl WalletApi for TestWallet {
    async fn address(&self) -> Result<Address, BoundaryError> {
        Ok(Address(WALLET_ADDRESS.to_string()))
    }

    async fn utxos(&self) -> Result<Vec<Utxo>, BoundaryError> {
        Ok(self.ledger.state.lock().unwrap().wallet_utxos.clone())
    }

    async fn sign(&self, tx: &UnsignedTx) -> Result<SignedTx, BoundaryError> {
        // Witnesses are not modeled
        Ok(SignedTx {
            cbor_hex: tx.cbor_hex.clone(),
        })
    }
}

pub struct TestConnector {
    ledger: Arc<TestLedger>,
    refuse: bool,
}

impl TestConnector {
    pub fn new(ledger: Arc<TestLedger>) -> Self {
        Self {
            ledger,
            refuse: false,
        }
    }

    /// Connector whose authorization prompt the user declines
    pub fn refusing(ledger: Arc<TestLedger>) -> Self {
        Self {
            ledger,
            refuse: true,
        }
    }
}

#[async_trait(?Send)]
impl WalletConnector for TestConnector {
    fn name(&self) -> &str {
        "test-wallet"
    }

    async fn enable(&self) -> Result<Arc<dyn WalletApi>, BoundaryError> {
        if self.refuse {
            return Err("user declined authorization".into());
        }
        Ok(Arc::new(TestWallet {
            ledger: self.ledger.clone(),
        }))
    }
}

//=============================================================================
// Test Helpers
//=============================================================================

pub fn test_bundle() -> ValidatorBundle {
    ValidatorBundle {
        gift_card: PlutusScript::new("590f01aabbcc"),
        redeem: PlutusScript::new("590f02ddeeff"),
    }
}

/// Connected session without a wallet bound
pub async fn unbound_session(ledger: &Arc<TestLedger>) -> anyhow::Result<Session> {
    Ok(Session::builder()
        .with_network(Network::Preprod)
        .with_provider(ledger.clone())
        .with_engine(ledger.clone())
        .with_assembler(ledger.clone())
        .connect()
        .await?)
}

/// Connected session with the test wallet bound
pub async fn ready_session(ledger: &Arc<TestLedger>) -> anyhow::Result<Session> {
    let session = unbound_session(ledger).await?;
    Ok(session
        .bind_wallet(&TestConnector::new(ledger.clone()))
        .await?)
}

/// Flow in the SessionReady stage
pub async fn ready_flow(ledger: &Arc<TestLedger>) -> anyhow::Result<GiftCardFlow> {
    let session = ready_session(ledger).await?;
    let mut flow = GiftCardFlow::new();
    flow.establish(session)?;
    Ok(flow)
}

/// Flow in the ParametersDerived stage, token name "GIFT"
pub async fn derived_flow(ledger: &Arc<TestLedger>) -> anyhow::Result<GiftCardFlow> {
    let mut flow = ready_flow(ledger).await?;
    flow.derive_parameters("GIFT", &test_bundle()).await?;
    Ok(flow)
}
