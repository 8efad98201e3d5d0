//! Blockfrost REST implementation of [`ChainProvider`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::core::constants;
use crate::core::provider::ChainProvider;
use crate::core::BoundaryError;
use crate::types::{Address, Network, OutputReference, SignedTx, TxHash, Utxo, Value};

/// Chain access through the Blockfrost API, authenticated with a project
/// id.
pub struct BlockfrostProvider {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
}

impl BlockfrostProvider {
    pub fn new(network: Network, project_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: constants::provider_url(network).to_string(),
            project_id: project_id.into(),
        }
    }

    /// Point the client at a non-default endpoint (self-hosted instances)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Deserialize)]
struct HealthResponse {
    is_healthy: bool,
}

#[derive(Deserialize)]
struct AmountEntry {
    unit: String,
    quantity: String,
}

#[derive(Deserialize)]
struct UtxoEntry {
    tx_hash: String,
    output_index: u64,
    address: String,
    amount: Vec<AmountEntry>,
}

impl UtxoEntry {
    fn into_utxo(self) -> Result<Utxo, BoundaryError> {
        let mut value = Value::default();
        for entry in self.amount {
            let quantity: u64 = entry.quantity.parse()?;
            if entry.unit == "lovelace" {
                value.lovelace = quantity;
            } else {
                *value.assets.entry(entry.unit).or_insert(0) += quantity;
            }
        }
        Ok(Utxo {
            out_ref: OutputReference {
                tx_hash: TxHash(self.tx_hash),
                output_index: self.output_index,
            },
            address: Address(self.address),
            value,
        })
    }
}

#[async_trait(?Send)]
impl ChainProvider for BlockfrostProvider {
    async fn health(&self) -> Result<(), BoundaryError> {
        let response = self
            .client
            .get(self.url("/health"))
            .header("project_id", &self.project_id)
            .send()
            .await?
            .error_for_status()?;
        let health: HealthResponse = response.json().await?;
        if !health.is_healthy {
            return Err("provider reports unhealthy backend".into());
        }
        Ok(())
    }

    async fn utxos_at(&self, address: &Address) -> Result<Vec<Utxo>, BoundaryError> {
        let response = self
            .client
            .get(self.url(&format!("/addresses/{}/utxos", address.0)))
            .header("project_id", &self.project_id)
            .send()
            .await?;
        // Blockfrost answers 404 for addresses it has never seen
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let entries: Vec<UtxoEntry> = response.error_for_status()?.json().await?;
        entries.into_iter().map(UtxoEntry::into_utxo).collect()
    }

    async fn submit(&self, tx: &SignedTx) -> Result<TxHash, BoundaryError> {
        let body = hex::decode(&tx.cbor_hex)?;
        let response = self
            .client
            .post(self.url("/tx/submit"))
            .header("project_id", &self.project_id)
            .header("Content-Type", "application/cbor")
            .body(body)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(format!("submit failed ({status}): {detail}").into());
        }
        let hash: String = response.json().await?;
        debug!(tx_hash = %hash, "submitted");
        Ok(TxHash(hash))
    }

    async fn await_tx(&self, tx_hash: &TxHash) -> Result<bool, BoundaryError> {
        for _ in 0..constants::CONFIRM_MAX_POLLS {
            let response = self
                .client
                .get(self.url(&format!("/txs/{}", tx_hash.0)))
                .header("project_id", &self.project_id)
                .send()
                .await?;
            if response.status().is_success() {
                return Ok(true);
            }
            if response.status() != reqwest::StatusCode::NOT_FOUND {
                warn!(status = %response.status(), "unexpected confirmation response");
            }
            tokio::time::sleep(Duration::from_millis(constants::CONFIRM_POLL_INTERVAL_MS)).await;
        }
        Ok(false)
    }
}
