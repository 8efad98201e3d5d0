use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::constants;
use crate::core::engine::{ScriptEngine, TxAssembler};
use crate::core::provider::ChainProvider;
use crate::core::wallet::{WalletApi, WalletConnector};
use crate::error::{GiftCardError, Result};
use crate::tx::TxPlan;
use crate::types::{Address, Network, TxHash, Utxo};

/// Builder collecting the backend stack for a session
pub struct SessionBuilder {
    network: Network,
    provider: Option<Arc<dyn ChainProvider>>,
    engine: Option<Arc<dyn ScriptEngine>>,
    assembler: Option<Arc<dyn TxAssembler>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            network: Network::Preprod,
            provider: None,
            engine: None,
            assembler: None,
        }
    }

    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn ChainProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_engine(mut self, engine: Arc<dyn ScriptEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn with_assembler(mut self, assembler: Arc<dyn TxAssembler>) -> Self {
        self.assembler = Some(assembler);
        self
    }

    /// Phase one of the handshake: verify the provider is reachable with
    /// the supplied credentials and hand back an unbound session.
    pub async fn connect(self) -> Result<Session> {
        let provider = self.provider.ok_or(GiftCardError::MissingField("provider"))?;
        let engine = self.engine.ok_or(GiftCardError::MissingField("engine"))?;
        let assembler = self
            .assembler
            .ok_or(GiftCardError::MissingField("assembler"))?;

        provider
            .health()
            .await
            .map_err(|e| GiftCardError::Provider(e.to_string()))?;
        debug!(network = self.network.as_str(), "session connected");

        Ok(Session {
            network: self.network,
            provider,
            engine,
            assembler,
            wallet: None,
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A live connection to the chain backend, optionally bound to a wallet.
/// Exists for the lifetime of the page; dropped on unload.
#[derive(Clone)]
pub struct Session {
    network: Network,
    provider: Arc<dyn ChainProvider>,
    engine: Arc<dyn ScriptEngine>,
    assembler: Arc<dyn TxAssembler>,
    wallet: Option<Arc<dyn WalletApi>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("network", &self.network)
            .field("wallet_bound", &self.wallet.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub(crate) fn engine(&self) -> &dyn ScriptEngine {
        self.engine.as_ref()
    }

    /// Phase two of the handshake: request wallet-extension authorization
    /// and bind the resulting handle to this session.
    pub async fn bind_wallet(mut self, connector: &dyn WalletConnector) -> Result<Session> {
        let wallet = connector
            .enable()
            .await
            .map_err(|e| GiftCardError::WalletUnavailable(e.to_string()))?;
        debug!(wallet = connector.name(), "wallet bound");
        self.wallet = Some(wallet);
        Ok(self)
    }

    pub fn has_wallet(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn wallet(&self) -> Result<&Arc<dyn WalletApi>> {
        self.wallet.as_ref().ok_or(GiftCardError::WalletNotBound)
    }

    /// First spendable wallet UTXO. An empty set is reported as
    /// [`GiftCardError::NoSpendableInput`], distinct from transport
    /// failures.
    pub async fn first_wallet_utxo(&self) -> Result<Utxo> {
        let wallet = self.wallet()?;
        let utxos = wallet
            .utxos()
            .await
            .map_err(|e| GiftCardError::WalletUnavailable(e.to_string()))?;
        utxos
            .into_iter()
            .next()
            .ok_or_else(|| GiftCardError::NoSpendableInput("wallet".to_string()))
    }

    /// UTXOs at an arbitrary address, via the provider
    pub async fn utxos_at(&self, address: &Address) -> Result<Vec<Utxo>> {
        self.provider
            .utxos_at(address)
            .await
            .map_err(|e| GiftCardError::Provider(e.to_string()))
    }

    /// Assemble, sign, submit and confirm one planned transaction
    pub async fn submit_plan(&self, plan: &TxPlan) -> Result<TxHash> {
        let wallet = self.wallet()?;
        let change_address = wallet
            .address()
            .await
            .map_err(|e| GiftCardError::WalletUnavailable(e.to_string()))?;

        let unsigned = self
            .assembler
            .complete(plan, &change_address)
            .await
            .map_err(|e| GiftCardError::Assembly(e.to_string()))?;
        let signed = wallet
            .sign(&unsigned)
            .await
            .map_err(|e| GiftCardError::SignatureRefused(e.to_string()))?;
        let tx_hash = self
            .provider
            .submit(&signed)
            .await
            .map_err(|e| GiftCardError::Rejected(e.to_string()))?;
        info!(%tx_hash, "transaction submitted");

        let confirmed = self
            .provider
            .await_tx(&tx_hash)
            .await
            .map_err(|e| GiftCardError::Provider(e.to_string()))?;
        if !confirmed {
            return Err(GiftCardError::ConfirmationTimeout(tx_hash));
        }
        Ok(tx_hash)
    }

    /// Post-confirmation settlement check: wait until the provider's UTXO
    /// index shows an output of `tx_hash` at `address`. Returns false if
    /// the index is still lagging after the polling bound; the caller
    /// already holds a confirmed transaction either way, so provider
    /// errors here only count as a missed poll.
    pub async fn wait_for_settlement(&self, address: &Address, tx_hash: &TxHash) -> bool {
        for _ in 0..constants::SETTLE_MAX_POLLS {
            match self.utxos_at(address).await {
                Ok(utxos) => {
                    if utxos.iter().any(|u| u.out_ref.tx_hash == *tx_hash) {
                        return true;
                    }
                }
                Err(e) => warn!(error = %e, "settlement poll failed"),
            }
            tokio::time::sleep(Duration::from_millis(constants::SETTLE_POLL_INTERVAL_MS)).await;
        }
        warn!(%tx_hash, "lock output not visible yet, continuing");
        false
    }
}
