use async_trait::async_trait;

use crate::core::BoundaryError;
use crate::types::{Address, SignedTx, TxHash, Utxo};

/// Access to the chain through a hosted provider.
///
/// Futures are deliberately not `Send`: production implementations live on
/// the browser main thread.
#[async_trait(?Send)]
pub trait ChainProvider {
    /// Cheap reachability/credentials check, run during session setup
    async fn health(&self) -> Result<(), BoundaryError>;

    /// All UTXOs currently sitting at an address
    async fn utxos_at(&self, address: &Address) -> Result<Vec<Utxo>, BoundaryError>;

    /// Submit a signed transaction, returning its hash
    async fn submit(&self, tx: &SignedTx) -> Result<TxHash, BoundaryError>;

    /// Wait until the transaction is visible on-chain.
    /// Returns false if the provider gave up waiting.
    async fn await_tx(&self, tx_hash: &TxHash) -> Result<bool, BoundaryError>;
}
