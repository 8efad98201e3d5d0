use std::sync::Arc;

use async_trait::async_trait;

use crate::core::BoundaryError;
use crate::types::{Address, SignedTx, UnsignedTx, Utxo};

/// Capability negotiation with a wallet, typically a browser extension.
/// Kept separate from [`WalletApi`] so an authorization refusal is
/// observable independently of provider setup.
#[async_trait(?Send)]
pub trait WalletConnector {
    /// Extension identifier, e.g. "eternl"
    fn name(&self) -> &str;

    /// Request authorization and return the usable wallet handle
    async fn enable(&self) -> Result<Arc<dyn WalletApi>, BoundaryError>;
}

/// An authorized wallet bound to a session.
/// This allows the SDK to work with:
/// 1. Browser extension wallets (CIP-30 handles)
/// 2. Test signers driving an in-memory ledger
#[async_trait(?Send)]
pub trait WalletApi {
    /// Payment address, also used as the change address during assembly
    async fn address(&self) -> Result<Address, BoundaryError>;

    /// Spendable outputs currently owned by the wallet
    async fn utxos(&self) -> Result<Vec<Utxo>, BoundaryError>;

    /// Sign an assembled transaction. Wallets may refuse.
    async fn sign(&self, tx: &UnsignedTx) -> Result<SignedTx, BoundaryError>;
}
