use crate::types::Network;

// Blockfrost REST endpoints per network
pub const MAINNET_URL: &str = "https://cardano-mainnet.blockfrost.io/api/v0";
pub const PREPROD_URL: &str = "https://cardano-preprod.blockfrost.io/api/v0";
pub const PREVIEW_URL: &str = "https://cardano-preview.blockfrost.io/api/v0";

/// Default provider endpoint for a network
pub fn provider_url(network: Network) -> &'static str {
    match network {
        Network::Mainnet => MAINNET_URL,
        Network::Preprod => PREPROD_URL,
        Network::Preview => PREVIEW_URL,
    }
}

/// Explorer page for a transaction
pub fn explorer_tx_url(network: Network, tx_hash: &str) -> String {
    match network {
        Network::Mainnet => format!("https://cardanoscan.io/transaction/{tx_hash}"),
        Network::Preprod => format!("https://preprod.cardanoscan.io/transaction/{tx_hash}"),
        Network::Preview => format!("https://preview.cardanoscan.io/transaction/{tx_hash}"),
    }
}

// Confirmation polling: how often the provider is asked whether a
// submitted transaction landed, and for how long.
pub const CONFIRM_POLL_INTERVAL_MS: u64 = 5_000;
pub const CONFIRM_MAX_POLLS: u32 = 36;

// Settlement polling after a confirmed lock: the ledger confirms before
// the provider's UTXO index catches up, and building the next transaction
// off the stale view fails with an exhausted-UTXO error.
pub const SETTLE_POLL_INTERVAL_MS: u64 = 2_000;
pub const SETTLE_MAX_POLLS: u32 = 10;
