use thiserror::Error;

use crate::types::TxHash;

/// SDK-specific error types for gift-card operations
#[derive(Debug, Error)]
pub enum GiftCardError {
    /// Provider or transport error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Browser wallet extension missing or authorization refused
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// Session has no wallet bound yet
    #[error("No wallet bound to session")]
    WalletNotBound,

    /// The queried source holds no spendable output
    #[error("No spendable output available at {0}")]
    NoSpendableInput(String),

    /// Parameter application failed inside the script engine
    #[error("Script engine error: {0}")]
    Engine(String),

    /// Transaction assembly (balancing, fees, serialization) failed
    #[error("Assembly error: {0}")]
    Assembly(String),

    /// The wallet refused to sign the transaction
    #[error("Signature refused: {0}")]
    SignatureRefused(String),

    /// The node rejected the submitted transaction
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// Confirmation polling gave up before the transaction appeared
    #[error("Transaction {0} not confirmed in time")]
    ConfirmationTimeout(TxHash),

    /// Workflow operation attempted out of sequence
    #[error("Operation requires stage {expected}, current stage is {actual}")]
    OutOfTurn {
        expected: &'static str,
        actual: &'static str,
    },

    /// A builder field was not supplied
    #[error("{0} required")]
    MissingField(&'static str),

    /// Gift amount is not a valid ADA quantity
    #[error("Invalid ADA amount: {0}")]
    InvalidAmount(String),

    /// Token name must be non-empty
    #[error("Token name must not be empty")]
    EmptyTokenName,

    /// Blueprint parse error
    #[error("Blueprint error: {0}")]
    Blueprint(String),
}

impl GiftCardError {
    /// Transient failures that can be retried without risking a
    /// double-submission. Submission rejections are deliberately not
    /// retryable: the node may have accepted the transaction even when
    /// the response did not make it back.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(_) | Self::ConfirmationTimeout(_))
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, GiftCardError>;
