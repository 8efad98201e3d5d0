pub mod constants;
pub mod engine;
pub mod provider;
pub mod wallet;

/// Errors crossing the backend boundary before being mapped into SDK errors
pub type BoundaryError = Box<dyn std::error::Error + Send + Sync>;
