pub mod blockfrost;

pub use blockfrost::BlockfrostProvider;
