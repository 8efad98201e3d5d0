pub mod lock;
pub mod plan;
pub mod redeem;

pub use lock::LockBuilder;
pub use plan::{PlanInput, PlanMint, PlanOutput, TxPlan};
pub use redeem::RedeemBuilder;
