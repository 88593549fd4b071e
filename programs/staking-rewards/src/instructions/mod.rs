// =============================================================================
// Instructions Module - Staking Rewards
// =============================================================================

pub mod admin;
pub mod claim;
pub mod fund_rewards;
pub mod initialize;
pub mod open_position;
pub mod stake;
pub mod transfer_staked;
pub mod unstake;
pub mod vesting;

pub use admin::*;
pub use claim::*;
pub use fund_rewards::*;
pub use initialize::*;
pub use open_position::*;
pub use stake::*;
pub use transfer_staked::*;
pub use unstake::*;
pub use vesting::*;
