pub mod admin;
pub mod exit_reward_tokens;
pub mod harvest_rewards;
pub mod initialize_aggregator;
pub mod views;

pub use admin::*;
pub use exit_reward_tokens::*;
pub use harvest_rewards::*;
pub use initialize_aggregator::*;
pub use views::*;
