pub mod earn_account;
pub mod fee_rate;
pub mod governance;
pub mod investment_token;
pub mod manager;
pub mod repricing_vault;
pub mod rewards_aggregator;

pub use earn_account::*;
pub use fee_rate::*;
pub use governance::*;
pub use investment_token::*;
pub use manager::*;
pub use repricing_vault::*;
pub use rewards_aggregator::*;
