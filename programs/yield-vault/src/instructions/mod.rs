pub mod aggregator;
pub mod earn_account;
pub mod governance;
pub mod investment_token;
pub mod manager;
pub mod vault;

pub use aggregator::*;
pub use earn_account::*;
pub use governance::*;
pub use investment_token::*;
pub use manager::*;
pub use vault::*;
