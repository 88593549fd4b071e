pub mod initialize_earn_account;
pub mod open_earn_position;
pub mod stake;
pub mod transfer_staked;
pub mod unstake;
pub mod views;

pub use initialize_earn_account::*;
pub use open_earn_position::*;
pub use stake::*;
pub use transfer_staked::*;
pub use unstake::*;
pub use views::*;
