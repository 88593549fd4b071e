pub mod stake_position;
pub mod staking_pool;

pub use stake_position::*;
pub use staking_pool::*;
