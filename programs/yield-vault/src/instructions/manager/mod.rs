pub mod admin;
pub mod flows;
pub mod harvest_rewards;
pub mod initialize_manager;
pub mod recover_token;
pub mod restake_es_rewards;
pub mod views;

pub use admin::*;
pub use flows::*;
pub use harvest_rewards::*;
pub use initialize_manager::*;
pub use recover_token::*;
pub use restake_es_rewards::*;
pub use views::*;
