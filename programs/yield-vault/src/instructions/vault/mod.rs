pub mod admin;
pub mod initialize_vault;
pub mod recover_token;
pub mod reserves;
pub mod shares;
pub mod views;

pub use admin::*;
pub use initialize_vault::*;
pub use recover_token::*;
pub use reserves::*;
pub use shares::*;
pub use views::*;
