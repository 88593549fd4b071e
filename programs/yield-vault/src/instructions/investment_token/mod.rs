pub mod admin;
pub mod exit;
pub mod initialize_investment_token;
pub mod invest;

pub use admin::*;
pub use exit::*;
pub use initialize_investment_token::*;
pub use invest::*;
