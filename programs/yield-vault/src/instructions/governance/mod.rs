pub mod initialize_governance;
pub mod ownership;
pub mod set_explicit_access;

pub use initialize_governance::*;
pub use ownership::*;
pub use set_explicit_access::*;
