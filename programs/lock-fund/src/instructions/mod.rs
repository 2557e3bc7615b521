pub mod create_config;
pub mod quote_release;
pub mod transfer_sol;
pub mod transfer_token;
pub mod update_config;

pub use create_config::*;
pub use quote_release::*;
pub use transfer_sol::*;
pub use transfer_token::*;
pub use update_config::*;
