pub mod config_account;

pub use config_account::*;
