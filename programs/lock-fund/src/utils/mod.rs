pub mod authorization;
pub mod pda;
pub mod release;
pub mod vesting;
