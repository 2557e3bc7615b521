//! Program-wide constants.

/// Seed of the configuration record PDA: `[CONFIG_SEED, authority]`.
pub const CONFIG_SEED: &[u8] = b"config";

/// Seed of the escrow vault PDA: `[ESCROW_SEED, config_account]`.
pub const ESCROW_SEED: &[u8] = b"escrow";

/// Seconds per vesting day (UTC, no leap seconds).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Layout version written into every new configuration record.
pub const CONFIG_VERSION: u8 = 1;
