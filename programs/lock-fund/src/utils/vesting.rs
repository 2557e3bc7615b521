//! Release ceiling as a pure function of time.
//!
//! - full withdrawal enabled => whole vault balance
//! - now < cliff => 0
//! - otherwise floor((now - cliff) / day) * amount_per_day, capped by what was
//!   ever deposited (vault balance + released), minus what was released

use anchor_lang::prelude::*;

use crate::constants::SECONDS_PER_DAY;
use crate::error::LockFundError;
use crate::state::ConfigAccount;

/// Everything the engine looks at. `now` is injected, never read from a clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VestingInput {
    pub now: i64,
    pub cliff_time: i64,
    pub amount_per_day: u64,
    pub released_total: u64,
    pub vault_balance: u64,
    pub enable_full_withdrawal: bool,
}

impl VestingInput {
    pub fn from_config(config: &ConfigAccount, now: i64, vault_balance: u64) -> Self {
        Self {
            now,
            cliff_time: config.cliff_time,
            amount_per_day: config.amount_per_day,
            released_total: config.released_total,
            vault_balance,
            enable_full_withdrawal: config.full_withdrawal_enabled(),
        }
    }

    /// Total value that ever entered the vault.
    pub fn deposited(&self) -> std::result::Result<u64, LockFundError> {
        self.vault_balance
            .checked_add(self.released_total)
            .ok_or(LockFundError::ArithmeticOverflow)
    }
}

/// Where a record sits in its lifecycle at a given instant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingPhase {
    Locked,
    Vesting,
    FullyUnlocked,
    Drained,
}

/// Whole days since the cliff, inclusive at day boundaries. Zero before it.
pub fn elapsed_days(now: i64, cliff_time: i64) -> std::result::Result<u64, LockFundError> {
    if now < cliff_time {
        return Ok(0);
    }
    let elapsed = now
        .checked_sub(cliff_time)
        .ok_or(LockFundError::ArithmeticOverflow)?;
    Ok((elapsed / SECONDS_PER_DAY) as u64)
}

/// Rate-derived ceiling, ignoring deposits and releases.
pub fn vested_to_date(input: &VestingInput) -> std::result::Result<u64, LockFundError> {
    elapsed_days(input.now, input.cliff_time)?
        .checked_mul(input.amount_per_day)
        .ok_or(LockFundError::ArithmeticOverflow)
}

/// Maximum amount that may leave the vault right now.
pub fn eligible_amount(input: &VestingInput) -> std::result::Result<u64, LockFundError> {
    if input.enable_full_withdrawal {
        return Ok(input.vault_balance);
    }
    if input.now < input.cliff_time {
        return Ok(0);
    }

    let vested = vested_to_date(input)?;
    let ceiling = vested.min(input.deposited()?);
    // Releases made while full withdrawal was enabled may sit above the rate ceiling.
    Ok(ceiling.saturating_sub(input.released_total))
}

pub fn phase(input: &VestingInput) -> VestingPhase {
    if input.vault_balance == 0 && input.released_total > 0 {
        VestingPhase::Drained
    } else if input.enable_full_withdrawal {
        VestingPhase::FullyUnlocked
    } else if input.now < input.cliff_time {
        VestingPhase::Locked
    } else {
        VestingPhase::Vesting
    }
}
