//! Validate-then-mutate wrapper around a single release.
//!
//! `ReleasePlan::prepare` runs every check and computes the new counter
//! without touching state. The handler moves the funds, then `commit` writes
//! the counter. Any failure in between aborts the whole transaction.

use crate::error::LockFundError;
use crate::state::ConfigAccount;
use crate::utils::vesting::{eligible_amount, VestingInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleasePlan {
    pub amount: u64,
    /// Ceiling at `now`, before this release.
    pub eligible: u64,
    pub released_before: u64,
    pub released_after: u64,
}

impl ReleasePlan {
    pub fn prepare(
        config: &ConfigAccount,
        now: i64,
        vault_balance: u64,
        amount: u64,
    ) -> Result<Self, LockFundError> {
        if amount == 0 {
            return Err(LockFundError::InvalidAmount);
        }

        let eligible = eligible_amount(&VestingInput::from_config(config, now, vault_balance))?;
        if amount > eligible {
            return Err(LockFundError::InsufficientVestedAmount);
        }

        let released_after = config
            .released_total
            .checked_add(amount)
            .ok_or(LockFundError::ArithmeticOverflow)?;

        Ok(Self {
            amount,
            eligible,
            released_before: config.released_total,
            released_after,
        })
    }

    /// Records the release. Rejects a record whose counter moved since `prepare`.
    pub fn commit(&self, config: &mut ConfigAccount) -> Result<u64, LockFundError> {
        if config.released_total != self.released_before {
            return Err(LockFundError::StaleRelease);
        }
        config.released_total = self.released_after;
        Ok(config.released_total)
    }
}

/// Lamports a native vault can release: everything above its rent-exempt floor.
pub fn native_vault_balance(lamports: u64, rent_exempt_minimum: u64) -> u64 {
    lamports.saturating_sub(rent_exempt_minimum)
}
