use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

use crate::error::LockFundError;
use crate::state::ConfigAccount;
use crate::utils::release::native_vault_balance;
use crate::utils::vesting::{self, VestingInput, VestingPhase};

/// Emits what could be released right now without moving anything.
pub fn quote_release_handler(ctx: Context<QuoteRelease>) -> Result<()> {
    let config = ctx.accounts.config_account.load()?;
    config.check_version()?;
    let now = Clock::get()?.unix_timestamp;

    let vault_balance = if config.is_native() {
        native_vault_balance(
            ctx.accounts.escrow.lamports(),
            Rent::get()?.minimum_balance(0),
        )
    } else {
        ctx.accounts
            .escrow_token
            .as_ref()
            .ok_or(LockFundError::AccountNotFound)?
            .amount
    };

    let input = VestingInput::from_config(&config, now, vault_balance);
    let eligible = vesting::eligible_amount(&input)?;

    emit!(ReleaseQuoted {
        config_account: ctx.accounts.config_account.key(),
        now,
        phase: vesting::phase(&input),
        vault_balance,
        released_total: config.released_total,
        eligible,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct QuoteRelease<'info> {
    pub config_account: AccountLoader<'info, ConfigAccount>,

    /// CHECK: escrow vault bound to the record
    #[account(
        constraint = escrow.key() == config_account.load()?.escrow @ LockFundError::InvalidEscrow
    )]
    pub escrow: UncheckedAccount<'info>,

    /// Vault token account; required when the record releases a token.
    #[account(
        constraint = escrow_token.owner == escrow.key() @ LockFundError::InvalidEscrow,
        constraint = escrow_token.mint == config_account.load()?.mint @ LockFundError::InvalidMint,
    )]
    pub escrow_token: Option<InterfaceAccount<'info, TokenAccount>>,
}

#[event]
pub struct ReleaseQuoted {
    pub config_account: Pubkey,
    pub now: i64,
    pub phase: VestingPhase,
    pub vault_balance: u64,
    pub released_total: u64,
    pub eligible: u64,
}
