use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::error::LockFundError;
use crate::escrow_seeds;
use crate::state::ConfigAccount;
use crate::utils::authorization::{signed_keys, Operation};
use crate::utils::release::{native_vault_balance, ReleasePlan};

pub fn transfer_sol_handler(ctx: Context<TransferSol>, amount: u64) -> Result<()> {
    let config_key = ctx.accounts.config_account.key();
    let signers = signed_keys(&[
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.approver.to_account_info(),
    ]);

    let (plan, escrow_bump) = {
        let config = ctx.accounts.config_account.load()?;
        config.check_version()?;
        Operation::Transfer
            .signer_policy()
            .authorize(&config, &signers)?;
        require!(config.is_native(), LockFundError::InvalidMint);

        let now = Clock::get()?.unix_timestamp;
        let rent_floor = Rent::get()?.minimum_balance(0);
        let vault_balance = native_vault_balance(ctx.accounts.escrow.lamports(), rent_floor);
        (
            ReleasePlan::prepare(&config, now, vault_balance, amount)?,
            config.escrow_bump,
        )
    };

    let escrow_seeds = escrow_seeds!(config_key, escrow_bump);
    system_program::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.escrow.to_account_info(),
                to: ctx.accounts.recipient.to_account_info(),
            },
            &[&escrow_seeds[..]],
        ),
        plan.amount,
    )?;

    let released_total = plan.commit(&mut *ctx.accounts.config_account.load_mut()?)?;

    msg!("released {} lamports ({} eligible)", plan.amount, plan.eligible);

    emit!(FundsReleased {
        config_account: config_key,
        from: ctx.accounts.escrow.key(),
        to: ctx.accounts.recipient.key(),
        mint: Pubkey::default(),
        amount: plan.amount,
        released_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct TransferSol<'info> {
    #[account(mut)]
    pub config_account: AccountLoader<'info, ConfigAccount>,

    /// CHECK: escrow vault bound to the record
    #[account(
        mut,
        constraint = escrow.key() == config_account.load()?.escrow @ LockFundError::InvalidEscrow
    )]
    pub escrow: UncheckedAccount<'info>,

    /// CHECK: receives the lamports; bound to the record
    #[account(
        mut,
        constraint = recipient.key() == config_account.load()?.recipient @ LockFundError::InvalidRecipient
    )]
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: signature matched against the stored authority by the signer policy
    pub authority: UncheckedAccount<'info>,

    /// CHECK: signature matched against the stored approver by the signer policy
    pub approver: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Emitted for every release, native or token.
#[event]
pub struct FundsReleased {
    pub config_account: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    /// Default key for lamports.
    pub mint: Pubkey,
    pub amount: u64,
    pub released_total: u64,
}
