use anchor_lang::prelude::*;
use anchor_spl::associated_token::{self, AssociatedToken, Create};
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::error::LockFundError;
use crate::escrow_seeds;
use crate::instructions::transfer_sol::FundsReleased;
use crate::state::ConfigAccount;
use crate::utils::authorization::{signed_keys, Operation};
use crate::utils::pda::associated_token_address;
use crate::utils::release::ReleasePlan;

pub fn transfer_token_handler(ctx: Context<TransferToken>, amount: u64) -> Result<()> {
    let config_key = ctx.accounts.config_account.key();
    let signers = signed_keys(&[
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.approver.to_account_info(),
    ]);

    let config = *ctx.accounts.config_account.load()?;
    config.check_version()?;
    Operation::Transfer
        .signer_policy()
        .authorize(&config, &signers)?;
    require_keys_eq!(ctx.accounts.mint.key(), config.mint, LockFundError::InvalidMint);

    let expected_recipient_token = associated_token_address(
        &ctx.accounts.recipient.key(),
        &ctx.accounts.mint.key(),
        &ctx.accounts.token_program.key(),
    );
    require_keys_eq!(
        ctx.accounts.recipient_token.key(),
        expected_recipient_token,
        LockFundError::InvalidRecipient
    );

    let now = Clock::get()?.unix_timestamp;
    let plan = ReleasePlan::prepare(&config, now, ctx.accounts.escrow_token.amount, amount)?;
    let escrow_bump = config.escrow_bump;

    // No-op when the recipient already holds an account for this mint.
    associated_token::create_idempotent(CpiContext::new(
        ctx.accounts.associated_token_program.to_account_info(),
        Create {
            payer: ctx.accounts.authority.to_account_info(),
            associated_token: ctx.accounts.recipient_token.to_account_info(),
            authority: ctx.accounts.recipient.to_account_info(),
            mint: ctx.accounts.mint.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            token_program: ctx.accounts.token_program.to_account_info(),
        },
    ))?;

    let escrow_seeds = escrow_seeds!(config_key, escrow_bump);
    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.escrow_token.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.recipient_token.to_account_info(),
                authority: ctx.accounts.escrow.to_account_info(),
            },
            &[&escrow_seeds[..]],
        ),
        plan.amount,
        ctx.accounts.mint.decimals,
    )?;

    let released_total = plan.commit(&mut *ctx.accounts.config_account.load_mut()?)?;

    msg!("released {} tokens ({} eligible)", plan.amount, plan.eligible);

    emit!(FundsReleased {
        config_account: config_key,
        from: ctx.accounts.escrow_token.key(),
        to: ctx.accounts.recipient_token.key(),
        mint: ctx.accounts.mint.key(),
        amount: plan.amount,
        released_total,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct TransferToken<'info> {
    #[account(mut)]
    pub config_account: AccountLoader<'info, ConfigAccount>,

    /// CHECK: escrow PDA, owner of the vault token account; bound to the record
    #[account(
        constraint = escrow.key() == config_account.load()?.escrow @ LockFundError::InvalidEscrow
    )]
    pub escrow: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = escrow_token.owner == escrow.key() @ LockFundError::InvalidEscrow,
        constraint = escrow_token.mint == mint.key() @ LockFundError::InvalidMint,
        constraint = *escrow_token.to_account_info().owner == token_program.key() @ LockFundError::InvalidTokenProgram,
    )]
    pub escrow_token: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: owner of the receiving token account; bound to the record
    #[account(
        constraint = recipient.key() == config_account.load()?.recipient @ LockFundError::InvalidRecipient
    )]
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: recipient's associated token account, created by the handler if absent
    #[account(mut)]
    pub recipient_token: UncheckedAccount<'info>,

    #[account(
        constraint = *mint.to_account_info().owner == token_program.key() @ LockFundError::InvalidTokenProgram,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: signature matched against the stored authority by the signer
    /// policy; pays for the recipient token account when it has to be created.
    #[account(mut)]
    pub authority: UncheckedAccount<'info>,

    /// CHECK: signature matched against the stored approver by the signer policy
    pub approver: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
