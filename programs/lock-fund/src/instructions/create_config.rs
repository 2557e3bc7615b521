use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_lang::Discriminator;
use anchor_spl::associated_token::{self, AssociatedToken, Create};
use anchor_spl::token_interface::{Mint, TokenInterface};

use crate::constants::{CONFIG_SEED, ESCROW_SEED};
use crate::error::LockFundError;
use crate::state::{ConfigAccount, ConfigInit, UpdateActorMode};
use crate::utils::authorization::{signed_keys, Operation};
use crate::utils::pda::associated_token_address;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateConfigParams {
    /// Seconds after creation before anything vests.
    pub cliff_time_duration: u64,
    pub amount_per_day: u64,
    pub update_actor_mode: u8,
    pub enable_full_withdrawal: bool,
}

impl CreateConfigParams {
    pub fn validate(
        &self,
        authority: &Pubkey,
        approver: &Pubkey,
        recipient: &Pubkey,
    ) -> std::result::Result<UpdateActorMode, LockFundError> {
        if *approver == Pubkey::default() || *recipient == Pubkey::default() {
            return Err(LockFundError::InvalidPubkey);
        }
        if authority == approver {
            return Err(LockFundError::DuplicatePubkey);
        }
        UpdateActorMode::try_from(self.update_actor_mode)
    }

    /// Absolute cliff for a record created at `now`.
    pub fn cliff_time(&self, now: i64) -> std::result::Result<i64, LockFundError> {
        let duration = i64::try_from(self.cliff_time_duration)
            .map_err(|_| LockFundError::ArithmeticOverflow)?;
        now.checked_add(duration)
            .ok_or(LockFundError::ArithmeticOverflow)
    }
}

pub fn create_config_handler(
    ctx: Context<CreateConfig>,
    params: &CreateConfigParams,
) -> Result<()> {
    let config_info = ctx.accounts.config_account.to_account_info();
    require!(
        config_info.data_is_empty() && *config_info.owner != crate::ID,
        LockFundError::AlreadyInitialized
    );

    let authority = ctx.accounts.authority.key();
    let approver = ctx.accounts.approver.key();
    let recipient = ctx.accounts.recipient.key();
    let update_actor_mode = params.validate(&authority, &approver, &recipient)?;

    let signers = signed_keys(&[ctx.accounts.authority.to_account_info()]);
    Operation::CreateConfig
        .signer_policy()
        .authorize_keys(&authority, &approver, &signers)?;

    let escrow_info = ctx.accounts.escrow.to_account_info();
    require!(
        escrow_info.data_is_empty() && *escrow_info.owner == system_program::ID,
        LockFundError::InvalidEscrow
    );
    let token_vault = ctx.accounts.token_vault()?;
    let mint = token_vault
        .as_ref()
        .map(|vault| vault.mint.key())
        .unwrap_or_default();

    let now = Clock::get()?.unix_timestamp;
    let cliff_time = params.cliff_time(now)?;

    let record = ConfigAccount::new(ConfigInit {
        authority,
        approver,
        recipient,
        escrow: escrow_info.key(),
        mint,
        cliff_time,
        amount_per_day: params.amount_per_day,
        update_actor_mode,
        enable_full_withdrawal: params.enable_full_withdrawal,
        created_at: now,
        config_bump: ctx.bumps.config_account,
        escrow_bump: ctx.bumps.escrow,
    });

    let authority_info = ctx.accounts.authority.to_account_info();
    let config_seeds: &[&[u8]] = &[CONFIG_SEED, authority.as_ref(), &[record.config_bump]];
    create_program_account(
        &authority_info,
        &config_info,
        &ctx.accounts.system_program,
        ConfigAccount::SPACE,
        &[config_seeds],
    )?;

    {
        let mut data = config_info.try_borrow_mut_data()?;
        let disc = ConfigAccount::DISCRIMINATOR;
        data[..disc.len()].copy_from_slice(disc);
        data[disc.len()..disc.len() + ConfigAccount::INIT_SPACE]
            .copy_from_slice(bytemuck::bytes_of(&record));
    }

    // The escrow PDA stays a data-less system account; it only needs rent.
    let rent_floor = Rent::get()?.minimum_balance(0);
    let top_up = rent_floor.saturating_sub(escrow_info.lamports());
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: authority_info.clone(),
                    to: escrow_info.clone(),
                },
            ),
            top_up,
        )?;
    }

    if let Some(vault) = &token_vault {
        associated_token::create_idempotent(CpiContext::new(
            vault.associated_token_program.to_account_info(),
            Create {
                payer: authority_info.clone(),
                associated_token: vault.escrow_token.to_account_info(),
                authority: escrow_info.clone(),
                mint: vault.mint.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                token_program: vault.token_program.to_account_info(),
            },
        ))?;
    }

    msg!("lock fund config created: {}", config_info.key());

    emit!(ConfigCreated {
        config_account: config_info.key(),
        authority,
        approver,
        recipient,
        escrow: record.escrow,
        mint,
        cliff_time,
        amount_per_day: record.amount_per_day,
        update_actor_mode: record.update_actor_mode,
        enable_full_withdrawal: params.enable_full_withdrawal,
    });
    Ok(())
}

/// Creates a program-owned PDA, tolerating lamports sent to the address
/// beforehand (plain `create_account` fails on a funded address).
fn create_program_account<'info>(
    payer: &AccountInfo<'info>,
    target: &AccountInfo<'info>,
    system_program: &Program<'info, System>,
    space: usize,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let required = Rent::get()?.minimum_balance(space);
    let current = target.lamports();

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program.to_account_info(),
                CreateAccount {
                    from: payer.clone(),
                    to: target.clone(),
                },
                signer_seeds,
            ),
            required,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = required.saturating_sub(current);
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                Transfer {
                    from: payer.clone(),
                    to: target.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Allocate {
                account_to_allocate: target.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Assign {
                account_to_assign: target.clone(),
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}

#[derive(Accounts)]
pub struct CreateConfig<'info> {
    /// CHECK: pays for record and vault; signature checked by the signer policy
    #[account(mut)]
    pub authority: UncheckedAccount<'info>,

    /// CHECK: created and written by the handler; must still be empty.
    #[account(
        mut,
        seeds = [CONFIG_SEED, authority.key().as_ref()],
        bump,
    )]
    pub config_account: UncheckedAccount<'info>,

    /// CHECK: escrow vault, a data-less system account signed for by the program
    #[account(
        mut,
        seeds = [ESCROW_SEED, config_account.key().as_ref()],
        bump,
    )]
    pub escrow: UncheckedAccount<'info>,

    /// CHECK: only the key is stored.
    pub recipient: UncheckedAccount<'info>,

    /// CHECK: only the key is stored.
    pub approver: UncheckedAccount<'info>,

    /// Token the vault releases; omitted for a native-lamport escrow.
    pub mint: Option<InterfaceAccount<'info, Mint>>,

    /// CHECK: escrow's associated token account for `mint`, created by the handler
    #[account(mut)]
    pub escrow_token: Option<UncheckedAccount<'info>>,

    pub token_program: Option<Interface<'info, TokenInterface>>,
    pub associated_token_program: Option<Program<'info, AssociatedToken>>,
    pub system_program: Program<'info, System>,
}

/// Accounts backing a token vault, checked against each other.
struct TokenVault<'a, 'info> {
    mint: &'a InterfaceAccount<'info, Mint>,
    escrow_token: &'a UncheckedAccount<'info>,
    token_program: &'a Interface<'info, TokenInterface>,
    associated_token_program: &'a Program<'info, AssociatedToken>,
}

impl<'info> CreateConfig<'info> {
    /// `None` for a native escrow. With a mint, the token accounts must all
    /// be present and the vault must be the escrow's associated account.
    fn token_vault(&self) -> Result<Option<TokenVault<'_, 'info>>> {
        let Some(mint) = self.mint.as_ref() else {
            return Ok(None);
        };
        let token_program = self
            .token_program
            .as_ref()
            .ok_or(LockFundError::AccountNotFound)?;
        let escrow_token = self
            .escrow_token
            .as_ref()
            .ok_or(LockFundError::AccountNotFound)?;
        let associated_token_program = self
            .associated_token_program
            .as_ref()
            .ok_or(LockFundError::AccountNotFound)?;

        require_keys_eq!(
            *mint.to_account_info().owner,
            token_program.key(),
            LockFundError::InvalidTokenProgram
        );
        require_keys_eq!(
            escrow_token.key(),
            associated_token_address(&self.escrow.key(), &mint.key(), &token_program.key()),
            LockFundError::InvalidEscrow
        );

        Ok(Some(TokenVault {
            mint,
            escrow_token,
            token_program,
            associated_token_program,
        }))
    }
}

#[event]
pub struct ConfigCreated {
    pub config_account: Pubkey,
    pub authority: Pubkey,
    pub approver: Pubkey,
    pub recipient: Pubkey,
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub cliff_time: i64,
    pub amount_per_day: u64,
    pub update_actor_mode: u8,
    pub enable_full_withdrawal: bool,
}
