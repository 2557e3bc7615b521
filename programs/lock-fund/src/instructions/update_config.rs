use anchor_lang::prelude::*;

use crate::error::LockFundError;
use crate::state::{ConfigAccount, UpdateActorMode};
use crate::utils::authorization::{signed_keys, Operation};

/// Fields to overwrite; `None` leaves the stored value as is.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateConfigParams {
    pub recipient: Option<Pubkey>,
    pub approver: Option<Pubkey>,
    pub update_actor_mode: Option<u8>,
    pub enable_full_withdrawal: Option<bool>,
}

impl UpdateConfigParams {
    pub fn is_empty(&self) -> bool {
        self.recipient.is_none()
            && self.approver.is_none()
            && self.update_actor_mode.is_none()
            && self.enable_full_withdrawal.is_none()
    }

    /// Validates every supplied field, then writes them. Timing fields and
    /// `released_total` are never touched.
    pub fn apply(&self, config: &mut ConfigAccount) -> std::result::Result<(), LockFundError> {
        if self.is_empty() {
            return Err(LockFundError::EmptyUpdate);
        }
        if let Some(recipient) = self.recipient {
            if recipient == Pubkey::default() {
                return Err(LockFundError::InvalidPubkey);
            }
        }
        if let Some(approver) = self.approver {
            if approver == Pubkey::default() {
                return Err(LockFundError::InvalidPubkey);
            }
            if approver == config.authority {
                return Err(LockFundError::DuplicatePubkey);
            }
        }
        let mode = self
            .update_actor_mode
            .map(UpdateActorMode::try_from)
            .transpose()?;

        if let Some(recipient) = self.recipient {
            config.recipient = recipient;
        }
        if let Some(approver) = self.approver {
            config.approver = approver;
        }
        if let Some(mode) = mode {
            config.update_actor_mode = mode as u8;
        }
        if let Some(enabled) = self.enable_full_withdrawal {
            config.enable_full_withdrawal = enabled as u8;
        }
        Ok(())
    }
}

pub fn update_config_handler(ctx: Context<UpdateConfig>, params: &UpdateConfigParams) -> Result<()> {
    let mut accounts = vec![ctx.accounts.authority.to_account_info()];
    if let Some(approver) = ctx.accounts.approver.as_ref() {
        accounts.push(approver.to_account_info());
    }
    let signers = signed_keys(&accounts);

    let mut config = ctx.accounts.config_account.load_mut()?;
    config.check_version()?;

    // The mode in force before this update decides who must sign it.
    let mode = config.actor_mode()?;
    Operation::UpdateConfig(mode)
        .signer_policy()
        .authorize(&config, &signers)?;

    params.apply(&mut config)?;

    msg!("lock fund config updated: {}", ctx.accounts.config_account.key());

    emit!(ConfigUpdated {
        config_account: ctx.accounts.config_account.key(),
        recipient: config.recipient,
        approver: config.approver,
        update_actor_mode: config.update_actor_mode,
        enable_full_withdrawal: config.full_withdrawal_enabled(),
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(mut)]
    pub config_account: AccountLoader<'info, ConfigAccount>,

    /// CHECK: signature matched against the stored authority by the signer policy
    pub authority: UncheckedAccount<'info>,

    /// CHECK: matched against the stored approver by the signer policy
    pub approver: Option<UncheckedAccount<'info>>,
}

#[event]
pub struct ConfigUpdated {
    pub config_account: Pubkey,
    pub recipient: Pubkey,
    pub approver: Pubkey,
    pub update_actor_mode: u8,
    pub enable_full_withdrawal: bool,
}
