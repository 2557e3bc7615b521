use anchor_lang::prelude::*;

use crate::constants::CONFIG_VERSION;
use crate::error::LockFundError;
use crate::utils::authorization::SignerPolicy;

/// Who must sign an `update_config` for this record.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum UpdateActorMode {
    /// The authority alone may redirect recipient/approver.
    AuthorityOnly = 0,
    /// The authority and the current approver must co-sign.
    AuthorityAndApprover = 1,
}

impl UpdateActorMode {
    pub fn signer_policy(self) -> SignerPolicy {
        match self {
            UpdateActorMode::AuthorityOnly => SignerPolicy::Authority,
            UpdateActorMode::AuthorityAndApprover => SignerPolicy::AuthorityAndApprover,
        }
    }
}

impl TryFrom<u8> for UpdateActorMode {
    type Error = LockFundError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(UpdateActorMode::AuthorityOnly),
            1 => Ok(UpdateActorMode::AuthorityAndApprover),
            _ => Err(LockFundError::InvalidUpdateActorMode),
        }
    }
}

/// Release policy of one escrow, derived from `[CONFIG_SEED, authority]`.
///
/// Zero-copy so the layout is fixed byte-for-byte; new fields must be carved
/// out of `padding_0` and bump `version`.
#[account(zero_copy)]
#[derive(InitSpace)]
pub struct ConfigAccount {
    // Creator and owner of the escrow, immutable
    pub authority: Pubkey,
    // Co-signer of every release
    pub approver: Pubkey,
    // Receiver of released funds
    pub recipient: Pubkey,
    // Escrow vault PDA, `[ESCROW_SEED, config_account]`
    pub escrow: Pubkey,
    // Token mint the vault releases; default key for native lamports
    pub mint: Pubkey,
    /// Unix timestamp before which nothing vests.
    pub cliff_time: i64,
    // Max amount that vests per elapsed day after the cliff
    pub amount_per_day: u64,
    /// Cumulative amount moved out of the vault. Never decreases.
    pub released_total: u64,
    pub created_at: i64,
    pub version: u8,
    // `UpdateActorMode` discriminant
    pub update_actor_mode: u8,
    // 1: vesting ceiling bypassed, 0: rate-limited
    pub enable_full_withdrawal: u8,
    pub config_bump: u8,
    pub escrow_bump: u8,
    // padding for alignment
    pub padding_0: [u8; 11],
}

const _: () = assert!(ConfigAccount::INIT_SPACE == 208);

/// Fields supplied by `create_config`, after validation.
pub struct ConfigInit {
    pub authority: Pubkey,
    pub approver: Pubkey,
    pub recipient: Pubkey,
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub cliff_time: i64,
    pub amount_per_day: u64,
    pub update_actor_mode: UpdateActorMode,
    pub enable_full_withdrawal: bool,
    pub created_at: i64,
    pub config_bump: u8,
    pub escrow_bump: u8,
}

impl ConfigAccount {
    /// Discriminator + record.
    pub const SPACE: usize = 8 + Self::INIT_SPACE;

    pub fn new(init: ConfigInit) -> Self {
        Self {
            authority: init.authority,
            approver: init.approver,
            recipient: init.recipient,
            escrow: init.escrow,
            mint: init.mint,
            cliff_time: init.cliff_time,
            amount_per_day: init.amount_per_day,
            released_total: 0,
            created_at: init.created_at,
            version: CONFIG_VERSION,
            update_actor_mode: init.update_actor_mode as u8,
            enable_full_withdrawal: init.enable_full_withdrawal as u8,
            config_bump: init.config_bump,
            escrow_bump: init.escrow_bump,
            padding_0: [0u8; 11],
        }
    }

    pub fn check_version(&self) -> std::result::Result<(), LockFundError> {
        if self.version != CONFIG_VERSION {
            return Err(LockFundError::UnsupportedVersion);
        }
        Ok(())
    }

    pub fn actor_mode(&self) -> std::result::Result<UpdateActorMode, LockFundError> {
        UpdateActorMode::try_from(self.update_actor_mode)
    }

    pub fn full_withdrawal_enabled(&self) -> bool {
        self.enable_full_withdrawal != 0
    }

    pub fn is_native(&self) -> bool {
        self.mint == Pubkey::default()
    }
}
