//! Deterministic account addresses. Off-chain callers derive the same
//! addresses from the authority key alone.

use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, ESCROW_SEED};

/// `[CONFIG_SEED, authority]` under `program_id`.
pub fn config_address(authority: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED, authority.as_ref()], program_id)
}

/// `[ESCROW_SEED, config_account]` under `program_id`. Chained from the record,
/// not the authority.
pub fn escrow_address(config_account: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[ESCROW_SEED, config_account.as_ref()], program_id)
}

pub fn find_config_address(authority: &Pubkey) -> (Pubkey, u8) {
    config_address(authority, &crate::ID)
}

pub fn find_escrow_address(config_account: &Pubkey) -> (Pubkey, u8) {
    escrow_address(config_account, &crate::ID)
}

/// Both addresses for one authority: `((config, bump), (escrow, bump))`.
pub fn find_escrow_pair(authority: &Pubkey) -> ((Pubkey, u8), (Pubkey, u8)) {
    let config = find_config_address(authority);
    let escrow = find_escrow_address(&config.0);
    (config, escrow)
}

/// Associated token account of `owner` for `mint` under `token_program`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    let seeds: &[&[u8]] = &[owner.as_ref(), token_program.as_ref(), mint.as_ref()];
    Pubkey::find_program_address(seeds, &anchor_spl::associated_token::ID).0
}
