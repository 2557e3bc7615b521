use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use error::*;
pub use instructions::*;
pub use state::*;

declare_id!("5aBQfQ6A6qWVSiQTEweyg9RYLkWgg7BDYh9yScBSP547");

/// Signer seeds of the escrow vault PDA.
#[macro_export]
macro_rules! escrow_seeds {
    ($config_key:expr, $escrow_bump:expr) => {
        &[
            $crate::constants::ESCROW_SEED,
            $config_key.as_ref(),
            &[$escrow_bump],
        ]
    };
}

#[program]
pub mod lock_fund {
    use super::*;

    pub fn create_config(ctx: Context<CreateConfig>, params: CreateConfigParams) -> Result<()> {
        create_config_handler(ctx, &params)
    }

    pub fn update_config(ctx: Context<UpdateConfig>, params: UpdateConfigParams) -> Result<()> {
        update_config_handler(ctx, &params)
    }

    pub fn transfer_sol(ctx: Context<TransferSol>, amount: u64) -> Result<()> {
        transfer_sol_handler(ctx, amount)
    }

    pub fn transfer_token(ctx: Context<TransferToken>, amount: u64) -> Result<()> {
        transfer_token_handler(ctx, amount)
    }

    pub fn quote_release(ctx: Context<QuoteRelease>) -> Result<()> {
        quote_release_handler(ctx)
    }
}
