use anchor_lang::prelude::*;

/// Custom error codes for the lock-fund escrow program.
#[error_code]
#[derive(PartialEq, Eq)]
pub enum LockFundError {
    #[msg("Configuration record is already initialized")]
    AlreadyInitialized,

    #[msg("Unauthorized: required signer missing or substituted")]
    Unauthorized,

    #[msg("Requested amount exceeds the currently vested amount")]
    InsufficientVestedAmount,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Invalid token mint")]
    InvalidMint,

    #[msg("Mint is not owned by the supplied token program")]
    InvalidTokenProgram,

    #[msg("Account not found")]
    AccountNotFound,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Authority and approver can not be the same key")]
    DuplicatePubkey,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid escrow vault")]
    InvalidEscrow,

    #[msg("Invalid recipient")]
    InvalidRecipient,

    #[msg("Unrecognized update actor mode")]
    InvalidUpdateActorMode,

    #[msg("Update carries no field to change")]
    EmptyUpdate,

    #[msg("Unsupported configuration record version")]
    UnsupportedVersion,

    #[msg("Released counter changed while the release was in flight")]
    StaleRelease,
}
