use anchor_lang::prelude::*;

#[error_code]
pub enum PoolError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Period days out of range (must be 1..=365)")]
    BadPeriod,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Insufficient deposited balance")]
    InsufficientBalance,
    #[msg("Depositor list is full")]
    PoolFull,
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Token transfer cannot be satisfied")]
    TokenTransferFailed,

    #[msg("No participants in pool")]
    NoParticipants,
    #[msg("No tickets in pool")]
    NoTickets,
    #[msg("No prize to distribute")]
    NoPrize,

    #[msg("Lender pool not set")]
    LenderNotSet,
    #[msg("Lender pool locked while principal is supplied")]
    LenderPoolLocked,
    #[msg("Lender program does not match configured lender pool")]
    LenderPoolMismatch,
    #[msg("Configured lender pool is not a callable program")]
    LenderRejected,
    #[msg("min_return must be in [0, amount]")]
    InvalidMinReturn,
    #[msg("Realized return below min_return")]
    SlippageExceeded,

    #[msg("No randomness committed for this draw")]
    RandomnessNotCommitted,
    #[msg("Randomness account does not match committed draw")]
    IncorrectRandomnessAccount,
    #[msg("Randomness already revealed at commit time")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not yet resolved")]
    RandomnessNotResolved,
    #[msg("Failed to parse randomness account")]
    InvalidRandomnessAccount,
    #[msg("Winner accounts do not match the drawn winner")]
    WinnerAccountMismatch,
}
