use anchor_lang::prelude::*;
use anchor_spl::token::{self, Approve, Revoke, Token, TokenAccount, Transfer};

use crate::errors::PoolError;

// The gateway is the only module that talks to the SPL token program.
// Ledger state is i128 base units end-to-end; conversion to the token's
// u64 wire amount happens at this boundary and nowhere else.

/// Convert an i128 base-unit amount to the SPL token wire amount.
pub fn wire_amount(amount: i128) -> Result<u64> {
    u64::try_from(amount).map_err(|_| error!(PoolError::MathOverflow))
}

/// Pull `amount` from a depositor-owned token account into the pool vault.
/// The depositor has signed the transaction.
pub fn transfer_in<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: i128,
) -> Result<()> {
    let raw = wire_amount(amount)?;
    require!(from.amount >= raw, PoolError::TokenTransferFailed);

    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority: authority.to_account_info(),
            },
        ),
        raw,
    )
}

/// Push `amount` out of the pool vault; the pool PDA signs via seeds.
pub fn transfer_out<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: i128,
) -> Result<()> {
    let raw = wire_amount(amount)?;
    require!(from.amount >= raw, PoolError::TokenTransferFailed);

    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to: to.to_account_info(),
                authority,
            },
            signer_seeds,
        ),
        raw,
    )
}

/// Delegate `amount` of the pool vault to the lender's pull authority.
/// Callers must consume and revoke the delegation within the same
/// instruction; a nonzero delegate never survives the transaction.
pub fn approve_delegate<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    delegate: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    token::approve(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Approve {
                to: vault.to_account_info(),
                delegate,
                authority,
            },
            signer_seeds,
        ),
        amount,
    )
}

pub fn revoke_delegate<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token::revoke(CpiContext::new_with_signer(
        token_program.to_account_info(),
        Revoke {
            source: vault.to_account_info(),
            authority,
        },
        signer_seeds,
    ))
}
