// programs/prize-pool/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::state::Pool;

#[derive(Accounts)]
#[instruction(period_days: u32)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Pool::INIT_SPACE,
        seeds = [crate::POOL_SEED, period_days.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    /// Deposit token mint (already created off-chain or by the deploy script).
    pub token_mint: Account<'info, Mint>,

    /// Pool vault = TokenAccount PDA controlled by the program
    /// (authority = pool PDA); holds un-deployed principal and the prize fund.
    #[account(
        init,
        payer = admin,
        seeds = [crate::POOL_VAULT_SEED, period_days.to_le_bytes().as_ref()],
        bump,
        token::mint = token_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_mint)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = pool.vault,
        token::mint = token_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        mut,
        constraint = depositor_ata.mint == token_mint.key(),
        constraint = depositor_ata.owner == depositor.key()
    )]
    pub depositor_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_mint)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = pool.vault,
        token::mint = token_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    #[account(
        mut,
        constraint = depositor_ata.mint == token_mint.key(),
        constraint = depositor_ata.owner == depositor.key()
    )]
    pub depositor_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SetLenderPool<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct AddPrize<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_mint)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = pool.vault,
        token::mint = token_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = admin_ata.mint == token_mint.key(),
        constraint = admin_ata.owner == admin.key()
    )]
    pub admin_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Shared context for supply_to_lender / withdraw_from_lender /
/// harvest_yield. The lender-side accounts are unchecked here; the handler
/// verifies the program against pool.lender_pool and the lender program
/// validates its own state.
#[derive(Accounts)]
pub struct LenderOperation<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_mint)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = pool.vault,
        token::mint = token_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    /// CHECK: verified against pool.lender_pool in the handler.
    pub lender_program: UncheckedAccount<'info>,

    /// CHECK: lender pool state; owned and validated by the lender program.
    #[account(mut)]
    pub lender_state: UncheckedAccount<'info>,

    /// CHECK: the lender's transfer authority PDA; delegate of the pool
    /// vault for the duration of a supply instruction.
    pub lender_authority: UncheckedAccount<'info>,

    /// CHECK: lender token vault; validated by the lender program.
    #[account(mut)]
    pub lender_vault: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct CommitDraw<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    pub admin: Signer<'info>,

    /// CHECK: Switchboard randomness account; its data is parsed and
    /// validated in the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ExecuteDraw<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_mint)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = pool.vault,
        token::mint = token_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    /// CHECK: Switchboard randomness account committed by commit_draw;
    /// compared against pool.randomness_account and parsed in the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// CHECK: the depositor selected by the draw walk; the handler aborts
    /// unless this matches the on-chain selection.
    pub winner: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = winner_ata.mint == token_mint.key(),
        constraint = winner_ata.owner == winner.key()
    )]
    pub winner_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[cfg(feature = "mock-draw")]
#[derive(Accounts)]
pub struct ExecuteDrawMock<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.period_days.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_mint)]
    pub token_mint: Account<'info, Mint>,

    #[account(
        mut,
        address = pool.vault,
        token::mint = token_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    /// CHECK: expected winner under clock-only entropy; verified in handler.
    pub winner: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = winner_ata.mint == token_mint.key(),
        constraint = winner_ata.owner == winner.key()
    )]
    pub winner_ata: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ViewPool<'info> {
    pub pool: Account<'info, Pool>,
}
