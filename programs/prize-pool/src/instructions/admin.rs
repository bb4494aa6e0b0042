use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::PoolError;
use crate::events::{LenderPoolSet, PrizeAdded};
use crate::gateway;
use crate::state::LastDraw;
use crate::{AddPrize, Initialize, SetLenderPool};

/// Create one pool instance. Call with period_days = 7 (weekly),
/// 15 (biweekly), or 30 (monthly); any value in [1, 365] is accepted.
/// Re-initialization is impossible: the pool PDA for a given period can
/// only be created once.
pub fn initialize(ctx: Context<Initialize>, period_days: u32) -> Result<()> {
    require!(
        (MIN_PERIOD_DAYS..=MAX_PERIOD_DAYS).contains(&period_days),
        PoolError::BadPeriod
    );

    let pool = &mut ctx.accounts.pool;

    pool.admin = ctx.accounts.admin.key();
    pool.bump = ctx.bumps.pool;

    pool.token_mint = ctx.accounts.token_mint.key();
    pool.vault = ctx.accounts.pool_vault.key();
    pool.vault_bump = ctx.bumps.pool_vault;

    pool.period_days = period_days;

    pool.total_deposits = 0;
    pool.total_tickets = 0;
    pool.prize_fund = 0;

    pool.lender_pool = Pubkey::default();
    pool.supplied_to_lender = 0;

    pool.draw_nonce = 0;
    pool.randomness_account = Pubkey::default();
    pool.last_draw = LastDraw::default();

    pool.version = INITIAL_VERSION;
    pool.depositors = Vec::new();

    msg!("pool initialized: period_days={}", period_days);

    Ok(())
}

/// Point the pool at an external lending program. Replaceable only while
/// no principal is supplied; setting Pubkey::default() clears the lender.
pub fn set_lender_pool(ctx: Context<SetLenderPool>, lender_pool: Pubkey) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    require_keys_eq!(pool.admin, ctx.accounts.admin.key(), PoolError::Unauthorized);
    require!(pool.supplied_to_lender == 0, PoolError::LenderPoolLocked);

    pool.lender_pool = lender_pool;

    emit!(LenderPoolSet {
        pool: pool.key(),
        lender_pool,
    });

    Ok(())
}

/// Admin injects yield into the prize fund from their own token account.
/// Used to seed prizes directly when yield is realized outside the lender
/// path.
pub fn add_prize(ctx: Context<AddPrize>, amount: i128) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.pool.admin,
        ctx.accounts.admin.key(),
        PoolError::Unauthorized
    );
    require!(amount > 0, PoolError::ZeroAmount);

    gateway::transfer_in(
        &ctx.accounts.token_program,
        &ctx.accounts.admin_ata,
        &ctx.accounts.pool_vault,
        &ctx.accounts.admin,
        amount,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.prize_fund = pool
        .prize_fund
        .checked_add(amount)
        .ok_or(PoolError::MathOverflow)?;

    emit!(PrizeAdded {
        pool: pool.key(),
        amount,
        prize_fund_after: pool.prize_fund,
    });

    Ok(())
}
