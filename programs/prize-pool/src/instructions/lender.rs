use anchor_lang::prelude::*;

use crate::adapter::{self, LenderCall};
use crate::errors::PoolError;
use crate::events::{Harvested, Supplied, Withdrawn};
use crate::{gateway, LenderOperation};

fn check_lender(accounts: &LenderOperation) -> Result<()> {
    let pool = &accounts.pool;
    require_keys_eq!(pool.admin, accounts.admin.key(), PoolError::Unauthorized);
    require!(pool.has_lender(), PoolError::LenderNotSet);
    require_keys_eq!(
        accounts.lender_program.key(),
        pool.lender_pool,
        PoolError::LenderPoolMismatch
    );
    require!(accounts.lender_program.executable, PoolError::LenderRejected);
    Ok(())
}

fn lender_call<'info>(accounts: &LenderOperation<'info>) -> LenderCall<'info> {
    LenderCall {
        lender_program: accounts.lender_program.to_account_info(),
        lender_state: accounts.lender_state.to_account_info(),
        lender_authority: accounts.lender_authority.to_account_info(),
        lender_vault: accounts.lender_vault.to_account_info(),
        pool_vault: accounts.pool_vault.to_account_info(),
        pool: accounts.pool.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
    }
}

/// Move un-deployed principal from the pool vault into the lender.
/// The delegation is approved, consumed by the lender, and revoked within
/// this single instruction; no allowance survives the transaction.
pub fn supply_to_lender(ctx: Context<LenderOperation>, amount: i128) -> Result<()> {
    require!(amount > 0, PoolError::ZeroAmount);
    check_lender(ctx.accounts)?;

    let raw = gateway::wire_amount(amount)?;
    require!(
        ctx.accounts.pool_vault.amount >= raw,
        PoolError::TokenTransferFailed
    );

    let period_le = ctx.accounts.pool.period_days.to_le_bytes();
    let bump = ctx.accounts.pool.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, period_le.as_ref(), &[bump]]];

    gateway::approve_delegate(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        ctx.accounts.lender_authority.to_account_info(),
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
        raw,
    )?;

    adapter::invoke_lender(
        &lender_call(ctx.accounts),
        adapter::LENDER_SUPPLY_IX,
        raw,
        signer_seeds,
    )?;

    gateway::revoke_delegate(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
    )?;

    let pool = &mut ctx.accounts.pool;
    pool.supplied_to_lender = pool
        .supplied_to_lender
        .checked_add(amount)
        .ok_or(PoolError::MathOverflow)?;

    emit!(Supplied {
        pool: pool.key(),
        amount,
        supplied_to_lender_after: pool.supplied_to_lender,
    });

    Ok(())
}

/// Pull principal back from the lender. The realized vault delta must meet
/// min_return; accounting is only touched after the lender call succeeds.
/// May fail when the lender is short on liquidity; retry later.
pub fn withdraw_from_lender(
    ctx: Context<LenderOperation>,
    amount: i128,
    min_return: i128,
) -> Result<i128> {
    require!(amount > 0, PoolError::ZeroAmount);
    require!(
        min_return >= 0 && min_return <= amount,
        PoolError::InvalidMinReturn
    );
    check_lender(ctx.accounts)?;

    let raw = gateway::wire_amount(amount)?;
    let balance_before = ctx.accounts.pool_vault.amount;

    let period_le = ctx.accounts.pool.period_days.to_le_bytes();
    let bump = ctx.accounts.pool.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, period_le.as_ref(), &[bump]]];

    adapter::invoke_lender(
        &lender_call(ctx.accounts),
        adapter::LENDER_WITHDRAW_IX,
        raw,
        signer_seeds,
    )?;

    ctx.accounts.pool_vault.reload()?;
    let received = ctx.accounts.pool_vault.amount as i128 - balance_before as i128;
    require!(received >= min_return, PoolError::SlippageExceeded);

    let pool = &mut ctx.accounts.pool;
    pool.supplied_to_lender -= amount.min(pool.supplied_to_lender);

    emit!(Withdrawn {
        pool: pool.key(),
        amount,
        actual: received,
        supplied_to_lender_after: pool.supplied_to_lender,
    });

    Ok(received)
}

/// Pull accrued yield from the lender into the prize fund. The caller
/// computes `amount` off-chain as the lender's true balance minus
/// supplied_to_lender; principal accounting is unchanged.
pub fn harvest_yield(
    ctx: Context<LenderOperation>,
    amount: i128,
    min_return: i128,
) -> Result<i128> {
    require!(amount > 0, PoolError::ZeroAmount);
    require!(
        min_return >= 0 && min_return <= amount,
        PoolError::InvalidMinReturn
    );
    check_lender(ctx.accounts)?;

    let raw = gateway::wire_amount(amount)?;
    let balance_before = ctx.accounts.pool_vault.amount;

    let period_le = ctx.accounts.pool.period_days.to_le_bytes();
    let bump = ctx.accounts.pool.bump;
    let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, period_le.as_ref(), &[bump]]];

    adapter::invoke_lender(
        &lender_call(ctx.accounts),
        adapter::LENDER_WITHDRAW_IX,
        raw,
        signer_seeds,
    )?;

    ctx.accounts.pool_vault.reload()?;
    let received = ctx.accounts.pool_vault.amount as i128 - balance_before as i128;
    require!(received >= min_return, PoolError::SlippageExceeded);

    let pool = &mut ctx.accounts.pool;
    pool.prize_fund = pool
        .prize_fund
        .checked_add(received)
        .ok_or(PoolError::MathOverflow)?;

    emit!(Harvested {
        pool: pool.key(),
        amount,
        actual: received,
        prize_fund_after: pool.prize_fund,
    });

    Ok(received)
}
