use anchor_lang::prelude::*;

use crate::errors::PoolError;
use crate::events::{Deposited, Withdrew};
use crate::{gateway, utils, Deposit, Withdraw};

/// Depositor locks tokens in the pool. Tickets = amount * period_days
/// (one ticket per base unit per day).
pub fn deposit(ctx: Context<Deposit>, amount: i128) -> Result<()> {
    require!(amount > 0, PoolError::ZeroAmount);

    gateway::transfer_in(
        &ctx.accounts.token_program,
        &ctx.accounts.depositor_ata,
        &ctx.accounts.pool_vault,
        &ctx.accounts.depositor,
        amount,
    )?;

    let depositor = ctx.accounts.depositor.key();
    let pool = &mut ctx.accounts.pool;
    let tickets = utils::credit(pool, depositor, amount)?;

    emit!(Deposited {
        pool: pool.key(),
        depositor,
        amount,
        tickets,
        total_deposits_after: pool.total_deposits,
        total_tickets_after: pool.total_tickets,
    });

    Ok(())
}

/// Depositor reclaims principal. The ledger debit happens before the
/// outgoing transfer, so a failed payout reverts the whole call.
pub fn withdraw(ctx: Context<Withdraw>, amount: i128) -> Result<()> {
    require!(amount > 0, PoolError::ZeroAmount);

    let depositor = ctx.accounts.depositor.key();
    let tickets_burned = utils::debit(&mut ctx.accounts.pool, depositor, amount)?;

    // Prepare signer seeds before the CPI (no &mut borrow).
    let pool = &ctx.accounts.pool;
    let period_le = pool.period_days.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, period_le.as_ref(), &[pool.bump]]];

    gateway::transfer_out(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        &ctx.accounts.depositor_ata,
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
        amount,
    )?;

    let pool = &ctx.accounts.pool;
    emit!(Withdrew {
        pool: pool.key(),
        depositor,
        amount,
        tickets_burned,
        total_deposits_after: pool.total_deposits,
    });

    Ok(())
}
