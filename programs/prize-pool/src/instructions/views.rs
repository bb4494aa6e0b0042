use anchor_lang::prelude::*;

use crate::state::LastDraw;
use crate::ViewPool;

// Read-only entry points. Values come back as Solana return data; the same
// fields are also directly readable from the Pool account off-chain.

pub fn get_balance(ctx: Context<ViewPool>, depositor: Pubkey) -> Result<i128> {
    Ok(ctx.accounts.pool.balance_of(&depositor))
}

pub fn get_tickets(ctx: Context<ViewPool>, depositor: Pubkey) -> Result<i128> {
    Ok(ctx.accounts.pool.tickets_of(&depositor))
}

pub fn get_total_deposits(ctx: Context<ViewPool>) -> Result<i128> {
    Ok(ctx.accounts.pool.total_deposits)
}

pub fn get_total_tickets(ctx: Context<ViewPool>) -> Result<i128> {
    Ok(ctx.accounts.pool.total_tickets)
}

pub fn get_prize_fund(ctx: Context<ViewPool>) -> Result<i128> {
    Ok(ctx.accounts.pool.prize_fund)
}

pub fn get_supplied_to_lender(ctx: Context<ViewPool>) -> Result<i128> {
    Ok(ctx.accounts.pool.supplied_to_lender)
}

pub fn get_period_days(ctx: Context<ViewPool>) -> Result<u32> {
    Ok(ctx.accounts.pool.period_days)
}

pub fn get_lender_pool(ctx: Context<ViewPool>) -> Result<Option<Pubkey>> {
    let pool = &ctx.accounts.pool;
    Ok(pool.has_lender().then_some(pool.lender_pool))
}

pub fn get_last_draw(ctx: Context<ViewPool>) -> Result<Option<LastDraw>> {
    let pool = &ctx.accounts.pool;
    Ok((pool.last_draw.winner != Pubkey::default()).then_some(pool.last_draw))
}
