use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::errors::PoolError;
use crate::events::{DrawCommitted, DrawExecuted};
use crate::{gateway, utils, CommitDraw, ExecuteDraw};

#[cfg(feature = "mock-draw")]
use crate::ExecuteDrawMock;

/// Bind the next draw to a Switchboard randomness account before its value
/// is revealed, so the admin triggering the draw cannot grind outcomes.
pub fn commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let pool = &mut ctx.accounts.pool;
    require_keys_eq!(pool.admin, ctx.accounts.admin.key(), PoolError::Unauthorized);

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| error!(PoolError::InvalidRandomnessAccount))?;
    require!(
        randomness_data.seed_slot == clock.slot - 1,
        PoolError::RandomnessAlreadyRevealed
    );

    pool.randomness_account = ctx.accounts.randomness_account_data.key();

    emit!(DrawCommitted {
        pool: pool.key(),
        randomness_account: pool.randomness_account,
    });

    Ok(())
}

/// Select one winner proportionally to tickets and transfer the whole
/// prize fund to them. Their principal and tickets are untouched; they may
/// withdraw or stay for the next period.
pub fn execute_draw(ctx: Context<ExecuteDraw>) -> Result<Pubkey> {
    let clock = Clock::get()?;

    {
        let pool = &ctx.accounts.pool;
        require_keys_eq!(pool.admin, ctx.accounts.admin.key(), PoolError::Unauthorized);

        require!(pool.total_deposits > 0, PoolError::NoParticipants);
        require!(pool.total_tickets > 0, PoolError::NoTickets);
        require!(pool.prize_fund > 0, PoolError::NoPrize);

        require!(
            pool.randomness_account != Pubkey::default(),
            PoolError::RandomnessNotCommitted
        );
        require_keys_eq!(
            ctx.accounts.randomness_account_data.key(),
            pool.randomness_account,
            PoolError::IncorrectRandomnessAccount
        );
    }

    let revealed = {
        let randomness_data =
            RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
                .map_err(|_| error!(PoolError::InvalidRandomnessAccount))?;
        randomness_data
            .get_value(&clock)
            .map_err(|_| error!(PoolError::RandomnessNotResolved))?
    };
    let mut word = [0u8; 8];
    word.copy_from_slice(&revealed[..8]);

    let pool = &ctx.accounts.pool;
    let seed = utils::mix_seed(
        u64::from_le_bytes(word),
        clock.unix_timestamp,
        clock.slot,
        pool.draw_nonce,
    );
    let index = utils::winning_index(seed, pool.total_tickets);
    let winner = utils::select_winner(&pool.depositors, index).ok_or(PoolError::NoParticipants)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winner,
        PoolError::WinnerAccountMismatch
    );

    let prize = pool.prize_fund;
    let period_le = pool.period_days.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, period_le.as_ref(), &[pool.bump]]];

    gateway::transfer_out(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        &ctx.accounts.winner_ata,
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
        prize,
    )?;

    // Prize fund is reset only after the transfer has succeeded, so a
    // failed payout leaves the draw fully re-attemptable.
    let record = utils::settle_draw(&mut ctx.accounts.pool, winner, prize, clock.unix_timestamp)?;

    emit!(DrawExecuted {
        pool: ctx.accounts.pool.key(),
        last_draw: record,
    });
    msg!(
        "draw executed: winner={} prize={} nonce={}",
        record.winner,
        record.prize,
        record.nonce
    );

    Ok(winner)
}

/// Clock-entropy draw for localnet/devnet where no Switchboard queue is
/// available. Compiled out of production builds.
#[cfg(feature = "mock-draw")]
pub fn execute_draw_mock(ctx: Context<ExecuteDrawMock>) -> Result<Pubkey> {
    let clock = Clock::get()?;

    {
        let pool = &ctx.accounts.pool;
        require_keys_eq!(pool.admin, ctx.accounts.admin.key(), PoolError::Unauthorized);

        require!(pool.total_deposits > 0, PoolError::NoParticipants);
        require!(pool.total_tickets > 0, PoolError::NoTickets);
        require!(pool.prize_fund > 0, PoolError::NoPrize);
    }

    let pool = &ctx.accounts.pool;
    let entropy = (clock.unix_timestamp as u64)
        .wrapping_mul(31)
        .wrapping_add(clock.slot)
        .wrapping_mul(31)
        .wrapping_add(pool.draw_nonce);
    let seed = utils::mix_seed(entropy, clock.unix_timestamp, clock.slot, pool.draw_nonce);
    let index = utils::winning_index(seed, pool.total_tickets);
    let winner = utils::select_winner(&pool.depositors, index).ok_or(PoolError::NoParticipants)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winner,
        PoolError::WinnerAccountMismatch
    );

    let prize = pool.prize_fund;
    let period_le = pool.period_days.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, period_le.as_ref(), &[pool.bump]]];

    gateway::transfer_out(
        &ctx.accounts.token_program,
        &ctx.accounts.pool_vault,
        &ctx.accounts.winner_ata,
        ctx.accounts.pool.to_account_info(),
        signer_seeds,
        prize,
    )?;

    let record = utils::settle_draw(&mut ctx.accounts.pool, winner, prize, clock.unix_timestamp)?;

    emit!(DrawExecuted {
        pool: ctx.accounts.pool.key(),
        last_draw: record,
    });

    Ok(winner)
}
