use anchor_lang::prelude::*;

use crate::{
    constants::MAX_DEPOSITORS,
    errors::PoolError,
    state::{DepositorEntry, LastDraw, Pool},
};

// -------------------------
// Ticket math
// -------------------------

/// tickets = amount * period_days, exact integer. One ticket per base unit
/// per day of lock period.
pub fn tickets_for(amount: i128, period_days: u32) -> Result<i128> {
    amount
        .checked_mul(period_days as i128)
        .ok_or_else(|| error!(PoolError::MathOverflow))
}

// -------------------------
// Ledger
// -------------------------

/// Credit `amount` to `depositor`: issue tickets, bump pool totals, and
/// append the depositor to the active list on a 0 -> positive transition.
pub fn credit(pool: &mut Pool, depositor: Pubkey, amount: i128) -> Result<i128> {
    let tickets = tickets_for(amount, pool.period_days)?;

    match pool.depositors.iter().position(|e| e.depositor == depositor) {
        Some(idx) => {
            let entry = &mut pool.depositors[idx];
            entry.balance = entry
                .balance
                .checked_add(amount)
                .ok_or(PoolError::MathOverflow)?;
            entry.tickets = entry
                .tickets
                .checked_add(tickets)
                .ok_or(PoolError::MathOverflow)?;
        }
        None => {
            require!(
                pool.depositors.len() < MAX_DEPOSITORS,
                PoolError::PoolFull
            );
            pool.depositors.push(DepositorEntry {
                depositor,
                balance: amount,
                tickets,
            });
        }
    }

    pool.total_deposits = pool
        .total_deposits
        .checked_add(amount)
        .ok_or(PoolError::MathOverflow)?;
    pool.total_tickets = pool
        .total_tickets
        .checked_add(tickets)
        .ok_or(PoolError::MathOverflow)?;

    debug_assert_conservation(pool);
    Ok(tickets)
}

/// Debit `amount` from `depositor`: burn amount * period_days tickets and
/// swap-pop the entry once its balance reaches zero.
pub fn debit(pool: &mut Pool, depositor: Pubkey, amount: i128) -> Result<i128> {
    let tickets = tickets_for(amount, pool.period_days)?;

    let idx = pool
        .depositors
        .iter()
        .position(|e| e.depositor == depositor)
        .ok_or(PoolError::InsufficientBalance)?;

    let entry = &mut pool.depositors[idx];
    require!(entry.balance >= amount, PoolError::InsufficientBalance);

    entry.balance = entry
        .balance
        .checked_sub(amount)
        .ok_or(PoolError::MathOverflow)?;
    entry.tickets = entry
        .tickets
        .checked_sub(tickets)
        .ok_or(PoolError::MathOverflow)?;

    if entry.balance == 0 {
        pool.depositors.swap_remove(idx);
    }

    pool.total_deposits = pool
        .total_deposits
        .checked_sub(amount)
        .ok_or(PoolError::MathOverflow)?;
    pool.total_tickets = pool
        .total_tickets
        .checked_sub(tickets)
        .ok_or(PoolError::MathOverflow)?;

    debug_assert_conservation(pool);
    Ok(tickets)
}

/// Conservation invariants, checked after every ledger mutation in debug
/// builds: sum of entry balances == total_deposits, sum of entry tickets ==
/// total_tickets == total_deposits * period_days.
#[cfg(debug_assertions)]
pub fn debug_assert_conservation(pool: &Pool) {
    let sum_balance: i128 = pool.depositors.iter().map(|e| e.balance).sum();
    let sum_tickets: i128 = pool.depositors.iter().map(|e| e.tickets).sum();
    debug_assert_eq!(sum_balance, pool.total_deposits);
    debug_assert_eq!(sum_tickets, pool.total_tickets);
    debug_assert_eq!(
        pool.total_tickets,
        pool.total_deposits * pool.period_days as i128
    );
}

#[cfg(not(debug_assertions))]
pub fn debug_assert_conservation(_pool: &Pool) {}

// -------------------------
// Draw selection
// -------------------------

/// Fold the revealed randomness with ledger entropy and the draw nonce, so
/// successive draws sample independently even within one slot.
pub fn mix_seed(random_value: u64, unix_timestamp: i64, slot: u64, draw_nonce: u64) -> u64 {
    random_value ^ (unix_timestamp as u64) ^ slot ^ draw_nonce
}

/// Map a 64-bit seed onto the ticket range [0, total_tickets).
pub fn winning_index(seed: u64, total_tickets: i128) -> i128 {
    debug_assert!(total_tickets > 0);
    ((seed as u128) % (total_tickets as u128)) as i128
}

/// Walk the depositor list in stored order, accumulating ticket counts;
/// the winner is the entry whose half-open cumulative band
/// [cum, cum + tickets) contains `index`.
pub fn select_winner(depositors: &[DepositorEntry], index: i128) -> Option<Pubkey> {
    let mut cumulative: i128 = 0;
    for entry in depositors.iter() {
        cumulative += entry.tickets;
        if index < cumulative {
            return Some(entry.depositor);
        }
    }
    None
}

/// Post-transfer draw settlement: the prize fund is emptied, the nonce
/// advances, the randomness commitment is cleared, and the draw is
/// recorded. Balances and tickets are untouched; the winner keeps their
/// principal in the pool.
pub fn settle_draw(
    pool: &mut Pool,
    winner: Pubkey,
    prize: i128,
    unix_timestamp: i64,
) -> Result<LastDraw> {
    pool.prize_fund = 0;
    pool.draw_nonce = pool
        .draw_nonce
        .checked_add(1)
        .ok_or(PoolError::MathOverflow)?;
    pool.randomness_account = Pubkey::default();
    pool.last_draw = LastDraw {
        timestamp: unix_timestamp,
        winner,
        prize,
        nonce: pool.draw_nonce,
    };
    Ok(pool.last_draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PERIOD_MONTHLY, PERIOD_WEEKLY};

    const WHOLE: i128 = 10_000_000; // 7-decimal token

    fn new_pool(period_days: u32) -> Pool {
        Pool {
            admin: Pubkey::new_unique(),
            bump: 255,
            token_mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            vault_bump: 254,
            period_days,
            total_deposits: 0,
            total_tickets: 0,
            prize_fund: 0,
            lender_pool: Pubkey::default(),
            supplied_to_lender: 0,
            draw_nonce: 0,
            randomness_account: Pubkey::default(),
            last_draw: LastDraw::default(),
            version: 1,
            depositors: Vec::new(),
        }
    }

    fn xorshift64(state: &mut u64) -> u64 {
        let mut x = *state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        *state = x;
        x
    }

    // -------------------------
    // Ticket math
    // -------------------------

    #[test]
    fn tickets_scale_with_period() {
        assert_eq!(tickets_for(100 * WHOLE, PERIOD_WEEKLY).unwrap(), 700 * WHOLE);
        assert_eq!(tickets_for(WHOLE, PERIOD_MONTHLY).unwrap(), 30 * WHOLE);
    }

    #[test]
    fn tickets_overflow_is_an_error() {
        assert!(tickets_for(i128::MAX, PERIOD_WEEKLY).is_err());
    }

    // -------------------------
    // Ledger: credit
    // -------------------------

    #[test]
    fn credit_updates_balance_and_tickets() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();

        credit(&mut pool, alice, 100 * WHOLE).unwrap();

        assert_eq!(pool.balance_of(&alice), 100 * WHOLE);
        assert_eq!(pool.tickets_of(&alice), 700 * WHOLE);
        assert_eq!(pool.total_deposits, 100 * WHOLE);
        assert_eq!(pool.total_tickets, 700 * WHOLE);
        assert_eq!(pool.depositors.len(), 1);
    }

    #[test]
    fn repeated_credits_accumulate_without_duplicate_entries() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();

        credit(&mut pool, alice, 50 * WHOLE).unwrap();
        credit(&mut pool, alice, 50 * WHOLE).unwrap();

        assert_eq!(pool.balance_of(&alice), 100 * WHOLE);
        assert_eq!(pool.tickets_of(&alice), 700 * WHOLE);
        assert_eq!(pool.depositors.len(), 1);
    }

    #[test]
    fn two_depositors_share_totals() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        credit(&mut pool, alice, 100 * WHOLE).unwrap();
        credit(&mut pool, bob, 200 * WHOLE).unwrap();

        assert_eq!(pool.total_deposits, 300 * WHOLE);
        assert_eq!(pool.total_tickets, 2100 * WHOLE);
        assert_eq!(pool.depositors.len(), 2);
    }

    #[test]
    fn credit_rejects_when_list_is_full() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        for _ in 0..MAX_DEPOSITORS {
            credit(&mut pool, Pubkey::new_unique(), WHOLE).unwrap();
        }
        assert!(credit(&mut pool, Pubkey::new_unique(), WHOLE).is_err());
        // Existing depositors can still top up at capacity.
        let existing = pool.depositors[0].depositor;
        credit(&mut pool, existing, WHOLE).unwrap();
    }

    // -------------------------
    // Ledger: debit
    // -------------------------

    #[test]
    fn partial_debit_burns_proportional_tickets() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();

        credit(&mut pool, alice, 100 * WHOLE).unwrap();
        debit(&mut pool, alice, 40 * WHOLE).unwrap();

        assert_eq!(pool.balance_of(&alice), 60 * WHOLE);
        assert_eq!(pool.tickets_of(&alice), 420 * WHOLE);
        assert_eq!(pool.depositors.len(), 1);
    }

    #[test]
    fn full_debit_removes_depositor_from_list() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();

        credit(&mut pool, alice, 50 * WHOLE).unwrap();
        debit(&mut pool, alice, 50 * WHOLE).unwrap();

        assert_eq!(pool.balance_of(&alice), 0);
        assert!(pool.depositors.is_empty());
        assert_eq!(pool.total_deposits, 0);
        assert_eq!(pool.total_tickets, 0);
    }

    #[test]
    fn swap_pop_keeps_remaining_entries_intact() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let carol = Pubkey::new_unique();

        credit(&mut pool, alice, 10 * WHOLE).unwrap();
        credit(&mut pool, bob, 20 * WHOLE).unwrap();
        credit(&mut pool, carol, 30 * WHOLE).unwrap();

        debit(&mut pool, alice, 10 * WHOLE).unwrap();

        assert_eq!(pool.depositors.len(), 2);
        assert_eq!(pool.balance_of(&bob), 20 * WHOLE);
        assert_eq!(pool.balance_of(&carol), 30 * WHOLE);
        assert_eq!(pool.total_deposits, 50 * WHOLE);
    }

    #[test]
    fn debit_more_than_balance_fails() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        credit(&mut pool, alice, 100 * WHOLE).unwrap();
        assert!(debit(&mut pool, alice, 200 * WHOLE).is_err());
        assert_eq!(pool.balance_of(&alice), 100 * WHOLE);
    }

    #[test]
    fn debit_unknown_depositor_fails() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        assert!(debit(&mut pool, Pubkey::new_unique(), WHOLE).is_err());
    }

    #[test]
    fn conservation_holds_over_random_op_sequence() {
        let mut pool = new_pool(PERIOD_MONTHLY);
        let users: Vec<Pubkey> = (0..8).map(|_| Pubkey::new_unique()).collect();
        let mut rng = 0x1234_5678_9abc_def0u64;

        for _ in 0..500 {
            let user = users[(xorshift64(&mut rng) % 8) as usize];
            let amount = (xorshift64(&mut rng) % 1000 + 1) as i128;
            if xorshift64(&mut rng) % 3 == 0 {
                let held = pool.balance_of(&user);
                if held > 0 {
                    let take = amount.min(held);
                    debit(&mut pool, user, take).unwrap();
                }
            } else {
                credit(&mut pool, user, amount).unwrap();
            }

            let sum_balance: i128 = pool.depositors.iter().map(|e| e.balance).sum();
            let sum_tickets: i128 = pool.depositors.iter().map(|e| e.tickets).sum();
            assert_eq!(sum_balance, pool.total_deposits);
            assert_eq!(sum_tickets, pool.total_tickets);
            assert_eq!(
                pool.total_tickets,
                pool.total_deposits * PERIOD_MONTHLY as i128
            );
        }
    }

    // -------------------------
    // Draw selection
    // -------------------------

    #[test]
    fn mix_seed_varies_with_nonce() {
        let a = mix_seed(42, 1_700_000_000, 5000, 0);
        let b = mix_seed(42, 1_700_000_000, 5000, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn winning_index_stays_in_ticket_range() {
        for seed in [0u64, 1, u64::MAX, 0xdead_beef] {
            let idx = winning_index(seed, 2800);
            assert!((0..2800).contains(&idx));
        }
    }

    #[test]
    fn sole_depositor_always_wins() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        credit(&mut pool, alice, 100 * WHOLE).unwrap();

        for seed in 0..100u64 {
            let idx = winning_index(seed, pool.total_tickets);
            assert_eq!(select_winner(&pool.depositors, idx), Some(alice));
        }
    }

    #[test]
    fn cumulative_bands_are_half_open() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let entries = vec![
            DepositorEntry {
                depositor: alice,
                balance: 1,
                tickets: 7,
            },
            DepositorEntry {
                depositor: bob,
                balance: 3,
                tickets: 21,
            },
        ];

        assert_eq!(select_winner(&entries, 0), Some(alice));
        assert_eq!(select_winner(&entries, 6), Some(alice));
        assert_eq!(select_winner(&entries, 7), Some(bob));
        assert_eq!(select_winner(&entries, 27), Some(bob));
        assert_eq!(select_winner(&entries, 28), None);
    }

    #[test]
    fn selection_is_exactly_proportional_over_all_indices() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let entries = vec![
            DepositorEntry {
                depositor: alice,
                balance: 100,
                tickets: 700,
            },
            DepositorEntry {
                depositor: bob,
                balance: 300,
                tickets: 2100,
            },
        ];

        let mut alice_wins = 0u32;
        let mut bob_wins = 0u32;
        for idx in 0..2800i128 {
            match select_winner(&entries, idx) {
                Some(w) if w == alice => alice_wins += 1,
                Some(w) if w == bob => bob_wins += 1,
                other => panic!("unexpected selection {:?}", other),
            }
        }
        assert_eq!(alice_wins, 700);
        assert_eq!(bob_wins, 2100);
    }

    #[test]
    fn empirical_frequency_tracks_ticket_weight() {
        // Scenario: Alice deposits 100 (700 tickets), Bob 300 (2100 tickets).
        // Over 10_000 pseudo-random draws Alice should win ~2_500.
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        credit(&mut pool, alice, 100 * WHOLE).unwrap();
        credit(&mut pool, bob, 300 * WHOLE).unwrap();

        let mut rng = 0x9e37_79b9_7f4a_7c15u64;
        let mut alice_wins = 0u32;
        for nonce in 0..10_000u64 {
            let seed = mix_seed(xorshift64(&mut rng), 1_700_000_000, 250_000_000, nonce);
            let idx = winning_index(seed, pool.total_tickets);
            if select_winner(&pool.depositors, idx) == Some(alice) {
                alice_wins += 1;
            }
        }

        // 3 sigma for Bin(10_000, 0.25) is ~130; allow a wide margin.
        assert!(
            (2_300..=2_700).contains(&alice_wins),
            "alice won {} of 10_000",
            alice_wins
        );
    }

    // -------------------------
    // Draw settlement
    // -------------------------

    #[test]
    fn settle_draw_resets_prize_and_advances_nonce() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        credit(&mut pool, alice, 100 * WHOLE).unwrap();
        pool.prize_fund = 5 * WHOLE;
        pool.randomness_account = Pubkey::new_unique();

        let record = settle_draw(&mut pool, alice, 5 * WHOLE, 1_700_000_000).unwrap();

        assert_eq!(pool.prize_fund, 0);
        assert_eq!(pool.draw_nonce, 1);
        assert_eq!(pool.randomness_account, Pubkey::default());
        assert_eq!(record.winner, alice);
        assert_eq!(record.prize, 5 * WHOLE);
        assert_eq!(record.nonce, 1);
        assert_eq!(pool.last_draw, record);
    }

    #[test]
    fn winner_principal_survives_the_draw() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        credit(&mut pool, alice, 100 * WHOLE).unwrap();
        pool.prize_fund = 5 * WHOLE;

        settle_draw(&mut pool, alice, 5 * WHOLE, 1_700_000_000).unwrap();

        assert_eq!(pool.balance_of(&alice), 100 * WHOLE);
        assert_eq!(pool.tickets_of(&alice), 700 * WHOLE);
        assert_eq!(pool.total_deposits, 100 * WHOLE);
    }

    #[test]
    fn nonce_is_monotonic_across_draws() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();
        credit(&mut pool, alice, 100 * WHOLE).unwrap();

        for expected in 1..=5u64 {
            pool.prize_fund = WHOLE;
            settle_draw(&mut pool, alice, WHOLE, 1_700_000_000 + expected as i64).unwrap();
            assert_eq!(pool.draw_nonce, expected);
        }
    }

    // -------------------------
    // End-to-end ledger scenarios
    // -------------------------

    #[test]
    fn partial_withdraw_then_sole_draw() {
        // Alice deposits 100, withdraws 40, stays in the list, and wins the
        // 7-token prize as the only participant.
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();

        credit(&mut pool, alice, 100 * WHOLE).unwrap();
        debit(&mut pool, alice, 40 * WHOLE).unwrap();

        assert_eq!(pool.balance_of(&alice), 60 * WHOLE);
        assert_eq!(pool.tickets_of(&alice), 420 * WHOLE);
        assert_eq!(pool.depositors.len(), 1);

        pool.prize_fund = 7 * WHOLE;
        let idx = winning_index(mix_seed(99, 1_700_000_000, 1, 0), pool.total_tickets);
        let winner = select_winner(&pool.depositors, idx).unwrap();
        assert_eq!(winner, alice);

        settle_draw(&mut pool, winner, 7 * WHOLE, 1_700_000_000).unwrap();
        assert_eq!(pool.prize_fund, 0);
        assert_eq!(pool.balance_of(&alice), 60 * WHOLE);
    }

    #[test]
    fn full_withdraw_leaves_no_one_to_draw() {
        let mut pool = new_pool(PERIOD_WEEKLY);
        let alice = Pubkey::new_unique();

        credit(&mut pool, alice, 50 * WHOLE).unwrap();
        debit(&mut pool, alice, 50 * WHOLE).unwrap();

        assert!(pool.depositors.is_empty());
        assert_eq!(pool.total_deposits, 0);
        // execute_draw's first precondition (NoParticipants) fires on this
        // state; there is no index to select against.
        assert_eq!(select_winner(&pool.depositors, 0), None);
    }
}
