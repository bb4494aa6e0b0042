use anchor_lang::prelude::*;

use crate::constants::MAX_DEPOSITORS;

/// One prize-savings pool instance. Deployed logically once per lock
/// period (7, 15, 30 days); the period is part of the PDA seeds.
#[account]
#[derive(InitSpace)]
pub struct Pool {
    pub admin: Pubkey,
    pub bump: u8,

    /// Deposit token mint; immutable after initialization.
    pub token_mint: Pubkey,

    /// SPL token account holding un-deployed principal and the prize fund
    /// (authority = this pool PDA).
    pub vault: Pubkey,
    pub vault_bump: u8,

    /// Ticket multiplier: tickets = balance * period_days.
    pub period_days: u32,

    /// All amounts are i128 base units of the deposit token.
    pub total_deposits: i128,
    pub total_tickets: i128,

    /// Realized yield awaiting the next draw.
    pub prize_fund: i128,

    /// External lending pool program. Pubkey::default() = unset.
    pub lender_pool: Pubkey,

    /// Principal supplied to the lender, excluding accrued interest.
    /// Accounting lower bound only; the true redeemable balance lives with
    /// the lender and is reconciled off-chain.
    pub supplied_to_lender: i128,

    /// Monotonic; incremented on every successful draw and mixed into the
    /// draw seed.
    pub draw_nonce: u64,

    /// Switchboard randomness account committed for the pending draw.
    /// Pubkey::default() = none committed.
    pub randomness_account: Pubkey,

    /// winner == Pubkey::default() means no draw has happened yet.
    pub last_draw: LastDraw,

    pub version: u16,

    /// Active depositors. An entry exists iff its balance > 0; removal is
    /// swap-pop, so stored order is arbitrary but stable between draws.
    /// NOTE: fixed max_len to keep account size deterministic.
    #[max_len(MAX_DEPOSITORS)]
    pub depositors: Vec<DepositorEntry>,
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DepositorEntry {
    pub depositor: Pubkey,
    pub balance: i128,
    pub tickets: i128,
}

#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct LastDraw {
    pub timestamp: i64,
    pub winner: Pubkey,
    pub prize: i128,
    pub nonce: u64,
}

impl Pool {
    pub fn has_lender(&self) -> bool {
        self.lender_pool != Pubkey::default()
    }

    pub fn balance_of(&self, depositor: &Pubkey) -> i128 {
        self.depositors
            .iter()
            .find(|e| e.depositor == *depositor)
            .map(|e| e.balance)
            .unwrap_or(0)
    }

    pub fn tickets_of(&self, depositor: &Pubkey) -> i128 {
        self.depositors
            .iter()
            .find(|e| e.depositor == *depositor)
            .map(|e| e.tickets)
            .unwrap_or(0)
    }
}
