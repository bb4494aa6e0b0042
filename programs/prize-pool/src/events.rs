use anchor_lang::prelude::*;

use crate::state::LastDraw;

#[event]
pub struct Deposited {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub amount: i128,
    pub tickets: i128,
    pub total_deposits_after: i128,
    pub total_tickets_after: i128,
}

#[event]
pub struct Withdrew {
    pub pool: Pubkey,
    pub depositor: Pubkey,
    pub amount: i128,
    pub tickets_burned: i128,
    pub total_deposits_after: i128,
}

#[event]
pub struct LenderPoolSet {
    pub pool: Pubkey,
    pub lender_pool: Pubkey,
}

#[event]
pub struct Supplied {
    pub pool: Pubkey,
    pub amount: i128,
    pub supplied_to_lender_after: i128,
}

#[event]
pub struct Withdrawn {
    pub pool: Pubkey,
    pub amount: i128,
    pub actual: i128,
    pub supplied_to_lender_after: i128,
}

#[event]
pub struct Harvested {
    pub pool: Pubkey,
    pub amount: i128,
    pub actual: i128,
    pub prize_fund_after: i128,
}

#[event]
pub struct PrizeAdded {
    pub pool: Pubkey,
    pub amount: i128,
    pub prize_fund_after: i128,
}

#[event]
pub struct DrawCommitted {
    pub pool: Pubkey,
    pub randomness_account: Pubkey,
}

#[event]
pub struct DrawExecuted {
    pub pool: Pubkey,
    pub last_draw: LastDraw,
}
