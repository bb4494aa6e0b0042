use anchor_lang::prelude::*;

pub mod adapter;
pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod gateway;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use state::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Prize Savings Pool",
    project_url: "https://github.com/prizepool-labs/prize-pool",
    contacts: "email:security@prizepool.app,link:https://github.com/prizepool-labs/prize-pool/issues",
    policy: "https://github.com/prizepool-labs/prize-pool/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/prizepool-labs/prize-pool"
}

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod prize_pool {
    use super::*;
    use crate::instructions::{admin, depositor, draw, lender, views};

    pub fn initialize(ctx: Context<Initialize>, period_days: u32) -> Result<()> {
        admin::initialize(ctx, period_days)
    }

    pub fn deposit(ctx: Context<Deposit>, amount: i128) -> Result<()> {
        depositor::deposit(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: i128) -> Result<()> {
        depositor::withdraw(ctx, amount)
    }

    pub fn set_lender_pool(ctx: Context<SetLenderPool>, lender_pool: Pubkey) -> Result<()> {
        admin::set_lender_pool(ctx, lender_pool)
    }

    pub fn supply_to_lender(ctx: Context<LenderOperation>, amount: i128) -> Result<()> {
        lender::supply_to_lender(ctx, amount)
    }

    pub fn withdraw_from_lender(
        ctx: Context<LenderOperation>,
        amount: i128,
        min_return: i128,
    ) -> Result<i128> {
        lender::withdraw_from_lender(ctx, amount, min_return)
    }

    pub fn harvest_yield(
        ctx: Context<LenderOperation>,
        amount: i128,
        min_return: i128,
    ) -> Result<i128> {
        lender::harvest_yield(ctx, amount, min_return)
    }

    pub fn add_prize(ctx: Context<AddPrize>, amount: i128) -> Result<()> {
        admin::add_prize(ctx, amount)
    }

    pub fn commit_draw(ctx: Context<CommitDraw>) -> Result<()> {
        draw::commit_draw(ctx)
    }

    pub fn execute_draw(ctx: Context<ExecuteDraw>) -> Result<Pubkey> {
        draw::execute_draw(ctx)
    }

    #[cfg(feature = "mock-draw")]
    pub fn execute_draw_mock(ctx: Context<ExecuteDrawMock>) -> Result<Pubkey> {
        draw::execute_draw_mock(ctx)
    }

    pub fn get_balance(ctx: Context<ViewPool>, depositor: Pubkey) -> Result<i128> {
        views::get_balance(ctx, depositor)
    }

    pub fn get_tickets(ctx: Context<ViewPool>, depositor: Pubkey) -> Result<i128> {
        views::get_tickets(ctx, depositor)
    }

    pub fn get_total_deposits(ctx: Context<ViewPool>) -> Result<i128> {
        views::get_total_deposits(ctx)
    }

    pub fn get_total_tickets(ctx: Context<ViewPool>) -> Result<i128> {
        views::get_total_tickets(ctx)
    }

    pub fn get_prize_fund(ctx: Context<ViewPool>) -> Result<i128> {
        views::get_prize_fund(ctx)
    }

    pub fn get_supplied_to_lender(ctx: Context<ViewPool>) -> Result<i128> {
        views::get_supplied_to_lender(ctx)
    }

    pub fn get_period_days(ctx: Context<ViewPool>) -> Result<u32> {
        views::get_period_days(ctx)
    }

    pub fn get_lender_pool(ctx: Context<ViewPool>) -> Result<Option<Pubkey>> {
        views::get_lender_pool(ctx)
    }

    pub fn get_last_draw(ctx: Context<ViewPool>) -> Result<Option<LastDraw>> {
        views::get_last_draw(ctx)
    }
}
