use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use solana_sha256_hasher::hashv;

// The lender is an external Anchor-convention lending program configured per
// pool. Its wire shape is encapsulated here: `supply(amount)` moves tokens
// from the pool vault (via the delegation approved in the same instruction),
// `withdraw(amount)` returns tokens to the pool vault. The realized delta is
// always measured by the caller against the pool vault balance, never
// trusted from the lender.

pub const LENDER_SUPPLY_IX: &str = "supply";
pub const LENDER_WITHDRAW_IX: &str = "withdraw";

/// Accounts forwarded to every lender invocation, in the lender's expected
/// order: state, pull/push authority, lender vault, pool vault, pool
/// position owner (signer), token program.
pub struct LenderCall<'info> {
    pub lender_program: AccountInfo<'info>,
    pub lender_state: AccountInfo<'info>,
    pub lender_authority: AccountInfo<'info>,
    pub lender_vault: AccountInfo<'info>,
    pub pool_vault: AccountInfo<'info>,
    pub pool: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

/// Anchor global instruction discriminator: sha256("global:<name>")[..8].
fn instruction_discriminator(name: &str) -> [u8; 8] {
    let hash = hashv(&[b"global:", name.as_bytes()]).to_bytes();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

/// Invoke the lender program with the pool PDA as position-owner signer.
/// Any lender failure aborts the whole transaction; pool accounting is only
/// mutated by callers after this returns Ok.
pub fn invoke_lender(
    call: &LenderCall,
    name: &str,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let mut data = Vec::with_capacity(16);
    data.extend_from_slice(&instruction_discriminator(name));
    data.extend_from_slice(&amount.to_le_bytes());

    let ix = Instruction {
        program_id: call.lender_program.key(),
        accounts: vec![
            AccountMeta::new(call.lender_state.key(), false),
            AccountMeta::new_readonly(call.lender_authority.key(), false),
            AccountMeta::new(call.lender_vault.key(), false),
            AccountMeta::new(call.pool_vault.key(), false),
            AccountMeta::new_readonly(call.pool.key(), true),
            AccountMeta::new_readonly(call.token_program.key(), false),
        ],
        data,
    };

    invoke_signed(
        &ix,
        &[
            call.lender_state.clone(),
            call.lender_authority.clone(),
            call.lender_vault.clone(),
            call.pool_vault.clone(),
            call.pool.clone(),
            call.token_program.clone(),
        ],
        signer_seeds,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminator_is_deterministic() {
        assert_eq!(
            instruction_discriminator(LENDER_SUPPLY_IX),
            instruction_discriminator("supply")
        );
    }

    #[test]
    fn discriminator_differs_per_instruction() {
        assert_ne!(
            instruction_discriminator(LENDER_SUPPLY_IX),
            instruction_discriminator(LENDER_WITHDRAW_IX)
        );
    }

    #[test]
    fn discriminator_matches_anchor_preimage() {
        let expected = hashv(&[b"global:supply"]).to_bytes();
        assert_eq!(&instruction_discriminator("supply")[..], &expected[..8]);
    }
}
