use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Converts a SOL amount to lamports.
///
/// Returns `None` for negative, non-finite or out-of-range amounts instead of
/// saturating, so callers can reject the input.
pub fn sol_to_lamports_checked(sol: f64) -> Option<u64> {
    if !sol.is_finite() || sol < 0.0 {
        return None;
    }
    let lamports = (sol * LAMPORTS_PER_SOL as f64).round();
    if lamports > u64::MAX as f64 {
        return None;
    }
    Some(lamports as u64)
}
