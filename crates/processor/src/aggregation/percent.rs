//! Whole-number percentages

/// Share of `n` in `total` as a whole percentage
///
/// Returns 0 when `total` is 0. Halves round up (50.5% becomes 51%) and the
/// result never exceeds 100.
pub fn percent(n: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }

    let n = u128::from(n);
    let total = u128::from(total);
    let rounded = (n * 200 + total) / (2 * total);

    rounded.min(100) as u32
}
