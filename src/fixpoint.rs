use crate::error::{Result, TranspileError};

/// Apply `rule` in place until it reports no change.
///
/// `rule` returns `true` when it rewrote `value` and `false` once `value` is
/// stable. Fails with `FixpointLimit` if it is still rewriting after
/// `max_passes` calls.
pub fn apply_until_stable<T, F>(
    rule_name: &'static str,
    mut value: T,
    max_passes: usize,
    mut rule: F,
) -> Result<T>
where
    F: FnMut(&mut T) -> bool,
{
    for _ in 0..max_passes {
        if !rule(&mut value) {
            return Ok(value);
        }
    }

    Err(TranspileError::FixpointLimit {
        rule: rule_name,
        passes: max_passes,
    })
}

/// Pass bound for a rule that rewrites at most once per unit of `size`.
pub fn pass_bound(size: usize) -> usize {
    size + crate::constants::FIXPOINT_PASS_MARGIN
}
