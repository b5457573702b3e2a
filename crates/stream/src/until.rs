//! Growth policy for caller-owned delimiter scan buffers.

use std::collections::TryReserveError;

/// Smallest capacity a scan destination is grown to.
pub(crate) const MIN_LINE_CAPACITY: usize = 64;

/// Ensures `dest` can take `additional` more bytes without reallocating.
///
/// Capacity starts at [`MIN_LINE_CAPACITY`] and doubles until it covers the
/// requested length. Existing capacity is never reduced.
pub(crate) fn reserve_geometric(
    dest: &mut Vec<u8>,
    additional: usize,
) -> Result<(), TryReserveError> {
    let required = dest.len().saturating_add(additional);
    if required <= dest.capacity() {
        return Ok(());
    }
    let mut target = dest.capacity().max(MIN_LINE_CAPACITY);
    while target < required {
        target = target.checked_mul(2).unwrap_or(required);
    }
    dest.try_reserve_exact(target - dest.len())
}
