/// Lower bound on the block size chosen for any reference stream length.
pub const MIN_BLOCK_SIZE: u32 = 512;

/// Upper bound on the block size chosen for any reference stream length.
pub const MAX_BLOCK_SIZE: u32 = 65536;

/// Derives the block size `B` for a reference stream of `length` bytes.
///
/// `B = clamp(round_to_power_of_two(sqrt(length)), MIN_BLOCK_SIZE, MAX_BLOCK_SIZE)`.
///
/// Rounding is always upward to the next power of two (`sqrt(0)` therefore
/// rounds to `1`, which then clamps to [`MIN_BLOCK_SIZE`]). Both the
/// signature producer and the delta producer must call this function with
/// the same `length` to agree on `B`; the signature header carries the
/// chosen value so the delta side never has to recompute it.
#[must_use]
pub fn block_size_for_length(length: u64) -> u32 {
    let sqrt = length.isqrt();
    let rounded = sqrt.max(1).next_power_of_two();
    let rounded = u32::try_from(rounded).unwrap_or(u32::MAX);
    rounded.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE)
}
