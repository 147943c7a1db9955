use checksums::strong::strategy::ChecksumAlgorithmKind;

/// Payload of a `SIGNATURE_HEADER` frame.
///
/// Carries everything the delta side needs before it can interpret any
/// subsequent `BLOCK_HASH` frame: the strong-hash algorithm (and therefore
/// its digest width), the block size `B` both sides must agree on, and the
/// reference stream length (`0` if unknown at signature time).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureHeader {
    pub algorithm: ChecksumAlgorithmKind,
    pub block_size: u32,
    pub reference_length: u64,
}

impl SignatureHeader {
    #[must_use]
    pub const fn new(algorithm: ChecksumAlgorithmKind, block_size: u32, reference_length: u64) -> Self {
        Self {
            algorithm,
            block_size,
            reference_length,
        }
    }
}
