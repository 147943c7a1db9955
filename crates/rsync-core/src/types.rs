use checksums::strong::strategy::ChecksumDigest;

/// Fingerprint of a single block of the reference stream.
///
/// `index` is the block's 0-based position in the reference stream; `weak` is
/// the rolling checksum of the block's bytes; `strong` is a collision-resistant
/// digest of the same bytes, computed by whichever [`checksums::strong::strategy::ChecksumStrategy`]
/// the signature was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHash {
    pub index: u64,
    pub weak: u32,
    pub strong: ChecksumDigest,
}

impl BlockHash {
    #[must_use]
    pub const fn new(index: u64, weak: u32, strong: ChecksumDigest) -> Self {
        Self {
            index,
            weak,
            strong,
        }
    }
}

/// A single step of a delta program.
///
/// The ordered concatenation of bytes produced by replaying every operation
/// in a valid delta reconstructs the modified stream exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Copy block `index` from the reference stream verbatim.
    Block { index: u64 },
    /// Append a literal byte range that did not match any reference block.
    Data { bytes: Vec<u8> },
}

impl Operation {
    #[must_use]
    pub const fn block(index: u64) -> Self {
        Self::Block { index }
    }

    #[must_use]
    pub fn data(bytes: Vec<u8>) -> Self {
        Self::Data { bytes }
    }
}
