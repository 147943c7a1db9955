/// Failures surfaced while decoding the framed wire protocol.
///
/// Every variant corresponds to a fatal, session-terminating condition; the
/// codec never attempts partial recovery (see `session::Error`, which wraps
/// these to implement the first-error-wins propagation policy).
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The leading tag byte of a frame did not match any known frame kind.
    #[error("unknown frame tag {0:#04x}")]
    UnknownTag(u8),

    /// `SIGNATURE_HEADER` named a strong-hash algorithm id this build does
    /// not recognise.
    #[error("unknown strong-hash algorithm id {0}")]
    UnknownAlgorithmId(u8),

    /// A `DATA_OP` declared a payload length larger than the implementation
    /// cap.
    #[error("data op length {len} exceeds maximum {max}")]
    DataOpTooLarge { len: u32, max: u32 },

    /// A `BLOCK_HASH` frame arrived before any `SIGNATURE_HEADER`, so the
    /// strong-digest width needed to parse it is unknown.
    #[error("block hash frame arrived before a signature header")]
    BlockHashBeforeHeader,

    /// A frame was decoded after an `END` frame already terminated the
    /// stream.
    #[error("frame decoded after END")]
    FrameAfterEnd,

    /// A `BLOCK_OP` named an index at or past the signature's block count.
    #[error("block op index {index} is out of range for a signature with {block_count} blocks")]
    BlockIndexOutOfRange {
        /// The out-of-range index carried by the frame.
        index: u64,
        /// Number of blocks present in the signature being replayed against.
        block_count: u64,
    },
}
