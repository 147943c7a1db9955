use rsync_core::{BlockHash, Operation};

use crate::header::SignatureHeader;

/// Tag byte for a `SIGNATURE_HEADER` frame.
pub const TAG_SIGNATURE_HEADER: u8 = b'S';
/// Tag byte for a `BLOCK_HASH` frame.
pub const TAG_BLOCK_HASH: u8 = b'H';
/// Tag byte for a `BLOCK_OP` frame.
pub const TAG_BLOCK_OP: u8 = b'B';
/// Tag byte for a `DATA_OP` frame.
pub const TAG_DATA_OP: u8 = b'D';
/// Tag byte for the `END` frame.
pub const TAG_END: u8 = b'E';

/// Upper bound on a single `DATA_OP` payload, matching
/// [`rsync_core::MAX_LITERAL_LEN`]. Larger literals are split by the
/// producer across consecutive `DATA_OP` frames.
pub const MAX_DATA_OP_LEN: u32 = rsync_core::MAX_LITERAL_LEN as u32;

/// A single decoded wire frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    SignatureHeader(SignatureHeader),
    BlockHash(BlockHash),
    BlockOp { index: u64 },
    DataOp { bytes: Vec<u8> },
    End,
}

impl From<&Operation> for Frame {
    fn from(op: &Operation) -> Self {
        match op {
            Operation::Block { index } => Self::BlockOp { index: *index },
            Operation::Data { bytes } => Self::DataOp {
                bytes: bytes.clone(),
            },
        }
    }
}

impl From<Operation> for Frame {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Block { index } => Self::BlockOp { index },
            Operation::Data { bytes } => Self::DataOp { bytes },
        }
    }
}
