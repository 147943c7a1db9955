use std::io::{Read, Seek, SeekFrom, Write};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{CoreError, Result};
use crate::types::Operation;

/// Incremental patch-application state.
///
/// Holds exactly the bookkeeping the patching invariant in the component
/// design needs: the current read position in the reference stream, so
/// sequential block copies never re-seek. [`PatchCursor`] applies one
/// [`Operation`] at a time, which lets a caller driving operations off a
/// streamed wire decode (see `session::Patcher`) apply each one as soon as
/// it arrives rather than collecting the whole program first.
pub struct PatchCursor {
    block_size: u64,
    block_count: u64,
    position: u64,
}

impl PatchCursor {
    #[must_use]
    pub const fn new(block_size: u32, block_count: u64) -> Self {
        Self {
            block_size: block_size as u64,
            block_count,
            position: 0,
        }
    }

    /// Number of blocks in the signature this cursor is replaying against.
    #[must_use]
    pub const fn block_count(&self) -> u64 {
        self.block_count
    }

    /// Applies a single operation, seeking `reference` only if the next
    /// block is not already at the current read position.
    #[cfg_attr(feature = "tracing", instrument(skip(self, op, reference, output)))]
    pub fn apply<R: Read + Seek, W: Write>(
        &mut self,
        op: &Operation,
        reference: &mut R,
        output: &mut W,
    ) -> Result<()> {
        match op {
            Operation::Block { index } => {
                let index = *index;
                if index >= self.block_count {
                    return Err(CoreError::InvalidBlockIndex {
                        index,
                        block_count: self.block_count,
                    });
                }

                let offset = index * self.block_size;
                if offset != self.position {
                    reference
                        .seek(SeekFrom::Start(offset))
                        .map_err(|e| CoreError::io("reference", e))?;
                }

                let copied = copy_block(reference, output, self.block_size)?;
                self.position = offset + copied;
            }
            Operation::Data { bytes } => {
                output
                    .write_all(bytes)
                    .map_err(|e| CoreError::io("output", e))?;
            }
        }
        Ok(())
    }
}

fn copy_block<R: Read, W: Write>(reference: &mut R, output: &mut W, block_size: u64) -> Result<u64> {
    let mut limited = reference.take(block_size);
    std::io::copy(&mut limited, output).map_err(|e| CoreError::io("reference", e))
}

/// Replays an ordered operation program against `reference`, writing the
/// reconstructed stream to `output`.
///
/// A thin convenience wrapper over [`PatchCursor`] for callers that already
/// have the whole operation program in hand (e.g. in tests). Callers
/// building a streaming patcher should drive [`PatchCursor`] directly.
pub fn apply_delta<R: Read + Seek, W: Write>(
    mut reference: R,
    block_size: u32,
    block_count: u64,
    ops: impl IntoIterator<Item = Operation>,
    mut output: W,
) -> Result<()> {
    let mut cursor = PatchCursor::new(block_size, block_count);
    for op in ops {
        cursor.apply(&op, &mut reference, &mut output)?;
    }
    Ok(())
}
