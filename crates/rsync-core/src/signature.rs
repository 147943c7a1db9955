use std::io::Read;

use checksums::RollingChecksum;
use checksums::strong::strategy::ChecksumStrategy;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{CoreError, Result};
use crate::types::BlockHash;

/// Splits `reader` into `block_size`-sized blocks and invokes `on_block` with
/// the [`BlockHash`] of each one, in order, starting at index `0`.
///
/// Reads happen in bounded `block_size` buffers; the whole reference stream
/// is never materialised in memory. The final block may be shorter than
/// `block_size` if the stream length is not an exact multiple of it.
///
/// Returns the total number of bytes read from `reader`.
#[cfg_attr(feature = "tracing", instrument(skip(reader, strategy, on_block)))]
pub fn generate_signature<R: Read>(
    mut reader: R,
    block_size: u32,
    strategy: &dyn ChecksumStrategy,
    mut on_block: impl FnMut(BlockHash),
) -> Result<u64> {
    let block_size = block_size as usize;
    let mut buffer = vec![0u8; block_size];
    let mut index = 0u64;
    let mut total = 0u64;

    loop {
        let filled = read_block(&mut reader, &mut buffer)?;
        if filled == 0 {
            break;
        }

        let block = &buffer[..filled];
        let weak = {
            let mut rolling = RollingChecksum::new();
            rolling.update(block);
            rolling.value()
        };
        let strong = strategy.compute(block);

        on_block(BlockHash::new(index, weak, strong));

        total += filled as u64;
        index += 1;

        if filled < block_size {
            break;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(blocks = index, bytes = total, "signature generated");

    Ok(total)
}

/// Fills `buffer` as much as possible from `reader`, stopping at EOF.
///
/// Unlike [`Read::read_exact`], a short final read is not an error: it
/// signals the last, possibly-partial block of the stream.
fn read_block<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CoreError::io("reference", e)),
        }
    }
    Ok(filled)
}
