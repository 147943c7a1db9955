use std::collections::VecDeque;
use std::io::{BufReader, Read};

use checksums::RollingChecksum;
use checksums::strong::strategy::ChecksumStrategy;
use rustc_hash::FxHashMap;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{CoreError, Result};
use crate::types::{BlockHash, Operation};

/// Upper bound on the number of bytes buffered in a single `DATA` operation.
///
/// Flushing the literal buffer at this size keeps the differ's memory usage
/// bounded even when scanning a source stream that matches no reference
/// block at all.
pub const MAX_LITERAL_LEN: usize = 1 << 20;

/// Scans `source` against the reference `hashes` and emits the ordered
/// delta program via `sink`.
///
/// Implements the scan described for the rsync core: a sliding window of
/// `block_size` bytes is probed against a `weak -> [(index, strong)]`
/// lookup table built from `hashes`. A weak-hash hit is confirmed with a
/// strong-hash comparison (computed with `strategy`) before the window is
/// accepted as a `BLOCK` match; everything else accumulates into a literal
/// buffer that is flushed as `DATA` operations.
///
/// `sink` is not called with an explicit `END`; callers that need a
/// terminator append it themselves (the wire codec does, at the framing
/// layer).
#[cfg_attr(feature = "tracing", instrument(skip(source, hashes, strategy, sink), fields(blocks = hashes.len())))]
pub fn generate_delta<S: Read>(
    source: S,
    block_size: u32,
    hashes: &[BlockHash],
    strategy: &dyn ChecksumStrategy,
    mut sink: impl FnMut(Operation),
) -> Result<()> {
    let block_size = block_size as usize;
    let mut source = BufReader::with_capacity(block_size.max(8192), source);

    if hashes.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::debug!("empty signature, streaming source as a single literal run");
        return stream_as_literal(&mut source, &mut sink);
    }

    let lookup = build_lookup(hashes);

    let mut window: VecDeque<u8> = VecDeque::with_capacity(block_size * 2);
    fill_window(&mut source, &mut window, block_size)?;

    if window.len() < block_size {
        // Edge case: the whole source is shorter than one block.
        let data: Vec<u8> = window.into_iter().collect();
        if !data.is_empty() {
            sink(Operation::data(data));
        }
        return Ok(());
    }

    let mut rolling = window_checksum(&window);
    let mut pending: Vec<u8> = Vec::new();

    loop {
        let candidate = lookup.get(&rolling.value()).and_then(|candidates| {
            let window_bytes = contiguous(&window);
            let strong = strategy.compute(&window_bytes);
            candidates
                .iter()
                .find(|(_, s)| *s == strong)
                .map(|(index, _)| *index)
        });

        if let Some(index) = candidate {
            if !pending.is_empty() {
                sink(Operation::data(std::mem::take(&mut pending)));
            }
            sink(Operation::block(index));

            window.clear();
            fill_window(&mut source, &mut window, block_size)?;

            if window.is_empty() {
                break;
            }
            if window.len() < block_size {
                pending.extend(window.iter().copied());
                window.clear();
                break;
            }

            rolling = window_checksum(&window);
            continue;
        }

        let outgoing = *window.front().expect("window is never empty here");
        window.pop_front();
        pending.push(outgoing);

        match read_one(&mut source)? {
            Some(incoming) => {
                window.push_back(incoming);
                rolling
                    .roll(outgoing, incoming)
                    .expect("window length is held constant at block_size");
            }
            None => {
                pending.extend(window.iter().copied());
                window.clear();
                break;
            }
        }

        if pending.len() >= MAX_LITERAL_LEN {
            sink(Operation::data(std::mem::take(&mut pending)));
        }
    }

    if !pending.is_empty() {
        sink(Operation::data(pending));
    }

    Ok(())
}

fn build_lookup(
    hashes: &[BlockHash],
) -> FxHashMap<u32, Vec<(u64, checksums::strong::strategy::ChecksumDigest)>> {
    let mut lookup: FxHashMap<u32, Vec<(u64, checksums::strong::strategy::ChecksumDigest)>> =
        FxHashMap::default();
    for hash in hashes {
        lookup.entry(hash.weak).or_default().push((hash.index, hash.strong));
    }
    lookup
}

fn window_checksum(window: &VecDeque<u8>) -> RollingChecksum {
    let mut rolling = RollingChecksum::new();
    let (front, back) = window.as_slices();
    rolling.update(front);
    rolling.update(back);
    rolling
}

fn contiguous(window: &VecDeque<u8>) -> Vec<u8> {
    window.iter().copied().collect()
}

fn stream_as_literal<R: Read>(reader: &mut R, sink: &mut impl FnMut(Operation)) -> Result<()> {
    let mut buf = vec![0u8; MAX_LITERAL_LEN];
    loop {
        let filled = read_block(reader, &mut buf)?;
        if filled == 0 {
            break;
        }
        sink(Operation::data(buf[..filled].to_vec()));
        if filled < buf.len() {
            break;
        }
    }
    Ok(())
}

fn fill_window<R: Read>(reader: &mut R, window: &mut VecDeque<u8>, target: usize) -> Result<()> {
    let needed = target.saturating_sub(window.len());
    if needed == 0 {
        return Ok(());
    }
    let mut buf = vec![0u8; needed];
    let filled = read_block(reader, &mut buf)?;
    window.extend(&buf[..filled]);
    Ok(())
}

fn read_block<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CoreError::io("source", e)),
        }
    }
    Ok(filled)
}

fn read_one<R: Read>(reader: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CoreError::io("source", e)),
        }
    }
}
