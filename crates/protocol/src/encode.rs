use std::io::{self, Write};

use rsync_core::{BlockHash, Operation};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::algorithm::wire_id;
use crate::frame::{MAX_DATA_OP_LEN, TAG_BLOCK_HASH, TAG_BLOCK_OP, TAG_DATA_OP, TAG_END, TAG_SIGNATURE_HEADER};
use crate::header::SignatureHeader;

/// Writes a `SIGNATURE_HEADER` frame.
#[cfg_attr(feature = "tracing", instrument(skip(sink, header)))]
pub fn encode_signature_header<W: Write>(sink: &mut W, header: &SignatureHeader) -> io::Result<()> {
    sink.write_all(&[TAG_SIGNATURE_HEADER])?;
    sink.write_all(&[wire_id(header.algorithm)])?;
    sink.write_all(&header.block_size.to_be_bytes())?;
    sink.write_all(&header.reference_length.to_be_bytes())
}

/// Writes a `BLOCK_HASH` frame. The strong-hash byte width is implied by the
/// digest the caller placed in `hash.strong`, which must match the width of
/// the algorithm already announced in the stream's `SIGNATURE_HEADER`.
#[cfg_attr(feature = "tracing", instrument(skip(sink, hash)))]
pub fn encode_block_hash<W: Write>(sink: &mut W, hash: &BlockHash) -> io::Result<()> {
    sink.write_all(&[TAG_BLOCK_HASH])?;
    sink.write_all(&hash.index.to_be_bytes())?;
    sink.write_all(&hash.weak.to_be_bytes())?;
    sink.write_all(hash.strong.as_ref())
}

/// Writes an `END` frame.
#[cfg_attr(feature = "tracing", instrument(skip(sink)))]
pub fn encode_end<W: Write>(sink: &mut W) -> io::Result<()> {
    sink.write_all(&[TAG_END])
}

/// Writes one or more frames for `op`, splitting `DATA_OP` payloads larger
/// than [`MAX_DATA_OP_LEN`] into consecutive `DATA_OP` frames.
#[cfg_attr(feature = "tracing", instrument(skip(sink, op)))]
pub fn encode_operation<W: Write>(sink: &mut W, op: &Operation) -> io::Result<()> {
    match op {
        Operation::Block { index } => {
            sink.write_all(&[TAG_BLOCK_OP])?;
            sink.write_all(&index.to_be_bytes())
        }
        Operation::Data { bytes } => {
            for chunk in bytes.chunks(MAX_DATA_OP_LEN as usize) {
                encode_data_chunk(sink, chunk)?;
            }
            if bytes.is_empty() {
                encode_data_chunk(sink, &[])?;
            }
            Ok(())
        }
    }
}

fn encode_data_chunk<W: Write>(sink: &mut W, chunk: &[u8]) -> io::Result<()> {
    sink.write_all(&[TAG_DATA_OP])?;
    #[allow(clippy::cast_possible_truncation)]
    sink.write_all(&(chunk.len() as u32).to_be_bytes())?;
    sink.write_all(chunk)
}
