use checksums::strong::strategy::ChecksumDigest;
use rsync_core::BlockHash;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::algorithm::from_wire_id;
use crate::error::ProtocolError;
use crate::frame::{Frame, MAX_DATA_OP_LEN, TAG_BLOCK_HASH, TAG_BLOCK_OP, TAG_DATA_OP, TAG_END, TAG_SIGNATURE_HEADER};
use crate::header::SignatureHeader;

const SIGNATURE_HEADER_LEN: usize = 1 + 1 + 4 + 8;
const BLOCK_OP_LEN: usize = 1 + 8;

/// Chunk-safe decoder for the frame stream described by [`crate::frame`].
///
/// Feeding any prefix of a valid frame stream yields every complete frame
/// contained in that prefix; the unparsed tail is retained internally and
/// completed by a later call to [`FrameDecoder::feed`]. A single decoder is
/// meant to parse exactly one logical stream (a signature stream or a delta
/// stream) — both share the same five tags, so the caller is responsible for
/// rejecting frame kinds that don't belong in the stream it is reading.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    strong_len: Option<usize>,
    ended: bool,
}

impl FrameDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `chunk` into the decoder and returns every frame that became
    /// complete as a result, in order.
    #[cfg_attr(feature = "tracing", instrument(skip(self, chunk), fields(len = chunk.len())))]
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Frame>, ProtocolError> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();
        while let Some(frame) = self.try_decode_one()? {
            frames.push(frame);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(decoded = frames.len(), "frames decoded");
        Ok(frames)
    }

    /// Number of bytes buffered but not yet parsed into a frame.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    fn try_decode_one(&mut self) -> Result<Option<Frame>, ProtocolError> {
        let Some(&tag) = self.buffer.first() else {
            return Ok(None);
        };
        if self.ended {
            return Err(ProtocolError::FrameAfterEnd);
        }
        match tag {
            TAG_SIGNATURE_HEADER => self.decode_signature_header(),
            TAG_BLOCK_HASH => self.decode_block_hash(),
            TAG_BLOCK_OP => self.decode_block_op(),
            TAG_DATA_OP => self.decode_data_op(),
            TAG_END => self.decode_end(),
            other => Err(ProtocolError::UnknownTag(other)),
        }
    }

    fn decode_signature_header(&mut self) -> Result<Option<Frame>, ProtocolError> {
        if self.buffer.len() < SIGNATURE_HEADER_LEN {
            return Ok(None);
        }
        let algorithm = from_wire_id(self.buffer[1])?;
        let block_size = u32::from_be_bytes(self.buffer[2..6].try_into().unwrap());
        let reference_length = u64::from_be_bytes(self.buffer[6..14].try_into().unwrap());
        self.buffer.drain(..SIGNATURE_HEADER_LEN);
        self.strong_len = Some(algorithm.digest_len());
        Ok(Some(Frame::SignatureHeader(SignatureHeader::new(
            algorithm,
            block_size,
            reference_length,
        ))))
    }

    fn decode_block_hash(&mut self) -> Result<Option<Frame>, ProtocolError> {
        let strong_len = self.strong_len.ok_or(ProtocolError::BlockHashBeforeHeader)?;
        let total = 1 + 8 + 4 + strong_len;
        if self.buffer.len() < total {
            return Ok(None);
        }
        let index = u64::from_be_bytes(self.buffer[1..9].try_into().unwrap());
        let weak = u32::from_be_bytes(self.buffer[9..13].try_into().unwrap());
        let strong = ChecksumDigest::new(&self.buffer[13..total]);
        self.buffer.drain(..total);
        Ok(Some(Frame::BlockHash(BlockHash::new(index, weak, strong))))
    }

    fn decode_block_op(&mut self) -> Result<Option<Frame>, ProtocolError> {
        if self.buffer.len() < BLOCK_OP_LEN {
            return Ok(None);
        }
        let index = u64::from_be_bytes(self.buffer[1..9].try_into().unwrap());
        self.buffer.drain(..BLOCK_OP_LEN);
        Ok(Some(Frame::BlockOp { index }))
    }

    fn decode_data_op(&mut self) -> Result<Option<Frame>, ProtocolError> {
        if self.buffer.len() < 5 {
            return Ok(None);
        }
        let len = u32::from_be_bytes(self.buffer[1..5].try_into().unwrap());
        if len > MAX_DATA_OP_LEN {
            return Err(ProtocolError::DataOpTooLarge {
                len,
                max: MAX_DATA_OP_LEN,
            });
        }
        let total = 5 + len as usize;
        if self.buffer.len() < total {
            return Ok(None);
        }
        let bytes = self.buffer[5..total].to_vec();
        self.buffer.drain(..total);
        Ok(Some(Frame::DataOp { bytes }))
    }

    fn decode_end(&mut self) -> Result<Option<Frame>, ProtocolError> {
        self.buffer.drain(..1);
        self.ended = true;
        Ok(Some(Frame::End))
    }
}
