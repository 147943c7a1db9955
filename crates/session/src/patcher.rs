use std::io::{self, Read, Seek, Write};

use checksums::strong::strategy::ChecksumAlgorithmKind;
use protocol::{FrameDecoder, SignatureHeader, encode_block_hash, encode_end, encode_signature_header};
use rsync_core::PatchCursor;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{Error, Result};
use crate::strategy::strategy_for;

enum State<R, W> {
    NeedDelta,
    Applying {
        reference: R,
        output: W,
        decoder: FrameDecoder,
        cursor: PatchCursor,
        ended: bool,
    },
    Done,
    Failed(String),
}

/// Produces a signature, then applies a received delta program against a
/// reference stream to reconstruct the modified stream.
///
/// Constructed with the reference stream's length, from which the block
/// size is derived immediately (see [`rsync_core::block_size_for_length`]).
/// [`Patcher::create_signature`] can be called at any time before
/// [`Patcher::start_delta`] to emit the signature this endpoint offers to
/// its peer. [`Patcher::start_delta`] moves the session to `Applying`;
/// [`Patcher::update_delta`] feeds wire bytes and applies decoded operations
/// immediately; [`Patcher::finish_delta`] requires the last frame observed
/// to have been `END` and moves the session to `Done`.
pub struct Patcher<R, W> {
    reference_length: u64,
    block_size: u32,
    algorithm: ChecksumAlgorithmKind,
    state: State<R, W>,
}

impl<R: Read + Seek, W: Write> Patcher<R, W> {
    #[must_use]
    pub fn new(reference_length: u64, algorithm: ChecksumAlgorithmKind) -> Self {
        Self {
            reference_length,
            block_size: rsync_core::block_size_for_length(reference_length),
            algorithm,
            state: State::NeedDelta,
        }
    }

    /// Emits `SIGNATURE_HEADER`, every `BLOCK_HASH`, then `END` for
    /// `ref_reader`, calling `sink` with each encoded chunk. Does not affect
    /// the session's delta-application state.
    #[cfg_attr(feature = "tracing", instrument(skip(self, ref_reader, sink)))]
    pub fn create_signature(
        &mut self,
        ref_reader: impl Read,
        mut sink: impl FnMut(&[u8]) -> io::Result<()>,
    ) -> Result<()> {
        if matches!(self.state, State::Failed(_)) {
            return Err(self.clone_failed());
        }

        let strategy = strategy_for(self.algorithm);
        let header = SignatureHeader::new(self.algorithm, self.block_size, self.reference_length);

        let mut buf = Vec::new();
        if let Err(e) = encode_signature_header(&mut buf, &header) {
            return self.fail(Error::Core(rsync_core::CoreError::io("signature", e)));
        }
        if let Err(e) = sink(&buf) {
            return self.fail(Error::Core(rsync_core::CoreError::io("signature", e)));
        }

        let mut io_err = None;
        let result = rsync_core::generate_signature(ref_reader, self.block_size, strategy.as_ref(), |hash| {
            if io_err.is_some() {
                return;
            }
            buf.clear();
            if let Err(e) = encode_block_hash(&mut buf, &hash) {
                io_err = Some(e);
                return;
            }
            if let Err(e) = sink(&buf) {
                io_err = Some(e);
            }
        });

        if let Err(e) = result {
            return self.fail(Error::Core(e));
        }
        if let Some(e) = io_err {
            return self.fail(Error::Core(rsync_core::CoreError::io("signature", e)));
        }

        buf.clear();
        if let Err(e) = encode_end(&mut buf) {
            return self.fail(Error::Core(rsync_core::CoreError::io("signature", e)));
        }
        if let Err(e) = sink(&buf) {
            return self.fail(Error::Core(rsync_core::CoreError::io("signature", e)));
        }
        Ok(())
    }

    /// Moves the session to `Applying`, ready to receive delta wire bytes
    /// via [`Patcher::update_delta`].
    #[cfg_attr(feature = "tracing", instrument(skip(self, reference, output)))]
    pub fn start_delta(&mut self, reference: R, output: W) -> Result<()> {
        match &self.state {
            State::NeedDelta => {}
            State::Failed(msg) => return Err(Error::SessionFailed(msg.clone())),
            State::Applying { .. } | State::Done => {
                return self.fail(Error::Usage("start_delta called more than once"));
            }
        }

        let block_count = block_count_for(self.reference_length, self.block_size);
        self.state = State::Applying {
            reference,
            output,
            decoder: FrameDecoder::new(),
            cursor: PatchCursor::new(self.block_size, block_count),
            ended: false,
        };
        Ok(())
    }

    /// Feeds a chunk of delta wire bytes, applying every decoded operation
    /// immediately against the reference stream supplied to
    /// [`Patcher::start_delta`].
    #[cfg_attr(feature = "tracing", instrument(skip(self, chunk), fields(len = chunk.len())))]
    pub fn update_delta(&mut self, chunk: &[u8]) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Failed(String::new()));
        let (mut reference, mut output, mut decoder, mut cursor, mut ended) = match state {
            State::Applying {
                reference,
                output,
                decoder,
                cursor,
                ended,
            } => (reference, output, decoder, cursor, ended),
            State::NeedDelta => {
                return self.fail(Error::Usage("update_delta called before start_delta"));
            }
            State::Done => return self.fail(Error::Usage("update_delta called after finish_delta")),
            State::Failed(msg) => return Err(self.restore_failed(msg)),
        };

        let frames = match decoder.feed(chunk) {
            Ok(frames) => frames,
            Err(e) => return self.fail(Error::Protocol(e)),
        };

        for frame in frames {
            match frame {
                protocol::Frame::BlockOp { index } => {
                    if index >= cursor.block_count() {
                        return self.fail(Error::Protocol(protocol::ProtocolError::BlockIndexOutOfRange {
                            index,
                            block_count: cursor.block_count(),
                        }));
                    }
                    let op = rsync_core::Operation::block(index);
                    if let Err(e) = cursor.apply(&op, &mut reference, &mut output) {
                        return self.fail(Error::Core(e));
                    }
                }
                protocol::Frame::DataOp { bytes } => {
                    let op = rsync_core::Operation::data(bytes);
                    if let Err(e) = cursor.apply(&op, &mut reference, &mut output) {
                        return self.fail(Error::Core(e));
                    }
                }
                protocol::Frame::End => {
                    ended = true;
                }
                protocol::Frame::SignatureHeader(_) | protocol::Frame::BlockHash(_) => {
                    return self.fail(Error::Usage("unexpected signature frame in delta stream"));
                }
            }
        }

        self.state = State::Applying {
            reference,
            output,
            decoder,
            cursor,
            ended,
        };
        Ok(())
    }

    /// Requires that the last frame observed by [`Patcher::update_delta`]
    /// was `END`; moves the session to `Done`.
    #[cfg_attr(feature = "tracing", instrument(skip(self)))]
    pub fn finish_delta(&mut self) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Failed(String::new()));
        match state {
            State::Applying { ended: true, .. } => {
                self.state = State::Done;
                Ok(())
            }
            State::Applying { ended: false, .. } => {
                self.fail(Error::Usage("finish_delta called before an END frame was observed"))
            }
            State::NeedDelta => self.fail(Error::Usage("finish_delta called before start_delta")),
            State::Done => self.fail(Error::Usage("finish_delta called twice")),
            State::Failed(msg) => Err(self.restore_failed(msg)),
        }
    }

    fn fail(&mut self, error: Error) -> Result<()> {
        self.state = State::Failed(error.to_string());
        Err(error)
    }

    fn restore_failed(&mut self, msg: String) -> Error {
        let error = Error::SessionFailed(msg.clone());
        self.state = State::Failed(msg);
        error
    }

    fn clone_failed(&self) -> Error {
        match &self.state {
            State::Failed(msg) => Error::SessionFailed(msg.clone()),
            _ => unreachable!("clone_failed only called when state is Failed"),
        }
    }
}

fn block_count_for(reference_length: u64, block_size: u32) -> u64 {
    if reference_length == 0 {
        return 0;
    }
    reference_length.div_ceil(u64::from(block_size))
}
