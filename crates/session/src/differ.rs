use std::io::{self, Read};

use checksums::strong::strategy::ChecksumAlgorithmKind;
use protocol::{FrameDecoder, SignatureHeader, encode_end, encode_operation};
use rsync_core::BlockHash;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::{Error, Result};
use crate::strategy::strategy_for;

enum State {
    NeedSig {
        decoder: FrameDecoder,
        header: Option<SignatureHeader>,
        hashes: Vec<BlockHash>,
    },
    Ready {
        algorithm: ChecksumAlgorithmKind,
        block_size: u32,
        hashes: Vec<BlockHash>,
    },
    Done,
    Failed(String),
}

/// Consumes signature bytes, then streams delta bytes for a modified source
/// stream.
///
/// `Differ` starts in `NeedSig`: feed it signature wire bytes via
/// [`Differ::add_signature_data`] until it reaches `END`, at which point it
/// moves to `Ready`. [`Differ::create_delta`] scans a source stream against
/// the accumulated signature and pushes encoded delta frames — including the
/// trailing `END` — into the caller's sink, then moves to the terminal
/// `Done` state. Any error moves the session to a terminal failed state;
/// every later call returns [`Error::SessionFailed`] instead of doing
/// anything.
pub struct Differ {
    state: State,
}

impl Default for Differ {
    fn default() -> Self {
        Self::new()
    }
}

impl Differ {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::NeedSig {
                decoder: FrameDecoder::new(),
                header: None,
                hashes: Vec::new(),
            },
        }
    }

    /// Feeds a chunk of signature wire bytes. May be called any number of
    /// times with arbitrarily sized chunks; completes zero or more
    /// `BLOCK_HASH` frames internally and transitions to `Ready` once `END`
    /// is observed.
    #[cfg_attr(feature = "tracing", instrument(skip(self, chunk), fields(len = chunk.len())))]
    pub fn add_signature_data(&mut self, chunk: &[u8]) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Failed(String::new()));
        let (mut decoder, mut header, mut hashes) = match state {
            State::NeedSig {
                decoder,
                header,
                hashes,
            } => (decoder, header, hashes),
            State::Ready { .. } | State::Done => {
                return self.fail(Error::Usage(
                    "add_signature_data called after the signature stream already completed",
                ));
            }
            State::Failed(msg) => return Err(self.restore_failed(msg)),
        };

        let frames = match decoder.feed(chunk) {
            Ok(frames) => frames,
            Err(e) => return self.fail(Error::Protocol(e)),
        };

        for frame in frames {
            match frame {
                protocol::Frame::SignatureHeader(h) => {
                    if header.is_some() {
                        return self.fail(Error::Usage("duplicate SIGNATURE_HEADER frame"));
                    }
                    header = Some(h);
                }
                protocol::Frame::BlockHash(hash) => {
                    hashes.push(hash);
                }
                protocol::Frame::End => {
                    let Some(header) = header else {
                        return self.fail(Error::Usage("signature stream ended before a header"));
                    };
                    self.state = State::Ready {
                        algorithm: header.algorithm,
                        block_size: header.block_size,
                        hashes,
                    };
                    return Ok(());
                }
                protocol::Frame::BlockOp { .. } | protocol::Frame::DataOp { .. } => {
                    return self.fail(Error::Usage("unexpected operation frame in signature stream"));
                }
            }
        }

        self.state = State::NeedSig {
            decoder,
            header,
            hashes,
        };
        Ok(())
    }

    /// Scans `source` against the received signature and streams the delta
    /// program, including the trailing `END`, into `sink`. Requires `Ready`;
    /// moves to `Done` on success.
    #[cfg_attr(feature = "tracing", instrument(skip(self, source, sink)))]
    pub fn create_delta<S: Read>(
        &mut self,
        source: S,
        mut sink: impl FnMut(&[u8]) -> io::Result<()>,
    ) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Failed(String::new()));
        let (algorithm, block_size, hashes) = match state {
            State::Ready {
                algorithm,
                block_size,
                hashes,
            } => (algorithm, block_size, hashes),
            State::NeedSig { .. } => {
                return self.fail(Error::Usage("create_delta called before the signature reached END"));
            }
            State::Done => return self.fail(Error::Usage("create_delta called twice")),
            State::Failed(msg) => return Err(self.restore_failed(msg)),
        };

        let strategy = strategy_for(algorithm);
        let mut io_err: Option<io::Error> = None;
        let mut buf = Vec::new();

        let result = rsync_core::generate_delta(source, block_size, &hashes, strategy.as_ref(), |op| {
            if io_err.is_some() {
                return;
            }
            buf.clear();
            if let Err(e) = encode_operation(&mut buf, &op) {
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
            return self.fail(Error::Core(rsync_core::CoreError::io("source", e)));
        }

        buf.clear();
        if let Err(e) = encode_end(&mut buf) {
            return self.fail(Error::Core(rsync_core::CoreError::io("source", e)));
        }
        if let Err(e) = sink(&buf) {
            return self.fail(Error::Core(rsync_core::CoreError::io("source", e)));
        }

        self.state = State::Done;
        #[cfg(feature = "tracing")]
        tracing::debug!("delta stream complete");
        Ok(())
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
}
