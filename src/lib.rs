#![deny(unsafe_code)]

//! Binary delta synchronisation engine.
//!
//! Composes four layers, leaf first: [`checksums`] (rolling and strong
//! hashes), [`rsync_core`] (pure signature/delta/patch algorithms),
//! [`protocol`] (the chunk-safe framed wire codec), and [`session`] (the
//! stateful [`Differ`]/[`Patcher`] façade most callers actually drive). This
//! crate re-exports the pieces a caller needs without reaching into the
//! individual layers directly, plus [`build_signature`] for callers that
//! want a one-shot signature without holding a [`Patcher`] open.

use std::io::{self, Read};

use checksums::strong::strategy::ChecksumAlgorithmKind;

pub use protocol::ProtocolError;
pub use rsync_core::{BlockHash, CoreError, Operation};
pub use session::{Differ, Error, Patcher, Result};

/// Builds a signature for `reference` and streams it, framed, into `sink`.
///
/// `reference_length` is the stream's length if known; pass `0` when it
/// isn't (the signature header carries it verbatim, as an advisory value
/// only — nothing downstream depends on it being accurate). `block_size_hint`
/// overrides the length-derived block size computed by
/// [`rsync_core::block_size_for_length`]; omit it to let the reference
/// length pick the size.
///
/// This is the stateless entry point for producing a signature outside a
/// [`Patcher`] session; `Patcher::create_signature` is the equivalent call
/// once a patching session is already open.
pub fn build_signature(
    reference: impl Read,
    reference_length: u64,
    block_size_hint: Option<u32>,
    algorithm: ChecksumAlgorithmKind,
    mut sink: impl FnMut(&[u8]) -> io::Result<()>,
) -> Result<()> {
    let block_size = block_size_hint.unwrap_or_else(|| rsync_core::block_size_for_length(reference_length));
    let strategy = session::strategy_for(algorithm);
    let header = protocol::SignatureHeader::new(algorithm, block_size, reference_length);

    let mut buf = Vec::new();
    protocol::encode_signature_header(&mut buf, &header).map_err(|e| core_io_error("signature", e))?;
    sink(&buf).map_err(|e| core_io_error("signature", e))?;

    let mut io_err = None;
    let total = rsync_core::generate_signature(reference, block_size, strategy.as_ref(), |hash| {
        if io_err.is_some() {
            return;
        }
        buf.clear();
        if let Err(e) = protocol::encode_block_hash(&mut buf, &hash) {
            io_err = Some(e);
            return;
        }
        if let Err(e) = sink(&buf) {
            io_err = Some(e);
        }
    });
    let _ = total.map_err(Error::Core)?;
    if let Some(e) = io_err {
        return Err(core_io_error("signature", e));
    }

    buf.clear();
    protocol::encode_end(&mut buf).map_err(|e| core_io_error("signature", e))?;
    sink(&buf).map_err(|e| core_io_error("signature", e))?;
    Ok(())
}

fn core_io_error(context: &'static str, source: io::Error) -> Error {
    Error::Core(CoreError::io(context, source))
}
