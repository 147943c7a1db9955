use std::io;

/// Failures surfaced by the pure signature/delta/patch algorithms.
///
/// [`CoreError`] carries no notion of wire framing; callers that drive the
/// algorithms against a network transport are expected to translate
/// [`CoreError::Io`] and [`CoreError::InvalidBlockIndex`] into their own
/// protocol-level error taxonomy at the session boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A reader or writer supplied by the caller failed.
    #[error("I/O error on {context} stream: {source}")]
    Io {
        /// Which logical stream failed (`"reference"`, `"source"`, `"output"`).
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// An [`crate::Operation::Block`] named an index outside the signature.
    #[error("operation references block index {index} but signature has only {block_count} blocks")]
    InvalidBlockIndex {
        /// The out-of-range index carried by the operation.
        index: u64,
        /// Number of blocks present in the signature being replayed against.
        block_count: u64,
    },
}

impl CoreError {
    /// Wraps an I/O failure observed on a named logical stream.
    ///
    /// Exposed so callers outside this crate (wire-protocol or session
    /// façades) can report their own stream failures through the same
    /// variant instead of inventing a parallel error shape.
    #[must_use]
    pub fn io(context: &'static str, source: io::Error) -> Self {
        Self::Io { context, source }
    }
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, CoreError>;
