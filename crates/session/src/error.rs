/// Failures surfaced by the `Differ`/`Patcher` façade.
///
/// Mirrors the three-way taxonomy: malformed wire data surfaces as
/// [`Error::Protocol`], reader/writer failures and core invariant
/// violations as [`Error::Core`], and API misuse as [`Error::Usage`]. The
/// first error of any kind moves the owning session to its terminal error
/// state; every call made afterwards returns [`Error::SessionFailed`]
/// instead of re-running anything, so no call after the first failure has a
/// side effect.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The wire codec rejected a frame.
    #[error(transparent)]
    Protocol(#[from] protocol::ProtocolError),

    /// The pure signature/delta/patch algorithms rejected an operation.
    #[error(transparent)]
    Core(#[from] rsync_core::CoreError),

    /// The caller invoked a method that isn't valid for the session's
    /// current state.
    #[error("usage error: {0}")]
    Usage(&'static str),

    /// A previous call already failed; the session is terminated.
    #[error("session already failed: {0}")]
    SessionFailed(String),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;
