//! Error types returned by this crate.

/// Result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while running the SPAKE2+ protocol.
///
/// None of these are recoverable by retrying the same operation; the
/// caller must start a new session (or, for [`Error::VerificationFailed`],
/// treat the password/identity as wrong and ask the human to retry).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A wire value (scalar or element) had the wrong length or did not
    /// decode to a point on the curve.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// A peer's public share reduced to the identity after cofactor
    /// clearing, indicating a low-order point was submitted.
    #[error("small-subgroup element rejected")]
    SmallSubgroup,

    /// A verifier record fetched from the store did not decode to a
    /// valid (scalar, element) pair.
    #[error("invalid verifier record")]
    InvalidRecord,

    /// A MAC confirmation tag did not match. This is the only
    /// user-visible failure for a wrong password, client identity, or
    /// server identity; the protocol offers no finer-grained signal.
    #[error("key confirmation failed")]
    VerificationFailed,

    /// The host platform's RNG failed to produce randomness.
    #[error("randomness source failed")]
    RandomnessFailure,

    /// The configured memory-hard function rejected its parameters or
    /// failed to produce output.
    #[error("memory-hard function failed")]
    MhfFailure,
}

impl From<GroupError> for Error {
    fn from(_: GroupError) -> Self {
        Error::InvalidEncoding
    }
}

/// Internal decoding error surfaced by [`crate::group::Group`]
/// implementations before being folded into [`Error::InvalidEncoding`].
#[derive(Debug, thiserror::Error)]
#[error("group element or scalar failed to decode")]
pub struct GroupError;
