//! Error type.

use core::fmt;

/// Errors surfaced by key handling and the KEM.
///
/// All preconditions are checked before any secret-dependent computation;
/// no error ever depends on secret data, and decapsulation in particular
/// never signals whether a ciphertext was valid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// An imported or processed byte string has the wrong length.
    InvalidInputLength,
    /// The private/public key pair is not usable together (same side of the
    /// exchange, or wrong variant pairing).
    IncompatibleKeys,
    /// The random number generator returned an error or a short read.
    RngFailure,
    /// The operation requires a key of a different variant.
    WrongKeyType,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidInputLength => "invalid input length",
            Error::IncompatibleKeys => "incompatible keys",
            Error::RngFailure => "random number generator failure",
            Error::WrongKeyType => "wrong key type for operation",
        })
    }
}

impl core::error::Error for Error {}
