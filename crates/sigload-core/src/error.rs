#![forbid(unsafe_code)]

use std::path::PathBuf;

/// Errors produced while loading keys or using them to sign and verify.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("format error: {0}")]
    Format(String),

    #[error("unsupported key type {0:?}")]
    UnsupportedKeyType(String),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("key mismatch: {0}")]
    KeyMismatch(String),

    #[error("signature verification failed: {0}")]
    SignatureInvalid(String),

    #[error("cryptographic error: {0}")]
    Crypto(String),
}

impl Error {
    /// The error returned when the input holds no decodable PEM block.
    pub fn no_key_found() -> Self {
        Self::Format("no key found".into())
    }

    /// Wrap an I/O failure together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Structural decode failures, passed through from the RustCrypto decoders.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Pkcs1(#[from] pkcs1::Error),

    #[error(transparent)]
    Pkcs8(#[from] pkcs8::Error),

    #[error(transparent)]
    Spki(#[from] spki::Error),
}

impl From<pkcs1::Error> for Error {
    fn from(e: pkcs1::Error) -> Self {
        Self::Decode(e.into())
    }
}

impl From<pkcs8::Error> for Error {
    fn from(e: pkcs8::Error) -> Self {
        Self::Decode(e.into())
    }
}

impl From<spki::Error> for Error {
    fn from(e: spki::Error) -> Self {
        Self::Decode(e.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
