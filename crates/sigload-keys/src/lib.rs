#![forbid(unsafe_code)]

//! Key loading for sigload.
//!
//! Reads PEM-encoded public and private keys (PKCS#1, PKCS#8 and
//! SubjectPublicKeyInfo) from files or strings and wraps them in a
//! [`Verifier`] or [`Signer`].

pub mod loader;
pub mod pem;

pub use loader::{
    load_private_key_from_file, load_private_key_from_string, load_public_key_from_file,
    load_public_key_from_string, parse_private_key, parse_public_key,
};
pub use pem::PemBlock;
pub use sigload_crypto::{Signer, Verifier};
