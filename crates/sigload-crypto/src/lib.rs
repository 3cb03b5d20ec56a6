#![forbid(unsafe_code)]

//! Signing and verification capabilities for sigload.
//!
//! Keys are held in closed enums ([`SigningKey`], [`VerifyingKey`]) and
//! wrapped in a [`Signer`] or [`Verifier`] together with the
//! [`SignatureAlgorithm`] they apply.

pub mod algorithm;
pub mod key;
pub mod sign;

pub use algorithm::{HashAlgorithm, SignatureAlgorithm};
pub use key::{KeyAlgorithm, SigningKey, VerifyingKey};
pub use sign::{Signer, Verifier};
