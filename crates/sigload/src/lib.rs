#![forbid(unsafe_code)]

pub use sigload_core as core;
pub use sigload_crypto as crypto;
pub use sigload_keys as keys;

pub use sigload_core::{Error, Result};
pub use sigload_crypto::{Signer, Verifier};
pub use sigload_keys::{
    load_private_key_from_file, load_private_key_from_string, load_public_key_from_file,
    load_public_key_from_string,
};
