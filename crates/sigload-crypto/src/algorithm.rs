#![forbid(unsafe_code)]

//! Signature algorithm selection.

use sigload_core::{algorithm, Error};

use crate::key::KeyAlgorithm;

/// Digest used by the RSA schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

/// A signature scheme, tied to the key family that can use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    RsaPkcs1v15(HashAlgorithm),
    RsaPss(HashAlgorithm),
    EcdsaP256Sha256,
    EcdsaP384Sha384,
    Ed25519,
}

impl SignatureAlgorithm {
    /// Look up an algorithm by its short name (see [`algorithm::SIGNATURE_ALGORITHMS`]).
    pub fn from_name(name: &str) -> Result<Self, Error> {
        use HashAlgorithm::{Sha256, Sha384, Sha512};
        match name {
            algorithm::RSA_SHA256 => Ok(Self::RsaPkcs1v15(Sha256)),
            algorithm::RSA_SHA384 => Ok(Self::RsaPkcs1v15(Sha384)),
            algorithm::RSA_SHA512 => Ok(Self::RsaPkcs1v15(Sha512)),
            algorithm::RSA_PSS_SHA256 => Ok(Self::RsaPss(Sha256)),
            algorithm::RSA_PSS_SHA384 => Ok(Self::RsaPss(Sha384)),
            algorithm::RSA_PSS_SHA512 => Ok(Self::RsaPss(Sha512)),
            algorithm::ECDSA_P256_SHA256 => Ok(Self::EcdsaP256Sha256),
            algorithm::ECDSA_P384_SHA384 => Ok(Self::EcdsaP384Sha384),
            algorithm::ED25519 => Ok(Self::Ed25519),
            _ => Err(Error::UnsupportedAlgorithm(format!(
                "signature algorithm: {name}"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        use HashAlgorithm::{Sha256, Sha384, Sha512};
        match self {
            Self::RsaPkcs1v15(Sha256) => algorithm::RSA_SHA256,
            Self::RsaPkcs1v15(Sha384) => algorithm::RSA_SHA384,
            Self::RsaPkcs1v15(Sha512) => algorithm::RSA_SHA512,
            Self::RsaPss(Sha256) => algorithm::RSA_PSS_SHA256,
            Self::RsaPss(Sha384) => algorithm::RSA_PSS_SHA384,
            Self::RsaPss(Sha512) => algorithm::RSA_PSS_SHA512,
            Self::EcdsaP256Sha256 => algorithm::ECDSA_P256_SHA256,
            Self::EcdsaP384Sha384 => algorithm::ECDSA_P384_SHA384,
            Self::Ed25519 => algorithm::ED25519,
        }
    }

    /// The key family this scheme requires.
    pub fn key_algorithm(self) -> KeyAlgorithm {
        match self {
            Self::RsaPkcs1v15(_) | Self::RsaPss(_) => KeyAlgorithm::Rsa,
            Self::EcdsaP256Sha256 => KeyAlgorithm::EcP256,
            Self::EcdsaP384Sha384 => KeyAlgorithm::EcP384,
            Self::Ed25519 => KeyAlgorithm::Ed25519,
        }
    }

    /// Fail unless this scheme can be used with a key of family `key`.
    pub fn check_key(self, key: KeyAlgorithm) -> Result<(), Error> {
        if self.key_algorithm() == key {
            Ok(())
        } else {
            Err(Error::KeyMismatch(format!(
                "{} needs a key of type {}, got {key}",
                self.name(),
                self.key_algorithm()
            )))
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SignatureAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
