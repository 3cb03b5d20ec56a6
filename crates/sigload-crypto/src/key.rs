#![forbid(unsafe_code)]

//! Key material, one variant per supported key family.

use crate::algorithm::SignatureAlgorithm;

/// The family a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    EcP256,
    EcP384,
    Ed25519,
}

impl KeyAlgorithm {
    /// Human-readable name, e.g. `"EC P-256"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::EcP256 => "EC P-256",
            Self::EcP384 => "EC P-384",
            Self::Ed25519 => "Ed25519",
        }
    }

    /// The signature algorithm a freshly loaded key of this family uses.
    pub fn default_signature_algorithm(self) -> SignatureAlgorithm {
        match self {
            Self::Rsa => SignatureAlgorithm::RsaPkcs1v15(crate::HashAlgorithm::Sha256),
            Self::EcP256 => SignatureAlgorithm::EcdsaP256Sha256,
            Self::EcP384 => SignatureAlgorithm::EcdsaP384Sha384,
            Self::Ed25519 => SignatureAlgorithm::Ed25519,
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A private key able to produce signatures.
#[derive(Clone)]
pub enum SigningKey {
    Rsa(rsa::RsaPrivateKey),
    EcP256(p256::ecdsa::SigningKey),
    EcP384(p384::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

impl SigningKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::EcP256(_) => KeyAlgorithm::EcP256,
            Self::EcP384(_) => KeyAlgorithm::EcP384,
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }

    /// Derive the matching public key.
    pub fn verifying_key(&self) -> VerifyingKey {
        match self {
            Self::Rsa(pk) => VerifyingKey::Rsa(pk.to_public_key()),
            Self::EcP256(sk) => VerifyingKey::EcP256(*sk.verifying_key()),
            Self::EcP384(sk) => VerifyingKey::EcP384(*sk.verifying_key()),
            Self::Ed25519(sk) => VerifyingKey::Ed25519(sk.verifying_key()),
        }
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} private key", self.algorithm())
    }
}

/// A public key able to check signatures.
#[derive(Clone)]
pub enum VerifyingKey {
    Rsa(rsa::RsaPublicKey),
    EcP256(p256::ecdsa::VerifyingKey),
    EcP384(p384::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl VerifyingKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Rsa(_) => KeyAlgorithm::Rsa,
            Self::EcP256(_) => KeyAlgorithm::EcP256,
            Self::EcP384(_) => KeyAlgorithm::EcP384,
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
        }
    }
}

impl std::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rsa(pk) => {
                use rsa::traits::PublicKeyParts;
                write!(f, "RSA public key ({} bits)", pk.size() * 8)
            }
            other => write!(f, "{} public key", other.algorithm()),
        }
    }
}
