#![forbid(unsafe_code)]

//! Loading PEM-encoded keys into `Signer` / `Verifier` capabilities.
//!
//! The PEM label selects the decoder:
//!
//! | Label             | Structure                   | Produces   |
//! |-------------------|-----------------------------|------------|
//! | `PUBLIC KEY`      | SubjectPublicKeyInfo        | `Verifier` |
//! | `RSA PUBLIC KEY`  | PKCS#1 `RSAPublicKey`       | `Verifier` |
//! | `PRIVATE KEY`     | PKCS#8 `PrivateKeyInfo`     | `Signer`   |
//! | `RSA PRIVATE KEY` | PKCS#1 `RSAPrivateKey`      | `Signer`   |

use std::path::Path;

use const_oid::db::{rfc5912, rfc8410};
use sigload_core::algorithm::{
    LABEL_PRIVATE_KEY, LABEL_PUBLIC_KEY, LABEL_RSA_PRIVATE_KEY, LABEL_RSA_PUBLIC_KEY,
};
use sigload_core::Error;
use sigload_crypto::{KeyAlgorithm, Signer, SigningKey, Verifier, VerifyingKey};
use spki::AlgorithmIdentifierRef;

use crate::pem;

/// Load a public key from a PEM file.
pub fn load_public_key_from_file(path: impl AsRef<Path>) -> Result<Verifier, Error> {
    let data = read_key_file(path.as_ref())?;
    parse_public_key(&data)
}

/// Load a public key from PEM text.
pub fn load_public_key_from_string(key: &str) -> Result<Verifier, Error> {
    parse_public_key(key.as_bytes())
}

/// Load a private key from a PEM file.
pub fn load_private_key_from_file(path: impl AsRef<Path>) -> Result<Signer, Error> {
    let data = read_key_file(path.as_ref())?;
    parse_private_key(&data)
}

/// Load a private key from PEM text.
pub fn load_private_key_from_string(key: &str) -> Result<Signer, Error> {
    parse_private_key(key.as_bytes())
}

/// Parse the first PEM block in `pem_data` as a public key.
pub fn parse_public_key(pem_data: &[u8]) -> Result<Verifier, Error> {
    let block = pem::decode_first_block(pem_data).ok_or_else(Error::no_key_found)?;
    tracing::debug!(label = %block.label, len = block.der.len(), "decoded PEM block");

    let key = match block.label.as_str() {
        LABEL_PUBLIC_KEY => decode_spki_der(&block.der)?,
        LABEL_RSA_PUBLIC_KEY => {
            use pkcs1::DecodeRsaPublicKey;
            VerifyingKey::Rsa(rsa::RsaPublicKey::from_pkcs1_der(&block.der)?)
        }
        other => return Err(Error::UnsupportedKeyType(other.to_owned())),
    };

    tracing::debug!(algorithm = %key.algorithm(), "loaded public key");
    Ok(Verifier::new(key))
}

/// Parse the first PEM block in `pem_data` as a private key.
pub fn parse_private_key(pem_data: &[u8]) -> Result<Signer, Error> {
    let block = pem::decode_first_block(pem_data).ok_or_else(Error::no_key_found)?;
    tracing::debug!(label = %block.label, len = block.der.len(), "decoded PEM block");

    let key = match block.label.as_str() {
        LABEL_RSA_PRIVATE_KEY => {
            use pkcs1::DecodeRsaPrivateKey;
            SigningKey::Rsa(rsa::RsaPrivateKey::from_pkcs1_der(&block.der)?)
        }
        LABEL_PRIVATE_KEY => decode_pkcs8_der(&block.der)?,
        other => return Err(Error::UnsupportedKeyType(other.to_owned())),
    };

    tracing::debug!(algorithm = %key.algorithm(), "loaded private key");
    Ok(Signer::new(key))
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| Error::io(path, e))
}

/// Decode a SubjectPublicKeyInfo, dispatching on its algorithm OID.
fn decode_spki_der(der: &[u8]) -> Result<VerifyingKey, Error> {
    use spki::DecodePublicKey;

    let info = spki::SubjectPublicKeyInfoRef::try_from(der)?;
    let key = match key_algorithm(&info.algorithm)? {
        KeyAlgorithm::Rsa => VerifyingKey::Rsa(rsa::RsaPublicKey::from_public_key_der(der)?),
        KeyAlgorithm::EcP256 => {
            VerifyingKey::EcP256(p256::ecdsa::VerifyingKey::from_public_key_der(der)?)
        }
        KeyAlgorithm::EcP384 => {
            VerifyingKey::EcP384(p384::ecdsa::VerifyingKey::from_public_key_der(der)?)
        }
        KeyAlgorithm::Ed25519 => {
            VerifyingKey::Ed25519(ed25519_dalek::VerifyingKey::from_public_key_der(der)?)
        }
    };
    Ok(key)
}

/// Decode a PKCS#8 PrivateKeyInfo, dispatching on its algorithm OID.
fn decode_pkcs8_der(der: &[u8]) -> Result<SigningKey, Error> {
    use pkcs8::DecodePrivateKey;

    let info = pkcs8::PrivateKeyInfo::try_from(der)?;
    let key = match key_algorithm(&info.algorithm)? {
        KeyAlgorithm::Rsa => SigningKey::Rsa(rsa::RsaPrivateKey::from_pkcs8_der(der)?),
        KeyAlgorithm::EcP256 => {
            SigningKey::EcP256(p256::ecdsa::SigningKey::from_pkcs8_der(der)?)
        }
        KeyAlgorithm::EcP384 => {
            SigningKey::EcP384(p384::ecdsa::SigningKey::from_pkcs8_der(der)?)
        }
        KeyAlgorithm::Ed25519 => {
            SigningKey::Ed25519(ed25519_dalek::SigningKey::from_pkcs8_der(der)?)
        }
    };
    Ok(key)
}

/// Map an algorithm identifier (and, for EC keys, its named curve) onto a
/// supported key family.
fn key_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<KeyAlgorithm, Error> {
    let oid = algorithm.oid;

    if oid == rfc5912::RSA_ENCRYPTION {
        return Ok(KeyAlgorithm::Rsa);
    }

    if oid == rfc8410::ID_ED_25519 {
        return Ok(KeyAlgorithm::Ed25519);
    }

    if oid == rfc5912::ID_EC_PUBLIC_KEY {
        let curve = algorithm.parameters_oid()?;
        if curve == rfc5912::SECP_256_R_1 {
            return Ok(KeyAlgorithm::EcP256);
        }
        if curve == rfc5912::SECP_384_R_1 {
            return Ok(KeyAlgorithm::EcP384);
        }
        return Err(Error::UnsupportedAlgorithm(format!("EC curve OID {curve}")));
    }

    Err(Error::UnsupportedAlgorithm(format!("key algorithm OID {oid}")))
}
