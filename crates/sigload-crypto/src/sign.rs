#![forbid(unsafe_code)]

//! The `Signer` and `Verifier` capabilities.

use sigload_core::Error;
use signature::SignatureEncoding;

use crate::algorithm::{HashAlgorithm, SignatureAlgorithm};
use crate::key::{KeyAlgorithm, SigningKey, VerifyingKey};

/// A private key bound to the signature scheme it signs with.
#[derive(Debug, Clone)]
pub struct Signer {
    key: SigningKey,
    algorithm: SignatureAlgorithm,
}

impl Signer {
    /// Wrap a key using its family's default scheme.
    pub fn new(key: SigningKey) -> Self {
        let algorithm = key.algorithm().default_signature_algorithm();
        Self { key, algorithm }
    }

    /// Switch to another scheme for the same key family.
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Result<Self, Error> {
        algorithm.check_key(self.key.algorithm())?;
        self.algorithm = algorithm;
        Ok(self)
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn key_algorithm(&self) -> KeyAlgorithm {
        self.key.algorithm()
    }

    pub fn key(&self) -> &SigningKey {
        &self.key
    }

    /// The verifier for this signer's public key, using the same scheme.
    pub fn verifier(&self) -> Verifier {
        Verifier {
            key: self.key.verifying_key(),
            algorithm: self.algorithm,
        }
    }

    /// Sign `data`.
    ///
    /// ECDSA signatures use the fixed-width `r || s` encoding. A key too
    /// small for the scheme (RSA-PSS with SHA-512 on a 1024-bit modulus, for
    /// instance) yields [`Error::Crypto`].
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        use signature::Signer as _;

        tracing::trace!(algorithm = %self.algorithm, len = data.len(), "signing");
        let result = match (&self.key, self.algorithm) {
            (SigningKey::Rsa(pk), SignatureAlgorithm::RsaPkcs1v15(hash)) => {
                rsa_pkcs1v15_sign(pk, hash, data)
            }
            (SigningKey::Rsa(pk), SignatureAlgorithm::RsaPss(hash)) => {
                rsa_pss_sign(pk, hash, data)
            }
            (SigningKey::EcP256(sk), SignatureAlgorithm::EcdsaP256Sha256) => sk
                .try_sign(data)
                .map(|sig: p256::ecdsa::Signature| sig.to_bytes().to_vec()),
            (SigningKey::EcP384(sk), SignatureAlgorithm::EcdsaP384Sha384) => sk
                .try_sign(data)
                .map(|sig: p384::ecdsa::Signature| sig.to_bytes().to_vec()),
            (SigningKey::Ed25519(sk), SignatureAlgorithm::Ed25519) => sk
                .try_sign(data)
                .map(|sig: ed25519_dalek::Signature| sig.to_bytes().to_vec()),
            (key, algorithm) => {
                return Err(Error::KeyMismatch(format!(
                    "{algorithm} cannot sign with {key:?}"
                )))
            }
        };
        result.map_err(|e| {
            tracing::debug!(algorithm = %self.algorithm, error = %e, "signing failed");
            Error::Crypto(format!("{}: {e}", self.algorithm))
        })
    }
}

/// A public key bound to the signature scheme it checks.
#[derive(Debug, Clone)]
pub struct Verifier {
    key: VerifyingKey,
    algorithm: SignatureAlgorithm,
}

impl Verifier {
    /// Wrap a key using its family's default scheme.
    pub fn new(key: VerifyingKey) -> Self {
        let algorithm = key.algorithm().default_signature_algorithm();
        Self { key, algorithm }
    }

    /// Switch to another scheme for the same key family.
    pub fn with_algorithm(mut self, algorithm: SignatureAlgorithm) -> Result<Self, Error> {
        algorithm.check_key(self.key.algorithm())?;
        self.algorithm = algorithm;
        Ok(self)
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    pub fn key_algorithm(&self) -> KeyAlgorithm {
        self.key.algorithm()
    }

    pub fn key(&self) -> &VerifyingKey {
        &self.key
    }

    /// Check `signature` over `data`.
    ///
    /// Malformed and non-matching signatures both yield
    /// [`Error::SignatureInvalid`].
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<(), Error> {
        use signature::Verifier as _;

        let outcome = match (&self.key, self.algorithm) {
            (VerifyingKey::Rsa(pk), SignatureAlgorithm::RsaPkcs1v15(hash)) => {
                rsa_pkcs1v15_verify(pk, hash, data, signature)
            }
            (VerifyingKey::Rsa(pk), SignatureAlgorithm::RsaPss(hash)) => {
                rsa_pss_verify(pk, hash, data, signature)
            }
            (VerifyingKey::EcP256(vk), SignatureAlgorithm::EcdsaP256Sha256) => {
                p256::ecdsa::Signature::from_slice(signature)
                    .and_then(|sig| vk.verify(data, &sig))
            }
            (VerifyingKey::EcP384(vk), SignatureAlgorithm::EcdsaP384Sha384) => {
                p384::ecdsa::Signature::from_slice(signature)
                    .and_then(|sig| vk.verify(data, &sig))
            }
            (VerifyingKey::Ed25519(vk), SignatureAlgorithm::Ed25519) => {
                ed25519_dalek::Signature::from_slice(signature)
                    .and_then(|sig| vk.verify(data, &sig))
            }
            (key, algorithm) => {
                return Err(Error::KeyMismatch(format!(
                    "{algorithm} cannot verify with {key:?}"
                )))
            }
        };

        outcome.map_err(|e| {
            tracing::debug!(algorithm = %self.algorithm, "signature rejected: {e}");
            Error::SignatureInvalid(format!("{}: {e}", self.algorithm))
        })
    }
}

// ── RSA helpers ──────────────────────────────────────────────────────

fn rsa_pkcs1v15_sign(
    private_key: &rsa::RsaPrivateKey,
    hash: HashAlgorithm,
    data: &[u8],
) -> Result<Vec<u8>, signature::Error> {
    use signature::Signer as _;
    macro_rules! do_sign {
        ($hasher:ty) => {{
            let sk = rsa::pkcs1v15::SigningKey::<$hasher>::new(private_key.clone());
            sk.try_sign(data).map(|sig| sig.to_vec())
        }};
    }
    match hash {
        HashAlgorithm::Sha256 => do_sign!(sha2::Sha256),
        HashAlgorithm::Sha384 => do_sign!(sha2::Sha384),
        HashAlgorithm::Sha512 => do_sign!(sha2::Sha512),
    }
}

fn rsa_pkcs1v15_verify(
    public_key: &rsa::RsaPublicKey,
    hash: HashAlgorithm,
    data: &[u8],
    sig_bytes: &[u8],
) -> Result<(), signature::Error> {
    use signature::Verifier as _;
    let sig = rsa::pkcs1v15::Signature::try_from(sig_bytes)?;
    macro_rules! do_verify {
        ($hasher:ty) => {{
            let vk = rsa::pkcs1v15::VerifyingKey::<$hasher>::new(public_key.clone());
            vk.verify(data, &sig)
        }};
    }
    match hash {
        HashAlgorithm::Sha256 => do_verify!(sha2::Sha256),
        HashAlgorithm::Sha384 => do_verify!(sha2::Sha384),
        HashAlgorithm::Sha512 => do_verify!(sha2::Sha512),
    }
}

fn rsa_pss_sign(
    private_key: &rsa::RsaPrivateKey,
    hash: HashAlgorithm,
    data: &[u8],
) -> Result<Vec<u8>, signature::Error> {
    use signature::RandomizedSigner as _;
    let mut rng = rand::thread_rng();
    macro_rules! do_sign {
        ($hasher:ty) => {{
            let sk = rsa::pss::SigningKey::<$hasher>::new(private_key.clone());
            sk.try_sign_with_rng(&mut rng, data).map(|sig| sig.to_vec())
        }};
    }
    match hash {
        HashAlgorithm::Sha256 => do_sign!(sha2::Sha256),
        HashAlgorithm::Sha384 => do_sign!(sha2::Sha384),
        HashAlgorithm::Sha512 => do_sign!(sha2::Sha512),
    }
}

fn rsa_pss_verify(
    public_key: &rsa::RsaPublicKey,
    hash: HashAlgorithm,
    data: &[u8],
    sig_bytes: &[u8],
) -> Result<(), signature::Error> {
    use signature::Verifier as _;
    let sig = rsa::pss::Signature::try_from(sig_bytes)?;
    macro_rules! do_verify {
        ($hasher:ty) => {{
            let vk = rsa::pss::VerifyingKey::<$hasher>::new(public_key.clone());
            vk.verify(data, &sig)
        }};
    }
    match hash {
        HashAlgorithm::Sha256 => do_verify!(sha2::Sha256),
        HashAlgorithm::Sha384 => do_verify!(sha2::Sha384),
        HashAlgorithm::Sha512 => do_verify!(sha2::Sha512),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &[u8] = b"the quick brown fox jumps over the lazy dog";

    fn p256_signer() -> Signer {
        let sk = p256::ecdsa::SigningKey::from_slice(&[0x11; 32]).unwrap();
        Signer::new(SigningKey::EcP256(sk))
    }

    fn p384_signer() -> Signer {
        let sk = p384::ecdsa::SigningKey::from_slice(&[0x22; 48]).unwrap();
        Signer::new(SigningKey::EcP384(sk))
    }

    fn ed25519_signer() -> Signer {
        let sk = ed25519_dalek::SigningKey::from_bytes(&[0x33; 32]);
        Signer::new(SigningKey::Ed25519(sk))
    }

    fn rsa_signer() -> Signer {
        use pkcs8::DecodePrivateKey;

        let pem = include_str!("../../../test-data/keys/rsa-2048-pkcs8.pem");
        let pk = rsa::RsaPrivateKey::from_pkcs8_pem(pem).unwrap();
        Signer::new(SigningKey::Rsa(pk))
    }

    fn flip_first_bit(sig: &[u8]) -> Vec<u8> {
        let mut out = sig.to_vec();
        out[0] ^= 0x01;
        out
    }

    #[test]
    fn test_ecdsa_p256_sign_verify() {
        let signer = p256_signer();
        assert_eq!(signer.algorithm(), SignatureAlgorithm::EcdsaP256Sha256);
        let sig = signer.sign(DATA).unwrap();
        assert_eq!(sig.len(), 64);

        let verifier = signer.verifier();
        verifier.verify(DATA, &sig).expect("valid P-256 signature");
        assert!(matches!(
            verifier.verify(b"other data", &sig),
            Err(Error::SignatureInvalid(_))
        ));
    }

    #[test]
    fn test_ecdsa_p256_is_deterministic() {
        let signer = p256_signer();
        assert_eq!(signer.sign(DATA).unwrap(), signer.sign(DATA).unwrap());
    }

    #[test]
    fn test_ecdsa_p384_sign_verify() {
        let signer = p384_signer();
        let sig = signer.sign(DATA).unwrap();
        assert_eq!(sig.len(), 96);
        signer.verifier().verify(DATA, &sig).expect("valid P-384 signature");
    }

    #[test]
    fn test_ed25519_sign_verify() {
        let signer = ed25519_signer();
        let sig = signer.sign(DATA).unwrap();
        assert_eq!(sig.len(), 64);

        let verifier = signer.verifier();
        verifier.verify(DATA, &sig).expect("valid Ed25519 signature");
        assert!(matches!(
            verifier.verify(DATA, &flip_first_bit(&sig)),
            Err(Error::SignatureInvalid(_))
        ));
    }

    #[test]
    fn test_malformed_signature_is_rejected() {
        let verifier = p256_signer().verifier();
        assert!(matches!(
            verifier.verify(DATA, &[0u8; 10]),
            Err(Error::SignatureInvalid(_))
        ));
        assert!(matches!(
            verifier.verify(DATA, &[]),
            Err(Error::SignatureInvalid(_))
        ));
    }

    #[test]
    fn test_with_algorithm_rejects_other_family() {
        let result = ed25519_signer().with_algorithm(SignatureAlgorithm::EcdsaP256Sha256);
        assert!(matches!(result, Err(Error::KeyMismatch(_))));

        let result = p256_signer()
            .verifier()
            .with_algorithm(SignatureAlgorithm::RsaPkcs1v15(HashAlgorithm::Sha256));
        assert!(matches!(result, Err(Error::KeyMismatch(_))));
    }

    #[test]
    fn test_signature_from_other_key_fails() {
        let sig = p256_signer().sign(DATA).unwrap();
        let other = p256::ecdsa::SigningKey::from_slice(&[0x44; 32]).unwrap();
        let verifier = Signer::new(SigningKey::EcP256(other)).verifier();
        assert!(matches!(
            verifier.verify(DATA, &sig),
            Err(Error::SignatureInvalid(_))
        ));
    }

    #[test]
    fn test_debug_does_not_print_key_material() {
        let signer = ed25519_signer();
        let debug = format!("{:?}", signer.key());
        assert_eq!(debug, "Ed25519 private key");
    }

    #[test]
    fn test_every_rsa_algorithm_signs_and_verifies() {
        let base = rsa_signer();
        let mut checked = 0;
        for name in sigload_core::algorithm::SIGNATURE_ALGORITHMS {
            let algorithm: SignatureAlgorithm = name.parse().unwrap();
            if algorithm.key_algorithm() != KeyAlgorithm::Rsa {
                continue;
            }
            let signer = base.clone().with_algorithm(algorithm).unwrap();
            let sig = signer
                .sign(DATA)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(sig.len(), 256, "{name}");

            let verifier = signer.verifier();
            assert_eq!(verifier.algorithm(), algorithm);
            verifier
                .verify(DATA, &sig)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(
                matches!(
                    verifier.verify(DATA, &flip_first_bit(&sig)),
                    Err(Error::SignatureInvalid(_))
                ),
                "{name}: altered signature accepted"
            );
            checked += 1;
        }
        assert_eq!(checked, 6);
    }

    #[test]
    fn test_rsa_key_too_small_for_scheme() {
        let pk = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let signer = Signer::new(SigningKey::Rsa(pk))
            .with_algorithm(SignatureAlgorithm::RsaPss(HashAlgorithm::Sha512))
            .unwrap();

        let err = signer.sign(DATA).unwrap_err();
        assert!(matches!(err, Error::Crypto(_)), "{err:?}");
        assert!(err.to_string().contains("rsa-pss-sha512"), "{err}");
    }

    #[test]
    fn test_signer_and_verifier_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Signer>();
        assert_send_sync::<Verifier>();
    }
}
