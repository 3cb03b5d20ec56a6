#![forbid(unsafe_code)]

//! PEM labels and signature algorithm names.
//!
//! The labels are the RFC 7468 / OpenSSL strings found between the
//! `-----BEGIN` and `-----END` markers. The algorithm names are the
//! identifiers accepted on the command line.

// ── PEM labels ───────────────────────────────────────────────────────

pub const LABEL_PUBLIC_KEY: &str = "PUBLIC KEY";
pub const LABEL_RSA_PUBLIC_KEY: &str = "RSA PUBLIC KEY";
pub const LABEL_PRIVATE_KEY: &str = "PRIVATE KEY";
pub const LABEL_RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";

/// Labels accepted by the public key loaders.
pub const PUBLIC_KEY_LABELS: &[&str] = &[LABEL_PUBLIC_KEY, LABEL_RSA_PUBLIC_KEY];

/// Labels accepted by the private key loaders.
pub const PRIVATE_KEY_LABELS: &[&str] = &[LABEL_PRIVATE_KEY, LABEL_RSA_PRIVATE_KEY];

// ── RSA PKCS#1 v1.5 ──────────────────────────────────────────────────

pub const RSA_SHA256: &str = "rsa-sha256";
pub const RSA_SHA384: &str = "rsa-sha384";
pub const RSA_SHA512: &str = "rsa-sha512";

// ── RSA-PSS ──────────────────────────────────────────────────────────

pub const RSA_PSS_SHA256: &str = "rsa-pss-sha256";
pub const RSA_PSS_SHA384: &str = "rsa-pss-sha384";
pub const RSA_PSS_SHA512: &str = "rsa-pss-sha512";

// ── ECDSA ────────────────────────────────────────────────────────────

pub const ECDSA_P256_SHA256: &str = "ecdsa-p256-sha256";
pub const ECDSA_P384_SHA384: &str = "ecdsa-p384-sha384";

// ── EdDSA ────────────────────────────────────────────────────────────

pub const ED25519: &str = "ed25519";

/// Every signature algorithm name, in display order.
pub const SIGNATURE_ALGORITHMS: &[&str] = &[
    RSA_SHA256,
    RSA_SHA384,
    RSA_SHA512,
    RSA_PSS_SHA256,
    RSA_PSS_SHA384,
    RSA_PSS_SHA512,
    ECDSA_P256_SHA256,
    ECDSA_P384_SHA384,
    ED25519,
];
