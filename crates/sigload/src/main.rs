#![forbid(unsafe_code)]

//! sigload CLI: sign and verify files with PEM-encoded keys.

use base64::Engine;
use clap::{Parser, Subcommand};
use sigload::core::algorithm;
use sigload::crypto::SignatureAlgorithm;
use sigload::Error;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sigload",
    about = "Sign and verify data with PEM-encoded RSA, ECDSA and Ed25519 keys",
    version
)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a file with a private key
    Sign {
        /// File to sign
        input: PathBuf,

        /// Private key (PEM: PRIVATE KEY or RSA PRIVATE KEY)
        #[arg(short = 'k', long)]
        key: PathBuf,

        /// Signature algorithm (default depends on the key type)
        #[arg(short, long)]
        algorithm: Option<SignatureAlgorithm>,

        /// Output file for the base64 signature (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a file against a base64 signature
    Verify {
        /// File that was signed
        input: PathBuf,

        /// Public key (PEM: PUBLIC KEY or RSA PUBLIC KEY)
        #[arg(short = 'k', long)]
        key: PathBuf,

        /// File holding the base64 signature
        #[arg(short, long)]
        signature: PathBuf,

        /// Signature algorithm (default depends on the key type)
        #[arg(short, long)]
        algorithm: Option<SignatureAlgorithm>,
    },

    /// Show the type of a PEM key file
    Inspect {
        /// PEM key file (public or private)
        key: PathBuf,
    },

    /// List supported key formats and signature algorithms
    Info,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Sign {
            input,
            key,
            algorithm,
            output,
        } => cmd_sign(&input, &key, algorithm, output),

        Commands::Verify {
            input,
            key,
            signature,
            algorithm,
        } => match cmd_verify(&input, &key, &signature, algorithm) {
            Err(Error::SignatureInvalid(reason)) => {
                eprintln!("INVALID: {reason}");
                process::exit(1);
            }
            other => other,
        },

        Commands::Inspect { key } => cmd_inspect(&key).map(|summary| println!("{summary}")),

        Commands::Info => {
            cmd_info();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_sign(
    input: &Path,
    key: &Path,
    algorithm: Option<SignatureAlgorithm>,
    output: Option<PathBuf>,
) -> Result<(), Error> {
    let mut signer = sigload::load_private_key_from_file(key)?;
    if let Some(alg) = algorithm {
        signer = signer.with_algorithm(alg)?;
    }
    tracing::info!(
        key = %key.display(),
        algorithm = %signer.algorithm(),
        "signing {}",
        input.display()
    );

    let data = read_file(input)?;
    let signature = signer.sign(&data)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(signature);
    write_output(output, format!("{encoded}\n").as_bytes())
}

fn cmd_verify(
    input: &Path,
    key: &Path,
    signature: &Path,
    algorithm: Option<SignatureAlgorithm>,
) -> Result<(), Error> {
    let mut verifier = sigload::load_public_key_from_file(key)?;
    if let Some(alg) = algorithm {
        verifier = verifier.with_algorithm(alg)?;
    }
    tracing::info!(
        key = %key.display(),
        algorithm = %verifier.algorithm(),
        "verifying {}",
        input.display()
    );

    let data = read_file(input)?;
    let encoded = read_file(signature)?;
    let sig = decode_signature(&encoded)?;
    verifier.verify(&data, &sig)?;
    println!("OK");
    Ok(())
}

fn cmd_inspect(key: &Path) -> Result<String, Error> {
    let data = read_file(key)?;
    match sigload::keys::parse_public_key(&data) {
        Ok(verifier) => Ok(format!(
            "{} public key, signs with {}",
            verifier.key_algorithm(),
            verifier.algorithm()
        )),
        Err(Error::UnsupportedKeyType(_)) => {
            let signer = sigload::keys::parse_private_key(&data)?;
            Ok(format!(
                "{} private key, signs with {}",
                signer.key_algorithm(),
                signer.algorithm()
            ))
        }
        Err(e) => Err(e),
    }
}

fn cmd_info() {
    println!("sigload: PEM key loading, signing and verification");
    println!();
    println!("Public key PEM labels:");
    for label in algorithm::PUBLIC_KEY_LABELS {
        println!("  {label}");
    }
    println!();
    println!("Private key PEM labels:");
    for label in algorithm::PRIVATE_KEY_LABELS {
        println!("  {label}");
    }
    println!();
    println!("Key types:");
    println!("  RSA, EC P-256, EC P-384, Ed25519");
    println!();
    println!("Signature algorithms:");
    for name in algorithm::SIGNATURE_ALGORITHMS {
        println!("  {name}");
    }
}

// ── Utility functions ────────────────────────────────────────────────

fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| Error::io(path, e))
}

fn decode_signature(encoded: &[u8]) -> Result<Vec<u8>, Error> {
    let text: Vec<u8> = encoded
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(text)
        .map_err(|e| Error::Format(format!("signature is not valid base64: {e}")))
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), Error> {
    match path {
        Some(p) => std::fs::write(&p, data).map_err(|e| Error::io(p, e)),
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(data)
                .map_err(|e| Error::io("<stdout>", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../test-data/keys")
            .join(name)
    }

    fn message_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-data/message.txt")
    }

    #[test]
    fn test_sign_then_verify() {
        let dir = tempfile::tempdir().unwrap();
        let sig_path = dir.path().join("message.sig");

        cmd_sign(
            &message_path(),
            &key_path("ec-p256-pkcs8.pem"),
            None,
            Some(sig_path.clone()),
        )
        .expect("sign");

        let written = std::fs::read_to_string(&sig_path).unwrap();
        assert!(written.ends_with('\n'));

        cmd_verify(
            &message_path(),
            &key_path("ec-p256-spki.pem"),
            &sig_path,
            None,
        )
        .expect("verify");
    }

    #[test]
    fn test_verify_rejects_other_data() {
        let dir = tempfile::tempdir().unwrap();
        let sig_path = dir.path().join("message.sig");
        let other = dir.path().join("other.txt");
        std::fs::write(&other, b"not the signed message").unwrap();

        cmd_sign(
            &message_path(),
            &key_path("rsa-2048-pkcs1.pem"),
            Some(SignatureAlgorithm::from_name(algorithm::RSA_PSS_SHA256).unwrap()),
            Some(sig_path.clone()),
        )
        .unwrap();

        let result = cmd_verify(
            &other,
            &key_path("rsa-2048-spki.pem"),
            &sig_path,
            Some(SignatureAlgorithm::from_name(algorithm::RSA_PSS_SHA256).unwrap()),
        );
        assert!(matches!(result, Err(Error::SignatureInvalid(_))));
    }

    #[test]
    fn test_algorithm_for_wrong_key_type() {
        let result = cmd_sign(
            &message_path(),
            &key_path("ed25519-pkcs8.pem"),
            Some(SignatureAlgorithm::from_name(algorithm::ECDSA_P384_SHA384).unwrap()),
            None,
        );
        assert!(matches!(result, Err(Error::KeyMismatch(_))));
    }

    #[test]
    fn test_decode_signature_ignores_whitespace() {
        let sig = decode_signature(b"  AAEC\r\nAw==\n").unwrap();
        assert_eq!(sig, vec![0, 1, 2, 3]);
        assert!(matches!(decode_signature(b"***"), Err(Error::Format(_))));
    }

    #[test]
    fn test_inspect() {
        let summary = cmd_inspect(&key_path("rsa-2048-pkcs1-pub.pem")).unwrap();
        assert_eq!(summary, "RSA public key, signs with rsa-sha256");

        let summary = cmd_inspect(&key_path("ec-p384-pkcs8.pem")).unwrap();
        assert_eq!(summary, "EC P-384 private key, signs with ecdsa-p384-sha384");

        let err = cmd_inspect(&key_path("ec-p256-sec1.pem")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(_)));
    }

    #[test]
    fn test_cli_parses_algorithm_names() {
        let cli = Cli::try_parse_from([
            "sigload",
            "sign",
            "--key",
            "key.pem",
            "--algorithm",
            "rsa-sha512",
            "data.bin",
        ])
        .unwrap();
        match cli.command {
            Commands::Sign { algorithm: alg, .. } => {
                assert_eq!(alg.map(|a| a.name()), Some(algorithm::RSA_SHA512));
            }
            _ => panic!("expected sign command"),
        }

        assert!(Cli::try_parse_from([
            "sigload", "sign", "--key", "key.pem", "--algorithm", "md5", "data.bin"
        ])
        .is_err());
    }
}
