//! SHA-256 integrity signatures for output files
//!
//! The sidecar of `name.csv` is `name_sha256.txt` and holds the lowercase
//! hex digest of the CSV bytes, with no trailing newline.

use crate::error::{Error, Result};
use crate::staging::atomic_write;
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const CSV_SUFFIX: &str = ".csv";
const SIGNATURE_SUFFIX: &str = "_sha256.txt";

/// Lowercase hex SHA-256 digest of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut hex = String::with_capacity(64);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// True when `value` looks like a digest produced by [`sha256_hex`]
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64
        && value
            .bytes()
            .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}

/// Sidecar path for a signed file
///
/// `.csv` in the file name becomes `_sha256.txt`; names without it get the
/// suffix appended.
pub fn signature_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath(format!("{} has no UTF-8 file name", path.display())))?;

    let signed = if name.contains(CSV_SUFFIX) {
        name.replace(CSV_SUFFIX, SIGNATURE_SUFFIX)
    } else {
        format!("{name}{SIGNATURE_SUFFIX}")
    };
    Ok(path.with_file_name(signed))
}

/// Hash `path` and write its sidecar; returns the digest
pub fn sign_file(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    let signature = sha256_hex(&data);
    let sig_path = signature_path(path)?;
    atomic_write(&sig_path, signature.as_bytes())?;
    info!(path = %sig_path.display(), "File SHA-256 signature created");
    Ok(signature)
}

/// Recompute the digest of `path` and compare it with its sidecar
pub fn verify_file(path: &Path) -> Result<String> {
    let sig_path = signature_path(path)?;
    let expected = fs::read_to_string(&sig_path)?;
    let expected = expected.trim();
    if !is_sha256_hex(expected) {
        return Err(Error::InvalidSignature {
            path: sig_path,
            reason: "expected 64 lowercase hex characters".to_string(),
        });
    }

    let actual = sha256_hex(&fs::read(path)?);
    if actual != expected {
        return Err(Error::SignatureMismatch {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_is_sha256_hex() {
        assert!(is_sha256_hex(&sha256_hex(b"frame")));
        assert!(!is_sha256_hex("abc"));
        assert!(!is_sha256_hex(&"A".repeat(64)));
        assert!(!is_sha256_hex(&"g".repeat(64)));
    }

    #[test]
    fn test_signature_path() {
        assert_eq!(
            signature_path(Path::new("sphy_bell_reversal_proof.csv")).unwrap(),
            PathBuf::from("sphy_bell_reversal_proof_sha256.txt")
        );
        assert_eq!(
            signature_path(Path::new("out/run.csv")).unwrap(),
            PathBuf::from("out/run_sha256.txt")
        );
        assert_eq!(
            signature_path(Path::new("out/data.bin")).unwrap(),
            PathBuf::from("out/data.bin_sha256.txt")
        );
        // Only the file name is rewritten
        assert_eq!(
            signature_path(Path::new("a.csv.d/run.csv")).unwrap(),
            PathBuf::from("a.csv.d/run_sha256.txt")
        );
    }

    #[test]
    fn test_signature_path_without_file_name() {
        assert!(signature_path(Path::new("/")).is_err());
    }
}
