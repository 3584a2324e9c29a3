//! SHA-256 content hashes recorded in the manifest.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use augury_core::errors::{AuguryError, AuguryResult};
use sha2::{Digest, Sha256};

const READ_CHUNK: usize = 1 << 20;

/// Lowercase hex SHA-256 of a byte slice.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Lowercase hex SHA-256 of a file, streamed in 1 MiB chunks.
pub fn sha256_file(path: &Path) -> AuguryResult<String> {
    let mut file = File::open(path).map_err(|e| AuguryError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = file.read(&mut buf).map_err(|e| AuguryError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest_of_empty_input() {
        assert_eq!(
            sha256_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn file_digest_matches_byte_digest() {
        let dir = std::env::temp_dir().join(format!("augury_hash_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("blob.bin");
        let data: Vec<u8> = (0..3_000_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        assert_eq!(sha256_file(&path).unwrap(), sha256_bytes(&data));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
