use bitvm_bridge_primitives::buf::Buf32;
use sha2::{Digest, Sha256};

/// Computes `SHA256(SHA256(data))` using [RustCrypto's SHA-2 crate](https://github.com/RustCrypto/hashes/tree/master/sha2).
///
/// This is the hash used by the source chain for transaction ids and for every node of the
/// transaction Merkle tree.
pub fn sha256d(data: &[u8]) -> Buf32 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);

    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    Buf32(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256d_empty() {
        // well-known value of SHA256(SHA256(""))
        let expected: Buf32 = "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
            .parse()
            .unwrap();

        assert_eq!(sha256d(&[]), expected);
    }
}
