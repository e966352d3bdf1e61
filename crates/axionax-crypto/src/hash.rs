use axionax_core::constants::ADDRESS_LEN;
use axionax_core::types::{Address, PublicKey};
use sha3::{Digest, Sha3_256};

/// Compute SHA3-256 of arbitrary bytes → 32-byte array.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// Derive an Address from public key bytes: the first 20 bytes of
/// SHA3-256(pubkey). Independent of the key scheme that produced the key.
pub fn address_from_pubkey(pk: &PublicKey) -> Address {
    truncate(sha3_256(pk.as_bytes()))
}

/// Address of a protocol-owned module account, e.g. `bonded_tokens_pool`.
/// Nobody holds a secret for it.
pub fn module_address(module: &str) -> Address {
    let mut input = b"module:".to_vec();
    input.extend_from_slice(module.as_bytes());
    truncate(sha3_256(&input))
}

/// BLAKE3 checksum of a published artifact. Operators compare it out of band
/// to confirm they all hold the same genesis file.
pub fn artifact_digest(bytes: &[u8]) -> [u8; 32] {
    *blake3::hash(bytes).as_bytes()
}

fn truncate(digest: [u8; 32]) -> Address {
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&digest[..ADDRESS_LEN]);
    Address::from_bytes(out)
}
