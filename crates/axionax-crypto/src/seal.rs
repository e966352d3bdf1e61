//! Passphrase sealing for secret bundles.
//!
//! Layout:
//! `AXXSEAL2 || m_cost (u32 LE) || t_cost (u32 LE) || p_cost (u32 LE) || salt (16) || nonce (24) || ciphertext`.
//! The key is Argon2id(passphrase, salt) under the header's cost parameters.
//! The whole header is authenticated as associated data.

use argon2::{Algorithm, Argon2, Params, Version};
use axionax_core::error::GenesisError;
use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use zeroize::Zeroizing;

use crate::entropy::EntropySource;

const MAGIC: &[u8; 8] = b"AXXSEAL2";
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 24;
const PARAMS_LEN: usize = 12;
const HEADER_LEN: usize = MAGIC.len() + PARAMS_LEN + SALT_LEN + NONCE_LEN;

/// Refuse to open bundles asking for more than 4 GiB of memory.
const MAX_M_COST_KIB: u32 = 4 * 1024 * 1024;

/// Argon2id cost parameters, stored in every bundle header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub m_cost_kib: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for KdfParams {
    /// 64 MiB, 3 passes, 1 lane.
    fn default() -> Self {
        Self {
            m_cost_kib: 64 * 1024,
            t_cost: 3,
            p_cost: 1,
        }
    }
}

impl KdfParams {
    fn to_bytes(self) -> [u8; PARAMS_LEN] {
        let mut out = [0u8; PARAMS_LEN];
        out[..4].copy_from_slice(&self.m_cost_kib.to_le_bytes());
        out[4..8].copy_from_slice(&self.t_cost.to_le_bytes());
        out[8..].copy_from_slice(&self.p_cost.to_le_bytes());
        out
    }

    fn from_bytes(b: &[u8]) -> Self {
        let word = |i: usize| u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        Self {
            m_cost_kib: word(0),
            t_cost: word(4),
            p_cost: word(8),
        }
    }

    fn argon2(self) -> Result<Argon2<'static>, GenesisError> {
        if self.m_cost_kib > MAX_M_COST_KIB {
            return Err(GenesisError::SecretDelivery(format!(
                "kdf memory cost {} KiB exceeds limit",
                self.m_cost_kib
            )));
        }
        let params = Params::new(self.m_cost_kib, self.t_cost, self.p_cost, Some(32))
            .map_err(|e| GenesisError::SecretDelivery(format!("invalid kdf parameters: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

fn derive_key(
    passphrase: &str,
    salt: &[u8],
    params: KdfParams,
) -> Result<Zeroizing<[u8; 32]>, GenesisError> {
    let mut key = Zeroizing::new([0u8; 32]);
    params
        .argon2()?
        .hash_password_into(passphrase.as_bytes(), salt, &mut key[..])
        .map_err(|e| GenesisError::SecretDelivery(format!("key derivation failed: {e}")))?;
    Ok(key)
}

/// Read the cost parameters of a sealed bundle without decrypting it.
pub fn sealed_kdf_params(sealed: &[u8]) -> Result<KdfParams, GenesisError> {
    if sealed.len() < HEADER_LEN || &sealed[..MAGIC.len()] != MAGIC {
        return Err(GenesisError::SecretDelivery("not a sealed secret bundle".into()));
    }
    Ok(KdfParams::from_bytes(&sealed[MAGIC.len()..MAGIC.len() + PARAMS_LEN]))
}

/// Encrypt `plaintext` under `passphrase` with the default cost parameters.
pub fn seal(
    passphrase: &str,
    plaintext: &[u8],
    entropy: &mut dyn EntropySource,
) -> Result<Vec<u8>, GenesisError> {
    seal_with(passphrase, plaintext, KdfParams::default(), entropy)
}

/// Encrypt `plaintext` under `passphrase`. Salt and nonce come from `entropy`.
pub fn seal_with(
    passphrase: &str,
    plaintext: &[u8],
    params: KdfParams,
    entropy: &mut dyn EntropySource,
) -> Result<Vec<u8>, GenesisError> {
    if passphrase.is_empty() {
        return Err(GenesisError::SecretDelivery("empty passphrase".into()));
    }

    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    entropy.fill(&mut salt)?;
    entropy.fill(&mut nonce)?;

    let mut out = Vec::with_capacity(HEADER_LEN + plaintext.len() + 16);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&params.to_bytes());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce);

    let key = derive_key(passphrase, &salt, params)?;
    let cipher = XChaCha20Poly1305::new((&*key).into());
    let ciphertext = cipher
        .encrypt(
            XNonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad: &out,
            },
        )
        .map_err(|e| GenesisError::SecretDelivery(format!("encryption failed: {e}")))?;

    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Reverse of [`seal`]. Fails on a wrong passphrase or any tampering,
/// header included.
pub fn open_sealed(passphrase: &str, sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>, GenesisError> {
    let params = sealed_kdf_params(sealed)?;
    let salt_at = MAGIC.len() + PARAMS_LEN;
    let salt = &sealed[salt_at..salt_at + SALT_LEN];
    let nonce = &sealed[salt_at + SALT_LEN..HEADER_LEN];

    let key = derive_key(passphrase, salt, params)?;
    let cipher = XChaCha20Poly1305::new((&*key).into());
    cipher
        .decrypt(
            XNonce::from_slice(nonce),
            Payload {
                msg: &sealed[HEADER_LEN..],
                aad: &sealed[..HEADER_LEN],
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| GenesisError::SecretDelivery("wrong passphrase or corrupted bundle".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::SeededEntropy;

    /// Minimum-cost parameters keep the tests fast.
    const LIGHT: KdfParams = KdfParams {
        m_cost_kib: 8,
        t_cost: 1,
        p_cost: 1,
    };

    fn sealed(passphrase: &str, payload: &[u8], seed: u64) -> Vec<u8> {
        seal_with(passphrase, payload, LIGHT, &mut SeededEntropy::new(seed)).unwrap()
    }

    #[test]
    fn sealed_bundle_opens_with_passphrase() {
        let bundle = sealed("correct horse", b"validator secrets", 1);
        assert!(bundle.starts_with(MAGIC));
        let opened = open_sealed("correct horse", &bundle).unwrap();
        assert_eq!(opened.as_slice(), b"validator secrets");
    }

    #[test]
    fn kdf_params_travel_in_header() {
        let params = KdfParams {
            m_cost_kib: 16,
            t_cost: 2,
            p_cost: 2,
        };
        let bundle = seal_with("pw", b"payload", params, &mut SeededEntropy::new(4)).unwrap();
        assert_eq!(sealed_kdf_params(&bundle).unwrap(), params);
        assert_eq!(open_sealed("pw", &bundle).unwrap().as_slice(), b"payload");
    }

    #[test]
    fn default_params_are_memory_hard() {
        let p = KdfParams::default();
        assert!(p.m_cost_kib >= 64 * 1024);
        assert!(p.t_cost >= 3);
    }

    #[test]
    fn wrong_passphrase_fails() {
        let bundle = sealed("correct horse", b"validator secrets", 1);
        assert!(open_sealed("battery staple", &bundle).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let mut bundle = sealed("pw", b"payload", 2);
        let last = bundle.len() - 1;
        bundle[last] ^= 0xff;
        assert!(open_sealed("pw", &bundle).is_err());
    }

    #[test]
    fn tampered_header_params_fail() {
        let mut bundle = sealed("pw", b"payload", 5);
        // t_cost 1 → 2: still valid parameters, but no longer the authenticated header.
        bundle[MAGIC.len() + 4] = 2;
        assert!(open_sealed("pw", &bundle).is_err());
    }

    #[test]
    fn oversized_memory_cost_is_refused() {
        let mut bundle = sealed("pw", b"payload", 6);
        bundle[MAGIC.len()..MAGIC.len() + 4].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(open_sealed("pw", &bundle).is_err());
    }

    #[test]
    fn empty_passphrase_rejected() {
        assert!(seal_with("", b"x", LIGHT, &mut SeededEntropy::new(3)).is_err());
    }
}
