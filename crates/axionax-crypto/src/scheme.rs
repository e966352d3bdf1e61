//! Pluggable key derivation.
//!
//! The genesis only needs a public key per secret. `DigestKeyScheme` derives
//! it with a one-way digest and cannot sign anything: a node cannot verify
//! signatures from such a validator. `Ed25519KeyScheme` is the real scheme
//! and must be selected before a launch that expects signed blocks.

use axionax_core::error::GenesisError;
use axionax_core::types::{PublicKey, SecretKey};
use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};

use crate::hash::sha3_256;

/// Public key type label the consensus engine expects in genesis.
pub const PUB_KEY_TYPE_ED25519: &str = "tendermint/PubKeyEd25519";

pub trait KeyScheme {
    /// Short name for logs and keyfiles.
    fn name(&self) -> &'static str;

    /// `pub_key.type` written next to every validator key.
    fn pub_key_type(&self) -> &'static str;

    fn public_key(&self, secret: &SecretKey) -> Result<PublicKey, GenesisError>;
}

/// Placeholder: `public_key = SHA3-256(secret)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DigestKeyScheme;

impl KeyScheme for DigestKeyScheme {
    fn name(&self) -> &'static str {
        "digest"
    }

    fn pub_key_type(&self) -> &'static str {
        PUB_KEY_TYPE_ED25519
    }

    fn public_key(&self, secret: &SecretKey) -> Result<PublicKey, GenesisError> {
        Ok(PublicKey(sha3_256(secret.as_bytes()).to_vec()))
    }
}

/// Ed25519: the secret is the 32-byte seed, the public key the verifying key.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519KeyScheme;

impl KeyScheme for Ed25519KeyScheme {
    fn name(&self) -> &'static str {
        "ed25519"
    }

    fn pub_key_type(&self) -> &'static str {
        PUB_KEY_TYPE_ED25519
    }

    fn public_key(&self, secret: &SecretKey) -> Result<PublicKey, GenesisError> {
        let signing = SigningKey::from_bytes(secret.as_bytes());
        Ok(PublicKey(signing.verifying_key().to_bytes().to_vec()))
    }
}

/// Config/CLI selector for a key scheme.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySchemeKind {
    #[default]
    Digest,
    Ed25519,
}

impl KeySchemeKind {
    pub fn scheme(self) -> Box<dyn KeyScheme> {
        match self {
            KeySchemeKind::Digest => Box::new(DigestKeyScheme),
            KeySchemeKind::Ed25519 => Box::new(Ed25519KeyScheme),
        }
    }

    /// False for placeholders that cannot produce verifiable signatures.
    pub fn can_sign(self) -> bool {
        matches!(self, KeySchemeKind::Ed25519)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, Verifier, VerifyingKey};

    #[test]
    fn digest_scheme_is_deterministic() {
        let sk = SecretKey::from_bytes([9u8; 32]);
        let a = DigestKeyScheme.public_key(&sk).unwrap();
        let b = DigestKeyScheme.public_key(&sk).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes().len(), 32);
        assert_ne!(a.as_bytes(), sk.as_bytes());
    }

    #[test]
    fn ed25519_key_verifies_signatures() {
        let sk = SecretKey::from_bytes([3u8; 32]);
        let pk = Ed25519KeyScheme.public_key(&sk).unwrap();

        let signing = SigningKey::from_bytes(sk.as_bytes());
        let sig = signing.sign(b"genesis");
        let bytes: [u8; 32] = pk.as_bytes().try_into().unwrap();
        let verifying = VerifyingKey::from_bytes(&bytes).unwrap();
        assert!(verifying.verify(b"genesis", &sig).is_ok());
    }

    #[test]
    fn schemes_disagree_on_the_same_secret() {
        let sk = SecretKey::from_bytes([5u8; 32]);
        assert_ne!(
            DigestKeyScheme.public_key(&sk).unwrap(),
            Ed25519KeyScheme.public_key(&sk).unwrap()
        );
    }
}
