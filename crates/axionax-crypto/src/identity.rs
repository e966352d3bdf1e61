use axionax_core::constants::SECRET_LEN;
use axionax_core::error::GenesisError;
use axionax_core::types::{Address, PublicKey, SecretKey};
use tracing::debug;
use zeroize::Zeroizing;

use crate::entropy::EntropySource;
use crate::hash::address_from_pubkey;
use crate::scheme::KeyScheme;

/// A generated identity: secret, derived public key and address.
///
/// The secret is wiped on drop and never shows up in `Debug` output.
pub struct Identity {
    secret: SecretKey,
    pub public_key: PublicKey,
    pub address: Address,
}

impl Identity {
    /// Derive the public half from `secret`. Same secret, same identity.
    pub fn from_secret(secret: SecretKey, scheme: &dyn KeyScheme) -> Result<Self, GenesisError> {
        let public_key = scheme.public_key(&secret)?;
        let address = address_from_pubkey(&public_key);
        Ok(Self {
            secret,
            public_key,
            address,
        })
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity {{ address: {} }}", self.address)
    }
}

/// Draws a fresh secret per call and derives the rest through `KeyScheme`.
pub struct IdentityGenerator<E> {
    entropy: E,
    scheme: Box<dyn KeyScheme>,
    draws: usize,
}

impl<E: EntropySource> IdentityGenerator<E> {
    pub fn new(entropy: E, scheme: Box<dyn KeyScheme>) -> Self {
        Self {
            entropy,
            scheme,
            draws: 0,
        }
    }

    pub fn generate(&mut self) -> Result<Identity, GenesisError> {
        let mut buf = Zeroizing::new([0u8; SECRET_LEN]);
        self.entropy.fill(&mut buf[..])?;
        self.draws += 1;
        let identity = Identity::from_secret(SecretKey::from_bytes(*buf), self.scheme.as_ref())?;
        debug!(address = %identity.address, scheme = self.scheme.name(), "identity generated");
        Ok(identity)
    }

    pub fn scheme(&self) -> &dyn KeyScheme {
        self.scheme.as_ref()
    }

    /// Entropy draws made so far (one per identity).
    pub fn draws(&self) -> usize {
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{OsEntropy, SeededEntropy};
    use crate::scheme::DigestKeyScheme;
    use std::collections::HashSet;

    struct DeadEntropy;

    impl EntropySource for DeadEntropy {
        fn fill(&mut self, _buf: &mut [u8]) -> Result<(), GenesisError> {
            Err(GenesisError::EntropyUnavailable("device gone".into()))
        }
    }

    #[test]
    fn generated_addresses_are_distinct() {
        let mut gen = IdentityGenerator::new(OsEntropy, Box::new(DigestKeyScheme));
        let addrs: HashSet<_> = (0..64).map(|_| gen.generate().unwrap().address).collect();
        assert_eq!(addrs.len(), 64);
        assert_eq!(gen.draws(), 64);
    }

    #[test]
    fn identity_is_deterministic_given_secret() {
        let mut gen = IdentityGenerator::new(SeededEntropy::new(7), Box::new(DigestKeyScheme));
        let id = gen.generate().unwrap();
        let again = Identity::from_secret(id.secret().clone(), &DigestKeyScheme).unwrap();
        assert_eq!(again.public_key, id.public_key);
        assert_eq!(again.address, id.address);
    }

    #[test]
    fn dead_entropy_surfaces_as_unavailable() {
        let mut gen = IdentityGenerator::new(DeadEntropy, Box::new(DigestKeyScheme));
        let err = gen.generate().unwrap_err();
        assert!(matches!(err, GenesisError::EntropyUnavailable(_)));
        assert_eq!(gen.draws(), 0);
    }

    #[test]
    fn debug_hides_secret() {
        let id = Identity::from_secret(SecretKey::from_bytes([0xee; 32]), &DigestKeyScheme).unwrap();
        assert!(!format!("{id:?}").contains("eeee"));
    }
}
