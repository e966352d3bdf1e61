use axionax_core::error::GenesisError;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Source of the random bytes every secret is drawn from.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), GenesisError>;
}

impl<E: EntropySource + ?Sized> EntropySource for &mut E {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), GenesisError> {
        (**self).fill(buf)
    }
}

/// Operating-system CSPRNG. The only source fit for a real launch.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), GenesisError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| GenesisError::EntropyUnavailable(e.to_string()))
    }
}

/// Reproducible stream for tests and dry runs. Never use for a launch.
#[derive(Debug, Clone)]
pub struct SeededEntropy(StdRng);

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl EntropySource for SeededEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), GenesisError> {
        self.0.fill_bytes(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_entropy_fills_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsEntropy.fill(&mut a).unwrap();
        OsEntropy.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn seeded_entropy_is_reproducible() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        SeededEntropy::new(42).fill(&mut a).unwrap();
        SeededEntropy::new(42).fill(&mut b).unwrap();
        assert_eq!(a, b);
    }
}
