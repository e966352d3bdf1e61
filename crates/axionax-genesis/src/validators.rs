use axionax_core::error::{GenesisError, ReconciliationError};
use axionax_core::types::{Address, Balance, PublicKey};
use axionax_crypto::{EntropySource, IdentityGenerator};
use tracing::info;

use crate::config::GenesisConfig;
use crate::secrets::{IssuedSecret, SecretRole};

/// A genesis validator before it is written into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub address: Address,
    pub public_key: PublicKey,
    pub pub_key_type: String,
    /// Same for every genesis validator; deliberately not derived from stake.
    pub voting_power: u64,
    pub name: String,
    /// Base units.
    pub stake: Balance,
}

/// Builder output: the validators plus the secrets still to be delivered.
#[derive(Debug)]
pub struct ValidatorSet {
    pub validators: Vec<Validator>,
    pub secrets: Vec<IssuedSecret>,
}

impl ValidatorSet {
    pub fn total_stake(&self) -> Result<Balance, ReconciliationError> {
        self.validators
            .iter()
            .try_fold(0u128, |acc, v| acc.checked_add(v.stake))
            .ok_or_else(|| ReconciliationError::Overflow("total validator stake".into()))
    }
}

pub struct ValidatorSetBuilder<'a> {
    config: &'a GenesisConfig,
}

impl<'a> ValidatorSetBuilder<'a> {
    pub fn new(config: &'a GenesisConfig) -> Self {
        Self { config }
    }

    /// Build exactly `count` validators, one fresh identity each.
    ///
    /// Equal voting power at genesis means no stake-to-power conversion is
    /// needed before a chain exists to compute it.
    pub fn build<E: EntropySource>(
        &self,
        count: u32,
        generator: &mut IdentityGenerator<E>,
    ) -> Result<ValidatorSet, GenesisError> {
        if count == 0 {
            return Err(GenesisError::InvalidConfig(
                "validator count must be positive".into(),
            ));
        }
        let max = self.config.validators.max_validators;
        if count > max {
            return Err(ReconciliationError::TooManyValidators { max, got: count }.into());
        }

        let stake = self.config.genesis_validator_stake()?;
        let minimum = self.config.min_validator_stake()?;
        if stake < minimum {
            return Err(ReconciliationError::StakeBelowMinimum {
                name: "genesis validator".into(),
                stake,
                minimum,
            }
            .into());
        }

        let pub_key_type = generator.scheme().pub_key_type().to_string();
        let key_scheme = generator.scheme().name();

        let mut validators = Vec::with_capacity(count as usize);
        let mut secrets = Vec::with_capacity(count as usize);
        for i in 1..=count {
            let identity = generator.generate()?;
            let name = format!("Genesis Validator {i}");
            validators.push(Validator {
                address: identity.address,
                public_key: identity.public_key.clone(),
                pub_key_type: pub_key_type.clone(),
                voting_power: self.config.validators.voting_power,
                name: name.clone(),
                stake,
            });
            secrets.push(IssuedSecret {
                label: format!("validator-{i}"),
                title: name,
                role: SecretRole::Validator,
                key_scheme,
                identity,
            });
        }

        info!(count, stake = %stake, key_scheme, "genesis validators built");
        Ok(ValidatorSet {
            validators,
            secrets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axionax_crypto::{address_from_pubkey, DigestKeyScheme, OsEntropy};
    use std::collections::HashSet;

    fn generator() -> IdentityGenerator<OsEntropy> {
        IdentityGenerator::new(OsEntropy, Box::new(DigestKeyScheme))
    }

    #[test]
    fn builds_exactly_count_validators() {
        let cfg = GenesisConfig::default();
        let set = ValidatorSetBuilder::new(&cfg).build(4, &mut generator()).unwrap();
        assert_eq!(set.validators.len(), 4);
        assert_eq!(set.secrets.len(), 4);

        let addrs: HashSet<_> = set.validators.iter().map(|v| v.address).collect();
        assert_eq!(addrs.len(), 4);
    }

    #[test]
    fn voting_power_is_uniform_and_stake_scaled() {
        let cfg = GenesisConfig::default();
        let set = ValidatorSetBuilder::new(&cfg).build(5, &mut generator()).unwrap();
        let expected_stake = 10_000u128 * 10 * 10u128.pow(18);
        for (i, v) in set.validators.iter().enumerate() {
            assert_eq!(v.voting_power, 1_000_000);
            assert_eq!(v.stake, expected_stake);
            assert_eq!(v.name, format!("Genesis Validator {}", i + 1));
            assert_eq!(v.address, address_from_pubkey(&v.public_key));
        }
        assert_eq!(set.total_stake().unwrap(), expected_stake * 5);
    }

    #[test]
    fn secrets_match_validators() {
        let cfg = GenesisConfig::default();
        let set = ValidatorSetBuilder::new(&cfg).build(3, &mut generator()).unwrap();
        for (v, s) in set.validators.iter().zip(&set.secrets) {
            assert_eq!(v.address, s.identity.address);
            assert_eq!(s.role, SecretRole::Validator);
        }
        assert_eq!(set.secrets[2].label, "validator-3");
    }

    #[test]
    fn zero_count_rejected() {
        let cfg = GenesisConfig::default();
        let err = ValidatorSetBuilder::new(&cfg).build(0, &mut generator()).unwrap_err();
        assert!(matches!(err, GenesisError::InvalidConfig(_)));
    }

    #[test]
    fn count_above_max_rejected_before_any_draw() {
        let mut cfg = GenesisConfig::default();
        cfg.validators.max_validators = 2;
        let mut gen = generator();
        let err = ValidatorSetBuilder::new(&cfg).build(3, &mut gen).unwrap_err();
        assert!(matches!(
            err,
            GenesisError::Reconciliation(ReconciliationError::TooManyValidators { max: 2, got: 3 })
        ));
        assert_eq!(gen.draws(), 0);
    }
}
