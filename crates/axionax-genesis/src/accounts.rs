use axionax_core::error::{GenesisError, ReconciliationError};
use axionax_core::types::{Address, Balance};
use axionax_crypto::{EntropySource, IdentityGenerator};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GenesisConfig;
use crate::secrets::{IssuedSecret, SecretRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Faucet,
    Team,
    RewardsPool,
}

/// A funded role account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    pub role: AccountRole,
    /// Declared allocation in whole tokens.
    pub whole_tokens: u128,
    /// Exponent `balance` was scaled with.
    pub exponent: u32,
    /// `whole_tokens × 10^exponent`, base units.
    pub balance: Balance,
}

#[derive(Debug)]
pub struct AccountAllocation {
    pub accounts: Vec<Account>,
    pub secrets: Vec<IssuedSecret>,
}

impl AccountAllocation {
    pub fn total(&self) -> Result<Balance, ReconciliationError> {
        self.accounts
            .iter()
            .try_fold(0u128, |acc, a| acc.checked_add(a.balance))
            .ok_or_else(|| ReconciliationError::Overflow("account balances".into()))
    }
}

pub struct AccountAllocationBuilder<'a> {
    config: &'a GenesisConfig,
}

impl<'a> AccountAllocationBuilder<'a> {
    pub fn new(config: &'a GenesisConfig) -> Self {
        Self { config }
    }

    /// Faucet, team and rewards pool, in that order.
    ///
    /// The rewards pool sits at the zero address: it is a protocol mint/burn
    /// point with no key, so it costs no entropy draw.
    pub fn build<E: EntropySource>(
        &self,
        generator: &mut IdentityGenerator<E>,
    ) -> Result<AccountAllocation, GenesisError> {
        let supply = &self.config.supply;
        let exponent = self.config.token.exponent;
        let key_scheme = generator.scheme().name();

        let faucet = generator.generate()?;
        let team = generator.generate()?;

        let accounts = vec![
            self.account(faucet.address, AccountRole::Faucet, supply.faucet)?,
            self.account(team.address, AccountRole::Team, supply.team)?,
            self.account(Address::ZERO, AccountRole::RewardsPool, supply.rewards_pool)?,
        ];

        let secrets = vec![
            IssuedSecret {
                label: "faucet".into(),
                title: "FAUCET ACCOUNT".into(),
                role: SecretRole::Faucet,
                key_scheme,
                identity: faucet,
            },
            IssuedSecret {
                label: "team".into(),
                title: "TEAM ACCOUNT".into(),
                role: SecretRole::Team,
                key_scheme,
                identity: team,
            },
        ];

        let allocation = AccountAllocation { accounts, secrets };
        info!(
            accounts = allocation.accounts.len(),
            exponent,
            total = %allocation.total()?,
            "genesis accounts allocated"
        );
        Ok(allocation)
    }

    fn account(
        &self,
        address: Address,
        role: AccountRole,
        whole_tokens: u128,
    ) -> Result<Account, ReconciliationError> {
        Ok(Account {
            address,
            role,
            whole_tokens,
            exponent: self.config.token.exponent,
            balance: self.config.scaled(whole_tokens, "account allocation")?,
        })
    }
}
