use axionax_core::constants::*;
use axionax_core::error::{GenesisError, ReconciliationError};
use axionax_core::types::{scale_to_base, Balance, Dec};
use axionax_crypto::KeySchemeKind;
use serde::{Deserialize, Serialize};

/// Every constant the genesis pipeline reads.
///
/// Built once (from defaults or a JSON file), validated, then only borrowed.
/// Whole-token amounts are scaled by `token.exponent`, the same exponent
/// written into the bank denom metadata, so the two cannot drift.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenesisConfig {
    pub chain: ChainConfig,
    pub token: TokenConfig,
    pub supply: SupplyConfig,
    pub validators: ValidatorConfig,
    pub consensus: ConsensusConfig,
    pub popc: PopcConfig,
    pub auth: AuthConfig,
    pub staking: StakingConfig,
    pub distribution: DistributionConfig,
    pub gov: GovConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    pub chain_id: String,
    pub chain_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    pub base_denom: String,
    pub base_aliases: Vec<String>,
    pub display_denom: String,
    /// Decimal exponent between base and display unit.
    pub exponent: u32,
    pub name: String,
    pub symbol: String,
    pub description: String,
}

/// Whole-token amounts. `faucet + team + rewards_pool + community == total`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SupplyConfig {
    pub total: u128,
    pub faucet: u128,
    pub team: u128,
    pub rewards_pool: u128,
    /// Not assigned to a role account. Funds validator bonded stake; the rest
    /// becomes the community pool.
    pub community: u128,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    pub count: u32,
    pub max_validators: u32,
    /// Whole tokens.
    pub min_stake: u128,
    pub stake_multiplier: u128,
    pub voting_power: u64,
    pub key_scheme: KeySchemeKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsensusConfig {
    pub block_time_secs: u64,
    pub block_max_bytes: u64,
    pub block_max_gas: u64,
    pub evidence_max_age_num_blocks: u64,
    pub evidence_max_age_duration_ns: u64,
    pub evidence_max_bytes: u64,
    pub pub_key_types: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopcConfig {
    pub challenge_interval: u64,
    pub verification_threshold: Dec,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub max_memo_characters: u64,
    pub tx_sig_limit: u64,
    pub tx_size_cost_per_byte: u64,
    pub sig_verify_cost_ed25519: u64,
    pub sig_verify_cost_secp256k1: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StakingConfig {
    pub unbonding_time_secs: u64,
    pub max_entries: u32,
    pub historical_entries: u32,
    pub commission_rate: Dec,
    pub commission_max_rate: Dec,
    pub commission_max_change_rate: Dec,
    /// Base units.
    pub min_self_delegation: u128,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributionConfig {
    pub community_tax: Dec,
    pub base_proposer_reward: Dec,
    pub bonus_proposer_reward: Dec,
    pub withdraw_addr_enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GovConfig {
    /// Whole tokens.
    pub min_deposit: u128,
    pub max_deposit_period_secs: u64,
    pub voting_period_secs: u64,
    pub quorum: Dec,
    pub threshold: Dec,
    pub veto_threshold: Dec,
}

// ── Defaults: axionax public testnet ─────────────────────────────────────────

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: CHAIN_ID.into(),
            chain_name: CHAIN_NAME.into(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            base_denom: BASE_DENOM.into(),
            base_aliases: vec!["microaxx".into()],
            display_denom: DISPLAY_DENOM.into(),
            exponent: DENOM_EXPONENT,
            name: "axionax Token".into(),
            symbol: DISPLAY_DENOM.into(),
            description: "The native staking token of axionax".into(),
        }
    }
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            total: TOTAL_SUPPLY_AXX,
            faucet: FAUCET_ALLOCATION_AXX,
            team: TEAM_ALLOCATION_AXX,
            rewards_pool: REWARDS_POOL_ALLOCATION_AXX,
            community: COMMUNITY_ALLOCATION_AXX,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_VALIDATOR_COUNT,
            max_validators: MAX_VALIDATORS,
            min_stake: MIN_VALIDATOR_STAKE_AXX,
            stake_multiplier: GENESIS_STAKE_MULTIPLIER,
            voting_power: GENESIS_VOTING_POWER,
            key_scheme: KeySchemeKind::default(),
        }
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            block_time_secs: BLOCK_TIME_SECS,
            block_max_bytes: BLOCK_MAX_BYTES,
            block_max_gas: BLOCK_MAX_GAS,
            evidence_max_age_num_blocks: EVIDENCE_MAX_AGE_NUM_BLOCKS,
            evidence_max_age_duration_ns: EVIDENCE_MAX_AGE_DURATION_NS,
            evidence_max_bytes: EVIDENCE_MAX_BYTES,
            pub_key_types: vec!["ed25519".into()],
        }
    }
}

impl Default for PopcConfig {
    fn default() -> Self {
        Self {
            challenge_interval: CHALLENGE_INTERVAL_BLOCKS,
            verification_threshold: Dec::from_bps(VERIFICATION_THRESHOLD_BPS),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_memo_characters: AUTH_MAX_MEMO_CHARACTERS,
            tx_sig_limit: AUTH_TX_SIG_LIMIT,
            tx_size_cost_per_byte: AUTH_TX_SIZE_COST_PER_BYTE,
            sig_verify_cost_ed25519: AUTH_SIG_VERIFY_COST_ED25519,
            sig_verify_cost_secp256k1: AUTH_SIG_VERIFY_COST_SECP256K1,
        }
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            unbonding_time_secs: UNBONDING_TIME_SECS,
            max_entries: STAKING_MAX_ENTRIES,
            historical_entries: STAKING_HISTORICAL_ENTRIES,
            commission_rate: Dec::from_bps(COMMISSION_RATE_BPS),
            commission_max_rate: Dec::from_bps(COMMISSION_MAX_RATE_BPS),
            commission_max_change_rate: Dec::from_bps(COMMISSION_MAX_CHANGE_RATE_BPS),
            min_self_delegation: 1,
        }
    }
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            community_tax: Dec::from_bps(COMMUNITY_TAX_BPS),
            base_proposer_reward: Dec::from_bps(BASE_PROPOSER_REWARD_BPS),
            bonus_proposer_reward: Dec::from_bps(BONUS_PROPOSER_REWARD_BPS),
            withdraw_addr_enabled: true,
        }
    }
}

impl Default for GovConfig {
    fn default() -> Self {
        Self {
            min_deposit: GOV_MIN_DEPOSIT_AXX,
            max_deposit_period_secs: GOV_DEPOSIT_PERIOD_SECS,
            voting_period_secs: GOV_VOTING_PERIOD_SECS,
            quorum: Dec::from_bps(GOV_QUORUM_BPS),
            threshold: Dec::from_bps(GOV_THRESHOLD_BPS),
            veto_threshold: Dec::from_bps(GOV_VETO_THRESHOLD_BPS),
        }
    }
}

// ── Derived values and validation ────────────────────────────────────────────

impl GenesisConfig {
    /// Load from a JSON file. Missing fields fall back to the testnet defaults.
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, GenesisError> {
        let json = std::fs::read_to_string(path).map_err(|e| GenesisError::io(path, e))?;
        let config: GenesisConfig = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// `whole × 10^token.exponent`.
    pub fn scaled(&self, whole: u128, what: &str) -> Result<Balance, ReconciliationError> {
        scale_to_base(whole, self.token.exponent).ok_or_else(|| {
            ReconciliationError::Overflow(format!("{what} × 10^{}", self.token.exponent))
        })
    }

    pub fn total_supply(&self) -> Result<Balance, ReconciliationError> {
        self.scaled(self.supply.total, "total supply")
    }

    pub fn min_validator_stake(&self) -> Result<Balance, ReconciliationError> {
        self.scaled(self.validators.min_stake, "minimum validator stake")
    }

    /// Stake assigned to each genesis validator.
    pub fn genesis_validator_stake(&self) -> Result<Balance, ReconciliationError> {
        self.min_validator_stake()?
            .checked_mul(self.validators.stake_multiplier)
            .ok_or_else(|| ReconciliationError::Overflow("validator stake".into()))
    }

    /// `consensus.block_time_secs` in milliseconds, as `time_iota_ms` carries it.
    pub fn block_time_ms(&self) -> Result<u64, ReconciliationError> {
        self.consensus
            .block_time_secs
            .checked_mul(1000)
            .ok_or_else(|| ReconciliationError::Overflow("block time in ms".into()))
    }

    /// Reject configurations that could only produce an inconsistent genesis.
    pub fn validate(&self) -> Result<(), GenesisError> {
        let invalid = |msg: String| Err(GenesisError::InvalidConfig(msg));

        if self.chain.chain_id.trim().is_empty() {
            return invalid("chain_id must not be empty".into());
        }
        if self.token.base_denom.is_empty() || self.token.display_denom.is_empty() {
            return invalid("denoms must not be empty".into());
        }
        if self.token.base_denom == self.token.display_denom {
            return invalid("base and display denom must differ".into());
        }
        if self.validators.count == 0 {
            return invalid("validator count must be positive".into());
        }
        if self.validators.count > self.validators.max_validators {
            return Err(ReconciliationError::TooManyValidators {
                max: self.validators.max_validators,
                got: self.validators.count,
            }
            .into());
        }
        if self.validators.stake_multiplier == 0 {
            return invalid("stake_multiplier must be at least 1".into());
        }
        if self.consensus.block_time_secs == 0 {
            return invalid("block_time_secs must be positive".into());
        }
        self.block_time_ms()?;

        let s = &self.supply;
        let allocated = [s.faucet, s.team, s.rewards_pool, s.community]
            .iter()
            .try_fold(0u128, |acc, v| acc.checked_add(*v))
            .ok_or_else(|| ReconciliationError::Overflow("allocations".into()))?;
        if allocated != s.total {
            return Err(ReconciliationError::SupplyMismatch {
                denom: self.token.display_denom.clone(),
                declared: s.total,
                distributed: allocated,
            }
            .into());
        }
        // Surfaces exponent overflow before any identity is drawn.
        self.total_supply()?;

        let bonded = self
            .genesis_validator_stake()?
            .checked_mul(self.validators.count as u128)
            .ok_or_else(|| ReconciliationError::Overflow("bonded stake".into()))?;
        let reserve = self.scaled(s.community, "community allocation")?;
        if bonded > reserve {
            return Err(ReconciliationError::StakeExceedsReserve { bonded, reserve }.into());
        }

        let fractions = [
            ("popc.verification_threshold", self.popc.verification_threshold),
            ("staking.commission_rate", self.staking.commission_rate),
            ("staking.commission_max_rate", self.staking.commission_max_rate),
            ("staking.commission_max_change_rate", self.staking.commission_max_change_rate),
            ("distribution.community_tax", self.distribution.community_tax),
            ("distribution.base_proposer_reward", self.distribution.base_proposer_reward),
            ("distribution.bonus_proposer_reward", self.distribution.bonus_proposer_reward),
            ("gov.quorum", self.gov.quorum),
            ("gov.threshold", self.gov.threshold),
            ("gov.veto_threshold", self.gov.veto_threshold),
        ];
        for (name, value) in fractions {
            if value > Dec::ONE {
                return invalid(format!("{name} must be within [0, 1], got {value}"));
            }
        }
        if self.staking.commission_rate > self.staking.commission_max_rate {
            return invalid("commission_rate exceeds commission_max_rate".into());
        }
        if self.staking.commission_max_change_rate > self.staking.commission_max_rate {
            return invalid("commission_max_change_rate exceeds commission_max_rate".into());
        }

        Ok(())
    }
}
