//! Genesis document schema.
//!
//! Field names, nesting and encodings are what the consuming node parses.
//! Large integers are decimal strings; fractions are 18-place decimal strings.
//! Field order here is serialization order, so keep it stable.

use axionax_core::error::ReconciliationError;
use axionax_core::types::{parse_balance, Address, Balance, PublicKey};
use serde::{Deserialize, Serialize};

use crate::accounts::AccountRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisDocument {
    pub genesis_time: String,
    pub chain_id: String,
    pub chain_name: String,
    pub consensus_params: ConsensusParams,
    pub popc_params: PopcParams,
    pub validators: Vec<GenesisValidator>,
    pub app_hash: String,
    pub app_state: AppState,
}

// ── Consensus ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub block: BlockParams,
    pub evidence: EvidenceParams,
    pub validator: ValidatorParams,
    pub version: VersionParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockParams {
    pub max_bytes: String,
    pub max_gas: String,
    pub time_iota_ms: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceParams {
    pub max_age_num_blocks: String,
    /// Nanoseconds.
    pub max_age_duration: String,
    pub max_bytes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorParams {
    pub pub_key_types: Vec<String>,
}

/// Serialized as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionParams {}

/// Proof-of-Participation-Consensus parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopcParams {
    /// Blocks between challenge rounds.
    pub challenge_interval: u64,
    pub verification_threshold: String,
    pub max_validators: u32,
    /// Base units.
    pub min_validator_stake: String,
}

// ── Validators ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisValidator {
    pub address: Address,
    pub pub_key: PubKey,
    pub power: String,
    pub name: String,
    pub stake: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub value: PublicKey,
}

// ── App state ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub accounts: Vec<GenesisAccount>,
    pub auth: AuthState,
    pub bank: BankState,
    pub staking: StakingState,
    pub distribution: DistributionState,
    pub gov: GovState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: Address,
    pub balance: String,
    #[serde(rename = "type")]
    pub role: AccountRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub params: AuthParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthParams {
    pub max_memo_characters: String,
    pub tx_sig_limit: String,
    pub tx_size_cost_per_byte: String,
    pub sig_verify_cost_ed25519: String,
    pub sig_verify_cost_secp256k1: String,
}

// ── Bank ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankState {
    pub params: BankParams,
    pub balances: Vec<BankBalance>,
    pub supply: Vec<Coin>,
    pub denom_metadata: Vec<DenomMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankParams {
    pub send_enabled: bool,
    pub default_send_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankBalance {
    pub address: Address,
    pub coins: Vec<Coin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: &str, amount: Balance) -> Self {
        Self {
            denom: denom.to_string(),
            amount: amount.to_string(),
        }
    }

    pub fn amount(&self) -> Result<Balance, ReconciliationError> {
        parse_balance(&self.amount, "coin amount")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenomMetadata {
    pub description: String,
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    pub display: String,
    pub name: String,
    pub symbol: String,
}

impl DenomMetadata {
    /// Exponent of the display unit, the one balances are scaled by.
    pub fn display_exponent(&self) -> Option<u32> {
        self.denom_units
            .iter()
            .find(|u| u.denom == self.display)
            .map(|u| u.exponent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenomUnit {
    pub denom: String,
    pub exponent: u32,
    pub aliases: Vec<String>,
}

// ── Staking ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingState {
    pub params: StakingParams,
    pub validators: Vec<StakingValidator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingParams {
    pub unbonding_time: String,
    pub max_validators: u32,
    pub max_entries: u32,
    pub historical_entries: u32,
    pub bond_denom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakingValidator {
    pub operator_address: Address,
    pub consensus_pubkey: PubKey,
    pub jailed: bool,
    pub status: u8,
    pub tokens: String,
    pub delegator_shares: String,
    pub description: ValidatorDescription,
    pub unbonding_height: String,
    pub unbonding_time: String,
    pub commission: Commission,
    pub min_self_delegation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorDescription {
    pub moniker: String,
    pub identity: String,
    pub website: String,
    pub security_contact: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    pub commission_rates: CommissionRates,
    pub update_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub rate: String,
    pub max_rate: String,
    pub max_change_rate: String,
}

// ── Distribution ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionState {
    pub params: DistributionParams,
    pub fee_pool: FeePool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionParams {
    pub community_tax: String,
    pub base_proposer_reward: String,
    pub bonus_proposer_reward: String,
    pub withdraw_addr_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeePool {
    /// DecCoins: amounts carry 18 fractional digits.
    pub community_pool: Vec<Coin>,
}

// ── Governance ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovState {
    pub starting_proposal_id: String,
    pub deposits: Vec<serde_json::Value>,
    pub votes: Vec<serde_json::Value>,
    pub proposals: Vec<serde_json::Value>,
    pub deposit_params: DepositParams,
    pub voting_params: VotingParams,
    pub tally_params: TallyParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositParams {
    pub min_deposit: Vec<Coin>,
    pub max_deposit_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingParams {
    pub voting_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyParams {
    pub quorum: String,
    pub threshold: String,
    pub veto_threshold: String,
}

// ── Queries ──────────────────────────────────────────────────────────────────

impl GenesisDocument {
    /// Sum of every bank balance in `denom`.
    pub fn balance_sum(&self, denom: &str) -> Result<Balance, ReconciliationError> {
        let mut total: Balance = 0;
        for bal in &self.app_state.bank.balances {
            for coin in bal.coins.iter().filter(|c| c.denom == denom) {
                total = total
                    .checked_add(coin.amount()?)
                    .ok_or_else(|| ReconciliationError::Overflow("bank balances".into()))?;
            }
        }
        Ok(total)
    }

    /// Declared bank supply of `denom`, if any.
    pub fn declared_supply(&self, denom: &str) -> Result<Option<Balance>, ReconciliationError> {
        self.app_state
            .bank
            .supply
            .iter()
            .find(|c| c.denom == denom)
            .map(Coin::amount)
            .transpose()
    }

    pub fn bank_balance_of(&self, address: &Address, denom: &str) -> Result<Balance, ReconciliationError> {
        let mut total: Balance = 0;
        for bal in self.app_state.bank.balances.iter().filter(|b| &b.address == address) {
            for coin in bal.coins.iter().filter(|c| c.denom == denom) {
                total = total
                    .checked_add(coin.amount()?)
                    .ok_or_else(|| ReconciliationError::Overflow("bank balance".into()))?;
            }
        }
        Ok(total)
    }

    /// Every address the document funds or bonds: validators, then bank
    /// balance holders (role and module accounts).
    pub fn addresses(&self) -> Vec<Address> {
        self.validators
            .iter()
            .map(|v| v.address)
            .chain(self.app_state.bank.balances.iter().map(|b| b.address))
            .collect()
    }
}
