/// ─── axionax Testnet Constants ─────────────────────────────────────────────
///
/// Defaults for the public testnet genesis. The pipeline never reads these
/// directly: they seed `GenesisConfig::default()`, and a config file may
/// override any of them.
///
/// Total supply: 1,000,000,000 AXX
/// Base unit:    axx  (1 AXX = 10^18 axx)
/// Ticker:       AXX

// ── Chain identity ───────────────────────────────────────────────────────────

pub const CHAIN_ID: &str = "axionax-testnet-1";
pub const CHAIN_NAME: &str = "axionax Public Testnet";

// ── Token ────────────────────────────────────────────────────────────────────

/// Smallest on-chain unit; every bank amount is denominated in it.
pub const BASE_DENOM: &str = "axx";

/// Display unit shown to humans.
pub const DISPLAY_DENOM: &str = "AXX";

/// Decimal exponent relating `axx` to `AXX`.
pub const DENOM_EXPONENT: u32 = 18;

// ── Supply (whole AXX) ───────────────────────────────────────────────────────

pub const TOTAL_SUPPLY_AXX: u128 = 1_000_000_000;
pub const FAUCET_ALLOCATION_AXX: u128 = 10_000_000;
pub const TEAM_ALLOCATION_AXX: u128 = 100_000_000;
pub const REWARDS_POOL_ALLOCATION_AXX: u128 = 200_000_000;

/// Undistributed remainder. Validator bonded stake is funded from it.
pub const COMMUNITY_ALLOCATION_AXX: u128 = 690_000_000;

// ── Validators ───────────────────────────────────────────────────────────────

pub const DEFAULT_VALIDATOR_COUNT: u32 = 4;
pub const MAX_VALIDATORS: u32 = 100;
pub const MIN_VALIDATOR_STAKE_AXX: u128 = 10_000;

/// Genesis stake = MIN_VALIDATOR_STAKE_AXX × this.
pub const GENESIS_STAKE_MULTIPLIER: u128 = 10;

/// Identical for every genesis validator.
pub const GENESIS_VOTING_POWER: u64 = 1_000_000;

// ── Consensus ────────────────────────────────────────────────────────────────

pub const BLOCK_TIME_SECS: u64 = 6;
pub const BLOCK_MAX_BYTES: u64 = 22_020_096;
pub const BLOCK_MAX_GAS: u64 = 10_000_000;
pub const EVIDENCE_MAX_AGE_NUM_BLOCKS: u64 = 100_000;
/// 48 hours in nanoseconds.
pub const EVIDENCE_MAX_AGE_DURATION_NS: u64 = 172_800_000_000_000;
pub const EVIDENCE_MAX_BYTES: u64 = 1_048_576;

// ── Proof-of-Participation-Consensus ────────────────────────────────────────

/// Blocks between PoPC challenge rounds.
pub const CHALLENGE_INTERVAL_BLOCKS: u64 = 100;

/// Fraction of validators that must verify a challenge, in basis points.
pub const VERIFICATION_THRESHOLD_BPS: u32 = 6_700;

// ── Staking ──────────────────────────────────────────────────────────────────

/// 21 days.
pub const UNBONDING_TIME_SECS: u64 = 1_814_400;
pub const STAKING_MAX_ENTRIES: u32 = 7;
pub const STAKING_HISTORICAL_ENTRIES: u32 = 10_000;

pub const COMMISSION_RATE_BPS: u32 = 1_000;
pub const COMMISSION_MAX_RATE_BPS: u32 = 2_000;
pub const COMMISSION_MAX_CHANGE_RATE_BPS: u32 = 100;

/// Status code the staking module uses for `Bonded`.
pub const BOND_STATUS_BONDED: u8 = 3;

/// Unbonding time of a validator that has never unbonded.
pub const NEVER_UNBONDED_TIME: &str = "1970-01-01T00:00:00Z";

// ── Distribution ─────────────────────────────────────────────────────────────

pub const COMMUNITY_TAX_BPS: u32 = 200;
pub const BASE_PROPOSER_REWARD_BPS: u32 = 100;
pub const BONUS_PROPOSER_REWARD_BPS: u32 = 400;

// ── Governance ───────────────────────────────────────────────────────────────

pub const GOV_MIN_DEPOSIT_AXX: u128 = 10_000;
/// 2 days.
pub const GOV_DEPOSIT_PERIOD_SECS: u64 = 172_800;
/// 2 days.
pub const GOV_VOTING_PERIOD_SECS: u64 = 172_800;
pub const GOV_QUORUM_BPS: u32 = 3_340;
pub const GOV_THRESHOLD_BPS: u32 = 5_000;
pub const GOV_VETO_THRESHOLD_BPS: u32 = 3_340;

// ── Auth ─────────────────────────────────────────────────────────────────────

pub const AUTH_MAX_MEMO_CHARACTERS: u64 = 256;
pub const AUTH_TX_SIG_LIMIT: u64 = 7;
pub const AUTH_TX_SIZE_COST_PER_BYTE: u64 = 10;
pub const AUTH_SIG_VERIFY_COST_ED25519: u64 = 590;
pub const AUTH_SIG_VERIFY_COST_SECP256K1: u64 = 1_000;

// ── Module accounts ──────────────────────────────────────────────────────────

/// Holds the bonded stake of every genesis validator.
pub const BONDED_POOL_MODULE: &str = "bonded_tokens_pool";

/// Holds the community pool (undistributed remainder).
pub const DISTRIBUTION_MODULE: &str = "distribution";

// ── Identity ─────────────────────────────────────────────────────────────────

/// Width of a generated secret, in bytes.
pub const SECRET_LEN: usize = 32;

/// Width of an address, in bytes (rendered as 40 hex digits after `0x`).
pub const ADDRESS_LEN: usize = 20;
