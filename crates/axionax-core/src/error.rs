use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenesisError {
    // ── Identity ─────────────────────────────────────────────────────────────
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("key scheme error: {0}")]
    KeyScheme(String),

    // ── Assembly ─────────────────────────────────────────────────────────────
    #[error("genesis does not reconcile: {0}")]
    Reconciliation(#[from] ReconciliationError),

    #[error("invalid genesis config: {0}")]
    InvalidConfig(String),

    // ── Output ───────────────────────────────────────────────────────────────
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} already exists; refusing to overwrite a previous genesis", .0.display())]
    AlreadyExists(PathBuf),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("secret delivery failed: {0}")]
    SecretDelivery(String),
}

impl GenesisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for GenesisError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Supply, scale or identity checks that failed while assembling genesis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    #[error("supply mismatch for {denom}: declared {declared}, balances sum to {distributed}")]
    SupplyMismatch {
        denom: String,
        declared: u128,
        distributed: u128,
    },

    #[error("{what} was scaled with exponent {used}, but denom metadata declares {declared}")]
    ExponentMismatch {
        what: String,
        used: u32,
        declared: u32,
    },

    #[error("duplicate address {0}")]
    DuplicateAddress(String),

    #[error("validator {name} stake {stake} below minimum {minimum}")]
    StakeBelowMinimum {
        name: String,
        stake: u128,
        minimum: u128,
    },

    #[error("bonded stake {bonded} exceeds undistributed reserve {reserve}")]
    StakeExceedsReserve { bonded: u128, reserve: u128 },

    #[error("bonded pool holds {pool}, but staking records {staked}")]
    BondedPoolMismatch { pool: u128, staked: u128 },

    #[error("too many validators: max {max}, got {got}")]
    TooManyValidators { max: u32, got: u32 },

    #[error("allocations {allocated} exceed declared supply {supply}")]
    AllocationExceedsSupply { allocated: u128, supply: u128 },

    #[error("arithmetic overflow computing {0}")]
    Overflow(String),

    #[error("{what} {text:?} is not a base-unit integer")]
    MalformedAmount { what: String, text: String },

    #[error("{what} {amount} is not a whole number of display units (10^{exponent})")]
    UnscaledAmount {
        what: String,
        amount: u128,
        exponent: u32,
    },

    #[error("no denom metadata declares a display unit for {0}")]
    MissingDenomMetadata(String),

    #[error("validator set mismatch: {0}")]
    ValidatorSetMismatch(String),
}
