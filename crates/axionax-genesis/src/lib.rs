//! axionax-genesis
//!
//! Produces the founding document of an axionax chain: a fresh validator set,
//! funded role accounts and every module's initial state, reconciled so that
//! the bank supply equals the sum of all balances.
//!
//! Testnet allocations (whole AXX, scaled by the display exponent):
//!
//! 1. Faucet          10,000,000
//! 2. Team           100,000,000
//! 3. Rewards pool   200,000,000  (zero address, no key)
//! 4. Community      690,000,000  (validator stake is bonded out of this)
//!
//! Total supply: 1,000,000,000 AXX

pub mod accounts;
pub mod assembler;
pub mod config;
pub mod document;
pub mod emitter;
pub mod pipeline;
pub mod runbook;
pub mod secrets;
pub mod validators;

pub use accounts::{Account, AccountAllocation, AccountAllocationBuilder, AccountRole};
pub use assembler::{verify_document, GenesisAssembler};
pub use config::GenesisConfig;
pub use document::GenesisDocument;
pub use emitter::{read_genesis, stage, to_genesis_bytes, write_atomic, write_genesis, StagedFile};
pub use pipeline::{GenesisBuild, GenesisPipeline, GenesisReport, GENESIS_FILE, RUNBOOK_FILE};
pub use runbook::{render_runbook, write_operator_runbook};
pub use secrets::{
    open_secret_bundle, EncryptedFile, IssuedSecret, KeyfileDirectory, Keyfile, PlaintextConsole,
    RedactingConsole, SecretRole, SecretSink,
};
pub use validators::{Validator, ValidatorSet, ValidatorSetBuilder};
