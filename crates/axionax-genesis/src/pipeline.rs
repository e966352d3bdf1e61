//! End-to-end genesis ceremony.
//!
//! validate → validators → accounts → assemble → stage genesis and runbook →
//! deliver secrets → commit runbook → commit genesis. A failure at any step
//! withdraws whatever the secret sink persisted and leaves `out_dir` as it was.

use std::path::{Path, PathBuf};

use axionax_core::constants::{BONDED_POOL_MODULE, DISTRIBUTION_MODULE};
use axionax_core::error::GenesisError;
use axionax_core::types::Balance;
use axionax_crypto::{artifact_digest, module_address, EntropySource, IdentityGenerator};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::accounts::AccountAllocationBuilder;
use crate::assembler::GenesisAssembler;
use crate::config::GenesisConfig;
use crate::document::GenesisDocument;
use crate::emitter::{stage, to_genesis_bytes};
use crate::runbook::render_runbook;
use crate::secrets::{IssuedSecret, SecretSink};
use crate::validators::ValidatorSetBuilder;

pub const GENESIS_FILE: &str = "genesis.json";
pub const RUNBOOK_FILE: &str = "VALIDATOR_SETUP.md";

/// What a completed ceremony produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenesisReport {
    pub chain_id: String,
    pub genesis_path: PathBuf,
    pub runbook_path: PathBuf,
    /// Hex BLAKE3 of the published genesis bytes.
    pub genesis_digest: String,
    pub validators: usize,
    pub accounts: usize,
    pub total_supply: Balance,
    pub bonded: Balance,
    pub community_pool: Balance,
    pub secrets_delivered: usize,
    pub key_scheme: &'static str,
}

/// An assembled document and the secrets behind it, not yet written anywhere.
#[derive(Debug)]
pub struct GenesisBuild {
    pub document: GenesisDocument,
    pub secrets: Vec<IssuedSecret>,
}

pub struct GenesisPipeline<E> {
    config: GenesisConfig,
    generator: IdentityGenerator<E>,
    overwrite: bool,
}

impl<E: EntropySource> GenesisPipeline<E> {
    pub fn new(config: GenesisConfig, entropy: E) -> Result<Self, GenesisError> {
        config.validate()?;
        let scheme = config.validators.key_scheme;
        if !scheme.can_sign() {
            warn!(
                scheme = scheme.scheme().name(),
                "placeholder key scheme: generated keys cannot sign consensus messages"
            );
        }
        Ok(Self {
            generator: IdentityGenerator::new(entropy, scheme.scheme()),
            config,
            overwrite: false,
        })
    }

    /// Allow replacing an existing genesis file in the output directory.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn config(&self) -> &GenesisConfig {
        &self.config
    }

    /// Entropy draws made so far.
    pub fn draws(&self) -> usize {
        self.generator.draws()
    }

    /// Generate identities and assemble a verified document, in memory only.
    pub fn build(&mut self, genesis_time: DateTime<Utc>) -> Result<GenesisBuild, GenesisError> {
        let count = self.config.validators.count;
        let set = ValidatorSetBuilder::new(&self.config).build(count, &mut self.generator)?;
        let allocation = AccountAllocationBuilder::new(&self.config).build(&mut self.generator)?;

        let document = GenesisAssembler::new(&self.config).assemble(
            &set.validators,
            &allocation.accounts,
            genesis_time,
        )?;

        let mut secrets = set.secrets;
        secrets.extend(allocation.secrets);
        Ok(GenesisBuild { document, secrets })
    }

    /// Generate, assemble and hand the secrets to `sink`, but write nothing.
    /// The only way a non-retaining sink such as `RedactingConsole` is used.
    pub fn dry_run(
        &mut self,
        sink: &mut dyn SecretSink,
        genesis_time: DateTime<Utc>,
    ) -> Result<GenesisBuild, GenesisError> {
        let build = self.build(genesis_time)?;
        for secret in &build.secrets {
            sink.deliver(secret)?;
        }
        sink.finish()?;
        info!(
            chain_id = %build.document.chain_id,
            validators = build.document.validators.len(),
            "dry run complete; nothing written"
        );
        Ok(build)
    }

    /// Run the whole ceremony with the current time as genesis time.
    pub fn run(&mut self, out_dir: &Path, sink: &mut dyn SecretSink) -> Result<GenesisReport, GenesisError> {
        self.run_at(out_dir, sink, Utc::now())
    }

    /// Either every artifact is in place afterwards (genesis, runbook, the
    /// sink's secrets) or none of them is.
    pub fn run_at(
        &mut self,
        out_dir: &Path,
        sink: &mut dyn SecretSink,
        genesis_time: DateTime<Utc>,
    ) -> Result<GenesisReport, GenesisError> {
        if !sink.retains_secrets() {
            return Err(GenesisError::SecretDelivery(
                "this sink discards every secret; a genesis cannot be published through it".into(),
            ));
        }
        let genesis_path = out_dir.join(GENESIS_FILE);
        let runbook_path = out_dir.join(RUNBOOK_FILE);
        if genesis_path.exists() && !self.overwrite {
            return Err(GenesisError::AlreadyExists(genesis_path));
        }

        info!(
            chain_id = %self.config.chain.chain_id,
            validators = self.config.validators.count,
            out_dir = %out_dir.display(),
            "genesis ceremony started"
        );

        let GenesisBuild { document, secrets } = self.build(genesis_time)?;
        let genesis_bytes = to_genesis_bytes(&document)?;
        let runbook = render_runbook(&self.config, document.validators.len())?;

        // Nothing is visible under a final name until every secret is delivered.
        let staged_genesis = stage(&genesis_path, &genesis_bytes)?;
        let staged_runbook = stage(&runbook_path, runbook.as_bytes())?;

        let published = deliver_all(sink, &secrets).and_then(|_| {
            staged_runbook.commit()?;
            // Genesis goes last: its presence marks a finished ceremony.
            staged_genesis.commit().map_err(|e| {
                let _ = std::fs::remove_file(&runbook_path);
                e
            })
        });
        if let Err(e) = published {
            if let Err(abort_err) = sink.abort() {
                warn!(error = %abort_err, "could not withdraw delivered secrets");
            }
            return Err(e);
        }
        info!(path = %genesis_path.display(), bytes = genesis_bytes.len(), "genesis written");

        let denom = self.config.token.base_denom.as_str();
        let report = GenesisReport {
            chain_id: document.chain_id.clone(),
            genesis_path,
            runbook_path,
            genesis_digest: hex::encode(artifact_digest(&genesis_bytes)),
            validators: document.validators.len(),
            accounts: document.app_state.accounts.len(),
            total_supply: document.declared_supply(denom)?.unwrap_or_default(),
            bonded: document.bank_balance_of(&module_address(BONDED_POOL_MODULE), denom)?,
            community_pool: document
                .bank_balance_of(&module_address(DISTRIBUTION_MODULE), denom)?,
            secrets_delivered: secrets.len(),
            key_scheme: self.generator.scheme().name(),
        };
        info!(
            chain_id = %report.chain_id,
            validators = report.validators,
            digest = %report.genesis_digest,
            draws = self.generator.draws(),
            "genesis ceremony complete"
        );
        Ok(report)
    }
}

fn deliver_all(sink: &mut dyn SecretSink, secrets: &[IssuedSecret]) -> Result<(), GenesisError> {
    for secret in secrets {
        sink.deliver(secret)?;
    }
    sink.finish()
}
