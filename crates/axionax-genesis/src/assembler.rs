//! Composes every module section into one `GenesisDocument` and refuses to
//! return a document whose numbers do not reconcile.
//!
//! Funding of bonded stake: validator stake is debited from the undistributed
//! community allocation and held by the `bonded_tokens_pool` module account.
//! Whatever is left becomes the community pool, held by the `distribution`
//! module account. So:
//!
//!   Σ role balances + bonded pool + community pool == declared supply
//!   Σ staking `tokens`                              == bonded pool
//!
//! Staking `tokens` are a record of the pool balance, never a second balance.

use std::collections::HashSet;

use axionax_core::constants::{
    BONDED_POOL_MODULE, BOND_STATUS_BONDED, DISTRIBUTION_MODULE, NEVER_UNBONDED_TIME,
};
use axionax_core::error::{GenesisError, ReconciliationError};
use axionax_core::types::{parse_balance, scale_to_base, Address, Balance};
use axionax_crypto::module_address;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};

use crate::accounts::Account;
use crate::config::GenesisConfig;
use crate::document::*;
use crate::validators::Validator;

pub struct GenesisAssembler<'a> {
    config: &'a GenesisConfig,
}

impl<'a> GenesisAssembler<'a> {
    pub fn new(config: &'a GenesisConfig) -> Self {
        Self { config }
    }

    pub fn assemble(
        &self,
        validators: &[Validator],
        accounts: &[Account],
        genesis_time: DateTime<Utc>,
    ) -> Result<GenesisDocument, GenesisError> {
        let cfg = self.config;
        let denom = cfg.token.base_denom.as_str();
        let metadata = self.denom_metadata();
        let exponent = metadata.display_exponent().ok_or_else(|| {
            GenesisError::InvalidConfig(format!("no denom unit for {}", metadata.display))
        })?;

        // ── Scaling ──────────────────────────────────────────────────────────
        for account in accounts {
            let expected = scale_to_base(account.whole_tokens, exponent)
                .ok_or_else(|| ReconciliationError::Overflow(format!("{:?} balance", account.role)))?;
            if account.exponent != exponent || account.balance != expected {
                return Err(ReconciliationError::ExponentMismatch {
                    what: format!("{:?} allocation", account.role),
                    used: account.exponent,
                    declared: exponent,
                }
                .into());
            }
        }

        // ── Validator set ────────────────────────────────────────────────────
        let max = cfg.validators.max_validators;
        if validators.len() > max as usize {
            return Err(ReconciliationError::TooManyValidators {
                max,
                got: validators.len() as u32,
            }
            .into());
        }
        let minimum = cfg.min_validator_stake()?;
        if let Some(v) = validators.iter().find(|v| v.stake < minimum) {
            return Err(ReconciliationError::StakeBelowMinimum {
                name: v.name.clone(),
                stake: v.stake,
                minimum,
            }
            .into());
        }

        // ── Supply split ─────────────────────────────────────────────────────
        let total_supply = cfg.total_supply()?;
        let allocated = sum(accounts.iter().map(|a| a.balance), "role balances")?;
        let reserve = total_supply.checked_sub(allocated).ok_or(
            ReconciliationError::AllocationExceedsSupply {
                allocated,
                supply: total_supply,
            },
        )?;
        let bonded = sum(validators.iter().map(|v| v.stake), "bonded stake")?;
        let community = reserve
            .checked_sub(bonded)
            .ok_or(ReconciliationError::StakeExceedsReserve { bonded, reserve })?;
        debug!(%total_supply, %allocated, %bonded, %community, "supply split");

        // ── Sections ─────────────────────────────────────────────────────────
        let genesis_time = genesis_time.to_rfc3339_opts(SecondsFormat::Micros, true);
        let bonded_pool = module_address(BONDED_POOL_MODULE);
        let distribution_pool = module_address(DISTRIBUTION_MODULE);

        let mut balances: Vec<BankBalance> = accounts
            .iter()
            .map(|a| bank_balance(a.address, denom, a.balance))
            .collect();
        balances.push(bank_balance(bonded_pool, denom, bonded));
        balances.push(bank_balance(distribution_pool, denom, community));

        let doc = GenesisDocument {
            genesis_time: genesis_time.clone(),
            chain_id: cfg.chain.chain_id.clone(),
            chain_name: cfg.chain.chain_name.clone(),
            consensus_params: self.consensus_params()?,
            popc_params: PopcParams {
                challenge_interval: cfg.popc.challenge_interval,
                verification_threshold: cfg.popc.verification_threshold.to_short_string(),
                max_validators: max,
                min_validator_stake: minimum.to_string(),
            },
            validators: validators.iter().map(genesis_validator).collect(),
            app_hash: String::new(),
            app_state: AppState {
                accounts: accounts
                    .iter()
                    .map(|a| GenesisAccount {
                        address: a.address,
                        balance: a.balance.to_string(),
                        role: a.role,
                    })
                    .collect(),
                auth: self.auth_state(),
                bank: BankState {
                    params: BankParams {
                        send_enabled: true,
                        default_send_enabled: true,
                    },
                    balances,
                    supply: vec![Coin::new(denom, total_supply)],
                    denom_metadata: vec![metadata],
                },
                staking: StakingState {
                    params: StakingParams {
                        unbonding_time: format!("{}s", cfg.staking.unbonding_time_secs),
                        max_validators: max,
                        max_entries: cfg.staking.max_entries,
                        historical_entries: cfg.staking.historical_entries,
                        bond_denom: denom.to_string(),
                    },
                    validators: validators
                        .iter()
                        .map(|v| self.staking_validator(v, &genesis_time))
                        .collect(),
                },
                distribution: DistributionState {
                    params: DistributionParams {
                        community_tax: cfg.distribution.community_tax.to_string(),
                        base_proposer_reward: cfg.distribution.base_proposer_reward.to_string(),
                        bonus_proposer_reward: cfg.distribution.bonus_proposer_reward.to_string(),
                        withdraw_addr_enabled: cfg.distribution.withdraw_addr_enabled,
                    },
                    fee_pool: FeePool {
                        community_pool: vec![Coin {
                            denom: denom.to_string(),
                            amount: format!("{community}.000000000000000000"),
                        }],
                    },
                },
                gov: self.gov_state()?,
            },
        };

        verify_document(&doc)?;
        info!(
            chain_id = %doc.chain_id,
            validators = doc.validators.len(),
            accounts = doc.app_state.accounts.len(),
            %total_supply,
            "genesis assembled and reconciled"
        );
        Ok(doc)
    }

    fn denom_metadata(&self) -> DenomMetadata {
        let token = &self.config.token;
        DenomMetadata {
            description: token.description.clone(),
            denom_units: vec![
                DenomUnit {
                    denom: token.base_denom.clone(),
                    exponent: 0,
                    aliases: token.base_aliases.clone(),
                },
                DenomUnit {
                    denom: token.display_denom.clone(),
                    exponent: token.exponent,
                    aliases: Vec::new(),
                },
            ],
            base: token.base_denom.clone(),
            display: token.display_denom.clone(),
            name: token.name.clone(),
            symbol: token.symbol.clone(),
        }
    }

    fn consensus_params(&self) -> Result<ConsensusParams, ReconciliationError> {
        let c = &self.config.consensus;
        Ok(ConsensusParams {
            block: BlockParams {
                max_bytes: c.block_max_bytes.to_string(),
                max_gas: c.block_max_gas.to_string(),
                time_iota_ms: self.config.block_time_ms()?.to_string(),
            },
            evidence: EvidenceParams {
                max_age_num_blocks: c.evidence_max_age_num_blocks.to_string(),
                max_age_duration: c.evidence_max_age_duration_ns.to_string(),
                max_bytes: c.evidence_max_bytes.to_string(),
            },
            validator: ValidatorParams {
                pub_key_types: c.pub_key_types.clone(),
            },
            version: VersionParams::default(),
        })
    }

    fn auth_state(&self) -> AuthState {
        let a = &self.config.auth;
        AuthState {
            params: AuthParams {
                max_memo_characters: a.max_memo_characters.to_string(),
                tx_sig_limit: a.tx_sig_limit.to_string(),
                tx_size_cost_per_byte: a.tx_size_cost_per_byte.to_string(),
                sig_verify_cost_ed25519: a.sig_verify_cost_ed25519.to_string(),
                sig_verify_cost_secp256k1: a.sig_verify_cost_secp256k1.to_string(),
            },
        }
    }

    fn staking_validator(&self, v: &Validator, genesis_time: &str) -> StakingValidator {
        let s = &self.config.staking;
        StakingValidator {
            operator_address: v.address,
            consensus_pubkey: pub_key(v),
            jailed: false,
            status: BOND_STATUS_BONDED,
            tokens: v.stake.to_string(),
            delegator_shares: v.stake.to_string(),
            description: ValidatorDescription {
                moniker: v.name.clone(),
                identity: String::new(),
                website: String::new(),
                security_contact: String::new(),
                details: format!("Genesis validator for {}", self.config.chain.chain_name),
            },
            unbonding_height: "0".into(),
            unbonding_time: NEVER_UNBONDED_TIME.into(),
            commission: Commission {
                commission_rates: CommissionRates {
                    rate: s.commission_rate.to_string(),
                    max_rate: s.commission_max_rate.to_string(),
                    max_change_rate: s.commission_max_change_rate.to_string(),
                },
                update_time: genesis_time.to_string(),
            },
            min_self_delegation: s.min_self_delegation.to_string(),
        }
    }

    fn gov_state(&self) -> Result<GovState, ReconciliationError> {
        let g = &self.config.gov;
        Ok(GovState {
            starting_proposal_id: "1".into(),
            deposits: Vec::new(),
            votes: Vec::new(),
            proposals: Vec::new(),
            deposit_params: DepositParams {
                min_deposit: vec![Coin::new(
                    &self.config.token.base_denom,
                    self.config.scaled(g.min_deposit, "gov min deposit")?,
                )],
                max_deposit_period: format!("{}s", g.max_deposit_period_secs),
            },
            voting_params: VotingParams {
                voting_period: format!("{}s", g.voting_period_secs),
            },
            tally_params: TallyParams {
                quorum: g.quorum.to_string(),
                threshold: g.threshold.to_string(),
                veto_threshold: g.veto_threshold.to_string(),
            },
        })
    }
}

fn sum(values: impl Iterator<Item = Balance>, what: &str) -> Result<Balance, ReconciliationError> {
    let mut total: Balance = 0;
    for v in values {
        total = total
            .checked_add(v)
            .ok_or_else(|| ReconciliationError::Overflow(what.to_string()))?;
    }
    Ok(total)
}

fn bank_balance(address: Address, denom: &str, amount: Balance) -> BankBalance {
    BankBalance {
        address,
        coins: vec![Coin::new(denom, amount)],
    }
}

fn pub_key(v: &Validator) -> PubKey {
    PubKey {
        key_type: v.pub_key_type.clone(),
        value: v.public_key.clone(),
    }
}

fn genesis_validator(v: &Validator) -> GenesisValidator {
    GenesisValidator {
        address: v.address,
        pub_key: pub_key(v),
        power: v.voting_power.to_string(),
        name: v.name.clone(),
        stake: v.stake.to_string(),
    }
}

/// Re-check an assembled (or deserialized) document.
///
/// Bank supply equals the sum of bank balances; no address appears twice;
/// every role account's listed balance matches its bank balance and is a
/// whole number of display units; the top-level validator list mirrors the
/// staking validators; staking tokens equal the bonded pool and meet the
/// PoPC minimum stake.
pub fn verify_document(doc: &GenesisDocument) -> Result<(), ReconciliationError> {
    let denom = doc.app_state.staking.params.bond_denom.as_str();
    let exponent = doc
        .app_state
        .bank
        .denom_metadata
        .iter()
        .find(|m| m.base == denom)
        .and_then(|m| m.display_exponent())
        .ok_or_else(|| ReconciliationError::MissingDenomMetadata(denom.to_string()))?;
    let unit = 10u128
        .checked_pow(exponent)
        .ok_or_else(|| ReconciliationError::Overflow(format!("10^{exponent}")))?;

    let declared = doc.declared_supply(denom)?.unwrap_or(0);
    let distributed = doc.balance_sum(denom)?;
    if declared != distributed {
        return Err(ReconciliationError::SupplyMismatch {
            denom: denom.to_string(),
            declared,
            distributed,
        });
    }

    let mut seen = HashSet::new();
    for addr in doc.addresses() {
        if !seen.insert(addr) {
            return Err(ReconciliationError::DuplicateAddress(addr.to_hex()));
        }
    }

    for account in &doc.app_state.accounts {
        let listed = parse_balance(&account.balance, "account balance")?;
        if listed % unit != 0 {
            return Err(ReconciliationError::UnscaledAmount {
                what: format!("{:?} balance", account.role),
                amount: listed,
                exponent,
            });
        }
        let banked = doc.bank_balance_of(&account.address, denom)?;
        if listed != banked {
            return Err(ReconciliationError::SupplyMismatch {
                denom: format!("{denom} at {}", account.address),
                declared: listed,
                distributed: banked,
            });
        }
    }

    verify_validator_mirror(doc)?;

    let minimum = parse_balance(&doc.popc_params.min_validator_stake, "min_validator_stake")?;
    let mut staked: Balance = 0;
    for v in &doc.app_state.staking.validators {
        let tokens = parse_balance(&v.tokens, "validator tokens")?;
        if tokens < minimum {
            return Err(ReconciliationError::StakeBelowMinimum {
                name: v.description.moniker.clone(),
                stake: tokens,
                minimum,
            });
        }
        staked = staked
            .checked_add(tokens)
            .ok_or_else(|| ReconciliationError::Overflow("staked tokens".into()))?;
    }
    let pool = doc.bank_balance_of(&module_address(BONDED_POOL_MODULE), denom)?;
    if pool != staked {
        return Err(ReconciliationError::BondedPoolMismatch { pool, staked });
    }

    Ok(())
}

/// Top-level `validators[i]` and `staking.validators[i]` describe the same
/// validator: same address, same stake.
fn verify_validator_mirror(doc: &GenesisDocument) -> Result<(), ReconciliationError> {
    let top = &doc.validators;
    let staking = &doc.app_state.staking.validators;
    if top.len() != staking.len() {
        return Err(ReconciliationError::ValidatorSetMismatch(format!(
            "{} top-level validators, {} staking validators",
            top.len(),
            staking.len()
        )));
    }
    for (i, (v, s)) in top.iter().zip(staking).enumerate() {
        if v.address != s.operator_address {
            return Err(ReconciliationError::ValidatorSetMismatch(format!(
                "validator {i}: address {} but operator {}",
                v.address, s.operator_address
            )));
        }
        let stake = parse_balance(&v.stake, "validator stake")?;
        let tokens = parse_balance(&s.tokens, "validator tokens")?;
        if stake != tokens {
            return Err(ReconciliationError::ValidatorSetMismatch(format!(
                "validator {i} ({}): stake {stake} but staking tokens {tokens}",
                v.address
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountAllocation, AccountAllocationBuilder};
    use crate::validators::{ValidatorSet, ValidatorSetBuilder};
    use axionax_crypto::{DigestKeyScheme, IdentityGenerator, SeededEntropy};
    use chrono::TimeZone;

    const AXX: u128 = 1_000_000_000_000_000_000;

    fn fixture(cfg: &GenesisConfig, count: u32) -> (ValidatorSet, AccountAllocation) {
        let mut gen = IdentityGenerator::new(SeededEntropy::new(11), Box::new(DigestKeyScheme));
        let set = ValidatorSetBuilder::new(cfg).build(count, &mut gen).unwrap();
        let alloc = AccountAllocationBuilder::new(cfg).build(&mut gen).unwrap();
        (set, alloc)
    }

    fn genesis_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn assemble(cfg: &GenesisConfig, count: u32) -> GenesisDocument {
        let (set, alloc) = fixture(cfg, count);
        GenesisAssembler::new(cfg)
            .assemble(&set.validators, &alloc.accounts, genesis_time())
            .unwrap()
    }

    fn reconciliation(err: GenesisError) -> ReconciliationError {
        match err {
            GenesisError::Reconciliation(r) => r,
            other => panic!("expected reconciliation error, got {other}"),
        }
    }

    #[test]
    fn four_bonded_validators() {
        let cfg = GenesisConfig::default();
        let doc = assemble(&cfg, 4);

        assert_eq!(doc.validators.len(), 4);
        assert_eq!(doc.app_state.staking.validators.len(), 4);
        for (top, staked) in doc.validators.iter().zip(&doc.app_state.staking.validators) {
            assert_eq!(top.address, staked.operator_address);
            assert_eq!(staked.status, BOND_STATUS_BONDED);
            assert!(!staked.jailed);
            assert_eq!(staked.unbonding_height, "0");
            assert_eq!(staked.unbonding_time, NEVER_UNBONDED_TIME);
            assert_eq!(staked.tokens, (10_000 * 10 * AXX).to_string());
            assert_eq!(staked.delegator_shares, staked.tokens);
            assert_eq!(top.stake, staked.tokens);
        }
    }

    #[test]
    fn bank_supply_equals_balances() {
        let cfg = GenesisConfig::default();
        let doc = assemble(&cfg, 4);
        let declared = doc.declared_supply("axx").unwrap().unwrap();
        assert_eq!(declared, 1_000_000_000 * AXX);
        assert_eq!(doc.balance_sum("axx").unwrap(), declared);
    }

    #[test]
    fn stake_is_funded_from_community_reserve() {
        let cfg = GenesisConfig::default();
        let doc = assemble(&cfg, 4);

        let bonded = doc
            .bank_balance_of(&module_address(BONDED_POOL_MODULE), "axx")
            .unwrap();
        assert_eq!(bonded, 4 * 100_000 * AXX);

        let community = doc
            .bank_balance_of(&module_address(DISTRIBUTION_MODULE), "axx")
            .unwrap();
        assert_eq!(community, 690_000_000 * AXX - bonded);
        assert_eq!(
            doc.app_state.distribution.fee_pool.community_pool[0].amount,
            format!("{community}.000000000000000000")
        );
    }

    #[test]
    fn role_accounts_are_listed_and_banked() {
        let cfg = GenesisConfig::default();
        let doc = assemble(&cfg, 4);
        assert_eq!(doc.app_state.accounts.len(), 3);
        for acc in &doc.app_state.accounts {
            assert_eq!(
                doc.bank_balance_of(&acc.address, "axx").unwrap().to_string(),
                acc.balance
            );
        }
        assert_eq!(doc.app_state.accounts[2].address, Address::ZERO);
    }

    #[test]
    fn addresses_pairwise_distinct() {
        let cfg = GenesisConfig::default();
        let doc = assemble(&cfg, 10);
        let addrs = doc.addresses();
        let unique: HashSet<_> = addrs.iter().collect();
        assert_eq!(unique.len(), addrs.len());
        assert_eq!(addrs.len(), 10 + 3 + 2);
    }

    #[test]
    fn wire_encoding_matches_node_schema() {
        let cfg = GenesisConfig::default();
        let doc = assemble(&cfg, 2);
        let v = serde_json::to_value(&doc).unwrap();

        assert_eq!(v["genesis_time"], "2026-01-15T12:00:00.000000Z");
        assert_eq!(v["chain_id"], "axionax-testnet-1");
        assert_eq!(v["app_hash"], "");
        assert_eq!(v["consensus_params"]["block"]["time_iota_ms"], "6000");
        assert_eq!(v["consensus_params"]["version"], serde_json::json!({}));
        assert_eq!(v["popc_params"]["challenge_interval"], 100);
        assert_eq!(v["popc_params"]["verification_threshold"], "0.67");
        assert_eq!(
            v["popc_params"]["min_validator_stake"],
            (10_000 * AXX).to_string()
        );
        assert_eq!(v["validators"][0]["power"], "1000000");
        assert_eq!(v["validators"][0]["pub_key"]["type"], "tendermint/PubKeyEd25519");
        assert_eq!(v["app_state"]["accounts"][0]["type"], "faucet");
        assert_eq!(v["app_state"]["accounts"][2]["type"], "rewards_pool");
        assert_eq!(
            v["app_state"]["bank"]["denom_metadata"][0]["denom_units"][1]["exponent"],
            18
        );
        assert_eq!(v["app_state"]["staking"]["params"]["unbonding_time"], "1814400s");
        assert_eq!(v["app_state"]["staking"]["validators"][0]["status"], 3);
        assert_eq!(
            v["app_state"]["staking"]["validators"][0]["commission"]["commission_rates"]["rate"],
            "0.100000000000000000"
        );
        assert_eq!(
            v["app_state"]["distribution"]["params"]["community_tax"],
            "0.020000000000000000"
        );
        assert_eq!(
            v["app_state"]["gov"]["deposit_params"]["min_deposit"][0]["amount"],
            "10000000000000000000000"
        );
        assert_eq!(v["app_state"]["gov"]["tally_params"]["quorum"], "0.334000000000000000");
        assert_eq!(v["app_state"]["gov"]["proposals"], serde_json::json!([]));
    }

    #[test]
    fn exponent_drift_aborts() {
        let cfg = GenesisConfig::default();
        let (set, mut alloc) = fixture(&cfg, 4);
        alloc.accounts[1].exponent = 6;
        alloc.accounts[1].balance = alloc.accounts[1].whole_tokens * 1_000_000;

        let err = GenesisAssembler::new(&cfg)
            .assemble(&set.validators, &alloc.accounts, genesis_time())
            .unwrap_err();
        assert!(matches!(
            reconciliation(err),
            ReconciliationError::ExponentMismatch { used: 6, declared: 18, .. }
        ));
    }

    #[test]
    fn duplicate_address_aborts() {
        let cfg = GenesisConfig::default();
        let (set, mut alloc) = fixture(&cfg, 4);
        alloc.accounts[0].address = set.validators[2].address;

        let err = GenesisAssembler::new(&cfg)
            .assemble(&set.validators, &alloc.accounts, genesis_time())
            .unwrap_err();
        assert!(matches!(
            reconciliation(err),
            ReconciliationError::DuplicateAddress(_)
        ));
    }

    #[test]
    fn understaked_validator_aborts() {
        let cfg = GenesisConfig::default();
        let (mut set, alloc) = fixture(&cfg, 4);
        set.validators[3].stake = cfg.min_validator_stake().unwrap() - 1;

        let err = GenesisAssembler::new(&cfg)
            .assemble(&set.validators, &alloc.accounts, genesis_time())
            .unwrap_err();
        assert!(matches!(
            reconciliation(err),
            ReconciliationError::StakeBelowMinimum { .. }
        ));
    }

    #[test]
    fn allocations_beyond_supply_abort() {
        let cfg = GenesisConfig::default();
        let (set, alloc) = fixture(&cfg, 4);
        let mut small = cfg.clone();
        small.supply.total = 300_000_000;

        let err = GenesisAssembler::new(&small)
            .assemble(&set.validators, &alloc.accounts, genesis_time())
            .unwrap_err();
        assert!(matches!(
            reconciliation(err),
            ReconciliationError::AllocationExceedsSupply { .. }
        ));
    }

    #[test]
    fn stake_beyond_reserve_aborts() {
        let cfg = GenesisConfig::default();
        let (set, alloc) = fixture(&cfg, 4);
        let mut tight = cfg.clone();
        tight.supply.total = 310_000_000 + 100_000;

        let err = GenesisAssembler::new(&tight)
            .assemble(&set.validators, &alloc.accounts, genesis_time())
            .unwrap_err();
        assert!(matches!(
            reconciliation(err),
            ReconciliationError::StakeExceedsReserve { .. }
        ));
    }

    #[test]
    fn verify_catches_tampered_balance() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        doc.app_state.bank.balances[0].coins[0].amount = "1".into();
        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::SupplyMismatch { .. })
        ));
    }

    #[test]
    fn verify_catches_dropped_top_level_validator() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        doc.validators.pop();
        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::ValidatorSetMismatch(_))
        ));
    }

    #[test]
    fn verify_catches_swapped_operator() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        doc.validators.swap(0, 1);
        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::ValidatorSetMismatch(_))
        ));
    }

    #[test]
    fn verify_catches_stake_disagreeing_with_tokens() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        doc.validators[2].stake = (1_000_000 * AXX).to_string();
        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::ValidatorSetMismatch(_))
        ));
    }

    #[test]
    fn verify_catches_balance_scaled_below_display_unit() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        // Faucet rescaled from 10^18 to 10^6 per token, with the distribution
        // pool absorbing the difference so supply still reconciles.
        let faucet = doc.app_state.accounts[0].address;
        let listed: Balance = doc.app_state.accounts[0].balance.parse().unwrap();
        let rescaled = listed / 1_000_000_000_000 + 1;
        let community = doc
            .bank_balance_of(&module_address(DISTRIBUTION_MODULE), "axx")
            .unwrap();
        for bal in &mut doc.app_state.bank.balances {
            if bal.address == faucet {
                bal.coins[0].amount = rescaled.to_string();
            } else if bal.address == module_address(DISTRIBUTION_MODULE) {
                bal.coins[0].amount = (community + listed - rescaled).to_string();
            }
        }
        doc.app_state.accounts[0].balance = rescaled.to_string();

        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::UnscaledAmount { exponent: 18, .. })
        ));
    }

    #[test]
    fn verify_requires_display_unit_metadata() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        doc.app_state.bank.denom_metadata.clear();
        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::MissingDenomMetadata(ref d)) if d == "axx"
        ));
    }

    #[test]
    fn verify_reports_malformed_amounts() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        doc.app_state.bank.supply[0].amount = "12abc".into();
        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::MalformedAmount { ref text, .. }) if text == "12abc"
        ));
    }

    #[test]
    fn verify_catches_unfunded_stake() {
        let cfg = GenesisConfig::default();
        let mut doc = assemble(&cfg, 4);
        doc.app_state.staking.validators[0].tokens = (1_000_000 * AXX).to_string();
        doc.validators[0].stake = (1_000_000 * AXX).to_string();
        assert!(matches!(
            verify_document(&doc),
            Err(ReconciliationError::BondedPoolMismatch { .. })
        ));
    }
}
