//! Operator runbook: static instructions, parameterized by chain id, denom,
//! minimum self-stake and validator count.

use std::path::Path;

use axionax_core::error::GenesisError;
use tracing::info;

use crate::config::GenesisConfig;
use crate::document::GenesisValidator;
use crate::emitter::write_atomic;

pub fn render_runbook(config: &GenesisConfig, validator_count: usize) -> Result<String, GenesisError> {
    let chain_id = &config.chain.chain_id;
    let denom = &config.token.base_denom;
    let min_stake = config.min_validator_stake()?;
    let s = &config.staking;

    Ok(format!(
        r#"# Validator Setup Instructions

Chain: {chain_name} (`{chain_id}`)
Genesis validators: {validator_count}

## Prerequisites
- Ubuntu 20.04+ VPS
- 4GB RAM, 2 CPU cores
- 100GB SSD
- Static IP address

## Setup Steps

1. Clone and build the axionax node:
```bash
git clone https://github.com/axionaxprotocol/axionax-core.git
cd axionax-core
cargo build --release
```

2. Initialize the node:
```bash
./target/release/axionax-node init --chain-id {chain_id}
```

3. Install genesis.json:
```bash
cp genesis.json ~/.axionax/config/genesis.json
```

4. Configure the validator key handed to you for this chain:
```bash
echo "YOUR_PRIVATE_KEY" > ~/.axionax/config/priv_validator_key.json
chmod 600 ~/.axionax/config/priv_validator_key.json
```

5. Configure persistent peers (one entry per genesis validator, {validator_count} total):
```bash
# Add to ~/.axionax/config/config.toml
persistent_peers = "validator1@ip1:26656,validator2@ip2:26656,..."
```

6. Start the validator:
```bash
./target/release/axionax-node start
```

7. Create a validator transaction (validators joining after genesis):
```bash
./target/release/axionax-node tx staking create-validator \
  --amount={min_stake}{denom} \
  --pubkey=$(./target/release/axionax-node tendermint show-validator) \
  --moniker="Your Validator Name" \
  --chain-id={chain_id} \
  --commission-rate="{rate}" \
  --commission-max-rate="{max_rate}" \
  --commission-max-change-rate="{max_change_rate}" \
  --min-self-delegation="{min_self_delegation}" \
  --from=validator
```

## Monitoring
- Node status: `curl http://localhost:26657/status`
- Logs: `journalctl -u axionax-node -f`
- Sync status: check `catching_up` in the status response

## Security
- Keep private keys secure and backed up
- Firewall: only allow 26656, 26657, 22
- Enable DDoS protection
- Use monitoring tools (Prometheus/Grafana)
- Back up the validator key regularly

## Support
- Docs: https://docs.axionax.org
- Issues: https://github.com/axionaxprotocol/axionax-core/issues
"#,
        chain_name = config.chain.chain_name,
        rate = s.commission_rate.to_short_string(),
        max_rate = s.commission_max_rate.to_short_string(),
        max_change_rate = s.commission_max_change_rate.to_short_string(),
        min_self_delegation = s.min_self_delegation,
    ))
}

pub fn write_operator_runbook(
    validators: &[GenesisValidator],
    config: &GenesisConfig,
    path: &Path,
) -> Result<(), GenesisError> {
    let text = render_runbook(config, validators.len())?;
    write_atomic(path, text.as_bytes())?;
    info!(path = %path.display(), "operator runbook written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runbook_mentions_chain_and_count() {
        let cfg = GenesisConfig::default();
        let text = render_runbook(&cfg, 4).unwrap();
        assert!(text.starts_with("# Validator Setup Instructions"));
        assert!(text.contains("--chain-id axionax-testnet-1"));
        assert!(text.contains("Genesis validators: 4"));
        assert!(text.contains("--amount=10000000000000000000000axx"));
        assert!(text.contains("--commission-rate=\"0.1\""));
        for heading in ["## Prerequisites", "## Setup Steps", "## Monitoring", "## Security"] {
            assert!(text.contains(heading), "missing {heading}");
        }
        // Every fenced block is closed.
        assert_eq!(text.matches("```").count() % 2, 0);
    }

    #[test]
    fn runbook_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("VALIDATOR_SETUP.md");
        write_operator_runbook(&[], &GenesisConfig::default(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Genesis validators: 0"));
    }
}
