//! Delivery of generated secret material.
//!
//! Nothing but this process ever sees a genesis secret, so whatever sink is
//! chosen here is the whole distribution story. The operator owns that trust
//! boundary. `RedactingConsole` never reveals a secret and therefore only
//! serves dry runs: a genesis is never published through it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use axionax_core::error::GenesisError;
use axionax_crypto::{open_sealed, seal_with, EntropySource, Identity, KdfParams, OsEntropy};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::emitter::write_atomic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretRole {
    Validator,
    Faucet,
    Team,
}

/// A freshly generated identity waiting to be handed to its operator.
#[derive(Debug)]
pub struct IssuedSecret {
    /// File-name safe label, e.g. `validator-3`, `faucet`.
    pub label: String,
    /// Human-readable title, e.g. `Genesis Validator 3`.
    pub title: String,
    pub role: SecretRole,
    pub key_scheme: &'static str,
    pub identity: Identity,
}

impl IssuedSecret {
    fn keyfile(&self) -> Keyfile {
        Keyfile {
            label: self.label.clone(),
            role: self.role,
            key_scheme: self.key_scheme.to_string(),
            address: self.identity.address.to_hex(),
            public_key: self.identity.public_key.to_hex(),
            secret_key: self.identity.secret().expose_hex(),
        }
    }
}

/// On-disk form of one identity. The secret is wiped on drop.
#[derive(Serialize, Deserialize)]
pub struct Keyfile {
    pub label: String,
    pub role: SecretRole,
    pub key_scheme: String,
    pub address: String,
    pub public_key: String,
    pub secret_key: String,
}

impl Drop for Keyfile {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl std::fmt::Debug for Keyfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Keyfile {{ label: {}, address: {} }}", self.label, self.address)
    }
}

/// Capability that receives every generated secret exactly once.
pub trait SecretSink {
    fn deliver(&mut self, secret: &IssuedSecret) -> Result<(), GenesisError>;

    /// Called once after the last secret.
    fn finish(&mut self) -> Result<(), GenesisError> {
        Ok(())
    }

    /// A later ceremony step failed: withdraw whatever was persisted so far.
    fn abort(&mut self) -> Result<(), GenesisError> {
        Ok(())
    }

    /// False when delivered secrets cannot be recovered afterwards.
    fn retains_secrets(&self) -> bool {
        true
    }
}

fn print_banner<W: Write>(out: &mut W, secret: &IssuedSecret, secret_text: &str) -> std::io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{}:", secret.title)?;
    writeln!(out, "  Address:     {}", secret.identity.address)?;
    writeln!(out, "  Public Key:  {}", secret.identity.public_key)?;
    writeln!(out, "  Private Key: {secret_text}")?;
    writeln!(out, "{rule}")
}

fn console_err(e: std::io::Error) -> GenesisError {
    GenesisError::SecretDelivery(format!("console write failed: {e}"))
}

// ── RedactingConsole ─────────────────────────────────────────────────────────

/// Prints addresses and public keys; secrets are replaced by `<redacted>`.
pub struct RedactingConsole<W: Write = std::io::Stdout> {
    out: W,
}

impl RedactingConsole {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write> RedactingConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SecretSink for RedactingConsole<W> {
    fn deliver(&mut self, secret: &IssuedSecret) -> Result<(), GenesisError> {
        print_banner(&mut self.out, secret, "<redacted>").map_err(console_err)
    }

    fn finish(&mut self) -> Result<(), GenesisError> {
        warn!("secrets were redacted and are not recoverable; choose another sink to keep them");
        self.out.flush().map_err(console_err)
    }

    fn retains_secrets(&self) -> bool {
        false
    }
}

// ── PlaintextConsole ─────────────────────────────────────────────────────────

/// Prints every secret in full. Anything reading the console reads the keys.
pub struct PlaintextConsole<W: Write = std::io::Stdout> {
    out: W,
}

impl PlaintextConsole {
    pub fn stdout() -> Self {
        Self { out: std::io::stdout() }
    }
}

impl<W: Write> PlaintextConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SecretSink for PlaintextConsole<W> {
    fn deliver(&mut self, secret: &IssuedSecret) -> Result<(), GenesisError> {
        warn!(label = %secret.label, "printing secret key in plaintext");
        let secret_text = Zeroizing::new(secret.identity.secret().expose_hex());
        print_banner(&mut self.out, secret, &secret_text).map_err(console_err)?;
        writeln!(self.out, "  KEEP THIS PRIVATE KEY SECURE!").map_err(console_err)
    }

    fn finish(&mut self) -> Result<(), GenesisError> {
        self.out.flush().map_err(console_err)
    }
}

// ── KeyfileDirectory ─────────────────────────────────────────────────────────

/// One `<label>.json` keyfile per identity. Never overwrites; mode 0600 on unix.
pub struct KeyfileDirectory {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl KeyfileDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

fn create_private_file(path: &Path) -> std::io::Result<std::fs::File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    opts.open(path)
}

impl SecretSink for KeyfileDirectory {
    fn deliver(&mut self, secret: &IssuedSecret) -> Result<(), GenesisError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| GenesisError::io(&self.dir, e))?;
        let path = self.dir.join(format!("{}.json", secret.label));
        let json = Zeroizing::new(serde_json::to_vec_pretty(&secret.keyfile())?);

        let mut file = create_private_file(&path).map_err(|e| GenesisError::io(&path, e))?;
        file.write_all(&json)
            .and_then(|_| file.sync_all())
            .map_err(|e| GenesisError::io(&path, e))?;

        info!(label = %secret.label, path = %path.display(), "keyfile written");
        self.written.push(path);
        Ok(())
    }

    fn abort(&mut self) -> Result<(), GenesisError> {
        for path in self.written.drain(..) {
            std::fs::remove_file(&path).map_err(|e| GenesisError::io(&path, e))?;
            warn!(path = %path.display(), "keyfile withdrawn");
        }
        Ok(())
    }
}

// ── EncryptedFile ────────────────────────────────────────────────────────────

/// Collects every secret and seals them into one passphrase-encrypted bundle.
pub struct EncryptedFile {
    path: PathBuf,
    passphrase: Zeroizing<String>,
    pending: Vec<Keyfile>,
    entropy: Box<dyn EntropySource>,
    kdf: KdfParams,
    sealed: bool,
}

impl EncryptedFile {
    pub fn new(path: impl Into<PathBuf>, passphrase: String) -> Self {
        Self::with_entropy(path, passphrase, Box::new(OsEntropy))
    }

    pub fn with_entropy(
        path: impl Into<PathBuf>,
        passphrase: String,
        entropy: Box<dyn EntropySource>,
    ) -> Self {
        Self {
            path: path.into(),
            passphrase: Zeroizing::new(passphrase),
            pending: Vec::new(),
            entropy,
            kdf: KdfParams::default(),
            sealed: false,
        }
    }

    /// Override the Argon2id cost parameters written into the bundle.
    pub fn kdf_params(mut self, kdf: KdfParams) -> Self {
        self.kdf = kdf;
        self
    }
}

impl SecretSink for EncryptedFile {
    fn deliver(&mut self, secret: &IssuedSecret) -> Result<(), GenesisError> {
        self.pending.push(secret.keyfile());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), GenesisError> {
        if self.path.exists() {
            return Err(GenesisError::AlreadyExists(self.path.clone()));
        }
        let json = Zeroizing::new(serde_json::to_vec(&self.pending)?);
        let sealed = seal_with(&self.passphrase, &json, self.kdf, self.entropy.as_mut())?;
        write_atomic(&self.path, &sealed)?;
        self.sealed = true;
        info!(
            secrets = self.pending.len(),
            path = %self.path.display(),
            "sealed secret bundle written"
        );
        self.pending.clear();
        Ok(())
    }

    fn abort(&mut self) -> Result<(), GenesisError> {
        self.pending.clear();
        if std::mem::take(&mut self.sealed) {
            std::fs::remove_file(&self.path).map_err(|e| GenesisError::io(&self.path, e))?;
            warn!(path = %self.path.display(), "sealed secret bundle withdrawn");
        }
        Ok(())
    }
}

/// Decrypt a bundle written by [`EncryptedFile`].
pub fn open_secret_bundle(path: &Path, passphrase: &str) -> Result<Vec<Keyfile>, GenesisError> {
    let sealed = std::fs::read(path).map_err(|e| GenesisError::io(path, e))?;
    let json = open_sealed(passphrase, &sealed)?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axionax_core::types::SecretKey;
    use axionax_crypto::{DigestKeyScheme, SeededEntropy};

    const LIGHT_KDF: KdfParams = KdfParams {
        m_cost_kib: 8,
        t_cost: 1,
        p_cost: 1,
    };

    fn issued(label: &str, byte: u8) -> IssuedSecret {
        IssuedSecret {
            label: label.into(),
            title: format!("Test {label}"),
            role: SecretRole::Validator,
            key_scheme: "digest",
            identity: Identity::from_secret(SecretKey::from_bytes([byte; 32]), &DigestKeyScheme)
                .unwrap(),
        }
    }

    #[test]
    fn redacting_console_never_prints_secret() {
        let secret = issued("validator-1", 0xab);
        let mut sink = RedactingConsole::new(Vec::new());
        sink.deliver(&secret).unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert!(text.contains(&secret.identity.address.to_hex()));
        assert!(text.contains("<redacted>"));
        assert!(!text.contains(&secret.identity.secret().expose_hex()));
    }

    #[test]
    fn plaintext_console_prints_secret() {
        let secret = issued("faucet", 0xcd);
        let mut sink = PlaintextConsole::new(Vec::new());
        sink.deliver(&secret).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains(&secret.identity.secret().expose_hex()));
    }

    #[test]
    fn keyfile_directory_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let secret = issued("team", 0x01);
        let mut sink = KeyfileDirectory::new(dir.path());
        sink.deliver(&secret).unwrap();

        let written = std::fs::read_to_string(dir.path().join("team.json")).unwrap();
        let kf: Keyfile = serde_json::from_str(&written).unwrap();
        assert_eq!(kf.address, secret.identity.address.to_hex());
        assert_eq!(kf.secret_key, secret.identity.secret().expose_hex());

        let err = KeyfileDirectory::new(dir.path()).deliver(&secret).unwrap_err();
        assert!(matches!(err, GenesisError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn keyfiles_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        KeyfileDirectory::new(dir.path())
            .deliver(&issued("validator-2", 0x02))
            .unwrap();
        let mode = std::fs::metadata(dir.path().join("validator-2.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn encrypted_bundle_round_trips_through_passphrase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.sealed");
        let a = issued("validator-1", 0x11);
        let b = issued("faucet", 0x22);

        let mut sink = EncryptedFile::with_entropy(
            &path,
            "hunter2".into(),
            Box::new(SeededEntropy::new(9)),
        )
        .kdf_params(LIGHT_KDF);
        sink.deliver(&a).unwrap();
        sink.deliver(&b).unwrap();
        sink.finish().unwrap();

        let raw = std::fs::read(&path).unwrap();
        let needle = a.identity.secret().expose_hex();
        assert!(!String::from_utf8_lossy(&raw).contains(&needle));

        let opened = open_secret_bundle(&path, "hunter2").unwrap();
        assert_eq!(opened.len(), 2);
        assert_eq!(opened[0].secret_key, needle);
        assert_eq!(opened[1].label, "faucet");

        assert!(open_secret_bundle(&path, "wrong").is_err());
    }

    #[test]
    fn keyfile_abort_withdraws_written_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = KeyfileDirectory::new(dir.path());
        sink.deliver(&issued("validator-1", 0x31)).unwrap();
        sink.deliver(&issued("faucet", 0x32)).unwrap();
        assert_eq!(sink.written().len(), 2);

        sink.abort().unwrap();
        assert!(sink.written().is_empty());
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());

        // A fresh run can now reuse the same labels.
        KeyfileDirectory::new(dir.path())
            .deliver(&issued("validator-1", 0x33))
            .unwrap();
    }

    #[test]
    fn encrypted_abort_removes_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.sealed");
        let mut sink =
            EncryptedFile::with_entropy(&path, "pw".into(), Box::new(SeededEntropy::new(4)))
                .kdf_params(LIGHT_KDF);
        sink.deliver(&issued("team", 0x41)).unwrap();
        sink.finish().unwrap();
        assert!(path.exists());

        sink.abort().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn only_redacting_console_discards_secrets() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!RedactingConsole::new(Vec::new()).retains_secrets());
        assert!(PlaintextConsole::new(Vec::new()).retains_secrets());
        assert!(KeyfileDirectory::new(dir.path()).retains_secrets());
        assert!(EncryptedFile::new(dir.path().join("b"), "pw".into()).retains_secrets());
    }
}
