pub mod entropy;
pub mod hash;
pub mod identity;
pub mod scheme;
pub mod seal;

pub use entropy::{EntropySource, OsEntropy, SeededEntropy};
pub use hash::{address_from_pubkey, artifact_digest, module_address, sha3_256};
pub use identity::{Identity, IdentityGenerator};
pub use scheme::{DigestKeyScheme, Ed25519KeyScheme, KeyScheme, KeySchemeKind};
pub use seal::{open_sealed, seal, seal_with, sealed_kdf_params, KdfParams};
