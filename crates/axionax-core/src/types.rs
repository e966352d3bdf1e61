use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{ADDRESS_LEN, SECRET_LEN};
use crate::error::ReconciliationError;

/// Amount in the smallest unit (`axx`). 10^9 AXX × 10^18 fits in u128 with
/// ten orders of magnitude to spare.
pub type Balance = u128;

/// Scale a whole-token amount into the smallest unit: `whole × 10^exponent`.
/// `None` on overflow.
pub fn scale_to_base(whole: u128, exponent: u32) -> Option<Balance> {
    10u128.checked_pow(exponent)?.checked_mul(whole)
}

/// Parse a decimal base-unit amount as written in genesis JSON.
pub fn parse_balance(text: &str, what: &str) -> Result<Balance, ReconciliationError> {
    text.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ReconciliationError::Overflow(format!("{what} {text:?}")),
        _ => ReconciliationError::MalformedAmount {
            what: what.to_string(),
            text: text.to_string(),
        },
    })
}

fn decode_0x(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

// ── Address ──────────────────────────────────────────────────────────────────

/// 20-byte account address, rendered `0x` + 40 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// All-zero sentinel address: protocol-owned mint/burn point.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    pub fn from_bytes(b: [u8; ADDRESS_LEN]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = decode_0x(s)?;
        let arr: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}…)", &self.to_hex()[..10])
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.to_hex()
    }
}

impl TryFrom<String> for Address {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Address::from_hex(&s)
    }
}

// ── PublicKey ────────────────────────────────────────────────────────────────

/// Raw public key bytes, rendered `0x` + hex. Width depends on the key scheme.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey(pub Vec<u8>);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        decode_0x(s).map(Self)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}b)", self.0.len())
    }
}

impl From<PublicKey> for String {
    fn from(pk: PublicKey) -> Self {
        pk.to_hex()
    }
}

impl TryFrom<String> for PublicKey {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PublicKey::from_hex(&s)
    }
}

// ── SecretKey ────────────────────────────────────────────────────────────────

/// Fixed-width secret. Wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_LEN]);

impl SecretKey {
    pub fn from_bytes(b: [u8; SECRET_LEN]) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &[u8; SECRET_LEN] {
        &self.0
    }

    /// Full hex rendering. Only secret sinks should call this.
    pub fn expose_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = decode_0x(s)?;
        let arr: [u8; SECRET_LEN] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

// ── Dec ──────────────────────────────────────────────────────────────────────

const DEC_PLACES: usize = 18;
const DEC_ONE: u128 = 1_000_000_000_000_000_000;

/// Non-negative fixed-point decimal with 18 fractional digits, the precision
/// the staking, distribution and gov modules expect (`"0.100000000000000000"`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Dec(u128);

impl Dec {
    pub const ZERO: Dec = Dec(0);
    pub const ONE: Dec = Dec(DEC_ONE);

    /// From basis points: `from_bps(1_000)` is 0.1.
    pub const fn from_bps(bps: u32) -> Self {
        Self(bps as u128 * (DEC_ONE / 10_000))
    }

    pub fn atto(&self) -> u128 {
        self.0
    }

    /// `0.670000000000000000` → `0.67`. Keeps at least one fractional digit.
    pub fn to_short_string(&self) -> String {
        let full = self.to_string();
        let trimmed = full.trim_end_matches('0');
        if trimmed.ends_with('.') {
            format!("{trimmed}0")
        } else {
            trimmed.to_string()
        }
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:018}", self.0 / DEC_ONE, self.0 % DEC_ONE)
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({})", self.to_short_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecError(pub String);

impl fmt::Display for ParseDecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid decimal: {}", self.0)
    }
}

impl std::error::Error for ParseDecError {}

impl FromStr for Dec {
    type Err = ParseDecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecError(s.to_string());
        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if frac_part.len() > DEC_PLACES {
            return Err(err());
        }
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(err());
        }

        let int: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| err())?
        };
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            let padded = format!("{frac_part:0<width$}", width = DEC_PLACES);
            padded.parse().map_err(|_| err())?
        };

        int.checked_mul(DEC_ONE)
            .and_then(|v| v.checked_add(frac))
            .map(Dec)
            .ok_or_else(err)
    }
}

impl From<Dec> for String {
    fn from(d: Dec) -> Self {
        d.to_short_string()
    }
}

impl TryFrom<String> for Dec {
    type Error = ParseDecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
