//! Account identity of callers, providers and the pool itself.

use core::fmt;

/// A 20-byte account identity.
///
/// Identifies liquidity providers, traders, and the pool's own custody
/// account inside the asset ledger.  All byte sequences are valid, so
/// construction is infallible.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::Account;
///
/// let alice = Account::from_bytes([0xaa; 20]);
/// assert_eq!(alice.as_bytes(), [0xaa; 20]);
/// assert!(alice.to_string().starts_with("0xaaaa"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account([u8; 20]);

impl Account {
    /// Creates an `Account` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns the all-zero account.
    ///
    /// Rejected as a pool address by [`DexConfig`](crate::config::DexConfig).
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }

    /// Returns `true` for the all-zero account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_round_trip() {
        let bytes = [42u8; 20];
        assert_eq!(Account::from_bytes(bytes).as_bytes(), bytes);
    }

    #[test]
    fn zero_sentinel() {
        assert!(Account::zero().is_zero());
        assert!(!Account::from_bytes([1u8; 20]).is_zero());
    }

    #[test]
    fn display_is_lower_hex() {
        let mut bytes = [0u8; 20];
        bytes[19] = 0xab;
        let shown = Account::from_bytes(bytes).to_string();
        assert_eq!(shown.len(), 42);
        assert!(shown.ends_with("ab"));
        assert!(shown.starts_with("0x00"));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Account::from_bytes([0u8; 20]) < Account::from_bytes([1u8; 20]));
    }
}
