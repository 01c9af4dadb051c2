//! Explicit rounding direction for pool arithmetic.

/// Rounding direction for every division performed by the pricing engine.
///
/// Amounts a caller must pay round [`Up`](Rounding::Up); amounts paid out
/// or shares minted round [`Down`](Rounding::Down).  Either way the
/// remainder stays with the pool and existing providers.
///
/// # Examples
///
/// ```
/// use dex_engine::domain::Rounding;
///
/// let owed = Rounding::Up;
/// assert!(owed.is_up());
/// assert!(!Rounding::Down.is_up());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ceiling: anything the caller owes.
    Up,
    /// Floor: anything the pool pays out or mints.
    Down,
}

impl Rounding {
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
