use std::fmt::Debug;
use std::hash::Hash;

use crate::{Error, Result};

/// A key drawn from a small, closed and enumerable set, used to look up shared instances
/// in an [`InstancePool`][crate::InstancePool].
///
/// Keys are compared by value. The set of valid keys is exactly the slice returned by
/// [`variants()`][Self::variants]; the pool refuses to create instances for anything else.
///
/// For plain fieldless enums every value is automatically valid. Key types that can represent
/// more values than they consider valid (e.g. a newtype over an integer) get validation for free
/// through the default [`is_valid()`][Self::is_valid] implementation.
///
/// # Example
///
/// ```rust
/// use instance_pool::PoolKey;
///
/// #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
/// enum Glyph {
///     Circle,
///     Square,
/// }
///
/// impl PoolKey for Glyph {
///     fn variants() -> &'static [Self] {
///         &[Self::Circle, Self::Square]
///     }
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Circle => "circle",
///             Self::Square => "square",
///         }
///     }
/// }
///
/// assert_eq!(Glyph::from_name("square").unwrap(), Glyph::Square);
/// assert!(Glyph::from_name("triangle").is_err());
/// ```
pub trait PoolKey: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every valid key, in a stable order.
    fn variants() -> &'static [Self];

    /// The canonical name of the key, unique within [`variants()`][Self::variants].
    fn name(&self) -> &'static str;

    /// Whether the key belongs to the closed set of valid keys.
    #[must_use]
    fn is_valid(&self) -> bool {
        Self::variants().contains(self)
    }

    /// Resolves a key from its canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if no variant carries the given name.
    fn from_name(name: &str) -> Result<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.name() == name)
            .ok_or_else(|| Error::InvalidKey {
                key: name.to_owned(),
            })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    /// A key that can represent values outside its own valid set.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    struct Lane(u8);

    const LANES: [Lane; 3] = [Lane(0), Lane(1), Lane(2)];

    impl PoolKey for Lane {
        fn variants() -> &'static [Self] {
            &LANES
        }

        fn name(&self) -> &'static str {
            match self.0 {
                0 => "left",
                1 => "middle",
                2 => "right",
                _ => "unknown",
            }
        }
    }

    #[test]
    fn listed_variants_are_valid() {
        for lane in LANES {
            assert!(lane.is_valid());
        }
    }

    #[test]
    fn unlisted_value_is_invalid() {
        assert!(!Lane(7).is_valid());
    }

    #[test]
    fn from_name_finds_variant() {
        assert_eq!(Lane::from_name("middle").unwrap(), Lane(1));
    }

    #[test]
    fn from_name_rejects_unknown_name() {
        let error = Lane::from_name("unknown").unwrap_err();

        assert!(matches!(error, Error::InvalidKey { key } if key == "unknown"));
    }
}
