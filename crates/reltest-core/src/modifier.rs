use derive_more::{Deref, DerefMut, IntoIterator};
use std::fmt;

///
/// Modifier
///
/// Side-effect descriptor that may accompany a mocked call.
/// The engine never interprets these; it only compares and renders them.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Modifier {
    Cascade(bool),
    Reload(bool),
    Tag(String),
    Unscoped(bool),
}

impl Modifier {
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cascade(v) => write!(f, "Cascade({v})"),
            Self::Reload(v) => write!(f, "Reload({v})"),
            Self::Tag(v) => write!(f, "Tag({v:?})"),
            Self::Unscoped(v) => write!(f, "Unscoped({v})"),
        }
    }
}

///
/// Modifiers
///
/// Ordered modifier sequence as declared or supplied by the caller.
/// Equality for matching purposes is multiset equality (`multiset_eq`).
///

#[derive(Clone, Debug, Default, Deref, DerefMut, Eq, IntoIterator, PartialEq)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Order-independent equality that respects multiplicity.
    #[must_use]
    pub fn multiset_eq(&self, other: &[Modifier]) -> bool {
        if self.0.len() != other.len() {
            return false;
        }

        let mut left: Vec<&Modifier> = self.0.iter().collect();
        let mut right: Vec<&Modifier> = other.iter().collect();
        left.sort_unstable();
        right.sort_unstable();

        left == right
    }
}

impl From<Vec<Modifier>> for Modifiers {
    fn from(v: Vec<Modifier>) -> Self {
        Self(v)
    }
}

impl From<&[Modifier]> for Modifiers {
    fn from(v: &[Modifier]) -> Self {
        Self(v.to_vec())
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(v: [Modifier; N]) -> Self {
        Self(v.into())
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, modifier) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}
