use std::fmt;

///
/// CallContext
///
/// Opaque identity token attached to every declaration and call.
/// Used purely for diagnostic attribution; the engine never matches on it.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CallContext {
    tx_depth: u32,
}

impl CallContext {
    #[must_use]
    pub const fn root() -> Self {
        Self { tx_depth: 0 }
    }

    /// Context one transaction level deeper.
    #[must_use]
    pub const fn nested(self) -> Self {
        Self {
            tx_depth: self.tx_depth.saturating_add(1),
        }
    }

    #[must_use]
    pub const fn tx_depth(self) -> u32 {
        self.tx_depth
    }
}

// Rendered as a prefix in front of every call or declaration.
impl fmt::Display for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tx_depth == 0 {
            Ok(())
        } else {
            write!(f, "[Transaction: {}] ", self.tx_depth)
        }
    }
}
