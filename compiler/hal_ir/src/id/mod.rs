//! Typed indices.
//!
//! The automaton tables are flat arrays addressed by small integers. Each
//! kind of index gets its own newtype so a state can never be used where a
//! symbol is expected.

use std::fmt;

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident($repr:ty), $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name($repr);

        impl $name {
            #[inline]
            pub const fn new(raw: $repr) -> Self {
                $name(raw)
            }

            /// Position in the owning table.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> $repr {
                self.0
            }

            /// Convert a table position, failing if it does not fit the representation.
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                <$repr>::try_from(index).ok().map($name)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_index!(
    /// Index of a grammar symbol (terminal or nonterminal) in a [`Vocabulary`](crate::Vocabulary).
    SymbolId(u16),
    "sym#"
);

define_index!(
    /// Automaton state number. State 0 is the initial state.
    StateId(u16),
    "state#"
);

define_index!(
    /// Production number. Production 0 is the synthetic accept production.
    ProductionId(u16),
    "prod#"
);

define_index!(
    /// Handle to an entry of a [`SourceMap`](crate::SourceMap).
    SourceId(u32),
    "src#"
);

impl SourceId {
    /// Text with no backing file, such as a stored macro body.
    pub const SYNTHETIC: SourceId = SourceId(u32::MAX);

    #[inline]
    pub const fn is_synthetic(self) -> bool {
        self.0 == u32::MAX
    }
}

impl ProductionId {
    pub const ACCEPT: ProductionId = ProductionId(0);
}

impl StateId {
    pub const INITIAL: StateId = StateId(0);
}

#[cfg(test)]
mod tests;
