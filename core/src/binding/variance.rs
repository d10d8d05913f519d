use core::fmt;

/// Whether a position accepts subtypes, supertypes, or only exact matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variance {
    /// Contravariant.
    In,
    /// Covariant.
    Out,
    Invariant,
}

impl fmt::Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variance::In => "in",
            Variance::Out => "out",
            Variance::Invariant => "invariant",
        })
    }
}
