use std::fmt;

/// Errors raised while reading or normalizing complex notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// The text violates the complex grammar.
    MalformedNotation { notation: String, reason: String },

    /// A bare strand is joined to its neighbours by a connector that
    /// cannot carry it (an upper strand across `:`, or a lower across `::`).
    DetachedStrand(String),

    /// A gate ended up with an empty duplex.
    EmptyDuplex(String),

    /// Nothing is left of the complex.
    EmptyComplex,

    /// Canonicalization did not settle within the round limit.
    NoFixedPoint(String),
}

impl NotationError {
    pub(crate) fn malformed(notation: &str, reason: impl Into<String>) -> Self {
        NotationError::MalformedNotation {
            notation: notation.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::MalformedNotation { notation, reason } => {
                write!(f, "malformed notation '{notation}': {reason}")
            }
            NotationError::DetachedStrand(c) => {
                write!(f, "strand is not attached by a matching connector in '{c}'")
            }
            NotationError::EmptyDuplex(c) => write!(f, "gate with empty duplex in '{c}'"),
            NotationError::EmptyComplex => write!(f, "complex has no domains"),
            NotationError::NoFixedPoint(c) => {
                write!(f, "canonical form of '{c}' did not converge")
            }
        }
    }
}

impl std::error::Error for NotationError {}
