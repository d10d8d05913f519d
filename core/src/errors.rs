use core::fmt;

use thiserror::Error;
use tybind_types::TypeSymbol;

use crate::{String, Vec};

/// Which algorithm was running when a limit tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Walking,
    Substituting,
    Collecting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Walking => "walking type pairs",
            Phase::Substituting => "substituting type parameters",
            Phase::Collecting => "collecting supertype mappings",
        })
    }
}

/// Failures of the binding and substitution engine.
///
/// Shape mismatches between a declared and an actual expression are not
/// errors; they simply produce no bindings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    #[error("recursion limit of {limit} exceeded while {phase}")]
    RecursionLimit { limit: usize, phase: Phase },

    /// A type parameter's binding leads back to itself through other bindings.
    /// `chain` lists the parameters being expanded, outermost first.
    #[error("cyclic binding for type parameter {parameter} through {} expansions", .chain.len())]
    CyclicBinding {
        parameter: TypeSymbol,
        chain: Vec<TypeSymbol>,
    },

    #[error("invalid type expression: {reason}")]
    InvalidTypeExpression { reason: String },
}

pub type UnifyResult<T = ()> = Result<T, UnifyError>;
