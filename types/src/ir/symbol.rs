//! Type symbols: the identities that head parameterized types.
//!
//! A symbol is either a type parameter (a free or bound variable) or a
//! declarator (a named type, possibly declaring type parameters of its own).
//! Symbols are compared by identity only; everything else known about them
//! (names, declared parameters, supertypes, upper bounds) lives in a
//! `SymbolTable`.

use super::{Ty, TypeBuilder};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use thiserror::Error;

/// A declaration the table cannot represent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolError {
    #[error("symbol table is full ({count} symbols)")]
    TooManySymbols { count: usize },

    #[error("{count} type parameters exceed the maximum arity of {max}", max = u16::MAX)]
    TooManyParameters { count: usize },
}

/// What a symbol denotes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SymbolKind {
    /// A type parameter.
    Parameter,

    /// A named type declaring `arity` type parameters (zero for plain types).
    Declarator { arity: u16 },
}

/// Opaque identity of a declarator or type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeSymbol {
    id: u32,
    kind: SymbolKind,
}

impl TypeSymbol {
    pub const fn parameter(id: u32) -> Self {
        Self {
            id,
            kind: SymbolKind::Parameter,
        }
    }

    pub const fn declarator(id: u32, arity: u16) -> Self {
        Self {
            id,
            kind: SymbolKind::Declarator { arity },
        }
    }

    pub fn id(self) -> u32 {
        self.id
    }

    pub fn kind(self) -> SymbolKind {
        self.kind
    }

    pub fn is_parameter(self) -> bool {
        matches!(self.kind, SymbolKind::Parameter)
    }

    /// True for declarators that declare at least one type parameter.
    pub fn declares_parameters(self) -> bool {
        matches!(self.kind, SymbolKind::Declarator { arity } if arity > 0)
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SymbolKind::Parameter => write!(f, "'{}", self.id),
            SymbolKind::Declarator { .. } => write!(f, "#{}", self.id),
        }
    }
}

#[derive(Debug, Clone)]
struct SymbolEntry<B: TypeBuilder> {
    name: String,
    kind: SymbolKind,
    parameters: Vec<TypeSymbol>,
    supertypes: Vec<Ty<B>>,
    upper_bounds: Vec<Ty<B>>,
}

/// Declarations for a set of symbols.
///
/// Symbol ids are indices into the table, so symbols from one table must not
/// be mixed with another's. Lookups for unknown symbols yield empty slices.
#[derive(Debug, Clone)]
pub struct SymbolTable<B: TypeBuilder> {
    entries: Vec<SymbolEntry<B>>,
}

impl<B: TypeBuilder> Default for SymbolTable<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TypeBuilder> SymbolTable<B> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push(
        &mut self,
        name: &str,
        kind: SymbolKind,
        parameters: &[TypeSymbol],
    ) -> Result<TypeSymbol, SymbolError> {
        let count = self.entries.len();
        let id = u32::try_from(count).map_err(|_| SymbolError::TooManySymbols { count })?;
        self.entries.push(SymbolEntry {
            name: String::from(name),
            kind,
            parameters: parameters.to_vec(),
            supertypes: Vec::new(),
            upper_bounds: Vec::new(),
        });
        Ok(TypeSymbol { id, kind })
    }

    /// Declare a type parameter.
    pub fn try_parameter(&mut self, name: &str) -> Result<TypeSymbol, SymbolError> {
        self.push(name, SymbolKind::Parameter, &[])
    }

    /// Declare a named type with the given type parameters.
    ///
    /// Fails without declaring anything when the table is full or there are
    /// more parameters than an arity can record.
    pub fn try_declare(&mut self, name: &str, parameters: &[TypeSymbol]) -> Result<TypeSymbol, SymbolError> {
        let count = parameters.len();
        let arity = u16::try_from(count).map_err(|_| SymbolError::TooManyParameters { count })?;
        self.push(name, SymbolKind::Declarator { arity }, parameters)
    }

    /// Declare a type parameter.
    ///
    /// # Panics
    ///
    /// If the table already holds `u32::MAX + 1` symbols; see `try_parameter`.
    pub fn parameter(&mut self, name: &str) -> TypeSymbol {
        match self.try_parameter(name) {
            Ok(symbol) => symbol,
            Err(err) => panic!("cannot declare {name}: {err}"),
        }
    }

    /// Declare a named type with the given type parameters.
    ///
    /// # Panics
    ///
    /// Under the conditions `try_declare` reports as errors.
    pub fn declare(&mut self, name: &str, parameters: &[TypeSymbol]) -> TypeSymbol {
        match self.try_declare(name, parameters) {
            Ok(symbol) => symbol,
            Err(err) => panic!("cannot declare {name}: {err}"),
        }
    }

    /// Record a direct supertype of `declarator`, written in terms of the
    /// declarator's own type parameters.
    pub fn add_supertype(&mut self, declarator: TypeSymbol, supertype: Ty<B>) {
        if let Some(entry) = self.entry_mut(declarator) {
            entry.supertypes.push(supertype);
        }
    }

    /// Record a declared upper bound of a type parameter.
    pub fn add_upper_bound(&mut self, parameter: TypeSymbol, bound: Ty<B>) {
        if let Some(entry) = self.entry_mut(parameter) {
            entry.upper_bounds.push(bound);
        }
    }

    pub fn name(&self, symbol: TypeSymbol) -> Option<&str> {
        self.entry(symbol).map(|entry| entry.name.as_str())
    }

    pub fn parameters(&self, symbol: TypeSymbol) -> &[TypeSymbol] {
        self.entry(symbol)
            .map(|entry| entry.parameters.as_slice())
            .unwrap_or(&[])
    }

    pub fn supertypes(&self, symbol: TypeSymbol) -> &[Ty<B>] {
        self.entry(symbol)
            .map(|entry| entry.supertypes.as_slice())
            .unwrap_or(&[])
    }

    pub fn upper_bounds(&self, symbol: TypeSymbol) -> &[Ty<B>] {
        self.entry(symbol)
            .map(|entry| entry.upper_bounds.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, symbol: TypeSymbol) -> Option<&SymbolEntry<B>> {
        let id = usize::try_from(symbol.id).ok()?;
        self.entries
            .get(id)
            .filter(|entry| entry.kind == symbol.kind)
    }

    fn entry_mut(&mut self, symbol: TypeSymbol) -> Option<&mut SymbolEntry<B>> {
        let id = usize::try_from(symbol.id).ok()?;
        self.entries
            .get_mut(id)
            .filter(|entry| entry.kind == symbol.kind)
    }
}
