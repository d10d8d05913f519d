use hashbrown::HashSet;
use tracing::debug;
use tybind_types::{SymbolTable, Ty, TypeBuilder, TypeSymbol};

use super::{
    mapping::{MappingCollector, MergedBound, TypeParameterMapping},
    substitutor::Substitutor,
};
use crate::{
    errors::{Phase, UnifyError, UnifyResult},
    format,
    options::UnifyOptions,
};

/// Mapping collector backed by the declarations of a `SymbolTable`.
///
/// For `D<A1, .., An>` it binds `D`'s own parameters to `A1..An`, then walks
/// `D`'s declared supertypes with `D`'s parameters replaced by `A1..An`.
/// Every value is therefore written in the supplied arguments: collecting
/// `MultiMap<T>` with `MultiMap<W> extends Map<Str, List<W>>` binds
/// `V -> List<T>`. A raw reference supplies nothing, so its supertypes keep
/// their formal parameters. Each declarator is visited once and the first
/// binding found for a parameter wins.
pub struct SupertypeCollector<'t, B: TypeBuilder> {
    table: &'t SymbolTable<B>,
    builder: B,
    options: UnifyOptions,
}

impl<'t, B: TypeBuilder> SupertypeCollector<'t, B> {
    pub fn new(table: &'t SymbolTable<B>, builder: B) -> Self {
        Self::with_options(table, builder, UnifyOptions::default())
    }

    pub fn with_options(table: &'t SymbolTable<B>, builder: B, options: UnifyOptions) -> Self {
        Self {
            table,
            builder,
            options,
        }
    }

    fn collect_declarator(
        &self,
        declarator: TypeSymbol,
        args: &[Ty<B>],
        depth: usize,
        mapping: &mut TypeParameterMapping<B>,
        visited: &mut HashSet<TypeSymbol>,
    ) -> UnifyResult {
        let limit = self.options.max_depth;
        if depth > limit {
            debug!(limit, "supertype collection depth limit reached");
            return Err(UnifyError::RecursionLimit {
                limit,
                phase: Phase::Collecting,
            });
        }
        if !visited.insert(declarator) {
            return Ok(());
        }

        let mut supplied = TypeParameterMapping::new();
        // Raw references bind nothing directly.
        if !args.is_empty() {
            let parameters = self.table.parameters(declarator);
            if parameters.len() != args.len() {
                let name = self
                    .table
                    .name(declarator)
                    .map_or_else(|| format!("{}", declarator), |name| name.into());
                return Err(UnifyError::InvalidTypeExpression {
                    reason: format!(
                        "{} declares {} type parameters but {} type arguments were supplied",
                        name,
                        parameters.len(),
                        args.len()
                    ),
                });
            }
            for (parameter, arg) in parameters.iter().zip(args) {
                mapping
                    .entry(*parameter)
                    .or_insert_with(|| MergedBound::new(arg.clone()));
                supplied.insert(*parameter, MergedBound::new(arg.clone()));
            }
        }

        let rewrite = Substitutor::single_pass(self.builder, supplied, self.options);
        for supertype in self.table.supertypes(declarator) {
            let supertype = rewrite.substitute(supertype)?;
            if let Some((head, args)) = supertype.as_parameterized(self.builder) {
                if !head.is_parameter() {
                    self.collect_declarator(head, args, depth + 1, mapping, visited)?;
                }
            }
        }
        Ok(())
    }
}

impl<'t, B: TypeBuilder> MappingCollector<B> for SupertypeCollector<'t, B> {
    fn collect(&mut self, ty: &Ty<B>) -> UnifyResult<TypeParameterMapping<B>> {
        let mut mapping = TypeParameterMapping::new();
        if let Some((head, args)) = ty.as_parameterized(self.builder) {
            if !head.is_parameter() {
                self.collect_declarator(head, args, 0, &mut mapping, &mut HashSet::new())?;
            }
        }
        Ok(mapping)
    }
}
