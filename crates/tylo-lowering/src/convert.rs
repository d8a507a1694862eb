//! The type lowering engine.
//!
//! `TypeConverter` turns one resolved type, and transitively its arguments,
//! into an `IrType`. Every variant of `ConeTypeData` has exactly one rule:
//!
//! | Resolved type          | Lowered as                                   |
//! |------------------------|----------------------------------------------|
//! | error, stub, literal   | `IrType::Error`                              |
//! | classifier-based       | resolved classifier with lowered arguments   |
//! | flexible               | its upper bound                              |
//! | captured               | its lower bound, else its first supertype    |
//! | definitely-not-null    | the wrapped type, forced non-null            |
//! | intersection           | its first component                          |
//!
//! Captured types are recorded in a visited set before their bound is
//! lowered. An argument that refers back to a visited captured type is
//! approximated instead of lowered again (see `arguments.rs`), which is what
//! makes self-referential captures terminate.
//!
//! `depth` counts the captured types entered on the current path. Interned
//! types are acyclic apart from captured supertypes, so that is the only
//! count that can grow without bound; ordinary nesting is not limited.

use crate::annotations::AnnotationTranslator;
use crate::builtin_table::BuiltinSymbolTable;
use crate::context::ConversionTypeContext;
use crate::options::LoweringOptions;
use crate::resolver::ClassifierResolver;
use crate::storage::ClassifierStorage;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};
use tylo_common::limits::MAX_TYPE_LOWERING_DEPTH;
use tylo_front::{
    fully_expanded_type, ConeAttributes, ConeInterner, ConeProjection, ConeTypeData, ConeTypeId,
    FirAnnotation, FrontSymbolTable, LookupTag, TypeApproximator,
};
use tylo_ir::{IrBuiltIns, IrSimpleType, IrType};

/// Collaborators of a lowering session.
#[derive(Clone, Copy)]
pub struct LoweringComponents<'a> {
    pub db: &'a ConeInterner,
    pub symbols: &'a FrontSymbolTable,
    pub builtins: &'a IrBuiltIns,
    pub builtin_table: &'a BuiltinSymbolTable,
    pub storage: &'a dyn ClassifierStorage,
    pub annotations: &'a dyn AnnotationTranslator,
    pub approximator: &'a dyn TypeApproximator,
    pub options: &'a LoweringOptions,
}

pub struct TypeConverter<'a> {
    pub(crate) components: LoweringComponents<'a>,
    resolver: ClassifierResolver<'a>,
}

impl<'a> TypeConverter<'a> {
    pub fn new(components: LoweringComponents<'a>) -> Self {
        let resolver =
            ClassifierResolver::new(components.builtin_table, components.symbols, components.storage);
        Self {
            components,
            resolver,
        }
    }

    pub fn components(&self) -> &LoweringComponents<'a> {
        &self.components
    }

    /// Lower `ty` with a fresh visited set and no annotations.
    pub fn lower_type(&self, ty: ConeTypeId, context: ConversionTypeContext) -> IrType {
        let mut visited = FxHashSet::default();
        self.lower_type_with(ty, context, &mut visited, &[])
    }

    /// Lower `ty`, recording captured types in `visited` and attaching
    /// `annotations` to the result if it is classifier-based.
    pub fn lower_type_with(
        &self,
        ty: ConeTypeId,
        context: ConversionTypeContext,
        visited: &mut FxHashSet<ConeTypeId>,
        annotations: &[FirAnnotation],
    ) -> IrType {
        self.lower_at_depth(ty, context, visited, annotations, 0)
    }

    pub(crate) fn lower_at_depth(
        &self,
        ty: ConeTypeId,
        context: ConversionTypeContext,
        visited: &mut FxHashSet<ConeTypeId>,
        annotations: &[FirAnnotation],
        depth: u32,
    ) -> IrType {
        if depth >= MAX_TYPE_LOWERING_DEPTH {
            warn!(ty = ty.0, depth, "type lowering depth limit reached");
            return IrType::Error;
        }
        let Some(data) = self.components.db.lookup(ty) else {
            debug!(ty = ty.0, "unknown type id");
            return IrType::Error;
        };
        trace!(ty = ty.0, depth, ?data, "lower_type");

        match data {
            ConeTypeData::Error(_) => IrType::Error,
            ConeTypeData::LookupTagBased {
                tag,
                nullable,
                attributes,
                ..
            } => self.lower_classifier_based(
                ty,
                tag,
                nullable,
                attributes,
                context,
                visited,
                annotations,
                depth,
            ),
            ConeTypeData::Flexible { upper, .. } => {
                self.lower_at_depth(upper, context, visited, &[], depth)
            }
            ConeTypeData::Captured {
                constructor, lower, ..
            } => {
                visited.insert(ty);
                let bound = match lower {
                    Some(lower) => lower,
                    None => self
                        .components
                        .db
                        .captured_constructor_data(constructor)
                        .and_then(|ctor| ctor.supertypes)
                        .and_then(|supertypes| supertypes.first().copied())
                        .unwrap_or_else(|| {
                            panic!(
                                "Captured type #{} has no supertypes and no lower bound",
                                constructor.0
                            )
                        }),
                };
                self.lower_at_depth(bound, context, visited, &[], depth + 1)
            }
            ConeTypeData::DefinitelyNotNull(original) => {
                self.lower_at_depth(original, context.definitely_not_null(), visited, &[], depth)
            }
            ConeTypeData::Intersection(list) => {
                let Some(&first) = self.components.db.type_list(list).first() else {
                    debug!(ty = ty.0, "empty intersection");
                    return IrType::Error;
                };
                self.lower_at_depth(first, context, visited, &[], depth)
            }
            ConeTypeData::Stub(_) | ConeTypeData::IntegerLiteral { .. } => IrType::Error,
        }
    }

    fn lower_classifier_based(
        &self,
        ty: ConeTypeId,
        tag: LookupTag,
        nullable: bool,
        attributes: ConeAttributes,
        context: ConversionTypeContext,
        visited: &mut FxHashSet<ConeTypeId>,
        annotations: &[FirAnnotation],
        depth: u32,
    ) -> IrType {
        let Some(classifier) = self.resolver.resolve(tag, context) else {
            debug!(ty = ty.0, ?tag, "unresolved classifier");
            return IrType::Error;
        };

        let mut type_annotations = Vec::with_capacity(annotations.len() + 1);
        if attributes.contains(ConeAttributes::EXTENSION_FUNCTION_TYPE) {
            type_annotations.push(
                self.components
                    .builtins
                    .extension_function_type_annotation_call(),
            );
        }
        if !annotations.is_empty() {
            type_annotations.extend(self.components.annotations.lower(annotations));
        }

        let db = self.components.db;
        let expanded = fully_expanded_type(db, self.components.symbols, ty);
        let projections: Vec<ConeProjection> = match db.lookup(expanded) {
            Some(ConeTypeData::LookupTagBased { args, .. }) => db.projection_list(args).to_vec(),
            _ => Vec::new(),
        };
        let arguments = projections
            .into_iter()
            .map(|projection| self.lower_argument_at_depth(projection, context, visited, depth))
            .collect();

        IrType::Simple(IrSimpleType {
            classifier,
            nullable: !context.definitely_not_null && nullable,
            arguments,
            annotations: type_annotations,
        })
    }
}

#[cfg(test)]
#[path = "../tests/convert_tests.rs"]
mod tests;
