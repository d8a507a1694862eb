//! Type-alias expansion.
//!
//! `fully_expanded_type` replaces a type whose lookup tag names a type alias
//! with the alias's expansion, substituting the alias's type parameters with
//! the reference's arguments, until the tag no longer names an alias.
//!
//! Only the outermost type is expanded. Aliases inside the arguments are
//! expanded when those arguments are themselves lowered.

use crate::intern::ConeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::symbols::FrontSymbolTable;
use crate::types::{
    ClassId, ConeAttributes, ConeProjection, ConeTypeData, ConeTypeId, LookupTag, TypeParamId,
};
use rustc_hash::FxHashMap;
use tracing::trace;

pub type Substitution = FxHashMap<TypeParamId, ConeProjection>;

/// Expand `ty` through every type alias its lookup tag names.
///
/// Returns `ty` itself when it is not an alias reference, and also when the
/// alias chain is cyclic or deeper than the alias-expansion profile allows.
pub fn fully_expanded_type(
    db: &ConeInterner,
    symbols: &FrontSymbolTable,
    ty: ConeTypeId,
) -> ConeTypeId {
    let mut guard: RecursionGuard<ClassId> =
        RecursionGuard::with_profile(RecursionProfile::AliasExpansion);
    let mut entered = Vec::new();
    let mut current = ty;

    let result = loop {
        let Some(ConeTypeData::LookupTagBased {
            tag: LookupTag::Class(alias),
            args,
            nullable,
            attributes,
        }) = db.lookup(current)
        else {
            break current;
        };
        let Some((params, expanded)) = symbols.type_alias(alias) else {
            break current;
        };

        match guard.enter(alias) {
            RecursionResult::Entered => entered.push(alias),
            denied => {
                trace!(alias = alias.0.index(), ?denied, "alias expansion stopped");
                break ty;
            }
        }

        let arguments = db.projection_list(args);
        let substitution: Substitution = params
            .iter()
            .enumerate()
            .map(|(index, &param)| {
                let arg = arguments.get(index).copied().unwrap_or(ConeProjection::Star);
                (param, arg)
            })
            .collect();

        let mut next = substitute(db, expanded, &substitution);
        if nullable {
            next = db.with_nullability(next, true);
        }
        if !attributes.is_empty() {
            next = with_added_attributes(db, next, attributes);
        }
        current = next;
    };

    for alias in entered {
        guard.leave(alias);
    }
    result
}

/// Replace type-parameter references in `ty` according to `substitution`.
pub fn substitute(db: &ConeInterner, ty: ConeTypeId, substitution: &Substitution) -> ConeTypeId {
    if substitution.is_empty() {
        return ty;
    }
    let Some(data) = db.lookup(ty) else {
        return ty;
    };

    match data {
        ConeTypeData::LookupTagBased {
            tag: LookupTag::TypeParameter(param),
            nullable,
            ..
        } => match substitution.get(&param) {
            Some(ConeProjection::Star) => {
                db.error_type("star projection substituted outside of type arguments")
            }
            Some(projection) => {
                let replacement = projection.type_id().unwrap_or(ConeTypeId::ERROR);
                if nullable {
                    db.with_nullability(replacement, true)
                } else {
                    replacement
                }
            }
            None => ty,
        },
        ConeTypeData::LookupTagBased {
            tag,
            args,
            nullable,
            attributes,
        } => {
            let original = db.projection_list(args);
            let substituted: Vec<ConeProjection> = original
                .iter()
                .map(|&projection| substitute_projection(db, projection, substitution))
                .collect();
            if substituted.as_slice() == &*original {
                return ty;
            }
            db.lookup_tag_based(tag, substituted, nullable, attributes)
        }
        ConeTypeData::Flexible { lower, upper } => {
            let lower = substitute(db, lower, substitution);
            let upper = substitute(db, upper, substitution);
            db.flexible(lower, upper)
        }
        ConeTypeData::DefinitelyNotNull(original) => {
            let original = substitute(db, original, substitution);
            db.definitely_not_null(original)
        }
        ConeTypeData::Intersection(list) => {
            let members = db
                .type_list(list)
                .iter()
                .map(|&member| substitute(db, member, substitution))
                .collect();
            db.intersection(members)
        }
        ConeTypeData::Error(_)
        | ConeTypeData::Captured { .. }
        | ConeTypeData::Stub(_)
        | ConeTypeData::IntegerLiteral { .. } => ty,
    }
}

/// Substitute inside one argument position, composing variances.
///
/// A star argument wins over any position; an invariant position takes the
/// argument's variance; an in/out position keeps its own variance.
fn substitute_projection(
    db: &ConeInterner,
    projection: ConeProjection,
    substitution: &Substitution,
) -> ConeProjection {
    let Some(ty) = projection.type_id() else {
        return ConeProjection::Star;
    };

    if let Some(ConeTypeData::LookupTagBased {
        tag: LookupTag::TypeParameter(param),
        nullable,
        ..
    }) = db.lookup(ty)
    {
        if let Some(&argument) = substitution.get(&param) {
            let Some(arg_type) = argument.type_id() else {
                return ConeProjection::Star;
            };
            let arg_type = if nullable {
                db.with_nullability(arg_type, true)
            } else {
                arg_type
            };
            return match projection {
                ConeProjection::Invariant(_) => argument.with_type(arg_type),
                _ => projection.with_type(arg_type),
            };
        }
    }

    projection.with_type(substitute(db, ty, substitution))
}

fn with_added_attributes(
    db: &ConeInterner,
    ty: ConeTypeId,
    added: ConeAttributes,
) -> ConeTypeId {
    match db.lookup(ty) {
        Some(ConeTypeData::LookupTagBased {
            tag,
            args,
            nullable,
            attributes,
        }) if !attributes.contains(added) => db.intern(ConeTypeData::LookupTagBased {
            tag,
            args,
            nullable,
            attributes: attributes | added,
        }),
        _ => ty,
    }
}

#[cfg(test)]
#[path = "../tests/expand_tests.rs"]
mod tests;
