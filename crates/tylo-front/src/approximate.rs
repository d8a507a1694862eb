//! Supertype approximation of types that mention captured types.
//!
//! The lowering engine asks for an approximation when an argument refers to
//! a captured type it is already lowering. The approximation replaces the
//! captured type with something built from its bound or from the projection
//! that was captured, which breaks the self-reference.

use crate::intern::ConeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::types::{CapturedConstructorId, ConeProjection, ConeTypeData, ConeTypeId};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which approximation rules apply.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApproximatorConfig {
    /// Approximate captured types found in subtype position.
    #[default]
    SubtypeCapturedTypes,
    /// Additionally collapse intersections, as for public declaration types.
    PublicDeclaration,
}

/// Produces a supertype of a type with captured types approximated away.
pub trait TypeApproximator: Send + Sync {
    /// `None` when no approximation applies.
    fn approximate_to_super_type(
        &self,
        ty: ConeTypeId,
        config: ApproximatorConfig,
    ) -> Option<ConeTypeId>;
}

/// Approximator that follows captured-type bounds and captured projections.
pub struct CapturedTypeApproximator<'a> {
    db: &'a ConeInterner,
}

impl<'a> CapturedTypeApproximator<'a> {
    pub fn new(db: &'a ConeInterner) -> Self {
        Self { db }
    }
}

impl TypeApproximator for CapturedTypeApproximator<'_> {
    fn approximate_to_super_type(
        &self,
        ty: ConeTypeId,
        config: ApproximatorConfig,
    ) -> Option<ConeTypeId> {
        let mut approximation = Approximation {
            db: self.db,
            config,
            guard: RecursionGuard::with_profile(RecursionProfile::TypeApproximation),
        };
        let result = approximation.approximate(ty);
        trace!(ty = ty.0, ?config, ?result, "approximate_to_super_type");
        result
    }
}

/// State of one approximation request.
struct Approximation<'a> {
    db: &'a ConeInterner,
    config: ApproximatorConfig,
    guard: RecursionGuard<CapturedConstructorId>,
}

impl Approximation<'_> {
    fn approximate(&mut self, ty: ConeTypeId) -> Option<ConeTypeId> {
        match self.db.lookup(ty)? {
            ConeTypeData::Captured {
                constructor,
                nullable,
                ..
            } => {
                let ctor = self.db.captured_constructor_data(constructor)?;
                let supertypes = ctor.supertypes.filter(|s| !s.is_empty())?;
                if !self.guard.enter(constructor).is_entered() {
                    return None;
                }
                let bound = if supertypes.len() == 1 {
                    supertypes[0]
                } else {
                    self.db.intersection(supertypes.to_vec())
                };
                let approximated = self.approximate(bound).unwrap_or(bound);
                self.guard.leave(constructor);

                Some(if nullable {
                    self.db.with_nullability(approximated, true)
                } else {
                    approximated
                })
            }
            ConeTypeData::LookupTagBased {
                tag,
                args,
                nullable,
                attributes,
            } => {
                let original = self.db.projection_list(args);
                let approximated: Vec<ConeProjection> = original
                    .iter()
                    .map(|&projection| self.approximate_argument(projection))
                    .collect();
                if approximated.as_slice() == &*original {
                    return None;
                }
                Some(
                    self.db
                        .lookup_tag_based(tag, approximated, nullable, attributes),
                )
            }
            ConeTypeData::Flexible { lower, upper } => {
                let new_lower = self.approximate(lower);
                let new_upper = self.approximate(upper);
                if new_lower.is_none() && new_upper.is_none() {
                    return None;
                }
                Some(
                    self.db
                        .flexible(new_lower.unwrap_or(lower), new_upper.unwrap_or(upper)),
                )
            }
            ConeTypeData::DefinitelyNotNull(original) => self
                .approximate(original)
                .map(|approximated| self.db.definitely_not_null(approximated)),
            ConeTypeData::Intersection(list) => {
                let members = self.db.type_list(list);
                if self.config == ApproximatorConfig::PublicDeclaration {
                    let first = *members.first()?;
                    return Some(self.approximate(first).unwrap_or(first));
                }
                let approximated: Vec<ConeTypeId> = members
                    .iter()
                    .map(|&member| self.approximate(member).unwrap_or(member))
                    .collect();
                if approximated.as_slice() == &*members {
                    return None;
                }
                Some(self.db.intersection(approximated))
            }
            ConeTypeData::Error(_) | ConeTypeData::Stub(_) | ConeTypeData::IntegerLiteral { .. } => {
                None
            }
        }
    }

    fn approximate_argument(&mut self, projection: ConeProjection) -> ConeProjection {
        let Some(ty) = projection.type_id() else {
            return ConeProjection::Star;
        };
        if let Some(ConeTypeData::Captured { constructor, .. }) = self.db.lookup(ty) {
            return self.captured_argument(projection, constructor);
        }
        match projection {
            ConeProjection::In(_) | ConeProjection::Star => projection,
            ConeProjection::Out(_) | ConeProjection::Invariant(_) => match self.approximate(ty) {
                Some(approximated) => ConeProjection::Out(approximated),
                None => projection,
            },
        }
    }

    /// Replace a captured-type argument with what was captured.
    fn captured_argument(
        &mut self,
        position: ConeProjection,
        constructor: CapturedConstructorId,
    ) -> ConeProjection {
        let Some(ctor) = self.db.captured_constructor_data(constructor) else {
            return ConeProjection::Star;
        };
        if self.guard.is_visiting(&constructor) {
            return ConeProjection::Star;
        }

        match (position, ctor.projection) {
            (ConeProjection::In(_), ConeProjection::In(captured)) => ConeProjection::In(captured),
            (ConeProjection::In(_), _) => ConeProjection::Star,
            (_, ConeProjection::Star) => ConeProjection::Star,
            (_, ConeProjection::Out(captured)) => {
                if !self.guard.enter(constructor).is_entered() {
                    return ConeProjection::Star;
                }
                let approximated = self.approximate(captured).unwrap_or(captured);
                self.guard.leave(constructor);
                ConeProjection::Out(approximated)
            }
            (_, ConeProjection::In(captured)) => ConeProjection::In(captured),
            (_, ConeProjection::Invariant(captured)) => ConeProjection::Invariant(captured),
        }
    }
}

#[cfg(test)]
#[path = "../tests/approximate_tests.rs"]
mod tests;
