//! Lowering of type-argument projections.

use crate::context::ConversionTypeContext;
use crate::convert::TypeConverter;
use rustc_hash::FxHashSet;
use tracing::trace;
use tylo_front::{ConeProjection, ConeTypeId};
use tylo_ir::{make_type_projection, IrTypeArgument, Variance};

impl TypeConverter<'_> {
    /// Lower one type argument.
    ///
    /// An argument whose type is a captured type in `visited` is first
    /// approximated to a supertype; the approximation is lowered in its
    /// place, or the type itself when no approximation applies.
    pub fn lower_type_argument(
        &self,
        projection: ConeProjection,
        context: ConversionTypeContext,
        visited: &mut FxHashSet<ConeTypeId>,
    ) -> IrTypeArgument {
        self.lower_argument_at_depth(projection, context, visited, 0)
    }

    pub(crate) fn lower_argument_at_depth(
        &self,
        projection: ConeProjection,
        context: ConversionTypeContext,
        visited: &mut FxHashSet<ConeTypeId>,
        depth: u32,
    ) -> IrTypeArgument {
        let (variance, ty) = match projection {
            ConeProjection::Star => return IrTypeArgument::Star,
            ConeProjection::In(ty) => (Variance::In, ty),
            ConeProjection::Out(ty) => (Variance::Out, ty),
            ConeProjection::Invariant(ty) => (Variance::Invariant, ty),
        };

        let target = if visited.contains(&ty) {
            let config = self.components.options.captured_argument_approximation;
            let approximated = self
                .components
                .approximator
                .approximate_to_super_type(ty, config);
            trace!(ty = ty.0, ?approximated, "argument refers to a visited captured type");
            approximated.unwrap_or(ty)
        } else {
            ty
        };

        let lowered = self.lower_at_depth(target, context, visited, &[], depth);
        make_type_projection(lowered, variance)
    }
}
