//! Lowering of source annotations on type references.

use crate::context::ConversionTypeContext;
use crate::storage::ClassifierStorage;
use tracing::debug;
use tylo_front::{
    ClassKind, ConeInterner, ConstValue, FirAnnotation, FrontSymbol, FrontSymbolTable, LookupTag,
};
use tylo_ir::{IrClassifierSymbol, IrConst, IrConstructorCall};

/// Turns source annotations into back-end annotation calls.
pub trait AnnotationTranslator: Send + Sync {
    fn lower(&self, annotations: &[FirAnnotation]) -> Vec<IrConstructorCall>;
}

/// Resolves each annotation class through the classifier storage.
///
/// Annotations whose class is not a declared annotation class, or does not
/// resolve to a back-end class, are dropped.
pub struct AnnotationGenerator<'a> {
    db: &'a ConeInterner,
    symbols: &'a FrontSymbolTable,
    storage: &'a dyn ClassifierStorage,
}

impl<'a> AnnotationGenerator<'a> {
    pub fn new(
        db: &'a ConeInterner,
        symbols: &'a FrontSymbolTable,
        storage: &'a dyn ClassifierStorage,
    ) -> Self {
        Self {
            db,
            symbols,
            storage,
        }
    }

    fn lower_one(&self, annotation: &FirAnnotation) -> Option<IrConstructorCall> {
        let symbol = self.symbols.to_symbol(LookupTag::Class(annotation.class_id))?;
        if !matches!(symbol, FrontSymbol::Class(_, ClassKind::AnnotationClass)) {
            return None;
        }
        let IrClassifierSymbol::Class(annotation_class) = self
            .storage
            .resolve_symbol(&symbol, ConversionTypeContext::DEFAULT)?
        else {
            return None;
        };

        let arguments = annotation
            .arguments
            .iter()
            .map(|(name, value)| (self.db.resolve_atom_ref(*name), self.lower_const(value)))
            .collect();
        Some(IrConstructorCall {
            annotation_class,
            arguments,
        })
    }

    fn lower_const(&self, value: &ConstValue) -> IrConst {
        match *value {
            ConstValue::Bool(value) => IrConst::Bool(value),
            ConstValue::Int(value) => IrConst::Int(value),
            ConstValue::String(atom) => IrConst::String(self.db.resolve_atom_ref(atom)),
        }
    }
}

impl AnnotationTranslator for AnnotationGenerator<'_> {
    fn lower(&self, annotations: &[FirAnnotation]) -> Vec<IrConstructorCall> {
        annotations
            .iter()
            .filter_map(|annotation| {
                let call = self.lower_one(annotation);
                if call.is_none() {
                    debug!(
                        class = %self.db.class_name(annotation.class_id),
                        "dropping annotation without a resolvable annotation class"
                    );
                }
                call
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/annotations_tests.rs"]
mod tests;
