//! Shared fixture for the lowering tests.

use crate::context::ConversionTypeContext;
use crate::options::LoweringOptions;
use crate::session::LoweringSession;
use std::ops::Deref;
use tylo_front::{ClassId, ClassKind, ConeProjection, ConeTypeId, TypeParamId};
use tylo_ir::IrType;

pub(crate) struct TestEnv {
    session: LoweringSession,
}

impl Deref for TestEnv {
    type Target = LoweringSession;

    fn deref(&self) -> &LoweringSession {
        &self.session
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_options(LoweringOptions::default())
    }

    pub fn with_options(options: LoweringOptions) -> Self {
        Self {
            session: LoweringSession::new(options),
        }
    }

    /// Register a class named `fq_name` and return its id.
    pub fn class(&self, fq_name: &str) -> ClassId {
        let class_id = self.db.class_id(fq_name);
        self.symbols.register_class(class_id, ClassKind::Class);
        class_id
    }

    pub fn class_type(&self, class_id: ClassId, args: Vec<ConeProjection>) -> ConeTypeId {
        self.db.class_type(class_id, args, false)
    }

    pub fn type_parameter(&self, name: &str) -> TypeParamId {
        self.symbols
            .declare_type_parameter(self.db.intern_string(name))
    }

    /// Captured type of `projection` with the given supertypes.
    pub fn captured(&self, projection: ConeProjection, supertypes: Vec<ConeTypeId>) -> ConeTypeId {
        let ctor = self.db.captured_constructor(projection);
        self.db.set_captured_supertypes(ctor, supertypes);
        self.db.captured(ctor, None, false)
    }

    pub fn string(&self) -> ConeTypeId {
        self.class_type(self.standard.string, vec![])
    }

    pub fn number(&self) -> ConeTypeId {
        self.class_type(self.standard.number, vec![])
    }

    /// Lower `ty` in the default context.
    pub fn lower(&self, ty: ConeTypeId) -> IrType {
        self.with_converter(|converter| converter.lower_type(ty, ConversionTypeContext::DEFAULT))
    }
}
