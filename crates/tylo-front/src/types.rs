//! Resolved ("cone") type representation.
//!
//! Types are interned: a `ConeTypeId` is a `u32` handle into the
//! `ConeInterner`, and two handles are equal exactly when the types are
//! structurally equal. Captured types are the exception: their identity is
//! the captured constructor, so two captures of the same projection never
//! compare equal.

use std::sync::Arc;
use tylo_common::interner::Atom;

/// Interned handle of a resolved type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConeTypeId(pub u32);

impl ConeTypeId {
    /// The unresolved/invalid type with no diagnostic attached.
    pub const ERROR: ConeTypeId = ConeTypeId(0);

    /// First id handed out for interned (non-sentinel) types.
    pub const FIRST_USER: u32 = 1;

    #[inline]
    pub fn is_error(self) -> bool {
        self == Self::ERROR
    }
}

/// Fully-qualified classifier identity, e.g. `lang/collections/List`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub Atom);

/// Identity of a declared type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

/// Identity of a captured type's constructor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapturedConstructorId(pub u32);

/// Interned list of type-argument projections.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectionListId(pub u32);

/// Interned list of types (intersection components).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeListId(pub u32);

/// What a classifier-based type points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LookupTag {
    /// A class, interface, object or type alias.
    Class(ClassId),
    /// A type parameter in scope.
    TypeParameter(TypeParamId),
}

impl LookupTag {
    /// The classifier identity, if the tag names a class-like classifier.
    #[inline]
    pub fn class_id(self) -> Option<ClassId> {
        match self {
            LookupTag::Class(id) => Some(id),
            LookupTag::TypeParameter(_) => None,
        }
    }
}

bitflags::bitflags! {
    /// Attributes attached to a classifier-based type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ConeAttributes: u8 {
        /// `A.(B) -> C`: a function type whose first parameter is the receiver.
        const EXTENSION_FUNCTION_TYPE = 1 << 0;
        /// Type is exact and must not be widened by inference.
        const EXACT = 1 << 1;
        /// Type must not take part in inference.
        const NO_INFER = 1 << 2;
    }
}

/// Type-argument projection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConeProjection {
    /// `*`
    Star,
    /// `in T`
    In(ConeTypeId),
    /// `out T`
    Out(ConeTypeId),
    /// `T`
    Invariant(ConeTypeId),
}

impl ConeProjection {
    /// The wrapped type, `None` for star.
    #[inline]
    pub fn type_id(self) -> Option<ConeTypeId> {
        match self {
            ConeProjection::Star => None,
            ConeProjection::In(ty) | ConeProjection::Out(ty) | ConeProjection::Invariant(ty) => {
                Some(ty)
            }
        }
    }

    /// Same variance, different type. Star stays star.
    #[inline]
    pub fn with_type(self, ty: ConeTypeId) -> Self {
        match self {
            ConeProjection::Star => ConeProjection::Star,
            ConeProjection::In(_) => ConeProjection::In(ty),
            ConeProjection::Out(_) => ConeProjection::Out(ty),
            ConeProjection::Invariant(_) => ConeProjection::Invariant(ty),
        }
    }
}

/// The structural content of a resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConeTypeData {
    /// Unresolved or invalid type. The atom is an optional diagnostic.
    Error(Atom),

    /// Reference to a class-like classifier or a type parameter.
    LookupTagBased {
        tag: LookupTag,
        args: ProjectionListId,
        nullable: bool,
        attributes: ConeAttributes,
    },

    /// Platform type with an imprecise bound.
    Flexible {
        lower: ConeTypeId,
        upper: ConeTypeId,
    },

    /// Captured type variable.
    Captured {
        constructor: CapturedConstructorId,
        lower: Option<ConeTypeId>,
        nullable: bool,
    },

    /// `T & Any`: forces non-null interpretation of the wrapped type.
    DefinitelyNotNull(ConeTypeId),

    /// Ordered, non-empty set of component types.
    Intersection(TypeListId),

    /// Inference placeholder for a type variable.
    Stub(u32),

    /// Literal type of an integer constant before its type is fixed.
    IntegerLiteral { value: i64, nullable: bool },
}

/// Constructor of a captured type: what was captured and the bound.
#[derive(Clone, Debug)]
pub struct CapturedConstructor {
    /// The projection that was captured.
    pub projection: ConeProjection,
    /// Upper-bound supertypes. `None` until the front end attaches them.
    pub supertypes: Option<Arc<[ConeTypeId]>>,
}

/// Constant annotation argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    String(Atom),
}

/// Annotation call attached to a type reference in source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FirAnnotation {
    pub class_id: ClassId,
    pub arguments: Vec<(Atom, ConstValue)>,
}

impl FirAnnotation {
    pub fn new(class_id: ClassId) -> Self {
        Self {
            class_id,
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: Atom, value: ConstValue) -> Self {
        self.arguments.push((name, value));
        self
    }
}
