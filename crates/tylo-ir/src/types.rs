//! IR types.
//!
//! The back end only knows simple types: a classifier symbol, a nullability
//! flag, type arguments and annotations. Everything the front end can
//! express beyond that is lowered into this shape or into `IrType::Error`.

use crate::symbols::{IrClassSymbol, IrClassifierSymbol};
use serde::Serialize;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    Invariant,
    In,
    Out,
}

impl Variance {
    /// Source keyword, empty for invariant.
    pub fn label(self) -> &'static str {
        match self {
            Variance::Invariant => "",
            Variance::In => "in",
            Variance::Out => "out",
        }
    }
}

/// Constant annotation argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum IrConst {
    Bool(bool),
    Int(i64),
    String(Arc<str>),
}

/// Annotation instance attached to a type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrConstructorCall {
    pub annotation_class: IrClassSymbol,
    pub arguments: Vec<(Arc<str>, IrConst)>,
}

impl IrConstructorCall {
    pub fn new(annotation_class: IrClassSymbol) -> Self {
        Self {
            annotation_class,
            arguments: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IrTypeArgument {
    Star,
    Projection { variance: Variance, ty: IrType },
}

impl IrTypeArgument {
    /// The projected type, `None` for star.
    pub fn ty(&self) -> Option<&IrType> {
        match self {
            IrTypeArgument::Star => None,
            IrTypeArgument::Projection { ty, .. } => Some(ty),
        }
    }
}

/// `variance ty` as a type argument.
pub fn make_type_projection(ty: IrType, variance: Variance) -> IrTypeArgument {
    IrTypeArgument::Projection { variance, ty }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrSimpleType {
    pub classifier: IrClassifierSymbol,
    pub nullable: bool,
    pub arguments: Vec<IrTypeArgument>,
    pub annotations: Vec<IrConstructorCall>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IrType {
    /// Unresolvable or unrepresentable type.
    Error,
    Simple(IrSimpleType),
}

impl IrType {
    /// Non-null, argument-free type of `classifier`.
    pub fn simple(classifier: impl Into<IrClassifierSymbol>) -> IrType {
        IrType::Simple(IrSimpleType {
            classifier: classifier.into(),
            nullable: false,
            arguments: Vec::new(),
            annotations: Vec::new(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, IrType::Error)
    }

    pub fn as_simple(&self) -> Option<&IrSimpleType> {
        match self {
            IrType::Simple(simple) => Some(simple),
            IrType::Error => None,
        }
    }

    pub fn classifier(&self) -> Option<IrClassifierSymbol> {
        self.as_simple().map(|simple| simple.classifier)
    }

    pub fn is_nullable(&self) -> bool {
        self.as_simple().is_some_and(|simple| simple.nullable)
    }

    pub fn arguments(&self) -> &[IrTypeArgument] {
        self.as_simple().map_or(&[], |simple| &simple.arguments)
    }

    pub fn annotations(&self) -> &[IrConstructorCall] {
        self.as_simple().map_or(&[], |simple| &simple.annotations)
    }

    /// The same type with its nullability replaced. Error stays error.
    pub fn with_nullability(&self, nullable: bool) -> IrType {
        match self {
            IrType::Error => IrType::Error,
            IrType::Simple(simple) => IrType::Simple(IrSimpleType {
                nullable,
                ..simple.clone()
            }),
        }
    }
}
