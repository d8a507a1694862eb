//! Per-call conversion context.

/// Why a type is being lowered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConversionTypeOrigin {
    #[default]
    Default,
    /// Signature of a property setter, which owns its own type parameters.
    Setter,
}

/// Immutable flags threaded through one top-level lowering call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConversionTypeContext {
    /// Set beneath a definitely-not-null wrapper: every type lowers non-null.
    pub definitely_not_null: bool,
    pub origin: ConversionTypeOrigin,
}

impl ConversionTypeContext {
    pub const DEFAULT: ConversionTypeContext = ConversionTypeContext {
        definitely_not_null: false,
        origin: ConversionTypeOrigin::Default,
    };

    pub const IN_SETTER: ConversionTypeContext = ConversionTypeContext {
        definitely_not_null: false,
        origin: ConversionTypeOrigin::Setter,
    };

    /// The same context with non-null forced.
    pub fn definitely_not_null(self) -> Self {
        Self {
            definitely_not_null: true,
            ..self
        }
    }

    pub fn in_setter(self) -> Self {
        Self {
            origin: ConversionTypeOrigin::Setter,
            ..self
        }
    }
}
