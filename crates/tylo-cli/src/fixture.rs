//! JSON fixtures: a small type universe plus the types to lower.
//!
//! ```json
//! {
//!   "classes": [{ "name": "test/Box", "kind": "class" }],
//!   "typeParameters": [{ "name": "T" }],
//!   "types": [
//!     { "name": "boxed", "type": { "class": { "name": "test/Box",
//!         "args": [{ "out": { "param": { "name": "T" } } }] } } }
//!   ]
//! }
//! ```
//!
//! Type parameters and captured types are referenced by name. Class names
//! need no declaration: an undeclared class lowers to the error type.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use tylo::front::{
    ClassKind, ConeAttributes, ConeProjection, ConeTypeId, ConstValue, FirAnnotation, TypeParamId,
};
use tylo::lowering::{
    ConversionTypeContext, ImplicitBuiltinType, LoweringOptions, LoweringSession, TypeRef,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub options: LoweringOptions,
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterEntry>,
    #[serde(default)]
    pub aliases: Vec<AliasEntry>,
    #[serde(default)]
    pub captured: Vec<CapturedEntry>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKindSpec,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKindSpec {
    #[default]
    Class,
    Interface,
    Object,
    AnnotationClass,
}

impl From<ClassKindSpec> for ClassKind {
    fn from(kind: ClassKindSpec) -> Self {
        match kind {
            ClassKindSpec::Class => ClassKind::Class,
            ClassKindSpec::Interface => ClassKind::Interface,
            ClassKindSpec::Object => ClassKind::Object,
            ClassKindSpec::AnnotationClass => ClassKind::AnnotationClass,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TypeParameterEntry {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasEntry {
    pub name: String,
    /// Names from the fixture's `typeParameters`.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    pub expanded: TypeSpec,
}

/// A captured type. `projection` and `lower` may only mention captured
/// types listed before this one; `supertypes` may mention any. Without a
/// `lower` bound at least one supertype is required.
#[derive(Debug, Deserialize)]
pub struct CapturedEntry {
    pub name: String,
    pub projection: ProjectionSpec,
    #[serde(default)]
    pub lower: Option<TypeSpec>,
    #[serde(default)]
    pub supertypes: Vec<TypeSpec>,
    #[serde(default)]
    pub nullable: bool,
}

/// One type to lower. With neither `type` nor `implicit` the reference is
/// unresolved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeSpec>,
    #[serde(default)]
    pub implicit: Option<ImplicitBuiltinType>,
    #[serde(default)]
    pub annotations: Vec<AnnotationSpec>,
    #[serde(default)]
    pub setter: bool,
    #[serde(default)]
    pub definitely_not_null: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnnotationSpec {
    pub class: String,
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSpec {
    Class {
        name: String,
        #[serde(default)]
        args: Vec<ProjectionSpec>,
        #[serde(default)]
        nullable: bool,
        #[serde(default)]
        extension_function: bool,
    },
    Param {
        name: String,
        #[serde(default)]
        nullable: bool,
    },
    Captured {
        name: String,
    },
    Flexible {
        lower: Box<TypeSpec>,
        upper: Box<TypeSpec>,
    },
    NotNull(Box<TypeSpec>),
    Intersection(Vec<TypeSpec>),
    Error,
    Stub,
    IntegerLiteral {
        value: i64,
        #[serde(default)]
        nullable: bool,
    },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionSpec {
    Star,
    In(TypeSpec),
    Out(TypeSpec),
    Invariant(TypeSpec),
}

/// A fixture materialized into a lowering session.
pub struct LoadedFixture {
    pub session: LoweringSession,
    pub entries: Vec<FixtureEntry>,
}

pub struct FixtureEntry {
    pub name: String,
    pub type_ref: TypeRef,
    pub context: ConversionTypeContext,
}

pub fn load_fixture(path: &Path) -> Result<LoadedFixture> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    let fixture = parse_fixture(&text)
        .with_context(|| format!("failed to parse fixture {}", path.display()))?;
    build_fixture(fixture).with_context(|| format!("invalid fixture {}", path.display()))
}

pub fn parse_fixture(text: &str) -> Result<Fixture> {
    Ok(serde_json::from_str(text)?)
}

pub fn build_fixture(fixture: Fixture) -> Result<LoadedFixture> {
    let session = LoweringSession::new(fixture.options.clone());
    let entries = {
        let mut builder = FixtureBuilder::new(&session);
        builder.declare(&fixture)?;
        fixture
            .types
            .iter()
            .map(|entry| builder.entry(entry))
            .collect::<Result<Vec<_>>>()?
    };
    debug!(entries = entries.len(), "fixture loaded");
    Ok(LoadedFixture { session, entries })
}

struct FixtureBuilder<'a> {
    session: &'a LoweringSession,
    params: FxHashMap<String, TypeParamId>,
    captured: FxHashMap<String, ConeTypeId>,
}

impl<'a> FixtureBuilder<'a> {
    fn new(session: &'a LoweringSession) -> Self {
        Self {
            session,
            params: FxHashMap::default(),
            captured: FxHashMap::default(),
        }
    }

    fn declare(&mut self, fixture: &Fixture) -> Result<()> {
        let session = self.session;
        let db = &session.db;
        let symbols = &session.symbols;

        for class in &fixture.classes {
            symbols.register_class(db.class_id(&class.name), class.kind.into());
        }

        for param in &fixture.type_parameters {
            let id = symbols.declare_type_parameter(db.intern_string(&param.name));
            if self.params.insert(param.name.clone(), id).is_some() {
                bail!("duplicate type parameter `{}`", param.name);
            }
        }

        let mut constructors = Vec::with_capacity(fixture.captured.len());
        for entry in &fixture.captured {
            let projection = self
                .projection(&entry.projection)
                .with_context(|| format!("in captured type `{}`", entry.name))?;
            let lower = entry
                .lower
                .as_ref()
                .map(|lower| self.ty(lower))
                .transpose()
                .with_context(|| format!("in captured type `{}`", entry.name))?;
            let constructor = db.captured_constructor(projection);
            let ty = db.captured(constructor, lower, entry.nullable);
            if self.captured.insert(entry.name.clone(), ty).is_some() {
                bail!("duplicate captured type `{}`", entry.name);
            }
            constructors.push(constructor);
        }
        for (entry, constructor) in fixture.captured.iter().zip(constructors) {
            if entry.lower.is_none() && entry.supertypes.is_empty() {
                bail!(
                    "captured type `{}` needs a lower bound or at least one supertype",
                    entry.name
                );
            }
            let supertypes = self
                .types(&entry.supertypes)
                .with_context(|| format!("in supertypes of `{}`", entry.name))?;
            db.set_captured_supertypes(constructor, supertypes);
        }

        for alias in &fixture.aliases {
            let params = alias
                .type_parameters
                .iter()
                .map(|name| self.param(name))
                .collect::<Result<Vec<_>>>()?;
            let expanded = self
                .ty(&alias.expanded)
                .with_context(|| format!("in alias `{}`", alias.name))?;
            symbols.register_type_alias(db.class_id(&alias.name), params, expanded);
        }
        Ok(())
    }

    fn entry(&self, entry: &TypeEntry) -> Result<FixtureEntry> {
        let type_ref = match (&entry.ty, entry.implicit) {
            (Some(_), Some(_)) => {
                bail!("entry `{}` has both `type` and `implicit`", entry.name)
            }
            (None, Some(builtin)) => TypeRef::ImplicitBuiltin(builtin),
            (None, None) => TypeRef::Unresolved,
            (Some(ty), None) => TypeRef::Resolved {
                ty: self
                    .ty(ty)
                    .with_context(|| format!("in entry `{}`", entry.name))?,
                annotations: entry
                    .annotations
                    .iter()
                    .map(|annotation| self.annotation(annotation))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("in annotations of `{}`", entry.name))?,
            },
        };
        let mut context = ConversionTypeContext::DEFAULT;
        if entry.setter {
            context = context.in_setter();
        }
        if entry.definitely_not_null {
            context = context.definitely_not_null();
        }
        Ok(FixtureEntry {
            name: entry.name.clone(),
            type_ref,
            context,
        })
    }

    fn param(&self, name: &str) -> Result<TypeParamId> {
        match self.params.get(name) {
            Some(id) => Ok(*id),
            None => bail!("unknown type parameter `{name}`"),
        }
    }

    fn types(&self, specs: &[TypeSpec]) -> Result<Vec<ConeTypeId>> {
        specs.iter().map(|spec| self.ty(spec)).collect()
    }

    fn ty(&self, spec: &TypeSpec) -> Result<ConeTypeId> {
        let db = &self.session.db;
        Ok(match spec {
            TypeSpec::Class {
                name,
                args,
                nullable,
                extension_function,
            } => {
                let args = args
                    .iter()
                    .map(|arg| self.projection(arg))
                    .collect::<Result<Vec<_>>>()?;
                let attributes = if *extension_function {
                    ConeAttributes::EXTENSION_FUNCTION_TYPE
                } else {
                    ConeAttributes::empty()
                };
                db.class_type_with_attributes(db.class_id(name), args, *nullable, attributes)
            }
            TypeSpec::Param { name, nullable } => {
                db.type_parameter_type(self.param(name)?, *nullable)
            }
            TypeSpec::Captured { name } => match self.captured.get(name) {
                Some(ty) => *ty,
                None => bail!("unknown captured type `{name}`"),
            },
            TypeSpec::Flexible { lower, upper } => db.flexible(self.ty(lower)?, self.ty(upper)?),
            TypeSpec::NotNull(inner) => db.definitely_not_null(self.ty(inner)?),
            TypeSpec::Intersection(members) => db.intersection(self.types(members)?),
            TypeSpec::Error => db.error_type("error type in fixture"),
            TypeSpec::Stub => db.stub(0),
            TypeSpec::IntegerLiteral { value, nullable } => db.integer_literal(*value, *nullable),
        })
    }

    fn projection(&self, spec: &ProjectionSpec) -> Result<ConeProjection> {
        Ok(match spec {
            ProjectionSpec::Star => ConeProjection::Star,
            ProjectionSpec::In(ty) => ConeProjection::In(self.ty(ty)?),
            ProjectionSpec::Out(ty) => ConeProjection::Out(self.ty(ty)?),
            ProjectionSpec::Invariant(ty) => ConeProjection::Invariant(self.ty(ty)?),
        })
    }

    fn annotation(&self, spec: &AnnotationSpec) -> Result<FirAnnotation> {
        let db = &self.session.db;
        let mut annotation = FirAnnotation::new(db.class_id(&spec.class));
        for (name, value) in &spec.arguments {
            let value = match value {
                serde_json::Value::Bool(b) => ConstValue::Bool(*b),
                serde_json::Value::String(s) => ConstValue::String(db.intern_string(s)),
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => ConstValue::Int(i),
                    None => bail!("annotation argument `{name}` is not an integer: {n}"),
                },
                other => bail!("unsupported annotation argument `{name}`: {other}"),
            };
            annotation = annotation.with_argument(db.intern_string(name), value);
        }
        Ok(annotation)
    }
}

#[cfg(test)]
#[path = "../tests/fixture_tests.rs"]
mod tests;
