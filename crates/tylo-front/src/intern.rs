//! Type interning for structural deduplication.
//!
//! This module implements the interning engine that converts `ConeTypeData`
//! values into lightweight `ConeTypeId` handles.
//!
//! Benefits:
//! - O(1) type equality (the visited-captured-types set is a set of ids)
//! - Memory efficient (each unique structure stored once)
//! - Safe to share between lowering threads (sharded `RwLock`s)

use crate::types::*;
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};
use tylo_common::interner::{Atom, NameInterner};

const SHARD_BITS: u32 = 6;
const SHARD_COUNT: usize = 1 << SHARD_BITS; // 64 shards
const SHARD_MASK: u32 = (SHARD_COUNT as u32) - 1;
const TYPE_LIST_INLINE: usize = 8;

type TypeListBuffer = SmallVec<[ConeTypeId; TYPE_LIST_INLINE]>;

struct TypeShard {
    key_to_index: RwLock<FxHashMap<ConeTypeData, u32>>,
    index_to_key: RwLock<Vec<ConeTypeData>>,
}

impl TypeShard {
    fn new() -> Self {
        TypeShard {
            key_to_index: RwLock::new(FxHashMap::default()),
            index_to_key: RwLock::new(Vec::new()),
        }
    }
}

struct SliceInterner<T> {
    items: Vec<Arc<[T]>>,
    map: FxHashMap<Arc<[T]>, u32>,
}

impl<T> SliceInterner<T>
where
    T: Eq + Hash,
{
    fn new() -> Self {
        let empty: Arc<[T]> = Arc::from(Vec::new());
        let mut map = FxHashMap::default();
        map.insert(empty.clone(), 0);
        SliceInterner {
            items: vec![empty],
            map,
        }
    }

    fn intern(&mut self, items: Vec<T>) -> u32 {
        if items.is_empty() {
            return 0;
        }

        if let Some(&id) = self.map.get(items.as_slice()) {
            return id;
        }

        let arc: Arc<[T]> = items.into();
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<[T]>> {
        self.items.get(id as usize).cloned()
    }

    fn empty(&self) -> Arc<[T]> {
        self.items[0].clone()
    }
}

/// Resolved-type interning table.
/// Thread-safe via RwLock for concurrent access.
pub struct ConeInterner {
    /// Sharded storage for interned types
    shards: [TypeShard; SHARD_COUNT],
    /// Classifier, type-parameter and annotation argument names
    pub names: NameInterner,
    projection_lists: RwLock<SliceInterner<ConeProjection>>,
    type_lists: RwLock<SliceInterner<ConeTypeId>>,
    captured_constructors: RwLock<Vec<CapturedConstructor>>,
}

impl ConeInterner {
    pub fn new() -> Self {
        ConeInterner {
            shards: std::array::from_fn(|_| TypeShard::new()),
            names: NameInterner::new(),
            projection_lists: RwLock::new(SliceInterner::new()),
            type_lists: RwLock::new(SliceInterner::new()),
            captured_constructors: RwLock::new(Vec::new()),
        }
    }

    /// Intern a string into an Atom.
    pub fn intern_string(&self, s: &str) -> Atom {
        self.names.intern(s)
    }

    /// Resolve an Atom back to its string value.
    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.names.resolve(atom).to_string()
    }

    /// Resolve an Atom without allocating a new String.
    pub fn resolve_atom_ref(&self, atom: Atom) -> Arc<str> {
        self.names.resolve(atom)
    }

    /// Classifier identity for a fully-qualified name.
    pub fn class_id(&self, fq_name: &str) -> ClassId {
        ClassId(self.intern_string(fq_name))
    }

    /// Fully-qualified name of a classifier identity.
    pub fn class_name(&self, id: ClassId) -> Arc<str> {
        self.resolve_atom_ref(id.0)
    }

    pub fn projection_list(&self, id: ProjectionListId) -> Arc<[ConeProjection]> {
        let lists = self
            .projection_lists
            .read()
            .expect("projection_lists lock poisoned");
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    pub fn type_list(&self, id: TypeListId) -> Arc<[ConeTypeId]> {
        let lists = self.type_lists.read().expect("type_lists lock poisoned");
        lists.get(id.0).unwrap_or_else(|| lists.empty())
    }

    /// Intern a type and return its id.
    /// If an equal type already exists, returns the existing id.
    pub fn intern(&self, data: ConeTypeData) -> ConeTypeId {
        if data == ConeTypeData::Error(Atom::NONE) {
            return ConeTypeId::ERROR;
        }

        let mut hasher = FxHasher::default();
        data.hash(&mut hasher);
        let shard_idx = (hasher.finish() as usize) & (SHARD_COUNT - 1);
        let shard = &self.shards[shard_idx];

        {
            let map = shard
                .key_to_index
                .read()
                .expect("shard key_to_index lock poisoned");
            if let Some(&local_index) = map.get(&data) {
                return self.make_id(local_index, shard_idx as u32);
            }
        }

        let mut map = shard
            .key_to_index
            .write()
            .expect("shard key_to_index lock poisoned");
        let mut storage = shard
            .index_to_key
            .write()
            .expect("shard index_to_key lock poisoned");

        if let Some(&local_index) = map.get(&data) {
            return self.make_id(local_index, shard_idx as u32);
        }

        let local_index = storage.len() as u32;
        if local_index > ((u32::MAX - ConeTypeId::FIRST_USER) >> SHARD_BITS) {
            return ConeTypeId::ERROR;
        }

        storage.push(data.clone());
        map.insert(data, local_index);

        self.make_id(local_index, shard_idx as u32)
    }

    /// Look up the data behind an id. `None` for ids this interner never issued.
    pub fn lookup(&self, id: ConeTypeId) -> Option<ConeTypeData> {
        if id.is_error() {
            return Some(ConeTypeData::Error(Atom::NONE));
        }

        let raw_val = id.0.checked_sub(ConeTypeId::FIRST_USER)?;
        let shard_idx = (raw_val & SHARD_MASK) as usize;
        let local_index = raw_val >> SHARD_BITS;

        let shard = self.shards.get(shard_idx)?;
        let storage = shard
            .index_to_key
            .read()
            .expect("shard index_to_key lock poisoned");
        storage.get(local_index as usize).cloned()
    }

    fn intern_projection_list(&self, args: Vec<ConeProjection>) -> ProjectionListId {
        let mut lists = self
            .projection_lists
            .write()
            .expect("projection_lists lock poisoned");
        ProjectionListId(lists.intern(args))
    }

    fn intern_type_list(&self, members: Vec<ConeTypeId>) -> TypeListId {
        let mut lists = self.type_lists.write().expect("type_lists lock poisoned");
        TypeListId(lists.intern(members))
    }

    /// Number of interned types, sentinel included.
    pub fn len(&self) -> usize {
        let mut total = ConeTypeId::FIRST_USER as usize;
        for shard in &self.shards {
            total += shard
                .index_to_key
                .read()
                .expect("shard index_to_key lock poisoned")
                .len();
        }
        total
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= ConeTypeId::FIRST_USER as usize
    }

    #[inline]
    fn make_id(&self, local_index: u32, shard_idx: u32) -> ConeTypeId {
        let raw_val = (local_index << SHARD_BITS) | (shard_idx & SHARD_MASK);
        ConeTypeId(ConeTypeId::FIRST_USER + raw_val)
    }

    // =========================================================================
    // Convenience constructors
    // =========================================================================

    /// Error type carrying a diagnostic message.
    pub fn error_type(&self, message: &str) -> ConeTypeId {
        let atom = self.intern_string(message);
        self.intern(ConeTypeData::Error(atom))
    }

    /// `C<args>` or `C<args>?`
    pub fn class_type(
        &self,
        class_id: ClassId,
        args: Vec<ConeProjection>,
        nullable: bool,
    ) -> ConeTypeId {
        self.class_type_with_attributes(class_id, args, nullable, ConeAttributes::empty())
    }

    pub fn class_type_with_attributes(
        &self,
        class_id: ClassId,
        args: Vec<ConeProjection>,
        nullable: bool,
        attributes: ConeAttributes,
    ) -> ConeTypeId {
        self.lookup_tag_based(LookupTag::Class(class_id), args, nullable, attributes)
    }

    /// Reference to a type parameter.
    pub fn type_parameter_type(&self, param: TypeParamId, nullable: bool) -> ConeTypeId {
        self.lookup_tag_based(
            LookupTag::TypeParameter(param),
            Vec::new(),
            nullable,
            ConeAttributes::empty(),
        )
    }

    pub fn lookup_tag_based(
        &self,
        tag: LookupTag,
        args: Vec<ConeProjection>,
        nullable: bool,
        attributes: ConeAttributes,
    ) -> ConeTypeId {
        let args = self.intern_projection_list(args);
        self.intern(ConeTypeData::LookupTagBased {
            tag,
            args,
            nullable,
            attributes,
        })
    }

    pub fn flexible(&self, lower: ConeTypeId, upper: ConeTypeId) -> ConeTypeId {
        self.intern(ConeTypeData::Flexible { lower, upper })
    }

    /// Allocate a fresh captured-type constructor for `projection`.
    ///
    /// Supertypes are attached separately with [`Self::set_captured_supertypes`]
    /// so that the bound may mention the captured type itself.
    pub fn captured_constructor(&self, projection: ConeProjection) -> CapturedConstructorId {
        let mut ctors = self
            .captured_constructors
            .write()
            .expect("captured_constructors lock poisoned");
        let id = CapturedConstructorId(ctors.len() as u32);
        ctors.push(CapturedConstructor {
            projection,
            supertypes: None,
        });
        id
    }

    /// Attach (or replace) the supertypes of a captured constructor.
    pub fn set_captured_supertypes(&self, id: CapturedConstructorId, supertypes: Vec<ConeTypeId>) {
        let mut ctors = self
            .captured_constructors
            .write()
            .expect("captured_constructors lock poisoned");
        if let Some(ctor) = ctors.get_mut(id.0 as usize) {
            ctor.supertypes = Some(supertypes.into());
        }
    }

    pub fn captured_constructor_data(&self, id: CapturedConstructorId) -> Option<CapturedConstructor> {
        self.captured_constructors
            .read()
            .expect("captured_constructors lock poisoned")
            .get(id.0 as usize)
            .cloned()
    }

    pub fn captured(
        &self,
        constructor: CapturedConstructorId,
        lower: Option<ConeTypeId>,
        nullable: bool,
    ) -> ConeTypeId {
        self.intern(ConeTypeData::Captured {
            constructor,
            lower,
            nullable,
        })
    }

    /// `T & Any`. Wrapping an already definitely-not-null type is a no-op.
    pub fn definitely_not_null(&self, original: ConeTypeId) -> ConeTypeId {
        if let Some(ConeTypeData::DefinitelyNotNull(_)) = self.lookup(original) {
            return original;
        }
        self.intern(ConeTypeData::DefinitelyNotNull(original))
    }

    /// Intersection of `members`, keeping first-occurrence order.
    ///
    /// Duplicates are dropped and a single member is returned as-is.
    pub fn intersection(&self, members: Vec<ConeTypeId>) -> ConeTypeId {
        let mut seen = FxHashSet::default();
        let unique: TypeListBuffer = members.into_iter().filter(|m| seen.insert(*m)).collect();
        if unique.len() == 1 {
            return unique[0];
        }
        let list = self.intern_type_list(unique.into_vec());
        self.intern(ConeTypeData::Intersection(list))
    }

    pub fn stub(&self, variable: u32) -> ConeTypeId {
        self.intern(ConeTypeData::Stub(variable))
    }

    pub fn integer_literal(&self, value: i64, nullable: bool) -> ConeTypeId {
        self.intern(ConeTypeData::IntegerLiteral { value, nullable })
    }

    /// The same type with its "marked nullable" flag replaced.
    pub fn with_nullability(&self, ty: ConeTypeId, nullable: bool) -> ConeTypeId {
        let Some(data) = self.lookup(ty) else {
            return ty;
        };
        match data {
            ConeTypeData::Error(_) | ConeTypeData::Stub(_) => ty,
            ConeTypeData::LookupTagBased {
                tag,
                args,
                nullable: current,
                attributes,
            } => {
                if current == nullable {
                    return ty;
                }
                self.intern(ConeTypeData::LookupTagBased {
                    tag,
                    args,
                    nullable,
                    attributes,
                })
            }
            ConeTypeData::Flexible { lower, upper } => {
                let lower = self.with_nullability(lower, nullable);
                let upper = self.with_nullability(upper, nullable);
                self.flexible(lower, upper)
            }
            ConeTypeData::Captured {
                constructor,
                lower,
                ..
            } => self.captured(constructor, lower, nullable),
            ConeTypeData::DefinitelyNotNull(original) => {
                if nullable {
                    self.with_nullability(original, true)
                } else {
                    ty
                }
            }
            ConeTypeData::Intersection(list) => {
                let members = self
                    .type_list(list)
                    .iter()
                    .map(|&member| self.with_nullability(member, nullable))
                    .collect();
                self.intersection(members)
            }
            ConeTypeData::IntegerLiteral { value, .. } => self.integer_literal(value, nullable),
        }
    }

    /// The type's own "marked nullable" flag.
    pub fn is_marked_nullable(&self, ty: ConeTypeId) -> bool {
        match self.lookup(ty) {
            Some(ConeTypeData::LookupTagBased { nullable, .. })
            | Some(ConeTypeData::Captured { nullable, .. })
            | Some(ConeTypeData::IntegerLiteral { nullable, .. }) => nullable,
            Some(ConeTypeData::Flexible { upper, .. }) => self.is_marked_nullable(upper),
            _ => false,
        }
    }
}

impl Default for ConeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
