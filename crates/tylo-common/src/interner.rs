//! Interned names.
//!
//! Classifier names (`lang/collections/List`), type-parameter names and
//! annotation argument names are interned once and passed around as `Atom`s.
//! A classifier's identity is its name atom, so two atoms are equal exactly
//! when the names are. An interner that cannot keep that promise (poisoned
//! lock, exhausted shard) panics.

use rustc_hash::{FxHashMap, FxHasher};
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

/// An interned name: a shard index in the high bits, a slot in the low bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty name.
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Atom::NONE
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

const SHARD_BITS: u32 = 5;
const SHARD_COUNT: usize = 1 << SHARD_BITS;
const SLOT_BITS: u32 = u32::BITS - SHARD_BITS;
const SLOT_MASK: u32 = (1 << SLOT_BITS) - 1;

#[derive(Default)]
struct NameShard {
    atoms: FxHashMap<Arc<str>, Atom>,
    names: Vec<Arc<str>>,
}

/// Concurrent name interner.
///
/// Names are spread over a fixed set of `RwLock`ed shards by hash, so
/// lowering threads interning different names rarely contend.
pub struct NameInterner {
    shards: Box<[RwLock<NameShard>]>,
}

impl NameInterner {
    /// Empty interner; the empty name is `Atom::NONE`.
    pub fn new() -> Self {
        let shards: Box<[RwLock<NameShard>]> =
            (0..SHARD_COUNT).map(|_| RwLock::default()).collect();
        {
            let mut first = shards[0].write().expect("name shard lock poisoned");
            let empty: Arc<str> = Arc::from("");
            first.names.push(Arc::clone(&empty));
            first.atoms.insert(empty, Atom::NONE);
        }
        NameInterner { shards }
    }

    /// Atom for `name`, allocating one on first sight.
    pub fn intern(&self, name: &str) -> Atom {
        if name.is_empty() {
            return Atom::NONE;
        }
        let shard_index = Self::shard_for(name);
        let shard = &self.shards[shard_index];

        if let Some(&atom) = shard
            .read()
            .expect("name shard lock poisoned")
            .atoms
            .get(name)
        {
            return atom;
        }

        let mut shard = shard.write().expect("name shard lock poisoned");
        if let Some(&atom) = shard.atoms.get(name) {
            return atom;
        }
        let atom = Self::make_atom(shard_index, shard.names.len());
        let name: Arc<str> = Arc::from(name);
        shard.names.push(Arc::clone(&name));
        shard.atoms.insert(name, atom);
        atom
    }

    /// The name behind `atom`, or `None` if this interner never issued it.
    pub fn get(&self, atom: Atom) -> Option<Arc<str>> {
        let shard = self.shards.get((atom.0 >> SLOT_BITS) as usize)?;
        let shard = shard.read().expect("name shard lock poisoned");
        shard.names.get((atom.0 & SLOT_MASK) as usize).cloned()
    }

    /// The name behind `atom`; the empty name for atoms from elsewhere.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        self.get(atom).unwrap_or_else(|| Arc::from(""))
    }

    fn shard_for(name: &str) -> usize {
        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        (hasher.finish() as usize) % SHARD_COUNT
    }

    fn make_atom(shard_index: usize, slot: usize) -> Atom {
        let slot = u32::try_from(slot)
            .ok()
            .filter(|slot| *slot <= SLOT_MASK)
            .unwrap_or_else(|| panic!("name shard {shard_index} is full"));
        Atom(((shard_index as u32) << SLOT_BITS) | slot)
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod tests;
