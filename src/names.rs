//! String-to-id interning for shader properties and temporary targets.
//!
//! Names cross the device boundary as small integers, not strings. The
//! mapping is memoized in a process-global table: the same string always
//! yields the same [`NameId`] within a process lifetime. The table is
//! created lazily on first use and is never torn down.

use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;
use crate::ids::NameId;

/// Name interning table.
///
/// Lookup-or-insert is the sole mutating operation. Most callers go through
/// the process-global instance via [`intern`]; a standalone registry is
/// useful in tests and tools that must not touch global state.
pub struct NameRegistry {
    ids: FxHashMap<String, NameId>,
    names: Vec<String>,
}

impl NameRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            ids: FxHashMap::default(),
            names: Vec::new(),
        }
    }

    /// Look up the id for a name, inserting it on first sight.
    ///
    /// Idempotent: interning the same string twice yields the same id.
    pub fn intern(&mut self, name: &str) -> NameId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = NameId::new(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up the id for a name without inserting
    pub fn lookup(&self, name: &str) -> Option<NameId> {
        self.ids.get(name).copied()
    }

    /// Reverse lookup: the string a given id was interned from
    pub fn name(&self, id: NameId) -> Option<&str> {
        self.names.get(id.value() as usize).map(|s| s.as_str())
    }

    /// Number of interned names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if nothing has been interned yet
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===== PROCESS-GLOBAL REGISTRY =====

/// Global name table, created lazily on first use
static GLOBAL_NAMES: OnceLock<RwLock<NameRegistry>> = OnceLock::new();

fn read_global() -> RwLockReadGuard<'static, NameRegistry> {
    let lock = GLOBAL_NAMES.get_or_init(|| RwLock::new(NameRegistry::new()));
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_global() -> RwLockWriteGuard<'static, NameRegistry> {
    let lock = GLOBAL_NAMES.get_or_init(|| RwLock::new(NameRegistry::new()));
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Intern a name in the process-global table.
///
/// Safe to call from multiple threads: a read lock covers the common
/// already-interned path, and the insert path re-checks under the write
/// lock so two racing callers cannot mint two ids for one string.
/// Never fails.
pub fn intern(name: &str) -> NameId {
    {
        let registry = read_global();
        if let Some(id) = registry.lookup(name) {
            return id;
        }
    }
    write_global().intern(name)
}

/// Look up a name in the process-global table without interning it
pub fn lookup(name: &str) -> Option<NameId> {
    read_global().lookup(name)
}

/// Reverse lookup in the process-global table
pub fn name_of(id: NameId) -> Option<String> {
    read_global().name(id).map(|s| s.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
