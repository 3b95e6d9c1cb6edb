// splike-core - Ordered hash values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The `Hash` runtime value: an insertion-ordered, mutable associative
//! container. Clones share the same storage, so mutation through one
//! reference is visible through every other.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;

thread_local! {
    /// Hashes currently being walked by `Display`, `Debug` or JSON
    /// conversion, innermost last.
    static WALKING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a hash as being walked. Dropping the guard unmarks it.
pub(crate) struct WalkGuard(usize);

impl Drop for WalkGuard {
    fn drop(&mut self) {
        WALKING.with(|walking| {
            let mut walking = walking.borrow_mut();
            if let Some(index) = walking.iter().rposition(|id| *id == self.0) {
                walking.remove(index);
            }
        });
    }
}

#[derive(Clone, Default)]
pub struct Hash {
    entries: Rc<RefCell<Vec<(Value, Value)>>>,
}

impl Hash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from alternating keys and values. A trailing key without a
    /// value maps to `nil`.
    pub fn from_flat(items: impl IntoIterator<Item = Value>) -> Self {
        let hash = Hash::new();
        let mut items = items.into_iter();
        while let Some(key) = items.next() {
            let value = items.next().unwrap_or(Value::Nil);
            hash.set(key, value);
        }
        hash
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let hash = Hash::new();
        for (key, value) in pairs {
            hash.set(key, value);
        }
        hash
    }

    fn position(&self, key: &Value) -> Option<usize> {
        self.entries
            .borrow()
            .iter()
            .position(|(k, _)| k.same_value_zero(key))
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        let index = self.position(key)?;
        self.entries.borrow().get(index).map(|(_, v)| v.clone())
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn set(&self, key: Value, value: Value) {
        match self.position(&key) {
            Some(index) => self.entries.borrow_mut()[index].1 = value,
            None => self.entries.borrow_mut().push((key, value)),
        }
    }

    pub fn has(&self, key: &Value) -> bool {
        self.position(key).is_some()
    }

    /// Remove a key. Returns whether it was present.
    pub fn del(&self, key: &Value) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.borrow_mut().remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<Value> {
        self.entries.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.entries.borrow().iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of the entries in insertion order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries.borrow().clone()
    }

    /// Reference identity: do both handles share storage?
    pub fn ptr_eq(&self, other: &Hash) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    /// Start walking this hash's entries. Returns `None` when the hash is
    /// already being walked further out, i.e. it contains itself.
    pub(crate) fn walk(&self) -> Option<WalkGuard> {
        let id = Rc::as_ptr(&self.entries) as usize;
        WALKING.with(|walking| {
            let mut walking = walking.borrow_mut();
            if walking.contains(&id) {
                None
            } else {
                walking.push(id);
                Some(WalkGuard(id))
            }
        })
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(_walk) = self.walk() else {
            return f.write_str("{...}");
        };
        f.debug_map().entries(self.entries()).finish()
    }
}
