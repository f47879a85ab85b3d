// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jet identity.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Opaque identity for a jet, unique within a run.
///
/// Backed by a `u64` rather than a UUID: jet ids are assigned sequentially by
/// arrival order within a single process, never persisted or compared across
/// runs, and the natural total order over ids doubles as a stable tie-break
/// key for SRTF dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JetId(u64);

impl JetId {
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JET-{:04}", self.0)
    }
}

/// Generates unique jet identifiers.
pub trait IdGen: Send + Sync {
    fn next(&self) -> JetId;
}

/// Sequential id generator. This is the only generator this crate ships:
/// jet ids have no meaning outside a single run, so there is no production
/// vs. test split the way `oj-core`'s UUID/sequential pair needs one.
#[derive(Clone)]
pub struct SequentialIdGen {
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> JetId {
        JetId::new(self.counter.fetch_add(1, Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_assigned_in_order() {
        let gen = SequentialIdGen::new();
        let a = gen.next();
        let b = gen.next();
        assert!(a < b);
    }

    #[test]
    fn display_is_stable() {
        let id = JetId::new(7);
        assert_eq!(id.to_string(), "JET-0007");
    }
}
