//! Memoized operation bindings
//!
//! [`OperationCache`] maps `(TypeId, OperationKind)` to a [`BoundOperation`].
//! Lookups go straight to `DashMap`'s sharded read path. On a miss the
//! binding is computed *without* holding any lock and published with
//! `entry().or_insert()`: when two threads race on the same never-seen key
//! both compute, the first insert wins and the loser adopts the winner's
//! binding. Entries are never evicted.

use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use super::capability::{BoundOperation, OperationKind};
use crate::types::TypeInfo;

type CacheKey = (TypeId, OperationKind);

/// Process-lifetime memo of resolved operations.
#[derive(Debug, Default)]
pub struct OperationCache {
    entries: DashMap<CacheKey, BoundOperation>,
    computed: AtomicUsize,
}

impl OperationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the binding for `(info, kind)`, computing it with `compute`
    /// on first use.
    pub fn get_or_bind<F>(&self, info: &TypeInfo, kind: OperationKind, compute: F) -> BoundOperation
    where
        F: FnOnce() -> BoundOperation,
    {
        let key = (info.id(), kind);
        if let Some(bound) = self.entries.get(&key) {
            return *bound;
        }

        let candidate = compute();
        self.computed.fetch_add(1, Ordering::Relaxed);

        let mut inserted = false;
        let bound = *self.entries.entry(key).or_insert_with(|| {
            inserted = true;
            candidate
        });

        if inserted {
            tracing::debug!(
                type_name = %info.name(),
                %kind,
                binding = ?bound,
                "bound generic operation"
            );
        } else {
            tracing::trace!(
                type_name = %info.name(),
                %kind,
                "discarded binding computed by a losing thread"
            );
        }
        bound
    }

    /// Returns the cached binding, if any.
    #[must_use]
    pub fn get(&self, id: TypeId, kind: OperationKind) -> Option<BoundOperation> {
        self.entries.get(&(id, kind)).map(|bound| *bound)
    }

    /// Returns true if any operation is bound for `id`.
    #[must_use]
    pub fn contains_type(&self, id: TypeId) -> bool {
        [
            OperationKind::DefaultValue,
            OperationKind::Equality,
            OperationKind::Compare,
        ]
        .into_iter()
        .any(|kind| self.entries.contains_key(&(id, kind)))
    }

    /// Number of visible bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been bound yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of bindings computed, including ones discarded after a race.
    #[must_use]
    pub fn resolutions(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;

    use super::*;
    use crate::ops::capability::bind;
    use crate::types::Describe;

    #[test]
    fn test_computes_once() {
        let cache = OperationCache::new();
        let info = u64::describe();

        let first = cache.get_or_bind(&info, OperationKind::Compare, || {
            bind(&info, None, OperationKind::Compare)
        });
        let second = cache.get_or_bind(&info, OperationKind::Compare, || {
            unreachable!("second lookup must hit the cache")
        });

        assert_eq!(first.kind(), second.kind());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.resolutions(), 1);
        assert!(cache.contains_type(info.id()));
    }

    #[test]
    fn test_kinds_are_separate_entries() {
        let cache = OperationCache::new();
        let info = i8::describe();
        for kind in [OperationKind::Equality, OperationKind::Compare] {
            cache.get_or_bind(&info, kind, || bind(&info, None, kind));
        }
        assert_eq!(cache.len(), 2);
        assert!(cache.get(info.id(), OperationKind::DefaultValue).is_none());
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = OperationCache::new();
        let info = String::describe();
        let barrier = Barrier::new(8);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    barrier.wait();
                    cache.get_or_bind(&info, OperationKind::Equality, || {
                        bind(&info, None, OperationKind::Equality)
                    })
                });
            }
        });

        assert_eq!(cache.len(), 1);
        assert!(cache.resolutions() >= 1);
        assert!(cache.get(info.id(), OperationKind::Equality).is_some());
    }
}
