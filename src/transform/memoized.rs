//! Memoizing wrapper caching transform outputs by structural key

use crate::transform::strategy::TransformStrategy;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Wraps a strategy and caches its outputs keyed by a derived string.
///
/// Repeated calls with structurally identical input return the cached
/// output without re-invoking the wrapped strategy. The default key is the
/// full `serde_json` serialization of the input; a caller-supplied key
/// function can replace it. This cache has no TTL and no eviction, it only
/// shrinks via [`clear_cache`](MemoizedTransform::clear_cache).
///
/// If no key can be derived for an input (the default key function fails
/// to serialize it), the call bypasses the memo cache and the wrapped
/// strategy runs directly.
pub struct MemoizedTransform<S, In, Out> {
    inner: S,
    key_fn: Box<dyn Fn(&In) -> Option<String> + Send + Sync>,
    cache: Mutex<HashMap<String, Out>>,
}

impl<S, In, Out> MemoizedTransform<S, In, Out>
where
    In: Serialize,
{
    /// Memoize `inner` keyed by the input's structural serialization
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            key_fn: Box::new(|input: &In| serde_json::to_string(input).ok()),
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<S, In, Out> MemoizedTransform<S, In, Out> {
    /// Memoize `inner` keyed by a caller-supplied key function
    pub fn with_key_fn<F>(inner: S, key_fn: F) -> Self
    where
        F: Fn(&In) -> String + Send + Sync + 'static,
    {
        Self {
            inner,
            key_fn: Box::new(move |input| Some(key_fn(input))),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Drop every memoized output
    pub fn clear_cache(&self) {
        self.locked_cache().clear();
    }

    /// Number of memoized outputs
    pub fn cached_len(&self) -> usize {
        self.locked_cache().len()
    }

    fn locked_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, Out>> {
        // A poisoned memo cache is still a valid memo cache.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S, In, Out> TransformStrategy<In, Out> for MemoizedTransform<S, In, Out>
where
    S: TransformStrategy<In, Out>,
    In: Send + Sync,
    Out: Clone + Send + Sync,
{
    fn transform(&self, input: In) -> Out {
        let key = match (self.key_fn)(&input) {
            Some(key) => key,
            None => {
                debug!("memoization bypassed: input has no derivable key");
                return self.inner.transform(input);
            }
        };

        if let Some(hit) = self.locked_cache().get(&key).cloned() {
            debug!("memoized transform hit");
            return hit;
        }

        let output = self.inner.transform(input);
        self.locked_cache().insert(key, output.clone());
        output
    }

    fn validate(&self, input: &In) -> bool {
        self.inner.validate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::strategy::FnTransform;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_double(
        counter: Arc<AtomicUsize>,
    ) -> FnTransform<impl Fn(u32) -> u32 + Send + Sync> {
        FnTransform::new(move |n: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            n * 2
        })
    }

    #[test]
    fn test_structurally_equal_inputs_run_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let memo = MemoizedTransform::new(counting_double(calls.clone()));

        assert_eq!(memo.transform(21), 42);
        assert_eq!(memo.transform(21), 42);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.cached_len(), 1);
    }

    #[test]
    fn test_distinct_inputs_each_computed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let memo = MemoizedTransform::new(counting_double(calls.clone()));

        assert_eq!(memo.transform(1), 2);
        assert_eq!(memo.transform(2), 4);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(memo.cached_len(), 2);
    }

    #[test]
    fn test_clear_cache_forces_recompute() {
        let calls = Arc::new(AtomicUsize::new(0));
        let memo = MemoizedTransform::new(counting_double(calls.clone()));

        memo.transform(5);
        memo.clear_cache();
        memo.transform(5);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unserializable_input_bypasses_memo() {
        use std::collections::HashMap;

        // serde_json refuses maps with non-string keys, so no default key
        // can be derived and every call must run the wrapped strategy.
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = {
            let calls = calls.clone();
            FnTransform::new(move |m: HashMap<(u8, u8), u8>| {
                calls.fetch_add(1, Ordering::SeqCst);
                m.len()
            })
        };
        let memo = MemoizedTransform::new(inner);

        let input: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        assert_eq!(memo.transform(input.clone()), 1);
        assert_eq!(memo.transform(input), 1);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(memo.cached_len(), 0);
    }

    #[test]
    fn test_custom_key_fn() {
        #[derive(Clone)]
        #[allow(dead_code)]
        struct Record {
            id: u32,
            // Deliberately excluded from the key
            fetched_at_ms: u64,
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let inner = {
            let calls = calls.clone();
            FnTransform::new(move |r: Record| {
                calls.fetch_add(1, Ordering::SeqCst);
                r.id * 10
            })
        };
        let memo = MemoizedTransform::with_key_fn(inner, |r: &Record| r.id.to_string());

        let a = Record {
            id: 7,
            fetched_at_ms: 1,
        };
        let b = Record {
            id: 7,
            fetched_at_ms: 2,
        };

        assert_eq!(memo.transform(a), 70);
        assert_eq!(memo.transform(b), 70);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validate_delegates() {
        struct PositiveOnly;
        impl TransformStrategy<i32, i32> for PositiveOnly {
            fn transform(&self, input: i32) -> i32 {
                input
            }
            fn validate(&self, input: &i32) -> bool {
                *input > 0
            }
        }

        let memo = MemoizedTransform::new(PositiveOnly);
        assert!(memo.validate(&1));
        assert!(!memo.validate(&-1));
    }
}
