//! Memoized instantiation.

use std::{
    collections::HashMap,
    num::NonZeroUsize,
    sync::{
        Arc, Condvar, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use log::debug;
use lru::LruCache;

use crate::{
    backend::InstanceBackend,
    coords::FontInstanceKey,
    error::{BackendError, Error, Result},
};

type Outcome<T> = std::result::Result<Arc<T>, Arc<BackendError>>;

/// An instantiation in progress. Every caller for the key waits on the same outcome.
struct Flight<T> {
    outcome: Mutex<Option<Outcome<T>>>,
    done: Condvar,
}

impl<T> Flight<T> {
    fn new() -> Self {
        Self { outcome: Mutex::new(None), done: Condvar::new() }
    }

    fn complete(&self, outcome: Outcome<T>) {
        *lock(&self.outcome) = Some(outcome);
        self.done.notify_all();
    }

    fn wait(&self) -> Outcome<T> {
        let guard = self
            .done
            .wait_while(lock(&self.outcome), |outcome| outcome.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(outcome) => outcome.clone(),
            None => Err(Arc::new(BackendError::Other("instantiation abandoned".into()))),
        }
    }
}

/// Finished instances under LRU bound, and in-flight instantiations outside it.
struct Entries<T> {
    ready: LruCache<FontInstanceKey, Arc<T>>,
    pending: HashMap<FontInstanceKey, Arc<Flight<T>>>,
}

/// Counters describing cache activity since creation.
///
/// `hits` includes callers that joined an instantiation already in flight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub instantiations: u64,
    pub failures: u64,
}

/// Concurrent instance cache with single-flight instantiation per key.
///
/// The map lock is never held across a backend call. The first caller for a
/// key runs the backend; concurrent callers for the same key wait for that
/// call and share its outcome, success or failure, while requests for other
/// keys proceed. Failures are handed to every waiter and then forgotten.
///
/// Only finished instances count against the capacity, so eviction can never
/// split an instantiation in flight. Eviction drops the cache's reference
/// only; callers holding an instance keep it alive.
pub struct InstanceCache<B: InstanceBackend> {
    backend: B,
    entries: Mutex<Entries<B::Instance>>,
    hits: AtomicU64,
    misses: AtomicU64,
    instantiations: AtomicU64,
    failures: AtomicU64,
}

impl<B: InstanceBackend> InstanceCache<B> {
    /// Create a cache holding at most `capacity` instances, or any number if `None`.
    pub fn new(backend: B, capacity: Option<NonZeroUsize>) -> Self {
        let ready = match capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        Self {
            backend,
            entries: Mutex::new(Entries { ready, pending: HashMap::new() }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            instantiations: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Return the instance for `key`, instantiating it on first use.
    ///
    /// # Errors
    ///
    /// - `Error::InstantiationFailed` if the backend rejects the face and
    ///   coordinates. Callers already waiting on the same key get the same
    ///   error; nothing is cached for the key.
    pub fn get_or_create(&self, key: &FontInstanceKey) -> Result<Arc<B::Instance>> {
        let flight = {
            let mut entries = lock(&self.entries);
            if let Some(instance) = entries.ready.get(key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("cache hit: {key}");
                return Ok(Arc::clone(instance));
            }
            if let Some(flight) = entries.pending.get(key) {
                let flight = Arc::clone(flight);
                drop(entries);
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("cache wait: {key}");
                return flight.wait().map_err(|source| failed(key, source));
            }
            let flight = Arc::new(Flight::new());
            entries.pending.insert(key.clone(), Arc::clone(&flight));
            flight
        };

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("cache miss: {key}");

        let mut leader = Leader { cache: self, key, flight, finished: false };
        let outcome = match self.backend.instantiate(key.face(), key.coords()) {
            Ok(instance) => {
                self.instantiations.fetch_add(1, Ordering::Relaxed);
                debug!("instantiated {key}");
                Ok(Arc::new(instance))
            }
            Err(source) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                Err(Arc::new(source))
            }
        };
        leader.finish(outcome.clone());
        outcome.map_err(|source| failed(key, source))
    }

    /// The cached instance for `key`, without instantiating.
    pub fn get(&self, key: &FontInstanceKey) -> Option<Arc<B::Instance>> {
        lock(&self.entries).ready.get(key).map(Arc::clone)
    }

    /// Number of keys currently held, including ones still being instantiated.
    pub fn len(&self) -> usize {
        let entries = lock(&self.entries);
        entries.ready.len() + entries.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every finished instance. Instantiations in flight still complete.
    pub fn clear(&self) {
        lock(&self.entries).ready.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            instantiations: self.instantiations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// The caller running the backend for a key.
///
/// Dropping it unfinished (the backend panicked) still releases the waiters.
struct Leader<'a, B: InstanceBackend> {
    cache: &'a InstanceCache<B>,
    key: &'a FontInstanceKey,
    flight: Arc<Flight<B::Instance>>,
    finished: bool,
}

impl<B: InstanceBackend> Leader<'_, B> {
    /// Publish the outcome: successes move into the LRU, then waiters wake.
    fn finish(&mut self, outcome: Outcome<B::Instance>) {
        self.finished = true;
        {
            let mut entries = lock(&self.cache.entries);
            entries.pending.remove(self.key);
            if let Ok(instance) = &outcome
                && let Some((evicted, _)) = entries.ready.push(self.key.clone(), Arc::clone(instance))
                && &evicted != self.key
            {
                debug!("cache evict: {evicted}");
            }
        }
        self.flight.complete(outcome);
    }
}

impl<B: InstanceBackend> Drop for Leader<'_, B> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish(Err(Arc::new(BackendError::Other("instantiation panicked".into()))));
        }
    }
}

fn failed(key: &FontInstanceKey, source: Arc<BackendError>) -> Error {
    Error::InstantiationFailed { face: key.face_id().to_string(), source }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
