use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use anyhow::{anyhow, Result};

use crate::cache::QueryCache;
use crate::feature::Record;
use crate::query::{GeometryTable, QueryKey, QueryRequest};
use super::RowSource;

/// Memoizes viewport queries of an inner source in a bounded LRU cache keyed
/// by the normalized request, so pans that round to the same box do not re-query.
pub struct CachedSource<S> {
    inner: S,
    cache: Mutex<QueryCache<QueryKey, Arc<Vec<Record>>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    verbose: u8,
}

impl<S: RowSource> CachedSource<S> {
    pub fn new(inner: S, capacity: usize) -> Result<Self> {
        Ok(Self {
            inner,
            cache: Mutex::new(QueryCache::new(capacity)?),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            verbose: 0,
        })
    }

    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn inner(&self) -> &S { &self.inner }

    pub fn hits(&self) -> usize { self.hits.load(Ordering::Relaxed) }

    pub fn misses(&self) -> usize { self.misses.load(Ordering::Relaxed) }

    /// Drop every cached result, e.g. after the underlying data changed.
    pub fn invalidate(&self) -> Result<()> {
        self.cache.lock().map_err(|_| anyhow!("[source::cached] cache lock poisoned"))?.clear();
        Ok(())
    }
}

impl<S: RowSource> RowSource for CachedSource<S> {
    fn fetch(&self, request: &QueryRequest) -> Result<Vec<Record>> {
        let key = request.key();
        {
            let mut cache = self.cache.lock().map_err(|_| anyhow!("[source::cached] cache lock poisoned"))?;
            if let Some(rows) = cache.get(&key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                if self.verbose > 1 { eprintln!("[source::cached] hit {} rows", rows.len()); }
                return Ok(rows.to_vec());
            }
        }

        // Query outside the lock; a concurrent miss on the same key just queries twice.
        self.misses.fetch_add(1, Ordering::Relaxed);
        let rows = Arc::new(self.inner.fetch(request)?);
        if self.verbose > 1 { eprintln!("[source::cached] miss, fetched {} rows", rows.len()); }

        let mut cache = self.cache.lock().map_err(|_| anyhow!("[source::cached] cache lock poisoned"))?;
        cache.insert(key, rows.clone());
        Ok(rows.to_vec())
    }

    fn tag_values(&self, table: GeometryTable, column: &str) -> Result<Vec<String>> {
        self.inner.tag_values(table, column)
    }
}
