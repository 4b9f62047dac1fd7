//! Load-once cache for the orders dataset.
//!
//! [`OrderCache`] reads the CSV the first time [`OrderCache::get`] is called
//! and hands out the same [`Arc<OrderSet>`] for the rest of the process. A
//! failed load leaves the cache empty so the next call retries and the error
//! reaches the caller. There is no invalidation; restart the process to pick
//! up a changed file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use dashboard_core::error::Result;
use dashboard_core::models::OrderSet;
use dashboard_data::reader::load_orders;

// ── OrderCache ────────────────────────────────────────────────────────────────

/// Single-initialization cache bound to one source file.
///
/// # Example
/// ```no_run
/// use dashboard_runtime::data_manager::OrderCache;
///
/// let cache = OrderCache::global("finalProj_df.csv");
/// let orders = cache.get().expect("orders load");
/// println!("{} orders", orders.len());
/// ```
#[derive(Debug)]
pub struct OrderCache {
    /// File the cache loads from.
    path: PathBuf,
    /// The loaded dataset, set at most once.
    orders: OnceLock<Arc<OrderSet>>,
    /// Serializes first-time loads so concurrent callers read the file once.
    init_lock: Mutex<()>,
    /// Successful loads performed so far (0 or 1).
    loads: AtomicUsize,
}

static GLOBAL_CACHE: OnceLock<OrderCache> = OnceLock::new();

impl OrderCache {
    /// Create an empty cache for `path`. Nothing is read until [`get`](Self::get).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            orders: OnceLock::new(),
            init_lock: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The process-wide cache.
    ///
    /// The first call fixes the source path. A later call naming a different
    /// path is logged and answered with the existing instance.
    pub fn global(path: impl AsRef<Path>) -> &'static OrderCache {
        let path = path.as_ref();
        let cache = GLOBAL_CACHE.get_or_init(|| OrderCache::new(path));
        if cache.path != path {
            tracing::warn!(
                requested = %path.display(),
                cached = %cache.path.display(),
                "order cache already bound to another file; ignoring new path"
            );
        }
        cache
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the dataset, loading it on the first successful call.
    pub fn get(&self) -> Result<Arc<OrderSet>> {
        if let Some(orders) = self.orders.get() {
            tracing::debug!("returning cached orders");
            return Ok(Arc::clone(orders));
        }

        // A poisoned lock only means another loader panicked; the cell is
        // still consistent.
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(orders) = self.orders.get() {
            return Ok(Arc::clone(orders));
        }

        let loaded = Arc::new(load_orders(&self.path)?);
        self.loads.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(orders = loaded.len(), "order cache populated");

        Ok(Arc::clone(self.orders.get_or_init(|| loaded)))
    }

    /// `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.orders.get().is_some()
    }

    /// Source file this cache reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of successful loads performed.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
