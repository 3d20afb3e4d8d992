//! Object pooling utilities for reducing allocations in batch processing.
//!
//! Provides a generic, thread-safe object pool (used for scratch string/byte buffers
//! during extraction) plus [`PoolSizeHint`], which sizes those pools from a document's
//! file size and MIME type so batch runs don't over-allocate for small files or
//! under-allocate for large ones.

use std::sync::Arc;

use parking_lot::Mutex;

/// Trait for types that can be pooled and reused.
pub trait Recyclable: Send + 'static {
    /// Reset the object to a reusable state, clearing contents while preserving capacity.
    fn reset(&mut self);
}

impl Recyclable for String {
    fn reset(&mut self) {
        self.clear();
    }
}

impl Recyclable for Vec<u8> {
    fn reset(&mut self) {
        self.clear();
    }
}

/// A thread-safe object pool that reuses instances to reduce allocations.
#[derive(Clone)]
pub struct Pool<T: Recyclable> {
    factory: Arc<dyn Fn() -> T + Send + Sync>,
    objects: Arc<Mutex<Vec<T>>>,
    max_size: usize,
}

impl<T: Recyclable> Pool<T> {
    /// Create a new pool with a given factory and maximum size.
    pub fn new<F>(factory: F, max_size: usize) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Pool {
            factory: Arc::new(factory),
            objects: Arc::new(Mutex::new(Vec::with_capacity(max_size))),
            max_size,
        }
    }

    /// Acquire an object from the pool, or create a new one if the pool is empty.
    pub fn acquire(&self) -> PoolGuard<T> {
        let mut objects = self.objects.lock();

        let object = if let Some(mut obj) = objects.pop() {
            obj.reset();
            obj
        } else {
            (self.factory)()
        };

        PoolGuard {
            object: Some(object),
            pool: self.clone(),
        }
    }

    /// Current number of idle objects held by the pool.
    pub fn size(&self) -> usize {
        self.objects.lock().len()
    }

    /// Discard all pooled objects.
    pub fn clear(&self) {
        self.objects.lock().clear();
    }
}

/// RAII guard that returns its object to the pool when dropped.
pub struct PoolGuard<T: Recyclable> {
    object: Option<T>,
    pool: Pool<T>,
}

impl<T: Recyclable> std::ops::Deref for PoolGuard<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.object.as_ref().expect("object should never be None")
    }
}

impl<T: Recyclable> std::ops::DerefMut for PoolGuard<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.object.as_mut().expect("object should never be None")
    }
}

impl<T: Recyclable> Drop for PoolGuard<T> {
    fn drop(&mut self) {
        if let Some(object) = self.object.take() {
            let mut objects = self.pool.objects.lock();
            if objects.len() < self.pool.max_size {
                objects.push(object);
            }
        }
    }
}

/// Convenience alias for a pooled `String`.
pub type StringBufferPool = Pool<String>;

/// Convenience alias for a pooled `Vec<u8>`.
pub type ByteBufferPool = Pool<Vec<u8>>;

/// Recommended pool sizes for a single document's extraction.
///
/// Returned by [`estimate_pool_size`] and consumed by batch-extraction call sites to
/// size per-run buffer pools without over-allocating for small documents.
#[derive(Debug, Clone, Copy)]
pub struct PoolSizeHint {
    /// Number of string buffers to keep warm.
    pub string_buffer_count: usize,
    /// Initial capacity (bytes) for each string buffer.
    pub string_buffer_capacity: usize,
    /// Number of byte buffers to keep warm.
    pub byte_buffer_count: usize,
    /// Initial capacity (bytes) for each byte buffer.
    pub byte_buffer_capacity: usize,
}

const SMALL_FILE_THRESHOLD: u64 = 1_000_000;
const LARGE_FILE_THRESHOLD: u64 = 20_000_000;

/// MIME types whose extractors hold several buffers alive at once (page text, table
/// cells, embedded images), warranting a larger pool than a single-buffer text format.
const MULTI_BUFFER_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Estimate pool sizing for a document given its size and MIME type.
///
/// Small, single-buffer formats get a minimal pool; large or multi-buffer formats
/// (PDF, Office documents) get bigger buffers and more of them, since their
/// extractors juggle several in-flight strings (page text, table cells) at once.
pub fn estimate_pool_size(file_size: u64, mime_type: &str) -> PoolSizeHint {
    let multi_buffer = MULTI_BUFFER_MIME_TYPES.contains(&mime_type);

    let string_buffer_capacity = if file_size > LARGE_FILE_THRESHOLD {
        65536
    } else if file_size > SMALL_FILE_THRESHOLD {
        16384
    } else {
        4096
    };

    let string_buffer_count = if multi_buffer { 8 } else { 2 };
    let byte_buffer_count = if multi_buffer { 4 } else { 1 };
    let byte_buffer_capacity = string_buffer_capacity.max(8192);

    PoolSizeHint {
        string_buffer_count,
        string_buffer_capacity,
        byte_buffer_count,
        byte_buffer_capacity,
    }
}
