//! Named buffer registry.
//!
//! The store maps unique names to [`PixelBuffer`]s. Entries are created by a
//! load or by any operation's destination name, overwritten when a name is
//! reused, and never removed. It is the only mutable state in a session.

use std::collections::HashMap;

#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::image::PixelBuffer;

/// Name to buffer mapping owned by a session.
#[derive(Debug, Default, Clone)]
pub struct BufferStore {
    buffers: HashMap<String, PixelBuffer>,
}

impl BufferStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a zero-filled buffer; not registered until [`put`](Self::put).
    pub fn create(&self, width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::new(width, height)
    }

    /// Returns a shared handle to the buffer stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown name.
    pub fn get(&self, name: &str) -> Result<PixelBuffer> {
        self.buffers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found(name))
    }

    /// Inserts or overwrites `name`.
    pub fn put(&mut self, name: impl Into<String>, buffer: PixelBuffer) {
        let name = name.into();
        trace!(name = %name, width = buffer.width(), height = buffer.height(), "store::put");
        if self.buffers.insert(name.clone(), buffer).is_some() {
            debug!(name = %name, "replaced existing buffer");
        }
    }

    /// `(width, height)` of the buffer stored under `name`.
    pub fn dimensions(&self, name: &str) -> Result<(u32, u32)> {
        self.buffers
            .get(name)
            .map(PixelBuffer::dimensions)
            .ok_or_else(|| Error::not_found(name))
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.buffers.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.buffers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unknown() {
        let store = BufferStore::new();
        let err = store.get("nope").unwrap_err();
        assert!(err.is_not_found());
        assert!(store.dimensions("nope").is_err());
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = BufferStore::new();
        store.put("a", PixelBuffer::filled(2, 2, [1, 1, 1]));
        store.put("a", PixelBuffer::filled(3, 1, [2, 2, 2]));
        assert_eq!(store.len(), 1);
        assert_eq!(store.dimensions("a").unwrap(), (3, 1));
        assert_eq!(store.get("a").unwrap().pixel(0, 0), [2, 2, 2]);
    }

    #[test]
    fn test_get_is_snapshot() {
        let mut store = BufferStore::new();
        store.put("a", PixelBuffer::filled(1, 1, [5, 5, 5]));
        let mut held = store.get("a").unwrap();
        held.set_pixel(0, 0, [0, 0, 0]);
        assert_eq!(store.get("a").unwrap().pixel(0, 0), [5, 5, 5]);
    }

    #[test]
    fn test_create_and_names() {
        let mut store = BufferStore::new();
        assert!(store.is_empty());
        let blank = store.create(4, 4);
        assert_eq!(blank.pixel(3, 3), [0, 0, 0]);
        store.put("zeta", blank.clone());
        store.put("alpha", blank);
        assert_eq!(store.names(), vec!["alpha", "zeta"]);
        assert!(store.contains("zeta"));
    }
}
