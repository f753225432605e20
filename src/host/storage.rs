//! String key/value preference storage (`localStorage` in the browser).

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::PageError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`PageError::Storage`] when the backend refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), PageError>;
}

/// Process-local store. Optionally read-only, to exercise write failures.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like Safari private browsing.
    #[must_use]
    pub fn read_only() -> Self {
        Self { entries: RefCell::default(), read_only: true }
    }

    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        if self.read_only {
            return Err(PageError::Storage { key: key.to_owned(), reason: "store is read-only".to_owned() });
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
