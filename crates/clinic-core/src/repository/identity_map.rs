//! Per-repository identity map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::db::{DbError, DbResult};
use crate::models::{Entity, Shared};

/// Maps primary keys to the one shared instance loaded for that row.
///
/// Each repository owns its own map, so a fresh repository starts with an
/// empty cache. Entries live as long as the map; deleting a row does not
/// evict its instance.
#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: RefCell<HashMap<i64, Shared<T>>>,
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl<T: Entity> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached instance for `id`, if one has been loaded.
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.borrow().get(&id).cloned()
    }

    /// Register the instance for a row that has no cached instance yet.
    pub fn put(&self, id: i64, instance: Shared<T>) {
        let previous = self.entries.borrow_mut().insert(id, instance);
        debug_assert!(
            previous.is_none(),
            "{} {} registered twice in identity map",
            T::NAME,
            id
        );
    }

    /// Overwrite a cached instance's fields from a freshly read row.
    ///
    /// Fails without touching the instance if anyone currently holds a
    /// borrow of it.
    pub fn refresh(&self, instance: &Shared<T>, row: T::Row) -> DbResult<()> {
        let id = T::row_id(&row);
        let mut current = instance
            .try_borrow_mut()
            .map_err(|_| DbError::InstanceBorrowed {
                entity: T::NAME,
                id,
            })?;
        current.apply_row(row)?;
        Ok(())
    }

    /// Drop the cached instance for `id`. Existing handles keep their values.
    pub fn evict(&self, id: i64) -> Option<Shared<T>> {
        self.entries.borrow_mut().remove(&id)
    }

    /// Turn a row into its shared instance: refresh on hit, construct and
    /// register on miss.
    pub fn materialize(&self, row: T::Row) -> DbResult<Shared<T>> {
        let id = T::row_id(&row);
        if let Some(instance) = self.get(id) {
            tracing::debug!(entity = T::NAME, id, "identity map hit");
            self.refresh(&instance, row)?;
            return Ok(instance);
        }

        tracing::debug!(entity = T::NAME, id, "identity map miss");
        let instance = Rc::new(RefCell::new(T::from_row(row)?));
        self.put(id, Rc::clone(&instance));
        Ok(instance)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.borrow().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
