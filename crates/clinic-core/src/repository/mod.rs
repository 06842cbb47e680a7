//! Entity managers over the database layer.
//!
//! Every row a repository reads goes through its [`IdentityMap`], so two
//! lookups of the same id hand back the same shared instance. Patient and
//! doctor repositories also run the [`Hydrator`] on each instance they load.

mod appointments;
mod doctors;
mod hydrator;
mod identity_map;
mod medical_records;
mod patients;

pub use appointments::*;
pub use doctors::*;
pub use hydrator::Hydrator;
pub use identity_map::IdentityMap;
pub use medical_records::*;
pub use patients::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::db::DbError;
use crate::models::{Entity, Shared};

/// Log constraint failures before handing the error back.
fn log_write_failure<T: Entity>(operation: &'static str) -> impl Fn(DbError) -> DbError {
    move |err| {
        if let DbError::Constraint(message) = &err {
            tracing::warn!(entity = T::NAME, operation, %message, "write rejected by database");
        }
        err
    }
}

/// Register a freshly inserted entity.
///
/// SQLite may hand out the id of a deleted row again. The instance still
/// cached under that id is evicted first, so handles to the deleted row keep
/// showing the deleted values and the new row gets its own instance.
fn register_inserted<T: Entity>(identity_map: &IdentityMap<T>, id: i64, entity: T) -> Shared<T> {
    if identity_map.evict(id).is_some() {
        tracing::debug!(entity = T::NAME, id, "evicted stale instance for reused id");
    }
    let shared = Rc::new(RefCell::new(entity));
    identity_map.put(id, Rc::clone(&shared));
    shared
}
