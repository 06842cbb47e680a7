//! Domain models for the clinic records system.

mod appointment;
mod doctor;
mod medical_record;
mod patient;
pub mod validation;

pub use appointment::*;
pub use doctor::*;
pub use medical_record::*;
pub use patient::*;
pub use validation::{ValidationError, ValidationResult};

use std::cell::RefCell;
use std::rc::Rc;

/// A loaded entity shared between every holder of the same row.
///
/// Mutating through one handle is visible through all of them.
pub type Shared<T> = Rc<RefCell<T>>;

/// A validated entity backed by one table row.
pub trait Entity: Sized {
    /// Raw column values as read from the table.
    type Row;

    /// Name used in logs and errors.
    const NAME: &'static str;

    /// Store-assigned primary key, `None` until persisted.
    fn id(&self) -> Option<i64>;

    /// Primary key of a raw row.
    fn row_id(row: &Self::Row) -> i64;

    /// Build a new instance from a row, validating every field.
    fn from_row(row: Self::Row) -> ValidationResult<Self>;

    /// Overwrite the scalar fields from a row in place.
    ///
    /// The row is fully validated before anything is assigned, so a bad row
    /// leaves the instance untouched. Relation lists are not modified.
    fn apply_row(&mut self, row: Self::Row) -> ValidationResult<()>;
}
