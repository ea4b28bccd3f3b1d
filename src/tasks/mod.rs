//! Task model and task sources.
//!
//! The analytics engine only ever sees [`TaskSnapshot`] values obtained
//! through a [`TaskSource`].

mod source;
mod types;

pub use source::{JsonTaskFile, TaskSource};
#[cfg(test)]
pub use source::MockTaskSource;
pub use types::{Priority, TaskSnapshot, TaskStatus};
