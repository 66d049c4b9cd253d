//! Business rules for caldays: calendar ownership, the Todo lifecycle, the
//! Task log, the notes invariant and the streamline view.

pub mod auth;
pub mod calendar;
pub mod error;
pub mod notes;
pub mod store;
pub mod streamline;
pub mod task;
pub mod todo;
pub mod view;
