pub mod calendar;
pub mod task;
pub mod todo;
pub mod user;
