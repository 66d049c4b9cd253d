//! PostgreSQL persistence for caldays: schema, models, queries and pooling.

pub mod db;
pub mod error;
pub mod model;
