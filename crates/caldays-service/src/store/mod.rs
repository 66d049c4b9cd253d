//! Backend implementations of the storage contract.

pub mod postgres;

pub use postgres::PgStore;
