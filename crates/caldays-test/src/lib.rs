//! caldays integration test support.
//!
//! Provides an in-memory backend implementing every storage capability, with
//! per-operation fault injection, so the HTTP surface and the business rules
//! can be exercised without PostgreSQL.

pub mod memory;
pub mod mock_behaviour;

pub use memory::MemoryStore;
pub use mock_behaviour::MockBehaviour;
