//! Core types shared by every caldays crate: configuration, the error
//! taxonomy, domain records, request validation and the storage contract.

pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod repository;
pub mod validate;
