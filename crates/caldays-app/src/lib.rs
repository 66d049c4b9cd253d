//! HTTP surface for caldays.

pub mod app;
pub mod backend_handler;
pub mod config;
pub mod error;
pub mod middleware;
