//! Tidewatch Server
//!
//! HTTP service over the in-memory job/pipeline registry.

pub mod api;
pub mod config;
pub mod registry;
pub mod seed;
pub mod service;
