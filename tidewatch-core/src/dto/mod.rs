//! Data Transfer Objects
//!
//! Request bodies and query shapes exchanged between the server and its
//! clients. Responses reuse the domain types directly.

pub mod job;
pub mod pipeline;
