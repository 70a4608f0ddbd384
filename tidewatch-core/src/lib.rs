//! Tidewatch Core
//!
//! Core types shared by the Tidewatch job tracking services.
//!
//! This crate contains:
//! - Domain types: Jobs, Pipelines and the wave forecast payload
//! - DTOs: Request and query shapes exchanged over the HTTP API

pub mod domain;
pub mod dto;
