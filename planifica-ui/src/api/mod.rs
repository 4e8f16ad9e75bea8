//! API layer
//!
//! Typed HTTP client for the PlanificaPro backend.

mod client;

pub use client::*;
