//! # fdl-schema
//!
//! JSON Schema generation, validation, and registry for fdl.
//!
//! Persisted and reported types are defined in `fdl-core` with
//! `#[derive(JsonSchema)]`. This crate builds their schemas once and validates
//! arbitrary JSON against them (`fdl log check`, `fdl schema`).

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
