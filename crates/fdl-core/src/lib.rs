//! # fdl-core
//!
//! Core types, identifier helpers, and error types for fdl.
//!
//! This crate provides the foundational types shared across all fdl crates:
//! - Closed enums for feedback categories, severities, test levels, and chain kinds
//! - The `FeedbackEntry` record written to the append-only feedback log
//! - Requirement and test identifier parsing helpers
//! - The `Violation` shape every validator failure is reported with
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod feedback;
pub mod ids;
pub mod violation;
