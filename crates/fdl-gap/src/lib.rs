//! # fdl-gap
//!
//! Builds the traceability tree below a requirement and reports which expected
//! downstream artifacts are missing.
//!
//! ```text
//! US ──traces_to──▶ SYS-REQ ──refined_in──▶ SW-REQ ──refined_in──▶ CODE
//!                                                  └─tested_by──▶ TEST
//! ```
//!
//! Trees are built by depth-first descent from the root. Revisiting an ID
//! already on the current path is a [`CoreError::CircularReference`](fdl_core::errors::CoreError);
//! exceeding the depth limit is [`GapError::DepthExceeded`]. Neither is
//! truncated silently.

pub mod builder;
pub mod error;
pub mod node;
pub mod remediation;
pub mod render;

pub use builder::{ChainBuilder, RootOutcome};
pub use error::GapError;
pub use node::{ChainNode, ChainTree};
pub use remediation::Remediation;
