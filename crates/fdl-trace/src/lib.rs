//! # fdl-trace
//!
//! Naming and link validation for a text-based artifact repository.
//!
//! Requirements are Markdown files with YAML front-matter (`id`, `title`,
//! `traces_to`, `refined_in`, `tested_by`, ...). Tests are source files named
//! `TC-<LEVEL>-<ID>_<component>.<ext>` carrying a `Validates: <id>` marker.
//!
//! - [`index`]: the `{path -> fields}` mapping, built from disk or from records
//! - [`naming`]: filename grammars and rename suggestions
//! - [`check`]: per-file naming validation
//! - [`links`]: bidirectional requirement/test link validation

pub mod check;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod layout;
pub mod links;
pub mod naming;
pub mod walk;

pub use check::{NamingReport, NamingResult, validate_naming};
pub use error::TraceError;
pub use index::{ArtifactIndex, RequirementDoc, TestDoc};
pub use layout::Layout;
pub use links::{LinkReport, MissingLink, RequirementLinkResult, TestLinkResult};
