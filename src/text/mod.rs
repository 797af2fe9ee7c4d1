//! Query text normalization & table reference extraction.
//!
//! This module groups the small lexical utilities used to pull fully
//! qualified table references (`project.dataset.table`) out of raw query
//! text without a SQL parser. The components are intentionally pragmatic:
//!
//! Modules:
//! - `dialect` : Named comment-syntax rule sets, extensible at runtime.
//! - `strip`   : Comment removal and character deletion over query text.
//! - `extract` : Dotted-triple scan producing a deduplicated reference set.
//!
//! Design Principles:
//! 1. Pure, stateless transformations; safe to call from any task or thread.
//! 2. Best-effort lexical heuristics, not a SQL grammar. Comment-like text
//!    inside string literals is stripped too, and any dotted triple token is
//!    captured whether or not it names a real table. Both are accepted
//!    behavior, not bugs to fix here.
//! 3. Failures are deterministic input-validation errors; nothing retries.
//!
//! Example:
//! ```rust
//! use bqkit::text::prelude::*;
//!
//! let refs = extract_table_references(
//!     "SELECT * FROM `proj`.`ds`.`tbl` -- nightly load",
//! ).unwrap();
//! assert!(refs.contains("proj.ds.tbl"));
//! ```
//!
//! Extensibility:
//! New comment dialects are registered by key via `register_dialect`; calling
//! code keeps passing a dialect name and never changes.

pub mod dialect;
pub mod extract;
pub mod strip;

pub use dialect::{STANDARD_SQL, register_dialect};
pub use extract::extract_table_references;
pub use strip::{remove_chars, remove_comments};

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use bqkit::text::prelude::*;`
pub mod prelude {
    pub use super::{
        STANDARD_SQL, extract_table_references, register_dialect, remove_chars, remove_comments,
    };
}
