//! PARAMTREE Core Types
//!
//! Typed, hierarchical description of a command-line tool's parameters.
//! Pure data with no I/O beyond loading a description and writing a
//! rendered document.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod node;
pub mod output;
pub mod role;
pub mod tool;
pub mod value;

// Re-exports
pub use error::{CoreError, CoreResult, ExportError, ExportResult};
pub use node::{Node, NodeValue, Walk, LEGACY_PATH_SEPARATOR};
pub use output::write_file;
pub use role::{NodeRole, PathKind, Role};
pub use tool::{Citation, CliMapping, MetaInfo, ToolInfo};
pub use value::{Choice, ParamValue, Ranged};
