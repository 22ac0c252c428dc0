//! Tool description file formats.
//!
//! Without `--format`, `.yaml`/`.yml` inputs decode as YAML and anything
//! else as JSON.

use clap::ValueEnum;

/// Encoding of a tool description file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}
