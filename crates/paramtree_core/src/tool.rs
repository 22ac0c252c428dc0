//! The tool description document.

use crate::error::{CoreError, CoreResult};
use crate::node::{Node, Walk, LEGACY_PATH_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A citation of the tool's publication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Citation {
    /// DOI
    pub doi: String,
    /// URL
    pub url: String,
}

/// Tool metadata. Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaInfo {
    /// Tool version
    pub version: String,
    /// Tool name
    pub name: String,
    /// Documentation URL
    pub docurl: String,
    /// Category the tool is listed under
    pub category: String,
    /// Description, used for both short description and manual
    pub description: String,
    /// Executable, possibly with a directory component
    pub executable_name: String,
    /// Publications to cite
    pub citations: Vec<Citation>,
}

/// Maps a parameter node to the command-line option that sets it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliMapping {
    /// Literal option string, e.g. `--kmer`
    pub option_identifier: String,
    /// Name of the node the option sets
    pub reference_name: String,
}

impl CliMapping {
    /// Create a mapping
    #[must_use]
    pub fn new(option_identifier: impl Into<String>, reference_name: impl Into<String>) -> Self {
        Self {
            option_identifier: option_identifier.into(),
            reference_name: reference_name.into(),
        }
    }
}

/// Root of a tool description: metadata, the parameter forest and the
/// command-line mapping table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolInfo {
    /// Tool metadata
    pub meta_info: MetaInfo,
    /// Top-level parameter nodes, in emission order
    pub params: Vec<Node>,
    /// Command-line mapping, in emission order
    pub cli_mapping: Vec<CliMapping>,
}

impl ToolInfo {
    /// Create a document with no parameters
    #[must_use]
    pub fn new(meta_info: MetaInfo) -> Self {
        Self {
            meta_info,
            params: Vec::new(),
            cli_mapping: Vec::new(),
        }
    }

    /// Append a top-level parameter
    #[must_use]
    pub fn with_param(mut self, node: Node) -> Self {
        self.params.push(node);
        self
    }

    /// Append a command-line mapping
    #[must_use]
    pub fn with_cli_mapping(mut self, mapping: CliMapping) -> Self {
        self.cli_mapping.push(mapping);
        self
    }

    /// The option string of the first mapping that references `name`
    #[must_use]
    pub fn cli_option(&self, name: &str) -> Option<&str> {
        self.cli_mapping
            .iter()
            .find(|m| m.reference_name == name)
            .map(|m| m.option_identifier.as_str())
    }

    /// Pre-order iterator over every node of the forest
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::over(&self.params)
    }

    /// First node named `name` in pre-order
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.walk().find(|n| n.name == name)
    }

    /// File-name component of the executable
    #[must_use]
    pub fn executable_basename(&self) -> &str {
        let exe = self.meta_info.executable_name.as_str();
        Path::new(exe)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(exe)
    }

    /// Non-fatal problems of the description: names containing
    /// [`LEGACY_PATH_SEPARATOR`], values violating their own restrictions
    /// and mappings that reference no node.
    ///
    /// Covers built and deserialized trees alike.
    #[must_use]
    pub fn inconsistencies(&self) -> Vec<String> {
        let mut found = Vec::new();
        for node in self.walk() {
            if node.name.contains(LEGACY_PATH_SEPARATOR) {
                found.push(format!(
                    "Parameter name '{}' contains '{}'; tools addressing parameters by path will misread it",
                    node.name, LEGACY_PATH_SEPARATOR
                ));
            }
            if let Some(value) = node.leaf() {
                if let Err(e) = value.validate(&node.name) {
                    found.push(e.to_string());
                }
            }
        }
        for mapping in &self.cli_mapping {
            if self.find_node(&mapping.reference_name).is_none() {
                found.push(format!(
                    "CLI option '{}' references unknown parameter '{}'",
                    mapping.option_identifier, mapping.reference_name
                ));
            }
        }
        found
    }

    /// Log every [`Self::inconsistencies`] entry at warn level
    pub fn report_inconsistencies(&self) {
        for problem in self.inconsistencies() {
            tracing::warn!("{}", problem);
        }
    }

    /// Parse from JSON
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] if the text is not a valid description
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from YAML
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] if the text is not a valid description
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a description file, choosing the decoder from the extension
    /// (`.yaml`/`.yml` for YAML, anything else JSON)
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the file cannot be read and
    /// [`CoreError::Parse`] if it cannot be decoded
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&text),
            _ => Self::from_json(&text),
        }
    }
}
