//! The subset of the CWL v1.2 `CommandLineTool` schema the exporter emits.
//!
//! Types serialize in CWL's canonical verbose encoding (`[null, T]`,
//! `{type: array, items: T}`); [`crate::simplify`] folds them into the
//! shorthand forms afterwards.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Version string written to `cwlVersion`
pub const CWL_VERSION: &str = "v1.2";
/// Value of `class`
pub const CLASS_COMMAND_LINE_TOOL: &str = "CommandLineTool";

/// A CWL type expression
#[derive(Debug, Clone, PartialEq)]
pub enum CwlType {
    /// `null`
    Null,
    /// `boolean`
    Boolean,
    /// `long`
    Long,
    /// `double`
    Double,
    /// `string`
    String,
    /// `File`
    File,
    /// `Directory`
    Directory,
    /// `{type: array, items: T}`
    Array(Box<CwlType>),
    /// `[null, T]`
    Optional(Box<CwlType>),
    /// `{type: record, fields: {...}}`
    Record(IndexMap<String, CommandInputParameter>),
}

impl CwlType {
    /// Wrap in an array
    #[must_use]
    pub fn array(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Wrap in `[null, T]` unless `required`
    #[must_use]
    pub fn optional_unless(self, required: bool) -> Self {
        if required {
            self
        } else {
            Self::Optional(Box::new(self))
        }
    }

    /// CWL keyword of the type; composites report their `type:` keyword
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
            Self::File => "File",
            Self::Directory => "Directory",
            Self::Array(_) => "array",
            Self::Optional(_) => "null",
            Self::Record(_) => "record",
        }
    }
}

impl Serialize for CwlType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.keyword())?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            Self::Optional(inner) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&CwlType::Null)?;
                seq.serialize_element(inner)?;
                seq.end()
            }
            Self::Record(fields) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", self.keyword())?;
                map.serialize_entry("fields", fields)?;
                map.end()
            }
            _ => serializer.serialize_str(self.keyword()),
        }
    }
}

/// A literal default value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Long(i64),
    /// Float
    Double(f64),
    /// String
    String(String),
}

/// How an input appears on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLineBinding {
    /// Option string preceding the value
    pub prefix: String,
}

/// How an output is collected after the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutputBinding {
    /// Glob pattern, usually a parameter reference
    pub glob: String,
}

/// An entry of `inputs`, or a field of a record input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandInputParameter {
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Type expression
    #[serde(rename = "type")]
    pub ty: CwlType,
    /// Default value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// Command-line binding
    #[serde(rename = "inputBinding", skip_serializing_if = "Option::is_none")]
    pub input_binding: Option<CommandLineBinding>,
}

/// An entry of `outputs`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutputParameter {
    /// Type expression
    #[serde(rename = "type")]
    pub ty: CwlType,
    /// How to collect the output
    #[serde(rename = "outputBinding", skip_serializing_if = "Option::is_none")]
    pub output_binding: Option<CommandOutputBinding>,
}

/// A CWL `CommandLineTool` document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandLineTool {
    /// Short name
    pub label: String,
    /// Description
    pub doc: String,
    /// Inputs keyed by id
    pub inputs: IndexMap<String, CommandInputParameter>,
    /// Outputs keyed by id
    pub outputs: IndexMap<String, CommandOutputParameter>,
    /// Always [`CWL_VERSION`]
    #[serde(rename = "cwlVersion")]
    pub cwl_version: String,
    /// Always [`CLASS_COMMAND_LINE_TOOL`]
    pub class: String,
    /// Executable followed by sub-command names
    #[serde(rename = "baseCommand")]
    pub base_command: Vec<String>,
}

impl CommandLineTool {
    /// Create an empty tool
    #[must_use]
    pub fn new(label: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            doc: doc.into(),
            inputs: IndexMap::new(),
            outputs: IndexMap::new(),
            cwl_version: CWL_VERSION.to_string(),
            class: CLASS_COMMAND_LINE_TOOL.to_string(),
            base_command: Vec::new(),
        }
    }
}
