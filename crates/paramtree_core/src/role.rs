//! Classification of a node's reserved tags.
//!
//! Export policy is driven by tag membership. The tags are read once per
//! node into a [`NodeRole`], which is the only place that knows about tag
//! spellings and their precedence.

use crate::node::Node;

/// Tag marking a parameter as mandatory
pub const TAG_REQUIRED: &str = "required";
/// Tag hiding a parameter from casual users
pub const TAG_ADVANCED: &str = "advanced";
/// Split form: parameter is read by the tool
pub const TAG_INPUT: &str = "input";
/// Split form: parameter is written by the tool
pub const TAG_OUTPUT: &str = "output";
/// Split form: value is a file path
pub const TAG_FILE: &str = "file";
/// Split form: value is a path prefix for several outputs
pub const TAG_PREFIXED: &str = "prefixed";
/// Combined form of `input` + `file`
pub const TAG_INPUT_FILE: &str = "input file";
/// Combined form of `output` + `file`
pub const TAG_OUTPUT_FILE: &str = "output file";
/// Combined form of `output` + `prefixed`
pub const TAG_OUTPUT_PREFIX: &str = "output prefix";
/// Value is a directory path
pub const TAG_DIRECTORY: &str = "directory";
/// Interior node naming a sub-command
pub const TAG_BASECOMMAND: &str = "basecommand";
/// Never emit a default for this parameter
pub const TAG_NO_DEFAULT: &str = "no_default";
/// Emit the default even though the parameter is required
pub const TAG_DEFAULT_AS_HINT: &str = "default_as_hint";

/// Direction of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Read by the tool (the default)
    Input,
    /// A single path written by the tool
    Output,
    /// A prefix from which the tool derives several output paths
    PrefixedOutput,
}

/// What a string value denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Not a path
    None,
    /// A file
    File,
    /// A directory
    Directory,
}

/// Parsed reserved tags of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRole {
    /// Direction
    pub role: Role,
    /// Path kind
    pub path: PathKind,
    /// `required`
    pub required: bool,
    /// `advanced`
    pub advanced: bool,
    /// `input file` or `input` + `file`
    pub input_file: bool,
    /// `output file` or `output` + `file`
    pub output_file: bool,
    /// `basecommand`
    pub basecommand: bool,
    /// `no_default`
    pub no_default: bool,
    /// `default_as_hint`
    pub default_as_hint: bool,
    /// Any of `output`, `file`, `directory` or `prefixed` in either form
    pub path_like: bool,
}

impl NodeRole {
    /// Classify the tags of `node`
    #[must_use]
    pub fn classify(node: &Node) -> Self {
        let has = |t: &str| node.has_tag(t);

        let output = has(TAG_OUTPUT) || has(TAG_OUTPUT_FILE) || has(TAG_OUTPUT_PREFIX);
        let input = has(TAG_INPUT) || has(TAG_INPUT_FILE);
        let file = has(TAG_FILE) || has(TAG_INPUT_FILE) || has(TAG_OUTPUT_FILE);
        let prefixed = has(TAG_PREFIXED) || has(TAG_OUTPUT_PREFIX);
        let directory = has(TAG_DIRECTORY);

        let role = match (output, prefixed) {
            (true, true) => Role::PrefixedOutput,
            (true, false) => Role::Output,
            (false, _) => Role::Input,
        };
        let path = if file {
            PathKind::File
        } else if directory {
            PathKind::Directory
        } else {
            PathKind::None
        };

        Self {
            role,
            path,
            required: has(TAG_REQUIRED),
            advanced: has(TAG_ADVANCED),
            input_file: input && file,
            output_file: output && file,
            basecommand: has(TAG_BASECOMMAND),
            no_default: has(TAG_NO_DEFAULT),
            default_as_hint: has(TAG_DEFAULT_AS_HINT),
            path_like: output || file || directory || prefixed,
        }
    }

    /// Whether an exporter should emit a default value for this node
    #[must_use]
    pub fn emits_default(&self) -> bool {
        (!self.required && !self.no_default) || (self.required && self.default_as_hint)
    }
}
