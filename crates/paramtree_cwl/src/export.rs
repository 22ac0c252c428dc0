//! Conversion of a [`ToolInfo`] into a CWL `CommandLineTool`.

use crate::model::{
    CommandInputParameter, CommandLineBinding, CommandLineTool, CommandOutputBinding,
    CommandOutputParameter, CwlType, DefaultValue,
};
use crate::simplify::simplify_types;
use indexmap::IndexMap;
use paramtree_core::{
    write_file, ExportResult, Node, NodeRole, NodeValue, ParamValue, PathKind, Role, ToolInfo,
};
use serde_yaml_ng::Value;
use std::io::Write;
use std::path::Path;

/// Default written for path-like string parameters, whose current value is
/// a placeholder path rather than a meaningful literal.
pub const UNSUPPORTED_DEFAULT: &str = "unsupported default";

/// Hook run on the generated YAML after type simplification.
pub type PostProcess = Box<dyn Fn(&mut Value)>;

/// Options for a CWL export
#[derive(Default)]
pub struct CwlOptions {
    /// Mutates the document before it is emitted
    pub post_process: Option<PostProcess>,
}

impl CwlOptions {
    /// Set the post-processing hook
    #[must_use]
    pub fn with_post_process(mut self, f: impl Fn(&mut Value) + 'static) -> Self {
        self.post_process = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for CwlOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CwlOptions")
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}

/// Convert `tool` into a CWL document.
///
/// # Errors
///
/// Returns [`paramtree_core::ExportError::Yaml`] if the YAML emitter fails
pub fn convert_to_cwl(tool: &ToolInfo) -> ExportResult<String> {
    convert_to_cwl_with(tool, &CwlOptions::default())
}

/// Convert `tool` into a CWL document, applying `options`.
///
/// # Errors
///
/// Returns [`paramtree_core::ExportError::Yaml`] if the YAML emitter fails
pub fn convert_to_cwl_with(tool: &ToolInfo, options: &CwlOptions) -> ExportResult<String> {
    let doc = to_yaml_value(tool, options)?;
    Ok(serde_yaml_ng::to_string(&doc)?)
}

/// Write the CWL document for `tool` to `out`.
///
/// # Errors
///
/// Returns [`paramtree_core::ExportError::Yaml`] if the YAML emitter fails
/// and [`paramtree_core::ExportError::Write`] if writing fails
pub fn write_cwl(tool: &ToolInfo, options: &CwlOptions, out: &mut dyn Write) -> ExportResult<()> {
    out.write_all(convert_to_cwl_with(tool, options)?.as_bytes())?;
    Ok(())
}

/// Write the CWL document for `tool` to the file at `path`.
///
/// The document is rendered before the file is created, so an emitter
/// failure leaves no partial file behind.
///
/// # Errors
///
/// Returns [`paramtree_core::ExportError::CannotCreateOutput`] if the file
/// cannot be created, and the errors of [`write_cwl`] otherwise
pub fn write_cwl_file(tool: &ToolInfo, options: &CwlOptions, path: &Path) -> ExportResult<()> {
    let doc = convert_to_cwl_with(tool, options)?;
    write_file(path, |out| Ok(out.write_all(doc.as_bytes())?))
}

/// The simplified, post-processed YAML document for `tool`.
///
/// # Errors
///
/// Returns [`paramtree_core::ExportError::Yaml`] if the tool cannot be
/// represented as YAML
pub fn to_yaml_value(tool: &ToolInfo, options: &CwlOptions) -> ExportResult<Value> {
    let mut doc = serde_yaml_ng::to_value(to_command_line_tool(tool))?;
    simplify_types(&mut doc);
    if let Some(post_process) = &options.post_process {
        post_process(&mut doc);
    }
    Ok(doc)
}

/// Build the typed `CommandLineTool` for `tool`.
#[must_use]
pub fn to_command_line_tool(tool: &ToolInfo) -> CommandLineTool {
    tracing::debug!(
        "Converting '{}' to CWL ({} top-level parameters)",
        tool.meta_info.name,
        tool.params.len()
    );
    tool.report_inconsistencies();

    let mut converter = Converter {
        tool,
        outputs: IndexMap::new(),
        base_command: vec![tool.executable_basename().to_string()],
        record_path: Vec::new(),
    };
    let mut inputs = IndexMap::new();
    converter.visit_all(&tool.params, &mut inputs);

    let mut clt = CommandLineTool::new(
        tool.meta_info.name.as_str(),
        tool.meta_info.description.as_str(),
    );
    clt.inputs = inputs;
    clt.outputs = converter.outputs;
    clt.base_command = converter.base_command;
    tracing::debug!(
        "CWL tool '{}': {} inputs, {} outputs",
        clt.label,
        clt.inputs.len(),
        clt.outputs.len()
    );
    clt
}

type Inputs = IndexMap<String, CommandInputParameter>;

/// Traversal state. Inputs are threaded through explicitly because record
/// nodes collect their children's inputs into their own field list; outputs
/// and the base command are always flat.
struct Converter<'a> {
    tool: &'a ToolInfo,
    outputs: IndexMap<String, CommandOutputParameter>,
    base_command: Vec<String>,
    /// Names of the enclosing record inputs, outermost first
    record_path: Vec<String>,
}

impl Converter<'_> {
    fn visit_all(&mut self, nodes: &[Node], inputs: &mut Inputs) {
        for node in nodes {
            self.visit(node, inputs);
        }
    }

    fn visit(&mut self, node: &Node, inputs: &mut Inputs) {
        tracing::trace!("CWL node '{}'", node.name);
        let role = NodeRole::classify(node);
        match &node.value {
            NodeValue::Children(children) if role.basecommand => {
                self.base_command.push(node.name.clone());
                self.visit_all(children, inputs);
            }
            NodeValue::Children(children) => {
                let mut fields = Inputs::new();
                self.record_path.push(node.name.clone());
                self.visit_all(children, &mut fields);
                self.record_path.pop();
                self.add_input(inputs, node, role, CwlType::Record(fields), None);
            }
            NodeValue::Leaf(value) => self.visit_leaf(inputs, node, role, value),
        }
    }

    fn visit_leaf(&mut self, inputs: &mut Inputs, node: &Node, role: NodeRole, value: &ParamValue) {
        let output = role.role != Role::Input;
        match value {
            ParamValue::Bool(b) => {
                self.add_input(inputs, node, role, CwlType::Boolean, Some(DefaultValue::Bool(*b)));
            }
            ParamValue::Int(r) => {
                let default = Some(DefaultValue::Long(r.value));
                self.add_input(inputs, node, role, CwlType::Long, default);
            }
            ParamValue::Double(r) => {
                let default = Some(DefaultValue::Double(r.value));
                self.add_input(inputs, node, role, CwlType::Double, default);
            }
            ParamValue::Str(c) => {
                let default = Some(DefaultValue::String(if role.path_like {
                    UNSUPPORTED_DEFAULT.to_string()
                } else {
                    c.value.clone()
                }));
                match role.path {
                    PathKind::File if output => {
                        self.add_input(inputs, node, role, CwlType::String, default);
                        self.add_output(node, role, CwlType::File, false);
                    }
                    PathKind::Directory if output => {
                        self.add_input(inputs, node, role, CwlType::String, default);
                        self.add_output(node, role, CwlType::Directory, false);
                    }
                    PathKind::None if role.role == Role::PrefixedOutput => {
                        self.add_input(inputs, node, role, CwlType::String, default);
                        self.add_output(node, role, CwlType::File, true);
                    }
                    PathKind::File => {
                        self.add_input(inputs, node, role, CwlType::File, default);
                    }
                    PathKind::Directory => {
                        self.add_input(inputs, node, role, CwlType::Directory, default);
                    }
                    PathKind::None => {
                        self.add_input(inputs, node, role, CwlType::String, default);
                    }
                }
            }
            ParamValue::IntList(_) => {
                self.add_input(inputs, node, role, CwlType::Long.array(), None);
            }
            ParamValue::DoubleList(_) => {
                self.add_input(inputs, node, role, CwlType::Double.array(), None);
            }
            ParamValue::StringList(_) => {
                if role.role == Role::PrefixedOutput {
                    let item = match role.path {
                        PathKind::Directory => CwlType::Directory,
                        PathKind::File | PathKind::None => CwlType::File,
                    };
                    self.add_input(inputs, node, role, CwlType::String.array(), None);
                    self.add_output(node, role, item.array(), true);
                } else {
                    let item = match role.path {
                        PathKind::File => CwlType::File,
                        PathKind::Directory => CwlType::Directory,
                        PathKind::None => CwlType::String,
                    };
                    self.add_input(inputs, node, role, item.array(), None);
                }
            }
        }
    }

    /// `default` is the node's candidate default; whether it is written
    /// depends on the `required`, `no_default` and `default_as_hint` tags.
    fn add_input(
        &self,
        inputs: &mut Inputs,
        node: &Node,
        role: NodeRole,
        ty: CwlType,
        default: Option<DefaultValue>,
    ) {
        let param = CommandInputParameter {
            doc: (!node.description.is_empty()).then(|| node.description.clone()),
            ty: ty.optional_unless(role.required),
            default: default.filter(|_| role.emits_default()),
            input_binding: self.tool.cli_option(&node.name).map(|prefix| CommandLineBinding {
                prefix: prefix.to_string(),
            }),
        };
        if inputs.insert(node.name.clone(), param).is_some() {
            tracing::warn!("Duplicate CWL input '{}'; the later one wins", node.name);
        }
    }

    /// The glob references the paired input, which may sit inside records.
    fn add_output(&mut self, node: &Node, role: NodeRole, ty: CwlType, prefixed: bool) {
        let mut reference = String::from("inputs");
        for segment in self.record_path.iter().chain(std::iter::once(&node.name)) {
            reference.push('.');
            reference.push_str(segment);
        }
        let glob = if prefixed {
            format!("$({})*", reference)
        } else {
            format!("$({})", reference)
        };
        let param = CommandOutputParameter {
            ty: ty.optional_unless(role.required),
            output_binding: Some(CommandOutputBinding { glob }),
        };
        if self.outputs.insert(node.name.clone(), param).is_some() {
            tracing::warn!("Duplicate CWL output '{}'; the later one wins", node.name);
        }
    }
}
