//! Conversion of a [`ToolInfo`] into a CTD document.

use crate::xml::XmlNode;
use paramtree_core::role::{
    TAG_ADVANCED, TAG_FILE, TAG_INPUT, TAG_INPUT_FILE, TAG_OUTPUT, TAG_OUTPUT_FILE, TAG_REQUIRED,
};
use paramtree_core::{
    write_file, Choice, ExportResult, Node, NodeRole, NodeValue, ParamValue, Ranged, ToolInfo,
};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::Write;
use std::path::Path;

/// Value of the `ctdVersion` attribute
pub const CTD_VERSION: &str = "1.7";
/// Value of the `PARAMETERS` `version` attribute
pub const PARAMETERS_VERSION: &str = "1.7.0";
/// Schema the `PARAMETERS` section validates against
pub const SCHEMA_LOCATION: &str =
    "https://raw.githubusercontent.com/OpenMS/OpenMS/develop/share/OpenMS/SCHEMAS/Param_1_7_0.xsd";
/// XML schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
const INDENT: usize = 2;

/// Attribute order shared by every element of a CTD document.
const ATTRIBUTE_ORDER: &[&str] = &[
    "ctdVersion",
    "version",
    "name",
    "value",
    "type",
    "description",
    "required",
    "advanced",
    "restrictions",
    "supported_formats",
    "tags",
    "docurl",
    "category",
];

/// Convert `tool` into a CTD document.
#[must_use]
pub fn convert_to_ctd(tool: &ToolInfo) -> String {
    tracing::debug!(
        "Converting '{}' to CTD ({} top-level parameters)",
        tool.meta_info.name,
        tool.params.len()
    );
    tool.report_inconsistencies();

    let mut out = String::from(XML_DECLARATION);
    out.push_str(&to_xml_tree(tool).render(ATTRIBUTE_ORDER, INDENT));
    out
}

/// Write the CTD document for `tool` to `out`.
///
/// # Errors
///
/// Returns [`paramtree_core::ExportError::Write`] if writing fails
pub fn write_ctd(tool: &ToolInfo, out: &mut dyn Write) -> ExportResult<()> {
    out.write_all(convert_to_ctd(tool).as_bytes())?;
    Ok(())
}

/// Write the CTD document for `tool` to the file at `path`.
///
/// # Errors
///
/// Returns [`paramtree_core::ExportError::CannotCreateOutput`] if the file
/// cannot be created and [`paramtree_core::ExportError::Write`] if writing
/// fails
pub fn write_ctd_file(tool: &ToolInfo, path: &Path) -> ExportResult<()> {
    let doc = convert_to_ctd(tool);
    write_file(path, |out| Ok(out.write_all(doc.as_bytes())?))
}

/// Build the `<tool>` element tree for `tool`.
#[must_use]
pub fn to_xml_tree(tool: &ToolInfo) -> XmlNode {
    let meta = &tool.meta_info;

    let citations = meta.citations.iter().map(|c| {
        XmlNode::new("citation")
            .with_attr("doi", c.doi.as_str())
            .with_attr("url", c.url.as_str())
    });

    let parameters = XmlNode::new("PARAMETERS")
        .with_attr("version", PARAMETERS_VERSION)
        .with_attr("xsi:noNamespaceSchemaLocation", SCHEMA_LOCATION)
        .with_attr("xmlns:xsi", XSI_NAMESPACE)
        .with_children(tool.params.iter().map(node_to_xml));

    let mut root = XmlNode::new("tool")
        .with_attr("ctdVersion", CTD_VERSION)
        .with_opt_attr("version", non_empty(&meta.version))
        .with_opt_attr("name", non_empty(&meta.name))
        .with_opt_attr("docurl", non_empty(&meta.docurl))
        .with_opt_attr("category", non_empty(&meta.category))
        .with_child(cdata_element("description", &meta.description))
        .with_child(cdata_element("manual", &meta.description))
        .with_child(cdata_element("executableName", &meta.executable_name))
        .with_child(XmlNode::new("citations").with_children(citations))
        .with_child(parameters);

    if !tool.cli_mapping.is_empty() {
        let elements = tool.cli_mapping.iter().map(|m| {
            XmlNode::new("clielement")
                .with_attr("optionIdentifier", m.option_identifier.as_str())
                .with_child(
                    XmlNode::new("mapping").with_attr("referenceName", m.reference_name.as_str()),
                )
        });
        root = root.with_child(XmlNode::new("cli").with_children(elements));
    }
    root
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn cdata_element(tag: &str, data: &str) -> XmlNode {
    let node = XmlNode::new(tag);
    if data.is_empty() {
        node
    } else {
        node.with_cdata(data)
    }
}

/// Multi-line descriptions are flattened with the `#br#` marker.
fn description(node: &Node) -> String {
    node.description.replace('\n', "#br#")
}

fn node_to_xml(node: &Node) -> XmlNode {
    tracing::trace!("CTD node '{}'", node.name);
    match &node.value {
        NodeValue::Children(children) => XmlNode::new("NODE")
            .with_attr("name", node.name.as_str())
            .with_attr("description", description(node))
            .with_children(children.iter().map(node_to_xml)),
        NodeValue::Leaf(value) => leaf_to_xml(node, value),
    }
}

/// Element shape of one leaf before attributes are assembled
struct Leaf {
    tag: &'static str,
    value: Option<String>,
    ty: &'static str,
    restriction: Option<String>,
    items: Vec<String>,
}

fn leaf_to_xml(node: &Node, value: &ParamValue) -> XmlNode {
    let role = NodeRole::classify(node);
    let mut tags: BTreeSet<&str> = node.tags.iter().map(String::as_str).collect();
    tags.remove(TAG_REQUIRED);
    tags.remove(TAG_ADVANCED);

    let leaf = match value {
        ParamValue::Bool(b) => Leaf {
            tag: "ITEM",
            value: Some(b.to_string()),
            ty: "bool",
            restriction: None,
            items: Vec::new(),
        },
        ParamValue::Int(r) => Leaf {
            tag: "ITEM",
            value: Some(r.value.to_string()),
            ty: "int",
            restriction: range_restriction(r),
            items: Vec::new(),
        },
        ParamValue::Double(r) => Leaf {
            tag: "ITEM",
            value: Some(r.value.to_string()),
            ty: "double",
            restriction: range_restriction(r),
            items: Vec::new(),
        },
        ParamValue::Str(c) => {
            let ty = string_type(role, Some(c));
            Leaf {
                tag: "ITEM",
                value: Some(c.value.clone()),
                ty,
                restriction: if ty == "bool" { None } else { choice_restriction(c) },
                items: Vec::new(),
            }
        }
        ParamValue::IntList(r) => Leaf {
            tag: "ITEMLIST",
            value: None,
            ty: "int",
            restriction: range_restriction(r),
            items: r.value.iter().map(ToString::to_string).collect(),
        },
        ParamValue::DoubleList(r) => Leaf {
            tag: "ITEMLIST",
            value: None,
            ty: "double",
            restriction: range_restriction(r),
            items: r.value.iter().map(ToString::to_string).collect(),
        },
        ParamValue::StringList(c) => Leaf {
            tag: "ITEMLIST",
            value: None,
            ty: string_type(role, None),
            restriction: choice_restriction(c),
            items: c.value.clone(),
        },
    };

    let is_path = match leaf.ty {
        "input-file" => {
            for t in [TAG_INPUT_FILE, TAG_INPUT, TAG_FILE] {
                tags.remove(t);
            }
            true
        }
        "output-file" => {
            for t in [TAG_OUTPUT_FILE, TAG_OUTPUT, TAG_FILE] {
                tags.remove(t);
            }
            true
        }
        _ => false,
    };
    let (restrictions, supported_formats) = if is_path {
        (None, leaf.restriction)
    } else {
        (leaf.restriction, None)
    };
    let tags = (!tags.is_empty()).then(|| tags.into_iter().collect::<Vec<_>>().join(","));

    XmlNode::new(leaf.tag)
        .with_attr("name", node.name.as_str())
        .with_opt_attr("value", leaf.value)
        .with_attr("type", leaf.ty)
        .with_attr("description", description(node))
        .with_attr("required", role.required.to_string())
        .with_attr("advanced", role.advanced.to_string())
        .with_opt_attr("restrictions", restrictions)
        .with_opt_attr("supported_formats", supported_formats)
        .with_opt_attr("tags", tags)
        .with_children(
            leaf.items
                .into_iter()
                .map(|v| XmlNode::new("LISTITEM").with_attr("value", v)),
        )
}

/// CTD type of a string or string-list leaf. `choice` is given for scalars
/// only, where a `"true"`/`"false"` enumeration currently `"false"` denotes
/// a flag.
fn string_type(role: NodeRole, choice: Option<&Choice<String>>) -> &'static str {
    if role.input_file {
        return "input-file";
    }
    if role.output_file {
        return "output-file";
    }
    match choice {
        Some(c) if is_flag(c) => "bool",
        _ => "string",
    }
}

fn is_flag(c: &Choice<String>) -> bool {
    matches!(c.valid(), [t, f] if t == "true" && f == "false") && c.value == "false"
}

fn range_restriction<V, L: Display>(r: &Ranged<V, L>) -> Option<String> {
    if !r.is_restricted() {
        return None;
    }
    let side = |l: &Option<L>| l.as_ref().map(ToString::to_string).unwrap_or_default();
    Some(format!("{}:{}", side(&r.min_limit), side(&r.max_limit)))
}

fn choice_restriction<V>(c: &Choice<V>) -> Option<String> {
    let valid = c.valid();
    (!valid.is_empty()).then(|| valid.join(","))
}
