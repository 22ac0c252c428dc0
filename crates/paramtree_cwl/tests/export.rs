use paramtree_core::{CliMapping, MetaInfo, Node, ParamValue, ToolInfo};
use paramtree_cwl::{convert_to_cwl, write_cwl, write_cwl_file, CwlOptions};
use serde_yaml_ng::Value;

fn sample_tool() -> ToolInfo {
    ToolInfo::new(MetaInfo {
        version: "3.1.0".to_string(),
        name: "FileFilter".to_string(),
        description: "Extracts portions of the data".to_string(),
        executable_name: "/usr/local/bin/FileFilter".to_string(),
        ..MetaInfo::default()
    })
    .with_param(
        Node::new("in", "Input file", ParamValue::choice("", ["mzML"]))
            .with_tags(["input file", "required"]),
    )
    .with_param(
        Node::new("out", "Output file", "").with_tags(["output file", "required"]),
    )
    .with_param(Node::new("threads", "Worker threads", 1_i64).with_tag("advanced"))
    .with_param(Node::new("mz", "m/z range", ParamValue::double_list(vec![0.0, 1e6])))
    .with_param(Node::group(
        "peak",
        "Peak options",
        vec![Node::new("sn", "Signal to noise", 0.5)],
    ))
    .with_cli_mapping(CliMapping::new("-in", "in"))
    .with_cli_mapping(CliMapping::new("-out", "out"))
    .with_cli_mapping(CliMapping::new("-threads", "threads"))
}

fn parsed(tool: &ToolInfo) -> Value {
    let text = convert_to_cwl(tool).unwrap();
    serde_yaml_ng::from_str(&text).unwrap()
}

#[test]
fn test_document_header() {
    let doc = parsed(&sample_tool());
    assert_eq!(doc["cwlVersion"], Value::from("v1.2"));
    assert_eq!(doc["class"], Value::from("CommandLineTool"));
    assert_eq!(doc["label"], Value::from("FileFilter"));
    assert_eq!(doc["doc"], Value::from("Extracts portions of the data"));
    assert_eq!(
        doc["baseCommand"],
        Value::Sequence(vec![Value::from("FileFilter")])
    );
}

#[test]
fn test_empty_label_and_doc_are_emitted() {
    let doc = parsed(&ToolInfo::default());
    assert_eq!(doc["label"], Value::from(""));
    assert_eq!(doc["doc"], Value::from(""));
}

#[test]
fn test_inputs_are_simplified() {
    let doc = parsed(&sample_tool());
    let inputs = &doc["inputs"];

    assert_eq!(inputs["in"]["type"], Value::from("File"));
    assert_eq!(inputs["in"]["inputBinding"]["prefix"], Value::from("-in"));
    assert!(inputs["in"].get("default").is_none());

    assert_eq!(inputs["out"]["type"], Value::from("string"));
    assert_eq!(inputs["threads"]["type"], Value::from("long?"));
    assert_eq!(inputs["threads"]["default"], Value::from(1_i64));
    assert_eq!(inputs["mz"]["type"], Value::from("double[]?"));
    assert!(inputs["mz"].get("default").is_none());

    let peak = &inputs["peak"]["type"];
    assert_eq!(peak[0], Value::from("null"));
    assert_eq!(peak[1]["type"], Value::from("record"));
    assert_eq!(peak[1]["fields"]["sn"]["type"], Value::from("double?"));
}

#[test]
fn test_outputs() {
    let doc = parsed(&sample_tool());
    let out = &doc["outputs"]["out"];
    assert_eq!(out["type"], Value::from("File"));
    assert_eq!(out["outputBinding"]["glob"], Value::from("$(inputs.out)"));
}

#[test]
fn test_key_order() {
    let text = convert_to_cwl(&sample_tool()).unwrap();
    let pos = |key: &str| text.find(&format!("\n{}:", key)).unwrap();
    assert!(text.starts_with("label:"));
    assert!(pos("doc") < pos("inputs"));
    assert!(pos("inputs") < pos("outputs"));
    assert!(pos("outputs") < pos("cwlVersion"));
    assert!(pos("cwlVersion") < pos("class"));
    assert!(pos("class") < pos("baseCommand"));
}

#[test]
fn test_write_variants_agree() {
    let tool = sample_tool();
    let mut buf = Vec::new();
    write_cwl(&tool, &CwlOptions::default(), &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), convert_to_cwl(&tool).unwrap());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("FileFilter.cwl");
    write_cwl_file(&tool, &CwlOptions::default(), &path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        convert_to_cwl(&tool).unwrap()
    );
}

#[test]
fn test_write_file_bad_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("tool.cwl");
    let err = write_cwl_file(&sample_tool(), &CwlOptions::default(), &path).unwrap_err();
    assert!(matches!(
        err,
        paramtree_core::ExportError::CannotCreateOutput { .. }
    ));
}
