use paramtree_core::{Citation, CliMapping, MetaInfo, Node, ParamValue, Ranged, ToolInfo};
use paramtree_ctd::{convert_to_ctd, write_ctd};

fn sample_tool() -> ToolInfo {
    ToolInfo::new(MetaInfo {
        version: "3.1.0".to_string(),
        name: "FileFilter".to_string(),
        docurl: "https://example.org/FileFilter".to_string(),
        category: "File Handling".to_string(),
        description: "Extracts or manipulates portions of data".to_string(),
        executable_name: "FileFilter".to_string(),
        citations: vec![
            Citation {
                doi: "10.1038/nmeth.3959".to_string(),
                url: "https://doi.org/10.1038/nmeth.3959".to_string(),
            },
            Citation::default(),
        ],
    })
    .with_param(Node::group(
        "FileFilter",
        "",
        vec![
            Node::new(
                "in",
                "input file ",
                ParamValue::choice("", ["mzML", "featureXML"]),
            )
            .with_tags(["input file", "required"]),
            Node::new("out", "output file", "").with_tags(["output file", "required"]),
            Node::new(
                "rt",
                "retention time range",
                Ranged::new(vec![0.5_f64, 10.0]).with_min(0.0_f64),
            )
            .with_tag("advanced"),
            Node::group(
                "algorithm",
                "Algorithm parameters section",
                vec![
                    Node::new(
                        "mode",
                        "Filtering mode",
                        ParamValue::choice("fast", ["fast", "exact"]),
                    ),
                    Node::new("force", "Overrides tool-specific checks", false)
                        .with_tag("advanced"),
                ],
            ),
        ],
    ))
    .with_cli_mapping(CliMapping::new("-in", "in"))
    .with_cli_mapping(CliMapping::new("-out", "out"))
}

#[test]
fn test_full_nested_document() {
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<tool ctdVersion="1.7" version="3.1.0" name="FileFilter" docurl="https://example.org/FileFilter" category="File Handling">
  <description><![CDATA[Extracts or manipulates portions of data]]></description>
  <manual><![CDATA[Extracts or manipulates portions of data]]></manual>
  <executableName><![CDATA[FileFilter]]></executableName>
  <citations>
    <citation doi="10.1038/nmeth.3959" url="https://doi.org/10.1038/nmeth.3959" />
    <citation doi="" url="" />
  </citations>
  <PARAMETERS version="1.7.0" xsi:noNamespaceSchemaLocation="https://raw.githubusercontent.com/OpenMS/OpenMS/develop/share/OpenMS/SCHEMAS/Param_1_7_0.xsd" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <NODE name="FileFilter" description="">
      <ITEM name="in" value="" type="input-file" description="input file " required="true" advanced="false" supported_formats="mzML,featureXML" />
      <ITEM name="out" value="" type="output-file" description="output file" required="true" advanced="false" />
      <ITEMLIST name="rt" type="double" description="retention time range" required="false" advanced="true" restrictions="0:">
        <LISTITEM value="0.5" />
        <LISTITEM value="10" />
      </ITEMLIST>
      <NODE name="algorithm" description="Algorithm parameters section">
        <ITEM name="mode" value="fast" type="string" description="Filtering mode" required="false" advanced="false" restrictions="fast,exact" />
        <ITEM name="force" value="false" type="bool" description="Overrides tool-specific checks" required="false" advanced="true" />
      </NODE>
    </NODE>
  </PARAMETERS>
  <cli>
    <clielement optionIdentifier="-in">
      <mapping referenceName="in" />
    </clielement>
    <clielement optionIdentifier="-out">
      <mapping referenceName="out" />
    </clielement>
  </cli>
</tool>
"#;
    assert_eq!(convert_to_ctd(&sample_tool()), expected);
}

#[test]
fn test_write_ctd_matches_string() {
    let tool = sample_tool();
    let mut buf = Vec::new();
    write_ctd(&tool, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), convert_to_ctd(&tool));
}

#[test]
fn test_deterministic() {
    let tool = sample_tool();
    assert_eq!(convert_to_ctd(&tool), convert_to_ctd(&tool.clone()));
}
