//! PARAMTREE CWL Export
//!
//! Renders a tool description as a CWL v1.2 `CommandLineTool`. Parameters
//! become inputs, output paths become paired input/output entries, and
//! `basecommand` groups extend the base command.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod export;
pub mod model;
pub mod simplify;

pub use export::{
    convert_to_cwl, convert_to_cwl_with, to_command_line_tool, to_yaml_value, write_cwl,
    write_cwl_file, CwlOptions, PostProcess, UNSUPPORTED_DEFAULT,
};
pub use model::{
    CommandInputParameter, CommandLineBinding, CommandLineTool, CommandOutputBinding,
    CommandOutputParameter, CwlType, DefaultValue, CLASS_COMMAND_LINE_TOOL, CWL_VERSION,
};
pub use simplify::{shorthand, simplify_types};
