//! PARAMTREE CTD Export
//!
//! Renders a tool description as a Common Tool Descriptor (CTD 1.7) XML
//! document, byte-for-byte in the layout existing CTD consumers expect.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod export;
pub mod xml;

pub use export::{convert_to_ctd, to_xml_tree, write_ctd, write_ctd_file};
pub use xml::{escape, Payload, XmlNode};
