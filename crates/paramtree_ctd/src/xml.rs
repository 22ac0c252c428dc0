//! Minimal XML element tree with deterministic rendering.

use indexmap::IndexMap;
use std::borrow::Cow;

/// Character payload of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Escaped character data
    Text(String),
    /// Unescaped data wrapped in a CDATA section
    CData(String),
}

/// An XML element: tag, ordered attributes, children and optional payload.
///
/// Attributes keep insertion order. An attribute whose value is `None` is
/// declared but unset and is not rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Element name
    pub tag: String,
    /// Attributes, unescaped
    pub attrs: IndexMap<String, Option<String>>,
    /// Child elements
    pub children: Vec<XmlNode>,
    /// Character payload
    pub payload: Option<Payload>,
}

impl XmlNode {
    /// Create an empty element
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
            payload: None,
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), Some(value.into()));
        self
    }

    /// Set an attribute that may be unset
    #[must_use]
    pub fn with_opt_attr(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.attrs.insert(key.into(), value);
        self
    }

    /// Append a child
    #[must_use]
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append children
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = XmlNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set a CDATA payload
    #[must_use]
    pub fn with_cdata(mut self, data: impl Into<String>) -> Self {
        self.payload = Some(Payload::CData(data.into()));
        self
    }

    /// Set a text payload
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.payload = Some(Payload::Text(text.into()));
        self
    }

    /// The value of a set attribute
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(|v| v.as_deref())
    }

    /// Render this element and its descendants.
    ///
    /// Attributes named in `order_hint` come first, in hint order; the rest
    /// follow in insertion order. Each nesting level is indented by `indent`
    /// spaces. Elements without children or payload self-close.
    #[must_use]
    pub fn render(&self, order_hint: &[&str], indent: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, order_hint, indent, 0);
        out
    }

    fn render_into(&self, out: &mut String, order_hint: &[&str], indent: usize, depth: usize) {
        let pad = " ".repeat(indent * depth);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.tag);
        for (key, value) in self.ordered_attrs(order_hint) {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }

        if self.children.is_empty() && self.payload.is_none() {
            out.push_str(" />\n");
            return;
        }

        out.push('>');
        match &self.payload {
            Some(Payload::Text(text)) => out.push_str(&escape(text)),
            Some(Payload::CData(data)) => push_cdata(out, data),
            None => {}
        }
        if !self.children.is_empty() {
            out.push('\n');
            for child in &self.children {
                child.render_into(out, order_hint, indent, depth + 1);
            }
            out.push_str(&pad);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push_str(">\n");
    }

    fn ordered_attrs<'a>(&'a self, order_hint: &[&str]) -> Vec<(&'a str, &'a str)> {
        let set = self
            .attrs
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (k.as_str(), v)));
        let (mut hinted, rest): (Vec<_>, Vec<_>) =
            set.partition(|(k, _)| order_hint.contains(k));
        hinted.sort_by_key(|(k, _)| order_hint.iter().position(|h| h == k));
        hinted.extend(rest);
        hinted
    }
}

/// A `]]>` inside the data would end the section early, so it is split
/// across two sections.
fn push_cdata(out: &mut String, data: &str) {
    out.push_str("<![CDATA[");
    out.push_str(&data.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
}

/// Escape the five XML special characters and tabs.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'', '\t']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push_str("&#x9;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(
            escape(r#"a&b<c>d"e'f	g"#),
            "a&amp;b&lt;c&gt;d&quot;e&apos;f&#x9;g"
        );
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_self_closing() {
        let node = XmlNode::new("ITEM").with_attr("name", "foo");
        assert_eq!(node.render(&[], 2), "<ITEM name=\"foo\" />\n");
    }

    #[test]
    fn test_unset_attrs_skipped() {
        let node = XmlNode::new("a")
            .with_opt_attr("x", None)
            .with_attr("y", "1");
        assert_eq!(node.render(&[], 2), "<a y=\"1\" />\n");
        assert_eq!(node.attr("x"), None);
        assert_eq!(node.attr("y"), Some("1"));
    }

    #[test]
    fn test_order_hint() {
        let node = XmlNode::new("a")
            .with_attr("z", "3")
            .with_attr("b", "2")
            .with_attr("name", "n")
            .with_attr("c", "4");
        assert_eq!(
            node.render(&["name", "b"], 0),
            "<a name=\"n\" b=\"2\" z=\"3\" c=\"4\" />\n"
        );
    }

    #[test]
    fn test_nested_indent() {
        let node = XmlNode::new("root").with_child(
            XmlNode::new("mid").with_child(XmlNode::new("leaf").with_attr("k", "v")),
        );
        let expected = "<root>\n  <mid>\n    <leaf k=\"v\" />\n  </mid>\n</root>\n";
        assert_eq!(node.render(&[], 2), expected);
    }

    #[test]
    fn test_payloads() {
        let cdata = XmlNode::new("description").with_cdata("a < b");
        assert_eq!(
            cdata.render(&[], 2),
            "<description><![CDATA[a < b]]></description>\n"
        );

        let text = XmlNode::new("t").with_text("a < b");
        assert_eq!(text.render(&[], 2), "<t>a &lt; b</t>\n");
    }

    #[test]
    fn test_cdata_terminator_split() {
        let node = XmlNode::new("d").with_cdata("x]]>y");
        assert_eq!(
            node.render(&[], 0),
            "<d><![CDATA[x]]]]><![CDATA[>y]]></d>\n"
        );
    }

    proptest! {
        #[test]
        fn prop_escaped_has_no_raw_specials(s in ".*") {
            let e = escape(&s);
            prop_assert!(!e.contains(['<', '>', '"', '\'', '\t']));
        }

        #[test]
        fn prop_escape_identity_on_safe(s in "[a-zA-Z0-9 _.,:;-]*") {
            let e = escape(&s);
            prop_assert_eq!(e.as_ref(), s.as_str());
        }
    }
}
