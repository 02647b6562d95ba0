// Tree adapter
//
// The controller answers every read in one of two encodings: XML markup
// (`<imdata><fvCEp mac=".."><fvIp/></fvCEp></imdata>`) or nested JSON
// (`{"imdata":[{"fvCEp":{"attributes":{..},"children":[..]}}]}`). Both are
// folded into the same owned `Node` tree so resolvers never care which
// encoding a response arrived in.

mod json;
mod xml;

use std::collections::BTreeMap;

use crate::error::Error;

/// Name of the synthetic document root both encodings share.
pub const ROOT_CLASS: &str = "imdata";

/// Response encoding, selected by the URL extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Encoding {
    Xml,
    Json,
}

impl Encoding {
    /// File extension appended to query paths (`fvBD.xml`, `fvBD.json`).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

/// One managed object: its class name, its attributes, and its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    class: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Node {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style child append.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn set_attr(&mut self, key: String, value: String) {
        self.attributes.insert(key, value);
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Attribute lookup. Absent keys are `None`, never an error.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct children of the given class.
    pub fn children_of_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.class == class)
    }

    /// Pre-order walk of this node and everything below it, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Every node of `class` in this subtree (including `self`), document order.
    pub fn nodes_of_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> {
        self.descendants().filter(move |n| n.class == class)
    }
}

/// Pre-order iterator returned by [`Node::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A decoded controller response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// Decode `body` in the given encoding.
    ///
    /// Fails with [`Error::MalformedResponse`] when the body is not a
    /// well-formed document of that encoding.
    pub fn parse(body: &str, encoding: Encoding) -> Result<Self, Error> {
        match encoding {
            Encoding::Xml => xml::parse(body),
            Encoding::Json => json::parse(body),
        }
    }

    /// Decode an already-parsed JSON value.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, Error> {
        json::from_value(value)
    }

    /// Wrap a list of top-level records, mostly useful for fixtures.
    pub fn from_records(records: Vec<Node>) -> Self {
        let total = records.len().to_string();
        let mut root = Node::new(ROOT_CLASS).with_attr("totalCount", total);
        for record in records {
            root.push_child(record);
        }
        Self { root }
    }

    pub(crate) fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The `totalCount` the controller advertised, if present and numeric.
    pub fn total_count(&self) -> Option<usize> {
        self.root.attribute("totalCount")?.trim().parse().ok()
    }

    /// Top-level records (the children of `imdata`).
    pub fn records(&self) -> &[Node] {
        self.root.children()
    }

    /// Every node of `class` anywhere in the response, document order.
    pub fn nodes_of_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> {
        self.root
            .descendants()
            .skip(1)
            .filter(move |n| n.class == class)
    }

    /// The controller's `error` record, if this response is an error envelope.
    pub fn error_record(&self) -> Option<&Node> {
        self.records().iter().find(|n| n.class == "error")
    }
}
