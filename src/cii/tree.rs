//! In-memory element tree with empty-element pruning.
//!
//! Emission builds the whole document as a tree first: the CII profiles
//! require a pruning pass that removes every element whose text content is
//! empty, which a streaming writer cannot express. The pruned tree is then
//! streamed through a [`quick_xml::Writer`].

use std::io::Cursor;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::core::ZugferdError;

fn xml_io(e: std::io::Error) -> ZugferdError {
    ZugferdError::Xml(format!("XML write error: {e}"))
}

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Leaf element holding text content.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut node = Self::element(name);
        node.text = Some(value.into());
        node
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn add(&mut self, child: XmlNode) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Append a text leaf for an optional value. An unset value still
    /// appends the element — the pruning pass drops it before serialization,
    /// which keeps the build order identical for every input.
    pub fn add_opt(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.children
            .push(XmlNode::text(name, value.unwrap_or_default()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    pub fn text_value(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Depth-first search for the first descendant named `name`.
    pub fn find(&self, name: &str) -> Option<&XmlNode> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.find(name) {
                return Some(found);
            }
        }
        None
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().is_none_or(|t| t.trim().is_empty())
    }

    /// Remove every element, at any depth, whose text content is empty.
    ///
    /// Children are pruned first, so a container whose children all vanish
    /// is itself removed; a second application is a no-op.
    pub fn prune_empty(&mut self) {
        for child in &mut self.children {
            child.prune_empty();
        }
        self.children.retain(|c| !c.is_empty());
    }

    /// Serialize the tree to a UTF-8 XML string with declaration.
    pub fn to_xml(&self) -> Result<String, ZugferdError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        self.write_into(&mut writer)?;
        let buf = writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| ZugferdError::Xml(format!("XML UTF-8 error: {e}")))
    }

    fn write_into(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<(), ZugferdError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() && self.text.is_none() {
            writer.write_event(Event::Empty(start)).map_err(xml_io)?;
            return Ok(());
        }
        writer.write_event(Event::Start(start)).map_err(xml_io)?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(xml_io)?;
        }
        for child in &self.children {
            child.write_into(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(xml_io)?;
        Ok(())
    }
}
