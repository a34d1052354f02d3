//
// Copyright (c) The pandev Contributors
//
// SPDX-License-Identifier: MIT
//

use enum_as_inner::EnumAsInner;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

use crate::collections::NodeIndex;
use crate::device::Device;
use crate::error::InvalidTag;
use crate::xpath::XPath;

// Configuration node.
#[derive(Debug)]
pub struct Node<C> {
    pub name: Option<String>,
    pub kind: NodeKind<C>,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,
}

#[derive(Debug, EnumAsInner)]
pub enum NodeKind<C> {
    // Device root owning the API client.
    Device(Device<C>),
    // Regular configuration entity.
    Object(Object),
}

// Node type capability used by lookups and removals.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeTag {
    Device,
    Object(String),
}

// Configuration entity (address, zone, interface, ...).
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
pub struct Object {
    pub tag: String,
    pub location: Location,
    pub fields: Vec<Field>,
}

// Position of an object relative to its parent node.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    // `<container>/entry[@name='NAME']`
    Entry { container: XPath },
    // `<container>/member[text()='NAME']`
    Member { container: XPath },
}

// Leaf value serialized as `<tag>value</tag>` inside an entry.
//
// The tag is checked to be a valid XML element name on construction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[derive(Deserialize, Serialize)]
#[serde(try_from = "FieldRepr")]
pub struct Field {
    tag: String,
    value: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldRepr {
    tag: String,
    value: String,
}

// ===== impl Node =====

impl<C> Node<C> {
    pub(crate) fn new(name: Option<String>, kind: NodeKind<C>) -> Node<C> {
        Node {
            name,
            kind,
            parent: None,
            children: vec![],
        }
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn is_device(&self) -> bool {
        self.kind.is_device()
    }

    pub fn tag(&self) -> NodeTag {
        match &self.kind {
            NodeKind::Device(_) => NodeTag::Device,
            NodeKind::Object(object) => NodeTag::Object(object.tag.clone()),
        }
    }

    // Checks the node against an optional type filter. An absent filter
    // accepts any node.
    pub fn matches(
        &self,
        name: Option<&str>,
        filter: Option<&NodeTag>,
    ) -> bool {
        if self.name.as_deref() != name {
            return false;
        }

        match (filter, &self.kind) {
            (None, _) => true,
            (Some(NodeTag::Device), NodeKind::Device(_)) => true,
            (Some(NodeTag::Object(tag)), NodeKind::Object(object)) => {
                *tag == object.tag
            }
            _ => false,
        }
    }

    /// Serializes the node to its XML element.
    ///
    /// Entries carry their fields as child elements, in insertion order. The
    /// node's children are not part of the element.
    pub fn element(&self) -> String {
        let name = escape(self.name.as_deref().unwrap_or_default());
        match &self.kind {
            NodeKind::Object(Object {
                location: Location::Member { .. },
                ..
            }) => {
                format!("<member>{name}</member>")
            }
            NodeKind::Object(Object { fields, .. }) => {
                let mut element = format!("<entry name=\"{name}\">");
                for field in fields {
                    element.push_str(&field.element());
                }
                element.push_str("</entry>");
                element
            }
            NodeKind::Device(_) => {
                format!("<entry name=\"{name}\"></entry>")
            }
        }
    }
}

// ===== impl NodeTag =====

impl NodeTag {
    pub fn object(tag: impl Into<String>) -> NodeTag {
        NodeTag::Object(tag.into())
    }
}

impl std::fmt::Display for NodeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeTag::Device => write!(f, "device"),
            NodeTag::Object(tag) => write!(f, "{tag}"),
        }
    }
}

// ===== impl Object =====

impl Object {
    pub fn entry(tag: impl Into<String>, container: &str) -> Object {
        Object {
            tag: tag.into(),
            location: Location::Entry {
                container: XPath::parse(container),
            },
            fields: vec![],
        }
    }

    pub fn member(tag: impl Into<String>, container: &str) -> Object {
        Object {
            tag: tag.into(),
            location: Location::Member {
                container: XPath::parse(container),
            },
            fields: vec![],
        }
    }

    /// Returns the path segment the object adds on top of its parent's
    /// xpath: the container steps followed by the entry or member step.
    pub fn segment(&self, name: Option<&str>) -> XPath {
        let name = name.unwrap_or_default();
        let (container, step) = match &self.location {
            Location::Entry { container } => {
                (container, XPath::entry_step(name))
            }
            Location::Member { container } => {
                (container, XPath::member_step(name))
            }
        };

        let mut segment = container.clone();
        segment.push(step);
        segment
    }

    pub fn with_field(
        mut self,
        tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Object, InvalidTag> {
        self.fields.push(Field::new(tag, value)?);
        Ok(self)
    }
}

// ===== impl Field =====

impl Field {
    pub fn new(
        tag: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Field, InvalidTag> {
        let tag = tag.into();
        if !is_xml_name(&tag) {
            return Err(InvalidTag(tag));
        }

        Ok(Field {
            tag,
            value: value.into(),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn element(&self) -> String {
        format!("<{0}>{1}</{0}>", self.tag, escape(self.value.as_str()))
    }
}

impl TryFrom<FieldRepr> for Field {
    type Error = InvalidTag;

    fn try_from(repr: FieldRepr) -> Result<Field, InvalidTag> {
        Field::new(repr.tag, repr.value)
    }
}

// ===== helper functions =====

// Checks for an XML element name: a letter or '_' first, then letters,
// digits, '-', '.' or '_'. Namespace prefixes (':') are not accepted.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_'))
}

// ===== unit tests =====
