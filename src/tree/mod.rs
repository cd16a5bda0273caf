//! Parsed component trees.
//!
//! A page is stored as serialized block markup and parsed into a forest of
//! [`ComponentNode`]s on every validation or mining pass. Nodes are never
//! mutated after parsing and are dropped when the pass ends.
//!
//! # Modules
//!
//! - [`parser`] turns stored content into nodes ([`parse_document`])
//! - [`walk`] provides the single traversal every component uses ([`walk()`], [`Visitor`])
//!
//! # Examples
//!
//! ```rust
//! use blockwright::tree::parse_document;
//!
//! let content = r#"<!-- wp:img2html/molecule-card {"className":"img2html-card"} -->
//! <div class="img2html-card"><!-- wp:img2html/atom-button /--></div>
//! <!-- /wp:img2html/molecule-card -->"#;
//!
//! let nodes = parse_document(content)?;
//! assert_eq!(nodes.len(), 1);
//! assert_eq!(nodes[0].name, "img2html/molecule-card");
//! assert_eq!(nodes[0].class_name(), Some("img2html-card"));
//! assert_eq!(nodes[0].children[0].name, "img2html/atom-button");
//! # Ok::<(), blockwright::core::BlockwrightError>(())
//! ```

pub mod parser;
pub mod walk;

pub use parser::{document_mentions, parse_document};
pub use walk::{Visitor, walk};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Range;

/// Attribute key holding the author-supplied extra CSS classes.
pub const CLASS_NAME_ATTR: &str = "className";

/// One node of a parsed page tree.
///
/// Typed components carry a fully-qualified `namespace/kind` name; un-typed
/// content between components is represented as a raw node with an empty name
/// and its markup in [`raw_markup`](Self::raw_markup).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Fully-qualified component identifier, empty for raw markup nodes
    #[serde(rename = "blockName", default)]
    pub name: String,

    /// Author-supplied attributes (scalars, arrays, nested objects)
    #[serde(rename = "attrs", default)]
    pub attributes: Map<String, Value>,

    /// Nested components in document order
    #[serde(rename = "innerBlocks", default)]
    pub children: Vec<ComponentNode>,

    /// Markup of an un-typed content node
    #[serde(rename = "rawMarkup", default, skip_serializing_if = "Option::is_none")]
    pub raw_markup: Option<String>,

    /// Byte range of this node in the content it was parsed from
    #[serde(skip)]
    pub span: Option<Range<usize>>,
}

impl ComponentNode {
    /// Create a typed component node with no attributes and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an un-typed raw markup node.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self {
            raw_markup: Some(markup.into()),
            ..Self::default()
        }
    }

    /// Builder: set one attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: append children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = ComponentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Whether this node is un-typed content rather than a component.
    pub fn is_raw(&self) -> bool {
        self.name.is_empty()
    }

    /// The `className` attribute, when present and a string.
    pub fn class_name(&self) -> Option<&str> {
        self.attributes.get(CLASS_NAME_ATTR).and_then(Value::as_str)
    }

    /// Names of the direct typed children, in document order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().filter(|c| !c.is_raw()).map(|c| c.name.as_str()).collect()
    }

    /// The exact source text this node was parsed from.
    ///
    /// Returns `None` for nodes built in code or when `source` is not the text the
    /// node came from.
    pub fn source_text<'a>(&self, source: &'a str) -> Option<&'a str> {
        self.span.clone().and_then(|span| source.get(span))
    }
}
