use ego_tree::{NodeId, NodeRef};
use regex::Regex;
use scraper::{ElementRef, Html, Node};

use crate::catalog::FieldDescriptor;
use crate::error::{Result, ScrapeError};
use crate::parser::pretty;

/// Steps forward in document order from a label cell to the node holding
/// its value. Matches the ev-database data table layout:
/// `<td>Label</td> <td>Value</td>`.
pub const VALUE_OFFSET: usize = 3;

const LABEL_TAG: &str = "td";

/// A parsed vehicle page with label → value lookup.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// First label cell whose sole text content matches `pattern`.
    pub fn find_label(&self, pattern: &Regex) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .find(|node| is_label_cell(*node) && own_string(*node).is_some_and(|s| pattern.is_match(s)))
            .map(|node| node.id())
    }

    /// Trimmed text of the node `VALUE_OFFSET` steps after `label`.
    pub fn value_after(&self, label: NodeId) -> Option<String> {
        self.html
            .tree
            .root()
            .descendants()
            .skip_while(|node| node.id() != label)
            .nth(VALUE_OFFSET)
            .map(|node| text_content(node).trim().to_string())
    }

    /// Raw text for `field`. An empty value counts as missing.
    pub fn extract(&self, field: &FieldDescriptor) -> Result<String> {
        self.find_label(field.pattern())
            .and_then(|id| self.value_after(id))
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ScrapeError::FieldNotFound {
                label: field.label.clone(),
            })
    }

    /// Indented rendering written to the page cache.
    pub fn prettify(&self) -> String {
        pretty::render(&self.html)
    }
}

fn is_label_cell(node: NodeRef<'_, Node>) -> bool {
    matches!(node.value(), Node::Element(e) if e.name() == LABEL_TAG)
}

/// Text of a node that has exactly one text descendant along a chain of
/// single children; `None` when the content is mixed.
fn own_string(node: NodeRef<'_, Node>) -> Option<&str> {
    match node.value() {
        Node::Text(text) => Some(&**text),
        Node::Element(_) => {
            let mut children = node.children();
            let only = children.next()?;
            if children.next().is_some() {
                return None;
            }
            own_string(only)
        }
        _ => None,
    }
}

fn text_content(node: NodeRef<'_, Node>) -> String {
    match node.value() {
        Node::Text(text) => text.to_string(),
        Node::Comment(comment) => comment.to_string(),
        Node::Element(_) => ElementRef::wrap(node)
            .map(|el| el.text().collect())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

// ── Tests ──
