//! An in-memory [`DisplayTree`] that follows the DOM's rules for the operations the reconciler uses.
//!
//! Every creation and mutation is recorded, so tests can check exactly what a pass did:
//!
//! ```
//! use sapling_dom::{jsx, memory::{MemoryTree, Mutation}, render, DisplayTree as _};
//!
//! let mut tree = MemoryTree::new();
//! let body = tree.create_element("body").unwrap();
//!
//! let vdom = jsx!("p", { "class" => "greeting" }, "Hello!");
//! render(&mut tree, &body, &vdom, &Default::default(), 0).unwrap();
//! assert_eq!(tree.to_html(body), r#"<body><p class="greeting">Hello!</p></body>"#);
//!
//! tree.take_mutations();
//! render(&mut tree, &body, &vdom, &vdom, 0).unwrap();
//! assert_eq!(tree.mutations(), &[] as &[Mutation]);
//! ```

use crate::{DisplayTree, NodeKind};
use core::{fmt, mem};
use thiserror::Error;
use tracing::trace;

/// A handle to a node in a [`MemoryTree`].
///
/// Handles are never reused. Two handles are equal iff they refer to the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	/// Creation order of the node within its tree.
	#[must_use]
	pub fn index(self) -> usize {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// One recorded [`MemoryTree`] operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
	CreateElement { node: NodeId, tag: String },
	CreateText { node: NodeId, text: String },
	CreateFragment { node: NodeId },
	SetAttribute { node: NodeId, name: String, value: String },
	RemoveAttribute { node: NodeId, name: String },
	AppendChild { parent: NodeId, child: NodeId },
	InsertBefore { parent: NodeId, child: NodeId, reference: Option<NodeId> },
	ReplaceChild { parent: NodeId, new_child: NodeId, old_child: NodeId },
	RemoveChild { parent: NodeId, child: NodeId },
}

impl Mutation {
	/// Whether this only created a detached node.
	#[must_use]
	pub fn is_creation(&self) -> bool {
		matches!(self, Mutation::CreateElement { .. } | Mutation::CreateText { .. } | Mutation::CreateFragment { .. })
	}
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryError {
	#[error("unknown node {0}")]
	UnknownNode(NodeId),
	#[error("invalid element name {0:?}")]
	InvalidTag(String),
	#[error("invalid attribute name {0:?}")]
	InvalidAttributeName(String),
	#[error("node {0} is not an element")]
	NotAnElement(NodeId),
	#[error("node {0} can't have children")]
	NotAParent(NodeId),
	#[error("node {child} is not a child of {parent}")]
	NotAChild { parent: NodeId, child: NodeId },
	#[error("inserting {child} into {parent} would create a cycle")]
	HierarchyRequest { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone)]
enum Data {
	Element { tag: String, attributes: Vec<(String, String)> },
	Text(String),
	Fragment,
}

#[derive(Debug, Clone)]
struct Slot {
	data: Data,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

/// An arena of elements, text nodes and fragments.
#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
	slots: Vec<Slot>,
	journal: Vec<Mutation>,
}

impl MemoryTree {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Everything recorded since creation or the last [`MemoryTree::take_mutations`].
	#[must_use]
	pub fn mutations(&self) -> &[Mutation] {
		&self.journal
	}

	pub fn take_mutations(&mut self) -> Vec<Mutation> {
		mem::take(&mut self.journal)
	}

	#[must_use]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.slots.get(node.0).and_then(|slot| slot.parent)
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> &[NodeId] {
		match self.slots.get(node.0) {
			Some(slot) => &slot.children,
			None => &[],
		}
	}

	#[must_use]
	pub fn tag(&self, node: NodeId) -> Option<&str> {
		match &self.slots.get(node.0)?.data {
			Data::Element { tag, .. } => Some(tag),
			_ => None,
		}
	}

	#[must_use]
	pub fn text(&self, node: NodeId) -> Option<&str> {
		match &self.slots.get(node.0)?.data {
			Data::Text(text) => Some(text),
			_ => None,
		}
	}

	/// The element's attributes in insertion order. Empty for anything that isn't an element.
	#[must_use]
	pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
		match self.slots.get(node.0).map(|slot| &slot.data) {
			Some(Data::Element { attributes, .. }) => attributes,
			_ => &[],
		}
	}

	#[must_use]
	pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
		self.attributes(node).iter().find(|(n, _)| n == name).map(|(_, value)| value.as_str())
	}

	/// Serializes `node` and its subtree. Fragments contribute only their children.
	#[must_use]
	pub fn to_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		self.write_html(node, &mut html);
		html
	}

	fn write_html(&self, node: NodeId, html: &mut String) {
		let slot = match self.slots.get(node.0) {
			Some(slot) => slot,
			None => return,
		};
		match &slot.data {
			Data::Element { tag, attributes } => {
				html.push('<');
				html.push_str(tag);
				for (name, value) in attributes {
					html.push(' ');
					html.push_str(name);
					html.push_str("=\"");
					escape_into(value, true, html);
					html.push('"');
				}
				html.push('>');
				for &child in &slot.children {
					self.write_html(child, html);
				}
				html.push_str("</");
				html.push_str(tag);
				html.push('>');
			}
			Data::Text(text) => escape_into(text, false, html),
			Data::Fragment => {
				for &child in &slot.children {
					self.write_html(child, html);
				}
			}
		}
	}

	fn slot(&self, node: NodeId) -> Result<&Slot, MemoryError> {
		self.slots.get(node.0).ok_or(MemoryError::UnknownNode(node))
	}

	fn push(&mut self, data: Data) -> NodeId {
		let id = NodeId(self.slots.len());
		self.slots.push(Slot { data, parent: None, children: Vec::new() });
		id
	}

	fn attributes_mut(&mut self, node: NodeId) -> Result<&mut Vec<(String, String)>, MemoryError> {
		match &mut self.slots.get_mut(node.0).ok_or(MemoryError::UnknownNode(node))?.data {
			Data::Element { attributes, .. } => Ok(attributes),
			_ => Err(MemoryError::NotAnElement(node)),
		}
	}

	fn check_parent(&self, parent: NodeId) -> Result<(), MemoryError> {
		match self.slot(parent)?.data {
			Data::Element { .. } | Data::Fragment => Ok(()),
			Data::Text(_) => Err(MemoryError::NotAParent(parent)),
		}
	}

	fn check_child_of(&self, parent: NodeId, child: NodeId) -> Result<(), MemoryError> {
		if self.slot(child)?.parent == Some(parent) {
			Ok(())
		} else {
			Err(MemoryError::NotAChild { parent, child })
		}
	}

	/// Whether `ancestor` is `node` or one of its ancestors.
	fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
		let mut current = Some(node);
		while let Some(id) = current {
			if id == ancestor {
				return true;
			}
			current = self.parent(id);
		}
		false
	}

	fn detach(&mut self, node: NodeId) {
		if let Some(parent) = self.slots[node.0].parent.take() {
			self.slots[parent.0].children.retain(|&child| child != node);
		}
	}

	/// Moves `child` (or a fragment's children) into `parent`, in front of `reference`.
	fn adopt(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> Result<(), MemoryError> {
		self.check_parent(parent)?;
		self.slot(child)?;
		if let Some(reference) = reference {
			self.check_child_of(parent, reference)?;
		}
		if self.is_inclusive_ancestor(child, parent) {
			return Err(MemoryError::HierarchyRequest { parent, child });
		}
		if reference == Some(child) {
			return Ok(());
		}

		let moved = if matches!(self.slots[child.0].data, Data::Fragment) {
			mem::take(&mut self.slots[child.0].children)
		} else {
			self.detach(child);
			vec![child]
		};
		trace!("Moving {} node(s) into {}.", moved.len(), parent);

		let siblings = &self.slots[parent.0].children;
		let position = match reference {
			Some(reference) => siblings.iter().position(|&sibling| sibling == reference).ok_or(MemoryError::NotAChild { parent, child: reference })?,
			None => siblings.len(),
		};
		for &node in &moved {
			self.slots[node.0].parent = Some(parent);
		}
		self.slots[parent.0].children.splice(position..position, moved);
		Ok(())
	}
}

fn is_valid_name(name: &str) -> bool {
	let mut chars = name.chars();
	matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == ':') && chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

fn escape_into(text: &str, attribute: bool, html: &mut String) {
	for c in text.chars() {
		match c {
			'&' => html.push_str("&amp;"),
			'<' => html.push_str("&lt;"),
			'>' => html.push_str("&gt;"),
			'"' if attribute => html.push_str("&quot;"),
			c => html.push(c),
		}
	}
}

impl DisplayTree for MemoryTree {
	type Node = NodeId;
	type Error = MemoryError;

	fn create_element(&mut self, tag: &str) -> Result<NodeId, MemoryError> {
		if !is_valid_name(tag) {
			return Err(MemoryError::InvalidTag(tag.to_owned()));
		}
		let node = self.push(Data::Element {
			tag: tag.to_owned(),
			attributes: Vec::new(),
		});
		self.journal.push(Mutation::CreateElement { node, tag: tag.to_owned() });
		Ok(node)
	}

	fn create_text_node(&mut self, text: &str) -> Result<NodeId, MemoryError> {
		let node = self.push(Data::Text(text.to_owned()));
		self.journal.push(Mutation::CreateText { node, text: text.to_owned() });
		Ok(node)
	}

	fn create_fragment(&mut self) -> Result<NodeId, MemoryError> {
		let node = self.push(Data::Fragment);
		self.journal.push(Mutation::CreateFragment { node });
		Ok(node)
	}

	fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<(), MemoryError> {
		let node = *element;
		if !is_valid_name(name) {
			return Err(MemoryError::InvalidAttributeName(name.to_owned()));
		}
		let attributes = self.attributes_mut(node)?;
		match attributes.iter_mut().find(|(n, _)| n == name) {
			Some((_, existing)) => value.clone_into(existing),
			None => attributes.push((name.to_owned(), value.to_owned())),
		}
		self.journal.push(Mutation::SetAttribute {
			node,
			name: name.to_owned(),
			value: value.to_owned(),
		});
		Ok(())
	}

	fn remove_attribute(&mut self, element: &NodeId, name: &str) -> Result<(), MemoryError> {
		let node = *element;
		self.attributes_mut(node)?.retain(|(n, _)| n != name);
		self.journal.push(Mutation::RemoveAttribute { node, name: name.to_owned() });
		Ok(())
	}

	fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
		self.adopt(*parent, *child, None)?;
		self.journal.push(Mutation::AppendChild { parent: *parent, child: *child });
		Ok(())
	}

	fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: Option<&NodeId>) -> Result<(), MemoryError> {
		let reference = reference.copied();
		self.adopt(*parent, *child, reference)?;
		self.journal.push(Mutation::InsertBefore {
			parent: *parent,
			child: *child,
			reference,
		});
		Ok(())
	}

	fn replace_child(&mut self, parent: &NodeId, new_child: &NodeId, old_child: &NodeId) -> Result<(), MemoryError> {
		let (parent, new_child, old_child) = (*parent, *new_child, *old_child);
		self.check_child_of(parent, old_child)?;
		if new_child != old_child {
			self.adopt(parent, new_child, Some(old_child))?;
			self.detach(old_child);
		}
		self.journal.push(Mutation::ReplaceChild { parent, new_child, old_child });
		Ok(())
	}

	fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
		self.check_child_of(*parent, *child)?;
		self.detach(*child);
		self.journal.push(Mutation::RemoveChild { parent: *parent, child: *child });
		Ok(())
	}

	fn child_count(&self, parent: &NodeId) -> usize {
		self.children(*parent).len()
	}

	fn child_at(&self, parent: &NodeId, index: usize) -> Option<NodeId> {
		self.children(*parent).get(index).copied()
	}

	fn inspect(&self, node: &NodeId) -> NodeKind {
		match self.slots.get(node.0).map(|slot| &slot.data) {
			Some(Data::Element { tag, attributes }) => NodeKind::Element {
				tag: tag.clone(),
				attributes: attributes.clone(),
			},
			Some(Data::Text(text)) => NodeKind::Text(text.clone()),
			Some(Data::Fragment) | None => NodeKind::Other,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fragments_splice_their_children() {
		let mut tree = MemoryTree::new();
		let body = tree.create_element("body").unwrap();
		let fragment = tree.create_fragment().unwrap();
		let a = tree.create_text_node("a").unwrap();
		let b = tree.create_text_node("b").unwrap();
		tree.append_child(&fragment, &a).unwrap();
		tree.append_child(&fragment, &b).unwrap();

		tree.append_child(&body, &fragment).unwrap();

		assert_eq!(tree.children(body), &[a, b]);
		assert_eq!(tree.children(fragment), &[] as &[NodeId]);
		assert_eq!(tree.parent(a), Some(body));
	}

	#[test]
	fn empty_fragment_replacement_removes() {
		let mut tree = MemoryTree::new();
		let body = tree.create_element("body").unwrap();
		let text = tree.create_text_node("gone").unwrap();
		tree.append_child(&body, &text).unwrap();
		let fragment = tree.create_fragment().unwrap();

		tree.replace_child(&body, &fragment, &text).unwrap();

		assert_eq!(tree.child_count(&body), 0);
		assert_eq!(tree.parent(text), None);
	}

	#[test]
	fn moving_detaches() {
		let mut tree = MemoryTree::new();
		let left = tree.create_element("div").unwrap();
		let right = tree.create_element("div").unwrap();
		let span = tree.create_element("span").unwrap();
		tree.append_child(&left, &span).unwrap();

		tree.insert_before(&right, &span, None).unwrap();

		assert!(tree.children(left).is_empty());
		assert_eq!(tree.children(right), &[span]);
	}

	#[test]
	fn insert_before_reference() {
		let mut tree = MemoryTree::new();
		let ul = tree.create_element("ul").unwrap();
		let first = tree.create_element("li").unwrap();
		let second = tree.create_element("li").unwrap();
		tree.append_child(&ul, &second).unwrap();

		tree.insert_before(&ul, &first, Some(&second)).unwrap();

		assert_eq!(tree.children(ul), &[first, second]);
	}

	#[test]
	fn cycles_are_rejected() {
		let mut tree = MemoryTree::new();
		let outer = tree.create_element("div").unwrap();
		let inner = tree.create_element("div").unwrap();
		tree.append_child(&outer, &inner).unwrap();

		assert_eq!(
			tree.append_child(&inner, &outer),
			Err(MemoryError::HierarchyRequest { parent: inner, child: outer })
		);
		assert_eq!(
			tree.append_child(&outer, &outer),
			Err(MemoryError::HierarchyRequest { parent: outer, child: outer })
		);
	}

	#[test]
	fn text_nodes_are_leaves() {
		let mut tree = MemoryTree::new();
		let text = tree.create_text_node("leaf").unwrap();
		let other = tree.create_text_node("other").unwrap();

		assert_eq!(tree.append_child(&text, &other), Err(MemoryError::NotAParent(text)));
		assert_eq!(tree.set_attribute(&text, "id", "x"), Err(MemoryError::NotAnElement(text)));
	}

	#[test]
	fn removing_a_stranger_fails() {
		let mut tree = MemoryTree::new();
		let body = tree.create_element("body").unwrap();
		let text = tree.create_text_node("loose").unwrap();

		assert_eq!(tree.remove_child(&body, &text), Err(MemoryError::NotAChild { parent: body, child: text }));
		assert_eq!(tree.remove_child(&body, &NodeId(99)), Err(MemoryError::UnknownNode(NodeId(99))));
	}

	#[test]
	fn names_are_validated() {
		let mut tree = MemoryTree::new();
		assert_eq!(tree.create_element(""), Err(MemoryError::InvalidTag(String::new())));
		assert_eq!(tree.create_element("not a tag"), Err(MemoryError::InvalidTag("not a tag".to_owned())));
		let div = tree.create_element("my-widget").unwrap();
		assert_eq!(tree.set_attribute(&div, "1st", "x"), Err(MemoryError::InvalidAttributeName("1st".to_owned())));
		tree.set_attribute(&div, "data-x", "y").unwrap();
		assert_eq!(tree.attribute(div, "data-x"), Some("y"));
	}

	#[test]
	fn attributes_overwrite_in_place() {
		let mut tree = MemoryTree::new();
		let a = tree.create_element("a").unwrap();
		tree.set_attribute(&a, "href", "/one").unwrap();
		tree.set_attribute(&a, "title", "One").unwrap();
		tree.set_attribute(&a, "href", "/two").unwrap();
		tree.remove_attribute(&a, "missing").unwrap();

		assert_eq!(tree.attributes(a), &[("href".to_owned(), "/two".to_owned()), ("title".to_owned(), "One".to_owned())]);
	}

	#[test]
	fn html_is_escaped() {
		let mut tree = MemoryTree::new();
		let p = tree.create_element("p").unwrap();
		tree.set_attribute(&p, "title", "\"quoted\" & <b>").unwrap();
		let text = tree.create_text_node("1 < 2 & \"3\"").unwrap();
		tree.append_child(&p, &text).unwrap();

		assert_eq!(tree.to_html(p), r#"<p title="&quot;quoted&quot; &amp; &lt;b&gt;">1 &lt; 2 &amp; "3"</p>"#);
	}

	#[test]
	fn journal_records_in_order() {
		let mut tree = MemoryTree::new();
		let div = tree.create_element("div").unwrap();
		let text = tree.create_text_node("hi").unwrap();
		tree.append_child(&div, &text).unwrap();

		assert_eq!(
			tree.take_mutations(),
			vec![
				Mutation::CreateElement { node: div, tag: "div".to_owned() },
				Mutation::CreateText { node: text, text: "hi".to_owned() },
				Mutation::AppendChild { parent: div, child: text },
			]
		);
		assert!(tree.mutations().is_empty());
	}

	#[test]
	fn handles_count_up() {
		let mut tree = MemoryTree::new();
		let div = tree.create_element("div").unwrap();
		let text = tree.create_text_node("x").unwrap();
		let fragment = tree.create_fragment().unwrap();

		assert_eq!([div.index(), text.index(), fragment.index()], [0, 1, 2]);
		assert_eq!(fragment.to_string(), "#2");

		// Detaching doesn't free a handle.
		tree.append_child(&div, &text).unwrap();
		tree.remove_child(&div, &text).unwrap();
		assert_eq!(tree.create_element("p").unwrap().index(), 3);
	}
}
