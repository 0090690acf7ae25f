//! [`DisplayTree`] over a browser DOM.
//!
//! This compiles on all targets, but is only functional where [`web_sys`] is, i.e. in a browser on `wasm32`.

use crate::{DisplayTree, NodeKind};
use core::convert::TryInto;
use thiserror::Error;
use tracing::{error, trace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node, Text};

#[derive(Debug, Error)]
pub enum WebError {
	/// A DOM method threw.
	#[error("`{operation}` failed: {value:?}")]
	Js { operation: &'static str, value: JsValue },
	/// An attribute operation targeted a node that isn't an [***Element***](https://developer.mozilla.org/en-US/docs/Web/API/element).
	#[error("expected an element but found node type {0}")]
	NotAnElement(u16),
}

/// Drives the nodes of one [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document).
#[derive(Debug, Clone)]
pub struct WebTree {
	document: Document,
}

impl WebTree {
	#[must_use]
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// Uses the global window's document, if there is one.
	#[must_use]
	pub fn from_window() -> Option<Self> {
		web_sys::window().and_then(|window| window.document()).map(Self::new)
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}
}

fn js_error(operation: &'static str) -> impl FnOnce(JsValue) -> WebError {
	move |value| {
		error!("`{}` failed: {:?}", operation, value);
		WebError::Js { operation, value }
	}
}

fn element(node: &Node) -> Result<&Element, WebError> {
	node.dyn_ref::<Element>().ok_or_else(|| WebError::NotAnElement(node.node_type()))
}

impl DisplayTree for WebTree {
	type Node = Node;
	type Error = WebError;

	fn create_element(&mut self, tag: &str) -> Result<Node, WebError> {
		self.document.create_element(tag).map(Into::into).map_err(js_error("createElement"))
	}

	fn create_text_node(&mut self, text: &str) -> Result<Node, WebError> {
		Ok(self.document.create_text_node(text).into())
	}

	fn create_fragment(&mut self) -> Result<Node, WebError> {
		Ok(self.document.create_document_fragment().into())
	}

	fn set_attribute(&mut self, node: &Node, name: &str, value: &str) -> Result<(), WebError> {
		element(node)?.set_attribute(name, value).map_err(js_error("setAttribute"))
	}

	fn remove_attribute(&mut self, node: &Node, name: &str) -> Result<(), WebError> {
		element(node)?.remove_attribute(name).map_err(js_error("removeAttribute"))
	}

	fn append_child(&mut self, parent: &Node, child: &Node) -> Result<(), WebError> {
		parent.append_child(child).map(drop).map_err(js_error("appendChild"))
	}

	fn insert_before(&mut self, parent: &Node, child: &Node, reference: Option<&Node>) -> Result<(), WebError> {
		parent.insert_before(child, reference).map(drop).map_err(js_error("insertBefore"))
	}

	fn replace_child(&mut self, parent: &Node, new_child: &Node, old_child: &Node) -> Result<(), WebError> {
		parent.replace_child(new_child, old_child).map(drop).map_err(js_error("replaceChild"))
	}

	fn remove_child(&mut self, parent: &Node, child: &Node) -> Result<(), WebError> {
		parent.remove_child(child).map(drop).map_err(js_error("removeChild"))
	}

	fn child_count(&self, parent: &Node) -> usize {
		parent.child_nodes().length() as usize
	}

	fn child_at(&self, parent: &Node, index: usize) -> Option<Node> {
		parent.child_nodes().get(index.try_into().ok()?)
	}

	fn inspect(&self, node: &Node) -> NodeKind {
		if let Some(element) = node.dyn_ref::<Element>() {
			let attributes = element.attributes();
			NodeKind::Element {
				// `tag_name` is upper-cased for HTML elements.
				tag: element.local_name(),
				attributes: (0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| (attribute.name(), attribute.value())).collect(),
			}
		} else if let Some(text) = node.dyn_ref::<Text>() {
			NodeKind::Text(text.data())
		} else {
			trace!("Node type {} has no description counterpart.", node.node_type());
			NodeKind::Other
		}
	}
}
