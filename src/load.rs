//! Reads live trees back into description nodes.
//!
//! This is useful to adopt content that was rendered elsewhere, e.g. on a server, as the old description of a first update.

use crate::{render::DEFAULT_DEPTH_LIMIT, DisplayTree, Error, NodeKind, Props, VElement, VNode};
use tracing::{error, instrument, trace};

/// Describes `node` and its subtree.
///
/// # Errors
///
/// Iff `node` or any of its descendants is neither an element nor text ([`Error::Unrecognized`], with the index among its siblings),
/// or the subtree is deeper than [`DEFAULT_DEPTH_LIMIT`].
pub fn load_node<T: DisplayTree>(tree: &T, node: &T::Node) -> Result<VNode, Error<T::Error>> {
	load_limited(tree, node, 0, DEFAULT_DEPTH_LIMIT)
}

/// Describes each child of `parent`, in order.
///
/// # Errors
///
/// As [`load_node`].
pub fn load_child_nodes<T: DisplayTree>(tree: &T, parent: &T::Node) -> Result<Vec<VNode>, Error<T::Error>> {
	load_children_limited(tree, parent, DEFAULT_DEPTH_LIMIT)
}

#[instrument(skip(tree, node))]
fn load_limited<T: DisplayTree>(tree: &T, node: &T::Node, index: usize, depth_limit: usize) -> Result<VNode, Error<T::Error>> {
	if depth_limit == 0 {
		error!("Depth limit reached");
		return Err(Error::DepthLimit);
	}

	match tree.inspect(node) {
		NodeKind::Element { tag, attributes } => {
			trace!("Loading <{}>", tag);
			Ok(VNode::Element(VElement {
				tag,
				props: attributes.into_iter().collect::<Props>(),
				children: load_children_limited(tree, node, depth_limit - 1)?,
			}))
		}
		NodeKind::Text(text) => Ok(VNode::Text(text)),
		NodeKind::Other => {
			error!("Unrecognised live node at index {}.", index);
			Err(Error::Unrecognized { index })
		}
	}
}

fn load_children_limited<T: DisplayTree>(tree: &T, parent: &T::Node, depth_limit: usize) -> Result<Vec<VNode>, Error<T::Error>> {
	(0..tree.child_count(parent))
		.map(|i| match tree.child_at(parent, i) {
			Some(child) => load_limited(tree, &child, i, depth_limit),
			None => Err(Error::MissingChild { index: i, len: tree.child_count(parent) }),
		})
		.collect()
}
