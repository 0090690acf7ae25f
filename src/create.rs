use crate::{loggable, render::DEFAULT_DEPTH_LIMIT, DisplayTree, Error, VNode};
use tracing::{error, instrument, trace_span};

/// Materializes `node` into a brand-new, detached live subtree.
///
/// [`VNode::Empty`] becomes an empty fragment, text becomes a text node and elements are created
/// with all of their attributes and (recursively) children.
///
/// # Errors
///
/// Iff the display tree rejects an operation or the tree is deeper than [`DEFAULT_DEPTH_LIMIT`].
pub fn create_element<T: DisplayTree>(tree: &mut T, node: &VNode) -> Result<T::Node, Error<T::Error>> {
	create_limited(tree, node, DEFAULT_DEPTH_LIMIT)
}

#[instrument(skip(tree, node))]
pub(crate) fn create_limited<T: DisplayTree>(tree: &mut T, node: &VNode, depth_limit: usize) -> Result<T::Node, Error<T::Error>> {
	if depth_limit == 0 {
		error!("Depth limit reached");
		return Err(Error::DepthLimit);
	}

	match node {
		VNode::Empty => {
			let span = trace_span!("Creating empty fragment");
			let _enter = span.enter();
			Ok(tree.create_fragment()?)
		}

		VNode::Text(text) => {
			let span = trace_span!("Creating text node", text = loggable(text));
			let _enter = span.enter();
			Ok(tree.create_text_node(text)?)
		}

		VNode::Element(element) => {
			let span = trace_span!("Creating element", tag = element.tag.as_str(), "props.len()" = element.props.len(), "children.len()" = element.children.len());
			let _enter = span.enter();

			let live = tree.create_element(&element.tag).map_err(|error| {
				error!("Failed to create <{}>: {}", element.tag, error);
				error
			})?;

			// Attributes are independent of each other, so map order doesn't matter.
			for (name, value) in &element.props {
				tree.set_attribute(&live, name, value)?;
			}

			for child in &element.children {
				let child = create_limited(tree, child, depth_limit - 1)?;
				tree.append_child(&live, &child)?;
			}

			Ok(live)
		}
	}
}
