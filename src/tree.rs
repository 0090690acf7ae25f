/// What a live node looks like from the outside, as far as description nodes are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	Element {
		tag: String,
		/// In display tree order.
		attributes: Vec<(String, String)>,
	},
	Text(String),
	/// Fragments, comments and anything else without a [`VNode`](`crate::VNode`) counterpart.
	Other,
}

/// The display tree capability consumed by the reconciler.
///
/// Implementations own their nodes. The reconciler only holds handles ([`DisplayTree::Node`])
/// for the duration of a single call and addresses children by position.
///
/// Appending or substituting a fragment must splice in the fragment's children instead,
/// the way the DOM does it. An empty fragment therefore adds nothing.
pub trait DisplayTree {
	/// A handle to a live node.
	type Node: Clone;
	type Error: std::error::Error + 'static;

	/// Creates a detached element node.
	///
	/// # Errors
	///
	/// Iff `tag` isn't accepted as element name.
	fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

	/// Creates a detached text node containing exactly `text`.
	///
	/// # Errors
	///
	/// Implementation-specific.
	fn create_text_node(&mut self, text: &str) -> Result<Self::Node, Self::Error>;

	/// Creates a detached, empty fragment.
	///
	/// # Errors
	///
	/// Implementation-specific.
	fn create_fragment(&mut self) -> Result<Self::Node, Self::Error>;

	/// Sets or overwrites one attribute of `element`.
	///
	/// # Errors
	///
	/// Iff `element` isn't an element or `name` isn't accepted as attribute name.
	fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str) -> Result<(), Self::Error>;

	/// Removes one attribute of `element`. Removing an absent attribute is not an error.
	///
	/// # Errors
	///
	/// Iff `element` isn't an element.
	fn remove_attribute(&mut self, element: &Self::Node, name: &str) -> Result<(), Self::Error>;

	/// Moves `child` to the end of `parent`'s children.
	///
	/// # Errors
	///
	/// Iff `parent` can't have children or the move would create a cycle.
	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

	/// Moves `child` in front of `reference`, or to the end of `parent`'s children if `reference` is [`None`].
	///
	/// # Errors
	///
	/// As [`DisplayTree::append_child`], and iff `reference` is not a child of `parent`.
	fn insert_before(&mut self, parent: &Self::Node, child: &Self::Node, reference: Option<&Self::Node>) -> Result<(), Self::Error>;

	/// Substitutes `new_child` for `old_child`, detaching the latter.
	///
	/// # Errors
	///
	/// As [`DisplayTree::append_child`], and iff `old_child` is not a child of `parent`.
	fn replace_child(&mut self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node) -> Result<(), Self::Error>;

	/// Detaches `child` from `parent`.
	///
	/// # Errors
	///
	/// Iff `child` is not a child of `parent`.
	fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

	fn child_count(&self, parent: &Self::Node) -> usize;

	fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;

	fn inspect(&self, node: &Self::Node) -> NodeKind;
}

impl<T: DisplayTree + ?Sized> DisplayTree for &mut T {
	type Node = T::Node;
	type Error = T::Error;

	fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error> {
		(**self).create_element(tag)
	}

	fn create_text_node(&mut self, text: &str) -> Result<Self::Node, Self::Error> {
		(**self).create_text_node(text)
	}

	fn create_fragment(&mut self) -> Result<Self::Node, Self::Error> {
		(**self).create_fragment()
	}

	fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str) -> Result<(), Self::Error> {
		(**self).set_attribute(element, name, value)
	}

	fn remove_attribute(&mut self, element: &Self::Node, name: &str) -> Result<(), Self::Error> {
		(**self).remove_attribute(element, name)
	}

	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error> {
		(**self).append_child(parent, child)
	}

	fn insert_before(&mut self, parent: &Self::Node, child: &Self::Node, reference: Option<&Self::Node>) -> Result<(), Self::Error> {
		(**self).insert_before(parent, child, reference)
	}

	fn replace_child(&mut self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node) -> Result<(), Self::Error> {
		(**self).replace_child(parent, new_child, old_child)
	}

	fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error> {
		(**self).remove_child(parent, child)
	}

	fn child_count(&self, parent: &Self::Node) -> usize {
		(**self).child_count(parent)
	}

	fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node> {
		(**self).child_at(parent, index)
	}

	fn inspect(&self, node: &Self::Node) -> NodeKind {
		(**self).inspect(node)
	}
}
