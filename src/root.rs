use crate::{load::load_node, DisplayTree, Error, Options, Reconciler, VNode};
use tracing::{info, instrument, warn};

/// Attached to a specific container node, this `struct` keeps the container's first child in line with a description tree.
///
/// The container's first child position belongs to the [`Root`]. Other content in the container must come after it
/// and must not be touched while an update runs. With the default [`Insertion::Append`](`crate::Insertion::Append`),
/// the container must also be empty whenever the [`Root`] is, since new content is appended.
#[derive(Debug)]
pub struct Root<T: DisplayTree> {
	reconciler: Reconciler<T>,
	container: T::Node,
	current: VNode,
}

impl<T: DisplayTree> Root<T> {
	/// Creates a [`Root`] for an initially empty position.
	#[must_use]
	pub fn new(tree: T, container: T::Node) -> Self {
		Self::with_options(tree, container, Options::default())
	}

	#[must_use]
	pub fn with_options(tree: T, container: T::Node, options: Options) -> Self {
		Self {
			reconciler: Reconciler::with_options(tree, options),
			container,
			current: VNode::Empty,
		}
	}

	/// Creates a [`Root`] that adopts the container's existing first child (if any) as its current content.
	///
	/// # Errors
	///
	/// Iff the existing content can't be described. See [`load_node`].
	pub fn hydrate(tree: T, container: T::Node) -> Result<Self, Error<T::Error>> {
		let mut root = Self::new(tree, container);
		root.resync()?;
		Ok(root)
	}

	/// The description the live content currently reflects.
	#[must_use]
	pub fn current(&self) -> &VNode {
		&self.current
	}

	pub fn container(&self) -> &T::Node {
		&self.container
	}

	pub fn tree(&self) -> &T {
		self.reconciler.tree()
	}

	pub fn tree_mut(&mut self) -> &mut T {
		self.reconciler.tree_mut()
	}

	pub fn into_inner(self) -> T {
		self.reconciler.into_inner()
	}

	/// Reconciles the live content from the current description to `vdom`.
	///
	/// # Errors
	///
	/// See [`Reconciler::render`]. On failure, [`Root::current`] is left unchanged even though the live content may
	/// have been partially updated. Call [`Root::resync`] to recover.
	#[instrument(skip(self, vdom))]
	pub fn update(&mut self, vdom: VNode) -> Result<(), Error<T::Error>> {
		if let Err(error) = self.reconciler.render(&self.container, &vdom, &self.current, 0) {
			warn!("Update aborted, live content may be out of sync: {}", error);
			return Err(error);
		}
		self.current = vdom;
		info!("Live child count: {}", self.reconciler.tree().child_count(&self.container));
		Ok(())
	}

	/// Removes the live content.
	///
	/// # Errors
	///
	/// As [`Root::update`].
	pub fn unmount(&mut self) -> Result<(), Error<T::Error>> {
		self.update(VNode::Empty)
	}

	/// Replaces the current description with one read from the live content.
	///
	/// # Errors
	///
	/// Iff the live content can't be described. See [`load_node`].
	pub fn resync(&mut self) -> Result<(), Error<T::Error>> {
		let tree = self.reconciler.tree();
		self.current = match tree.child_at(&self.container, 0) {
			Some(first) => load_node(tree, &first)?,
			None => VNode::Empty,
		};
		Ok(())
	}
}
