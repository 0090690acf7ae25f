use crate::{create::create_limited, loggable, update_attributes, DisplayTree, Error, Props, VNode};
use tracing::{error, instrument, level_filters::STATIC_MAX_LEVEL, trace, trace_span, warn, Level};

/// Maximum description tree depth (in levels) processed by one call, unless configured otherwise.
///
/// Patching recurses twice per level, so this has to fit a 1 MiB `wasm32` stack in unoptimized builds.
pub const DEFAULT_DEPTH_LIMIT: usize = 128;

/// Where a node that has no old counterpart goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
	/// Always append to the parent, regardless of the reconciled index.
	///
	/// This places the node correctly only if the index equals the parent's current child count,
	/// which is the case whenever new children are only added after all existing ones.
	Append,
	/// Insert before the live child currently at the reconciled index, or append if there is none.
	AtIndex,
}

impl Default for Insertion {
	fn default() -> Self {
		Insertion::Append
	}
}

/// [`Reconciler`] configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
	/// Nesting levels after which a pass fails with [`Error::DepthLimit`].
	pub depth_limit: usize,
	pub insertion: Insertion,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			depth_limit: DEFAULT_DEPTH_LIMIT,
			insertion: Insertion::default(),
		}
	}
}

impl Options {
	#[must_use]
	pub fn with_depth_limit(self, depth_limit: usize) -> Self {
		Self { depth_limit, ..self }
	}

	#[must_use]
	pub fn with_insertion(self, insertion: Insertion) -> Self {
		Self { insertion, ..self }
	}
}

/// Reconciles the live child of `parent` at `index` so that it reflects `new`, given that it currently reflects `old`,
/// with default [`Options`].
///
/// See [`Reconciler::render`].
///
/// # Errors
///
/// See [`Reconciler::render`].
pub fn render<T: DisplayTree>(tree: &mut T, parent: &T::Node, new: &VNode, old: &VNode, index: usize) -> Result<(), Error<T::Error>> {
	Reconciler::new(tree).render(parent, new, old, index)
}

/// Applies description tree changes to a [`DisplayTree`].
///
/// # Correct Use
///
/// Children are matched by position only. For each call, the live child of `parent` at `index` must be the one materialized from `old`
/// (if `old` is not [`VNode::Empty`]), and `parent` must not be mutated by anything else while a call is running.
#[derive(Debug)]
pub struct Reconciler<T> {
	tree: T,
	options: Options,
}

impl<T: DisplayTree> Reconciler<T> {
	#[must_use]
	pub fn new(tree: T) -> Self {
		Self::with_options(tree, Options::default())
	}

	#[must_use]
	pub fn with_options(tree: T, options: Options) -> Self {
		Self { tree, options }
	}

	#[must_use]
	pub fn options(&self) -> Options {
		self.options
	}

	pub fn tree(&self) -> &T {
		&self.tree
	}

	pub fn tree_mut(&mut self) -> &mut T {
		&mut self.tree
	}

	pub fn into_inner(self) -> T {
		self.tree
	}

	/// Materializes `node` into a detached live subtree. See [`create_element`](`crate::create_element`).
	///
	/// # Errors
	///
	/// Iff the display tree rejects an operation or the configured depth limit is exceeded.
	pub fn create_element(&mut self, node: &VNode) -> Result<T::Node, Error<T::Error>> {
		create_limited(&mut self.tree, node, self.options.depth_limit)
	}

	/// See [`update_attributes`](`crate::update_attributes`).
	///
	/// # Errors
	///
	/// Iff the display tree rejects an operation.
	pub fn update_attributes(&mut self, element: &T::Node, new: &Props, old: &Props) -> Result<(), Error<T::Error>> {
		update_attributes(&mut self.tree, element, new, old)
	}

	/// Reconciles the live child of `parent` at `index` so that it reflects `new`, given that it currently reflects `old`.
	///
	/// The first matching rule applies:
	///
	/// 1. `new` is empty: The live child is removed.
	/// 2. `old` is empty: `new` is materialized and inserted according to [`Options::insertion`].
	/// 3. Either side is text: Equal texts are left alone. Otherwise the live child is replaced with a materialization of `new`.
	/// 4. The tags differ: The live child is replaced with a materialization of `new`.
	/// 5. The live element is kept. Its attributes are updated and its children are reconciled position by position.
	///    Live children beyond the new child count are removed afterwards.
	///
	/// Only [`VNode::Empty`] counts as absent. An empty string is text, so rendering `""` over a live node replaces it with an empty text node.
	///
	/// # Errors
	///
	/// Iff the display tree rejects an operation, a live child the old description promises is missing,
	/// or the configured depth limit is exceeded.
	///
	/// The live tree is left as it was at the point of failure.
	pub fn render(&mut self, parent: &T::Node, new: &VNode, old: &VNode, index: usize) -> Result<(), Error<T::Error>> {
		self.render_limited(parent, new, old, index, self.options.depth_limit)
	}

	#[instrument(skip(self, parent, new, old))]
	fn render_limited(&mut self, parent: &T::Node, new: &VNode, old: &VNode, index: usize, depth_limit: usize) -> Result<(), Error<T::Error>> {
		if depth_limit == 0 {
			error!("Depth limit reached");
			return Err(Error::DepthLimit);
		}

		match (new, old) {
			(VNode::Empty, VNode::Empty) => {
				trace!("Neither side present. Nothing to do.");
				Ok(())
			}

			(VNode::Empty, _) => self.remove(parent, index),

			(_, VNode::Empty) => self.insert(parent, new, index, depth_limit),

			(VNode::Text(t_new), VNode::Text(t_old)) if t_new == t_old => {
				trace!("Text unchanged.");
				Ok(())
			}

			(VNode::Text(_), _) | (_, VNode::Text(_)) => {
				let span = trace_span!("Replacing text", new = ?new.as_text().map(loggable), old = ?old.as_text().map(loggable));
				let _enter = span.enter();
				self.replace(parent, new, index, depth_limit)
			}

			(VNode::Element(e_new), VNode::Element(e_old)) if e_new.tag != e_old.tag => {
				let span = trace_span!("Replacing element", new = e_new.tag.as_str(), old = e_old.tag.as_str());
				let _enter = span.enter();
				if STATIC_MAX_LEVEL >= Level::WARN && e_new.tag.eq_ignore_ascii_case(&e_old.tag) {
					warn!(
						"Recreating element due to different tag name casing: {:?} -> {:?}\n\
						Descriptions should spell each tag name consistently.",
						e_old.tag, e_new.tag
					);
				}
				self.replace(parent, new, index, depth_limit)
			}

			(VNode::Element(e_new), VNode::Element(e_old)) => {
				let span = trace_span!("Diffing element", tag = e_new.tag.as_str());
				let _enter = span.enter();
				let target = self.live_child(parent, index)?;
				update_attributes(&mut self.tree, &target, &e_new.props, &e_old.props)?;
				self.update_children(&target, &e_new.children, &e_old.children, depth_limit - 1)
			}
		}
	}

	fn update_children(&mut self, target: &T::Node, new: &[VNode], old: &[VNode], depth_limit: usize) -> Result<(), Error<T::Error>> {
		let empty = VNode::Empty;

		for (i, new_child) in new.iter().enumerate() {
			self.render_limited(target, new_child, old.get(i).unwrap_or(&empty), i, depth_limit)?;
		}

		// Back to front, so each index still addresses the child it was materialized as.
		for i in (new.len()..old.len()).rev() {
			self.render_limited(target, &empty, &old[i], i, depth_limit)?;
		}

		let surplus = self.tree.child_count(target).saturating_sub(new.len());
		if surplus > 0 {
			warn!("Found {} unexpected live child node(s) past the new description. Removing them.", surplus);
			for _ in 0..surplus {
				let extra = self.live_child(target, new.len())?;
				self.tree.remove_child(target, &extra)?;
			}
		}

		Ok(())
	}

	// Out of line: `render_limited`'s frame size bounds the usable depth.

	#[inline(never)]
	fn remove(&mut self, parent: &T::Node, index: usize) -> Result<(), Error<T::Error>> {
		let span = trace_span!("Removing");
		let _enter = span.enter();
		let target = self.live_child(parent, index)?;
		self.tree.remove_child(parent, &target)?;
		Ok(())
	}

	#[inline(never)]
	fn insert(&mut self, parent: &T::Node, new: &VNode, index: usize, depth_limit: usize) -> Result<(), Error<T::Error>> {
		let span = trace_span!("Creating", insertion = ?self.options.insertion);
		let _enter = span.enter();
		let live = create_limited(&mut self.tree, new, depth_limit)?;
		match self.options.insertion {
			Insertion::Append => self.tree.append_child(parent, &live)?,
			Insertion::AtIndex => {
				let reference = self.tree.child_at(parent, index);
				self.tree.insert_before(parent, &live, reference.as_ref())?;
			}
		}
		Ok(())
	}

	#[inline(never)]
	fn replace(&mut self, parent: &T::Node, new: &VNode, index: usize, depth_limit: usize) -> Result<(), Error<T::Error>> {
		let target = self.live_child(parent, index)?;
		let live = create_limited(&mut self.tree, new, depth_limit)?;
		self.tree.replace_child(parent, &live, &target)?;
		Ok(())
	}

	fn live_child(&self, parent: &T::Node, index: usize) -> Result<T::Node, Error<T::Error>> {
		self.tree.child_at(parent, index).ok_or_else(|| {
			let len = self.tree.child_count(parent);
			error!("Expected a live child at index {} but found only {}.", index, len);
			Error::MissingChild { index, len }
		})
	}
}
