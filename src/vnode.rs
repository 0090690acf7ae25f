use hashbrown::HashMap;

/// Attribute names mapped to their values.
pub type Props = HashMap<String, String>;

/// A description node.
///
/// Description nodes are plain data. The reconciler only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
	/// Nothing. Materializes to an empty fragment.
	Empty,
	Text(String),
	Element(VElement),
}

/// A structured description node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VElement {
	pub tag: String,
	pub props: Props,
	pub children: Vec<VNode>,
}

impl VNode {
	#[must_use]
	pub fn is_empty(&self) -> bool {
		matches!(self, VNode::Empty)
	}

	#[must_use]
	pub fn as_text(&self) -> Option<&str> {
		match self {
			VNode::Text(text) => Some(text),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_element(&self) -> Option<&VElement> {
		match self {
			VNode::Element(element) => Some(element),
			_ => None,
		}
	}
}

impl Default for VNode {
	fn default() -> Self {
		VNode::Empty
	}
}

impl VElement {
	#[must_use]
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			props: Props::new(),
			children: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.props.insert(name.into(), value.into());
		self
	}

	/// Appends `child` unless it is [`VNode::Empty`].
	#[must_use]
	pub fn with_child(mut self, child: impl Into<VNode>) -> Self {
		let child = child.into();
		if !child.is_empty() {
			self.children.push(child);
		}
		self
	}
}

impl From<VElement> for VNode {
	fn from(element: VElement) -> Self {
		VNode::Element(element)
	}
}

impl From<&str> for VNode {
	fn from(text: &str) -> Self {
		VNode::Text(text.to_owned())
	}
}

impl From<String> for VNode {
	fn from(text: String) -> Self {
		VNode::Text(text)
	}
}

impl From<Option<VNode>> for VNode {
	fn from(node: Option<VNode>) -> Self {
		node.unwrap_or(VNode::Empty)
	}
}

/// Assembles a structured description node.
///
/// [`VNode::Empty`] children are skipped, so each child of the result occupies exactly one live position.
pub fn jsx(tag: impl Into<String>, props: Props, children: impl IntoIterator<Item = VNode>) -> VNode {
	VNode::Element(VElement {
		tag: tag.into(),
		props,
		children: children.into_iter().filter(|child| !child.is_empty()).collect(),
	})
}

/// Variadic front end for [`jsx()`](`crate::jsx()`).
///
/// `None` and [`VNode::Empty`] children are dropped rather than kept as placeholders,
/// so a conditional child that is absent shifts every following child one position to the front.
///
/// ```
/// use sapling_dom::{jsx, VNode};
///
/// let list = jsx!("ul", { "class" => "items" },
/// 	jsx!("li", {}, "one"),
/// 	jsx!("li", {}, "two"),
/// 	if false { Some(jsx!("li", {}, "three")) } else { None },
/// );
/// let list = list.as_element().unwrap();
/// assert_eq!(list.props["class"], "items");
/// assert_eq!(list.children.len(), 2);
/// assert_eq!(jsx!("br"), VNode::Element(sapling_dom::VElement::new("br")));
/// ```
#[macro_export]
macro_rules! jsx {
	($tag:expr, { $($name:expr => $value:expr),* $(,)? } $(, $child:expr)* $(,)?) => {{
		#[allow(unused_mut)]
		let mut props = $crate::Props::new();
		$(props.insert(::core::convert::Into::<::std::string::String>::into($name), ::core::convert::Into::<::std::string::String>::into($value));)*
		#[allow(unused_mut)]
		let mut children = ::std::vec::Vec::<$crate::VNode>::new();
		$(children.push(::core::convert::Into::<$crate::VNode>::into($child));)*
		$crate::jsx($tag, props, children)
	}};
	($tag:expr $(,)?) => {
		$crate::jsx($tag, $crate::Props::new(), ::std::vec::Vec::new())
	};
}
