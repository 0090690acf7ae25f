use sapling_dom::{
	create_element, jsx,
	memory::{MemoryError, MemoryTree, Mutation},
	DisplayTree, Error, NodeKind, VElement, VNode, DEFAULT_DEPTH_LIMIT,
};

#[test]
fn text() {
	let mut tree = MemoryTree::new();
	let node = create_element(&mut tree, &VNode::from("Hello sapling-dom!")).unwrap();
	assert_eq!(tree.text(node), Some("Hello sapling-dom!"));
	assert_eq!(tree.inspect(&node), NodeKind::Text("Hello sapling-dom!".to_owned()));
}

#[test]
fn empty_is_an_empty_fragment() {
	let mut tree = MemoryTree::new();
	let body = tree.create_element("body").unwrap();

	let fragment = create_element(&mut tree, &VNode::Empty).unwrap();
	assert_eq!(tree.inspect(&fragment), NodeKind::Other);
	assert!(tree.children(fragment).is_empty());

	tree.append_child(&body, &fragment).unwrap();
	assert_eq!(tree.child_count(&body), 0);
}

#[test]
fn element_with_props() {
	let mut tree = MemoryTree::new();
	let div = create_element(&mut tree, &jsx!("div", { "a" => "1", "b" => "2" })).unwrap();

	assert_eq!(tree.tag(div), Some("div"));
	let mut attributes = tree.attributes(div).to_vec();
	attributes.sort();
	assert_eq!(attributes, vec![("a".to_owned(), "1".to_owned()), ("b".to_owned(), "2".to_owned())]);
	assert!(tree.children(div).is_empty());
}

#[test]
fn built_by_hand() {
	let vdom: VNode = VElement::new("a").with_prop("href", "/home").with_prop("rel", "start").with_child("Home").with_child(VNode::Empty).into();
	assert_eq!(vdom, jsx!("a", { "href" => "/home", "rel" => "start" }, "Home"));

	let mut tree = MemoryTree::new();
	let a = create_element(&mut tree, &vdom).unwrap();
	assert_eq!(tree.attribute(a, "href"), Some("/home"));
	assert_eq!(tree.attribute(a, "rel"), Some("start"));
	assert_eq!(tree.children(a).len(), 1);
}

#[test]
fn children_keep_their_order() {
	let mut tree = MemoryTree::new();
	let ul = create_element(
		&mut tree,
		&jsx!("ul", {},
			jsx!("li", {}, "one"),
			"two",
			jsx!("li", { "class" => "last" }, jsx!("b", {}, "three")),
		),
	)
	.unwrap();

	assert_eq!(tree.to_html(ul), r#"<ul><li>one</li>two<li class="last"><b>three</b></li></ul>"#);
	for &child in tree.children(ul) {
		assert_eq!(tree.parent(child), Some(ul));
	}
}

#[test]
fn builds_bottom_up_after_attributes() {
	let mut tree = MemoryTree::new();
	let p = create_element(&mut tree, &jsx!("p", { "id" => "x" }, "text")).unwrap();

	let mutations = tree.take_mutations();
	assert_eq!(mutations.len(), 4);
	assert_eq!(mutations[0], Mutation::CreateElement { node: p, tag: "p".to_owned() });
	assert_eq!(
		mutations[1],
		Mutation::SetAttribute {
			node: p,
			name: "id".to_owned(),
			value: "x".to_owned()
		}
	);
	assert!(matches!(mutations[2], Mutation::CreateText { .. }));
	assert!(matches!(mutations[3], Mutation::AppendChild { parent, .. } if parent == p));
}

#[test]
fn display_tree_errors_propagate() {
	let mut tree = MemoryTree::new();
	let result = create_element(&mut tree, &jsx!("section", {}, jsx!("not a tag")));
	assert!(matches!(result, Err(Error::Tree(MemoryError::InvalidTag(tag))) if tag == "not a tag"));
}

#[test]
fn depth_limit() {
	let mut vdom = VNode::from(VElement::new("div"));
	for _ in 0..DEFAULT_DEPTH_LIMIT - 1 {
		vdom = VElement::new("div").with_child(vdom).into();
	}
	let mut tree = MemoryTree::new();
	assert!(create_element(&mut tree, &vdom).is_ok());

	let vdom: VNode = VElement::new("div").with_child(vdom).into();
	assert!(matches!(create_element(&mut tree, &vdom), Err(Error::DepthLimit)));
}
