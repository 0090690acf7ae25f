#![doc(html_root_url = "https://docs.rs/sapling-dom/0.1.0")]
#![warn(clippy::pedantic)]
//! A small positional VDOM reconciler.
//!
//! Description trees ([`VNode`]) are materialized into a display tree with [`create_element`],
//! and live trees are patched in place with [`render`].
//!
//! The display tree itself is an injected capability ([`DisplayTree`]).
//! [`memory::MemoryTree`] works anywhere, [`web::WebTree`] drives a browser DOM through [`web_sys`].
//!
//! # Limitations
//!
//! Children are matched purely by position. There is no keyed reconciliation,
//! so inserting near the start of a long list rewrites every following sibling.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod attributes;
mod create;
mod error;
pub mod load;
pub mod memory;
mod render;
mod root;
mod tree;
mod vnode;
pub mod web;

pub use attributes::update_attributes;
pub use create::create_element;
pub use error::Error;
pub use render::{render, Insertion, Options, Reconciler, DEFAULT_DEPTH_LIMIT};
pub use root::Root;
pub use tree::{DisplayTree, NodeKind};
pub use vnode::{jsx, Props, VElement, VNode};

/// Text content or attribute values as they may appear in log fields.
pub(crate) fn loggable(value: &str) -> &str {
	if cfg!(feature = "dangerous-logging") {
		value
	} else {
		"<redacted>"
	}
}
