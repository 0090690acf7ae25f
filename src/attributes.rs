use crate::{loggable, DisplayTree, Error, Props};
use tracing::{instrument, trace};

/// Makes `element`'s attributes match `new`, given that they currently match `old`.
///
/// Attributes whose value is unchanged are not written. `old` is only consulted to find removals and unchanged values.
///
/// # Errors
///
/// Iff the display tree rejects an operation. Attributes handled before that stay updated.
#[instrument(skip(tree, element, new, old), fields(new_len = new.len(), old_len = old.len()))]
pub fn update_attributes<T: DisplayTree>(tree: &mut T, element: &T::Node, new: &Props, old: &Props) -> Result<(), Error<T::Error>> {
	for (name, value) in new {
		if old.get(name) == Some(value) {
			continue;
		}
		trace!("Setting attribute {:?}={:?}", name, loggable(value));
		tree.set_attribute(element, name, value)?;
	}

	for name in old.keys() {
		if new.contains_key(name) {
			continue;
		}
		trace!("Removing attribute {:?}", name);
		tree.remove_attribute(element, name)?;
	}

	Ok(())
}
