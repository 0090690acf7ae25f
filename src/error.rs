use thiserror::Error;

/// Errors that abort a materialization, reconciliation or load pass.
///
/// The live tree is not rolled back. Whatever was mutated before the failure stays mutated.
#[derive(Debug, Error)]
pub enum Error<E>
where
	E: std::error::Error + 'static,
{
	/// The display tree rejected an operation.
	#[error("display tree operation failed: {0}")]
	Tree(#[from] E),
	/// There was no live child where the old description said there would be one.
	#[error("expected a live child at index {index}, but the parent has only {len}")]
	MissingChild { index: usize, len: usize },
	#[error("depth limit reached")]
	DepthLimit,
	/// A live node has no description node counterpart.
	#[error("live node at index {index} is neither an element nor text")]
	Unrecognized { index: usize },
}
