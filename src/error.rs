use thiserror::Error;

/// Internal failure modes of this allocator.
///
/// None of the public `alloc_*` functions ever surface this type directly
/// — an out-of-memory condition is reported to callers as a null pointer,
/// matching the conventional C `malloc` contract this crate imitates. It
/// exists so the growth routine has something structured to `log::error!`
/// before collapsing the failure into `None`/null.
#[derive(Debug, Error)]
pub enum AllocError {
  /// The OS growth primitive (`sbrk`) refused to extend the data segment.
  #[error("sbrk failed to extend the data segment by {requested} bytes")]
  Growth { requested: usize },
}
