pub mod consts;

/// Result type used by every fallible operation in the workspace.
pub type CustomResult<T, E> = error_stack::Result<T, E>;
