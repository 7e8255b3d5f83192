//! Limits applied while decoding untrusted input.

/// Default maximum nesting depth of graph and node elements.
///
/// Decoding recurses once per nested `<graph>` or `<node>`; deeper input is
/// rejected with [`DecodeError::DepthExceeded`](crate::DecodeError::DepthExceeded)
/// instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 256;
